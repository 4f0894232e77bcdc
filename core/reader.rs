use log;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Why a file produced no content. Only used for diagnostics; callers skip
/// every absent file the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    NotFound,
    Empty,
    Undecodable,
    Io(String),
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsentReason::NotFound => write!(f, "not found"),
            AbsentReason::Empty => write!(f, "empty"),
            AbsentReason::Undecodable => write!(f, "not valid UTF-8"),
            AbsentReason::Io(detail) => write!(f, "I/O error: {}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Absent(AbsentReason),
}

impl FileContent {
    pub fn into_text(self) -> Option<String> {
        match self {
            FileContent::Text(text) => Some(text),
            FileContent::Absent(_) => None,
        }
    }
}

/// Reads a file as UTF-8 text. Never fails: every problem becomes
/// `FileContent::Absent` and is logged.
pub fn read_content(path: &Path) -> FileContent {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("File not found: {}", path.display());
            return FileContent::Absent(AbsentReason::NotFound);
        }
        Err(e) => {
            log::error!("Error reading file {}: {}", path.display(), e);
            return FileContent::Absent(AbsentReason::Io(e.to_string()));
        }
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(
                "Could not decode file (likely binary): {} ({})",
                path.display(),
                e.utf8_error()
            );
            return FileContent::Absent(AbsentReason::Undecodable);
        }
    };

    if text.trim().is_empty() {
        log::warn!("Empty file: {}", path.display());
        return FileContent::Absent(AbsentReason::Empty);
    }

    log::trace!("Read {} bytes from {}", text.len(), path.display());
    FileContent::Text(text)
}
