use log;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

pub const DOCUMENTATION_PREFIX: &str = "documentation";

/// Suffixes admitted for `config` groups.
pub const CONFIG_SUFFIXES: &[&str] = &["yaml", "yml", "json", "txt"];
/// Suffixes admitted for `examples` groups and any unrecognised label.
pub const DOCUMENT_SUFFIXES: &[&str] = &["md", "yaml", "yml", "json", "txt"];

/// A file group label from the manifest, classified for inclusion decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Any label starting with `documentation`, e.g. `documentation/guides`.
    Documentation(String),
    Config,
    Data,
    Examples,
    Code,
    Tests,
    Other(String),
}

impl Category {
    pub fn parse(label: &str) -> Self {
        if label.starts_with(DOCUMENTATION_PREFIX) {
            return Category::Documentation(label.to_string());
        }
        match label {
            "config" => Category::Config,
            "data" => Category::Data,
            "examples" => Category::Examples,
            "code" => Category::Code,
            "tests" => Category::Tests,
            other => Category::Other(other.to_string()),
        }
    }

    /// Implementation detail never makes it into the document.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Category::Code | Category::Tests)
    }

    pub fn admits(&self, path: &Path) -> bool {
        match self {
            Category::Documentation(_) => true,
            Category::Config => has_suffix(path, CONFIG_SUFFIXES),
            Category::Data => {
                path.to_string_lossy().contains("schema") || has_suffix(path, DOCUMENT_SUFFIXES)
            }
            Category::Code | Category::Tests => false,
            Category::Examples | Category::Other(_) => has_suffix(path, DOCUMENT_SUFFIXES),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Documentation(label) | Category::Other(label) => f.write_str(label),
            Category::Config => f.write_str("config"),
            Category::Data => f.write_str("data"),
            Category::Examples => f.write_str("examples"),
            Category::Code => f.write_str("code"),
            Category::Tests => f.write_str("tests"),
        }
    }
}

pub fn should_include(path: &Path, label: &str) -> bool {
    let admitted = Category::parse(label).admits(path);
    log::trace!(
        "Inclusion decision for {} under '{}': {}",
        path.display(),
        label,
        admitted
    );
    admitted
}

/// Case-sensitive match of the final extension against an allow-list.
pub fn has_suffix(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| allowed.contains(&ext))
}
