use crate::policy::has_suffix;
use log;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub const NO_ACCESSIBLE_FILES: &str = "No accessible files";
pub const PERMISSION_DENIED_MARKER: &str = "🔒 (permission denied)";

/// Directory names never rendered or descended into, besides dot-entries.
pub const EXCLUDED_DIRS: &[&str] = &["__pycache__", "node_modules", ".git", "build", "dist"];

/// File suffixes worth showing in the structure listing.
pub const TREE_SUFFIXES: &[&str] = &["md", "yaml", "yml", "json", "txt", "py", "sh", "zsh"];

const INDENT: &str = "  ";

fn permission_denied_line(level: usize) -> String {
    format!("{}{}", INDENT.repeat(level), PERMISSION_DENIED_MARKER)
}

fn is_excluded(entry: &DirEntry) -> bool {
    is_excluded_name(entry.file_name())
}

pub fn is_excluded_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
}

/// Renders an indented listing of `root`, children sorted by name. Entries at
/// depth 0 are the root's children; nothing deeper than `max_depth` is shown.
/// Returns [`NO_ACCESSIBLE_FILES`] when nothing is renderable.
pub fn render_tree(root: &Path, max_depth: usize) -> String {
    log::debug!(
        "Rendering structure of {} (max depth {})",
        root.display(),
        max_depth
    );
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth + 1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));

    let mut lines: Vec<String> = Vec::new();
    for entry_result in walker {
        match entry_result {
            Ok(entry) => {
                let indent = INDENT.repeat(entry.depth() - 1);
                let name = entry.file_name().to_string_lossy();
                if entry.file_type().is_dir() {
                    lines.push(format!("{}📁 {}/", indent, name));
                    // The walker does not open directories on the last level.
                    if entry.depth() == max_depth + 1 {
                        if let Err(e) = fs::read_dir(entry.path()) {
                            if e.kind() == ErrorKind::PermissionDenied {
                                lines.push(permission_denied_line(entry.depth()));
                            }
                        }
                    }
                } else if entry.file_type().is_file() && has_suffix(entry.path(), TREE_SUFFIXES) {
                    lines.push(format!("{}📄 {}", indent, name));
                } else {
                    log::trace!("Not listing {}", entry.path().display());
                }
            }
            Err(e) => {
                let denied = e
                    .io_error()
                    .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied);
                if denied {
                    // Marker sits one level below the directory that refused listing.
                    let level = e
                        .path()
                        .and_then(|p| p.strip_prefix(root).ok())
                        .map_or(0, |rel| rel.components().count());
                    lines.push(permission_denied_line(level));
                } else {
                    log::warn!("Error walking {}: {}", root.display(), e);
                }
            }
        }
    }

    if lines.is_empty() {
        log::debug!("No accessible files under {}", root.display());
        NO_ACCESSIBLE_FILES.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn renders_sorted_nested_listing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "docs/guide.md");
        touch(dir.path(), "docs/api/index.yaml");
        touch(dir.path(), "bootstrap.sh");

        let tree = render_tree(dir.path(), 3);
        let expected = [
            "📄 README.md",
            "📄 bootstrap.sh",
            "📁 docs/",
            "  📁 api/",
            "    📄 index.yaml",
            "  📄 guide.md",
        ]
        .join("\n");
        assert_eq!(tree, expected);
    }

    #[test]
    fn hidden_and_artifact_directories_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".secret/inner/notes.md");
        touch(dir.path(), ".env.json");
        touch(dir.path(), "node_modules/pkg/package.json");
        touch(dir.path(), "__pycache__/mod.txt");
        touch(dir.path(), "build/out.txt");
        touch(dir.path(), "dist/bundle.json");
        touch(dir.path(), "src/app.py");

        let tree = render_tree(dir.path(), 3);
        assert_eq!(tree, "📁 src/\n  📄 app.py");
        for hidden in [".secret", "inner", "notes.md", "node_modules", "__pycache__", "dist"] {
            assert!(!tree.contains(hidden), "tree leaked {}", hidden);
        }
    }

    #[test]
    fn unlisted_suffixes_are_omitted_but_directories_kept() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lib/core.rs");
        touch(dir.path(), "Cargo.toml");
        touch(dir.path(), "setup.zsh");

        let tree = render_tree(dir.path(), 3);
        assert_eq!(tree, "📁 lib/\n📄 setup.zsh");
    }

    #[test]
    fn depth_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a/b/c/d/e/deep.md");
        touch(dir.path(), "a/b/c/d/shallow.md");

        let tree = render_tree(dir.path(), 3);
        assert!(tree.contains("      📁 d/"));
        assert!(!tree.contains("e/"));
        assert!(!tree.contains("deep.md"));
        assert!(!tree.contains("shallow.md"));

        let shallow = render_tree(dir.path(), 0);
        assert_eq!(shallow, "📁 a/");
    }

    #[test]
    fn empty_or_missing_root_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(render_tree(dir.path(), 3), NO_ACCESSIBLE_FILES);
        assert_eq!(render_tree(&dir.path().join("missing"), 3), NO_ACCESSIBLE_FILES);

        touch(dir.path(), ".hidden/only.md");
        assert_eq!(render_tree(dir.path(), 3), NO_ACCESSIBLE_FILES);
    }

    /// Locks `dir` and returns false when the lock has no effect (e.g. root).
    #[cfg(unix)]
    fn lock(dir: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(dir).is_ok() {
            unlock(dir);
            return false;
        }
        true
    }

    #[cfg(unix)]
    fn unlock(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_renders_marker() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_first.md");
        touch(dir.path(), "docs/locked/secret.md");
        touch(dir.path(), "docs/open.md");
        touch(dir.path(), "z_last.md");
        let locked = dir.path().join("docs/locked");
        if !lock(&locked) {
            eprintln!("skipping: permissions are not enforced for this user");
            return;
        }

        let tree = render_tree(dir.path(), 3);
        unlock(&locked);

        let expected = [
            "📄 a_first.md",
            "📁 docs/",
            "  📁 locked/",
            "    🔒 (permission denied)",
            "  📄 open.md",
            "📄 z_last.md",
        ]
        .join("\n");
        assert_eq!(tree, expected);
        assert!(!tree.contains("secret.md"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_on_last_level_renders_marker() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "locked/inner.md");
        touch(dir.path(), "readme.md");
        let locked = dir.path().join("locked");
        if !lock(&locked) {
            eprintln!("skipping: permissions are not enforced for this user");
            return;
        }

        let tree = render_tree(dir.path(), 0);
        unlock(&locked);

        assert_eq!(tree, "📁 locked/\n  🔒 (permission denied)\n📄 readme.md");
    }

    #[test]
    fn excluded_names() {
        assert!(is_excluded_name(OsStr::new(".git")));
        assert!(is_excluded_name(OsStr::new(".cache")));
        assert!(is_excluded_name(OsStr::new("build")));
        assert!(!is_excluded_name(OsStr::new("builder")));
    }
}
