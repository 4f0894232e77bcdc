use std::ffi::OsStr;
use std::path::Path;

pub fn display_language(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "md" => "markdown",
        "yaml" | "yml" => "yaml",
        "json" => "json",
        _ => "text",
    }
}

/// Renders one file as a labelled block: heading, path, category and the raw
/// content in a fenced block. Fence sequences inside `content` are not escaped.
pub fn format_section(path: &Path, content: &str, category: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut section = format!("\n### {}\n\n", file_name);
    section.push_str(&format!("**Path:** `{}`\n", path.display()));
    section.push_str(&format!("**Category:** {}\n\n", category));
    section.push_str(&format!(
        "```{}\n{}\n```\n",
        display_language(path),
        content
    ));
    section
}
