use crate::config::expand_path;
use crate::error::{AppError, Result};
use crate::manifest::{IntegrationQuality, ManifestEntry, RepositoryDescriptor, value_text};
use crate::policy::{Category, DOCUMENTATION_PREFIX};
use crate::reader::read_content;
use crate::section::format_section;
use crate::tree::render_tree;
use log;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

pub const NO_DESCRIPTION: &str = "No description provided";
pub const STRUCTURE_HEADING: &str = "## Repository Structure";
pub const DOCUMENTATION_HEADING: &str = "## Documentation";
pub const CONTEXT_FILES_HEADING: &str = "## Key Configuration Files";

/// A repository section that could not be produced.
#[derive(Debug)]
pub struct RepositoryFailure {
    pub name: String,
    pub source: AppError,
}

impl fmt::Display for RepositoryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.source)
    }
}

impl std::error::Error for RepositoryFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub fn banner() -> String {
    "=".repeat(80)
}

#[derive(Debug, Clone)]
pub struct RepositoryAggregator {
    max_depth: usize,
}

impl RepositoryAggregator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Produces the section for one manifest entry. Missing files are skipped
    /// inside; only a malformed entry or an unusable path fails the section.
    pub fn collect(&self, entry: &ManifestEntry) -> std::result::Result<String, RepositoryFailure> {
        let failure = |source: AppError| RepositoryFailure {
            name: entry.display_name().to_string(),
            source,
        };
        let descriptor = entry.descriptor().map_err(failure)?;
        self.render(&descriptor).map_err(failure)
    }

    pub fn render(&self, descriptor: &RepositoryDescriptor) -> Result<String> {
        let repo_path = resolve_repo_path(&descriptor.path)?;
        log::info!("Processing repository: {}", descriptor.name);
        log::debug!("Resolved {} to {}", descriptor.path, repo_path.display());

        let mut section = String::new();
        let rule = banner();
        write!(section, "\n{}\n# {}\n{}\n\n", rule, descriptor.name, rule)?;
        write!(
            section,
            "**Description:** {}\n\n",
            descriptor
                .description
                .as_ref()
                .map_or_else(|| NO_DESCRIPTION.to_string(), value_text)
        )?;

        if let Some(remotes) = &descriptor.remotes {
            section.push_str("**Remotes:**\n");
            for (remote, url) in remotes {
                writeln!(section, "- {}: {}", remote, value_text(url))?;
            }
            section.push('\n');
        }

        if let Some(repo_type) = &descriptor.repo_type {
            write!(section, "**Type:** {}\n\n", value_text(repo_type))?;
        }

        if let Some(quality) = &descriptor.integration_quality {
            write_integration_quality(&mut section, quality)?;
        }

        write!(
            section,
            "{}\n\n```\n{}\n```\n\n",
            STRUCTURE_HEADING,
            render_tree(&repo_path, self.max_depth)
        )?;

        if let Some(documentation) = &descriptor.documentation {
            write!(section, "{}\n\n", DOCUMENTATION_HEADING)?;
            for (label, files) in documentation {
                let category = format!("{}/{}", DOCUMENTATION_PREFIX, label);
                for rel in files.paths() {
                    append_file(&mut section, &repo_path.join(rel), &category);
                }
            }
        }

        if let Some(context_files) = &descriptor.context_files {
            write!(section, "{}\n\n", CONTEXT_FILES_HEADING)?;
            for (label, files) in context_files {
                let category = Category::parse(label);
                if category.is_excluded() {
                    log::debug!("Skipping '{}' group of {}", label, descriptor.name);
                    continue;
                }
                write!(section, "### {}\n\n", title_case(label))?;
                for rel in files {
                    let file_path = repo_path.join(rel);
                    if !category.admits(&file_path) {
                        log::debug!(
                            "Not including {} under '{}'",
                            file_path.display(),
                            label
                        );
                        continue;
                    }
                    append_file(&mut section, &file_path, label);
                }
            }
        }

        Ok(section)
    }
}

fn append_file(section: &mut String, path: &Path, category: &str) {
    if let Some(content) = read_content(path).into_text() {
        section.push_str(&format_section(path, &content, category));
    }
}

fn write_integration_quality(section: &mut String, quality: &IntegrationQuality) -> fmt::Result {
    section.push_str("**Integration Quality:**\n");
    for (key, value) in &quality.metrics {
        writeln!(section, "- {}: {}", humanize_key(key), value_text(value))?;
    }
    if let Some(notes) = &quality.notes {
        writeln!(section, "- Notes: {}", value_text(notes))?;
    }
    section.push('\n');
    Ok(())
}

/// Expands `~` and makes the path absolute. Symlinks are resolved when the
/// path exists; a missing path is kept as-is so the tree can report it.
pub fn resolve_repo_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_path(raw);
    let absolute = std::path::absolute(&expanded).map_err(|e| AppError::RepositoryPath {
        path: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(absolute.canonicalize().unwrap_or(absolute))
}

/// `test_coverage` -> `Test Coverage`
pub fn humanize_key(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
