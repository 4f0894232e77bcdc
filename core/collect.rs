use crate::aggregate::{RepositoryAggregator, banner};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::manifest::Manifest;
use log;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ERROR_HEADING: &str = "## Error Processing Repository";
pub const FOOTER_TITLE: &str = "# End of Panorama Context";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    /// Written with the Markdown body until a structured encoding exists.
    Json,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "context.md",
            OutputFormat::Json => "context.json",
        }
    }

    pub fn render(&self, document: &str) -> String {
        match self {
            OutputFormat::Markdown | OutputFormat::Json => document.to_string(),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::InvalidArgument(format!(
                "Unsupported output format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => f.write_str("md"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Runs the aggregator over every manifest entry, in order, and wraps the
/// result in the document header and footer.
#[derive(Debug, Clone)]
pub struct Collector {
    ecosystem: String,
    aggregator: RepositoryAggregator,
}

impl Collector {
    pub fn new(ecosystem: impl Into<String>, max_depth: usize) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            aggregator: RepositoryAggregator::new(max_depth),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.general.ecosystem.clone(), config.tree.max_depth)
    }

    pub fn collect_all(&self, manifest: &Manifest) -> String {
        log::info!("Starting panorama collection...");
        let mut content = self.header(manifest);

        for entry in manifest.entries() {
            match self.aggregator.collect(entry) {
                Ok(section) => content.push_str(&section),
                Err(failure) => {
                    log::error!(
                        "Error processing repository {}: {}",
                        failure.name,
                        failure.source
                    );
                    content.push_str(&format!("\n{}\n\n", ERROR_HEADING));
                    content.push_str(&format!("Repository: {}\n", failure.name));
                    content.push_str(&format!("Error: {}\n\n", failure.source));
                }
            }
        }

        let rule = banner();
        content.push_str(&format!("\n{}\n{}\n{}\n", rule, FOOTER_TITLE, rule));
        log::info!("Collected {} repositories.", manifest.len());
        content
    }

    fn header(&self, manifest: &Manifest) -> String {
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let mut header = format!("# {} - Panorama Context\n\n", self.ecosystem);
        header.push_str(&format!(
            "This document aggregates high-level documentation and repository structure \
             from all repositories in the {} ecosystem. It serves as a concise reference \
             for AI agents, onboarding tools, and internal dashboards.\n\n",
            self.ecosystem
        ));
        header.push_str(&format!("Generated on: {}\n", cwd));
        header.push_str(&format!("Source: {}\n\n", manifest.source().display()));
        header.push_str(&format!("Total repositories: {}\n\n", manifest.len()));
        header.push_str(
            "**Note:** This context focuses on documentation and structure only. \
             Code implementation details are excluded for conciseness.\n\n",
        );
        header
    }
}

/// Writes the document into `output_dir` under the format's file name.
pub fn write_document(output_dir: &Path, format: OutputFormat, document: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| AppError::DirCreation {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let output_file = output_dir.join(format.file_name());
    fs::write(&output_file, format.render(document)).map_err(|e| AppError::FileWrite {
        path: output_file.clone(),
        source: e,
    })?;
    log::info!("Output written to: {}", output_file.display());
    Ok(output_file)
}
