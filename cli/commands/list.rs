use crate::cli_args::ListArgs;
use crate::load_config;
use crate::output;
use anyhow::{Context, Result};
use panorama_core::aggregate::NO_DESCRIPTION;
use panorama_core::config::expand_path;
use panorama_core::manifest::value_text;
use panorama_core::{Manifest, ManifestEntry};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepositoryListing {
    fn from_entry(entry: &ManifestEntry) -> Self {
        match entry.descriptor() {
            Ok(descriptor) => Self {
                name: descriptor.name,
                path: Some(descriptor.path),
                description: descriptor
                    .description
                    .as_ref()
                    .map_or_else(|| NO_DESCRIPTION.to_string(), value_text),
                error: None,
            },
            Err(e) => Self {
                name: entry.display_name().to_string(),
                path: None,
                description: NO_DESCRIPTION.to_string(),
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn handle_list_command(args: &ListArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(path) = &args.manifest.repos_yaml {
        config.general.manifest = expand_path(&path.to_string_lossy());
    }
    let manifest_path = config.get_manifest_path();
    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;

    let listings: Vec<RepositoryListing> = manifest
        .entries()
        .iter()
        .map(RepositoryListing::from_entry)
        .collect();

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&listings)
            .context("Failed to serialize repository listing")?;
        output::write_to_stdout(&json)
    } else {
        output::print_listing_table(&listings);
        Ok(())
    }
}
