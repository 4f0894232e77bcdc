use crate::cli_args::CollectArgs;
use crate::load_config;
use crate::output;
use anyhow::{Context, Result};
use log;
use panorama_core::config::expand_path;
use panorama_core::{Collector, Config, Manifest, OutputFormat};

pub fn handle_collect_command(args: &CollectArgs, quiet: bool) -> Result<()> {
    let config = merge_config_with_cli_overrides(load_config(&args.config)?, args);
    let format: OutputFormat = config.get_output_format()?;

    let manifest_path = config.get_manifest_path();
    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;

    let document = Collector::from_config(&config).collect_all(&manifest);

    if args.stdout {
        output::write_to_stdout(&format.render(&document))?;
    } else {
        output::save_document(&config.get_output_dir(), format, &document, quiet)?;
    }
    log::info!("Panorama collection completed successfully!");
    Ok(())
}

fn merge_config_with_cli_overrides(mut config: Config, args: &CollectArgs) -> Config {
    log::trace!("Applying collect command CLI overrides to config...");
    if let Some(path) = &args.manifest.repos_yaml {
        config.general.manifest = expand_path(&path.to_string_lossy());
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = expand_path(&dir.to_string_lossy());
    }
    if let Some(format) = &args.format {
        config.output.format = format.clone();
    }
    if let Some(depth) = args.max_depth {
        config.tree.max_depth = depth;
    }
    config
}
