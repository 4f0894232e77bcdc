use crate::cli_args::ConfigArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use panorama_core::Config;
use panorama_core::config::DEFAULT_CONFIG_FILENAME;
use std::fs;

pub fn handle_config_command(args: &ConfigArgs, quiet: bool) -> Result<()> {
    let content = Config::default()
        .to_toml_string()
        .context("Failed to serialize default configuration")?;

    if args.save {
        fs::write(DEFAULT_CONFIG_FILENAME, &content)
            .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILENAME))?;
        if !quiet {
            println!(
                "{} Default configuration saved to: {}",
                "✅".green(),
                DEFAULT_CONFIG_FILENAME.blue()
            );
        }
    } else {
        print!("{}", content);
    }
    Ok(())
}
