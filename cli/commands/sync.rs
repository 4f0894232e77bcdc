use crate::cli_args::SyncConfigArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use panorama_core::config::expand_path;
use panorama_core::sync_manifest;

pub fn handle_sync_command(args: &SyncConfigArgs, quiet: bool) -> Result<()> {
    let from = expand_path(&args.from);
    let to = expand_path(&args.to);
    let report = sync_manifest(&from, &to)
        .with_context(|| format!("Failed to update {} from {}", to.display(), from.display()))?;

    if !quiet {
        println!(
            "{} Updated {} from {}",
            "✅".green(),
            report.destination.display().to_string().blue(),
            from.display()
        );
        println!("   Size: {} bytes", report.bytes);
        if let Some(modified) = report.modified {
            println!("   Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    Ok(())
}
