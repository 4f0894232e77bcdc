use crate::commands::list::RepositoryListing;
use anyhow::{Context, Result};
use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use panorama_core::{OutputFormat, write_document};
use std::io::{self, Write};
use std::path::Path;

pub fn save_document(
    output_dir: &Path,
    format: OutputFormat,
    document: &str,
    quiet: bool,
) -> Result<()> {
    let path = write_document(output_dir, format, document)?;
    if !quiet {
        println!(
            "{} Context saved to: {}",
            "✅".green(),
            path.display().to_string().blue()
        );
    }
    Ok(())
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

pub fn print_listing_table(listings: &[RepositoryListing]) {
    if listings.is_empty() {
        println!("{}", "(No repositories in manifest)".yellow());
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::Green),
        Cell::new("Path").fg(Color::Green),
        Cell::new("Description").fg(Color::Green),
    ]);
    for listing in listings {
        let path_cell = match (&listing.path, &listing.error) {
            (Some(path), _) => Cell::new(path).fg(Color::Cyan),
            (None, Some(error)) => Cell::new(format!("invalid: {}", error)).fg(Color::Red),
            (None, None) => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(&listing.name),
            path_cell,
            Cell::new(&listing.description).fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
    println!("{} repositories", listings.len());
}
