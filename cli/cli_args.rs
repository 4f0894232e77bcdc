use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigFileOpts {
    #[arg(
        long = "config",
        help = "Path of the TOML config file (default: ./panorama.toml if present).",
        value_name = "CONFIG_FILE",
        conflicts_with = "no_config",
        help_heading = "Configuration"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Configuration"
    )]
    pub no_config: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ManifestOpts {
    #[arg(
        long = "repos-yaml",
        help = "Path to the repos.yaml manifest [default: config/repos.yaml].",
        value_name = "PATH",
        help_heading = "Manifest"
    )]
    pub repos_yaml: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Aggregate documentation and structure from many repositories.",
    long_about = "panorama reads a manifest of repositories and produces one consolidated \ncontext document with each repository's metadata, directory structure and \ndocumentation. Code and tests are intentionally left out.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  panorama collect --repos-yaml config/repos.yaml --output-dir output\n  panorama list -f json\n  panorama sync-config --from ../bill-of-materials/repos.yaml",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "c",
        about = "Collect documentation from every repository into one document."
    )]
    Collect(CollectArgs),

    #[command(
        visible_alias = "ls",
        about = "List the repositories declared in the manifest."
    )]
    List(ListArgs),

    #[command(about = "Copy the manifest from its upstream source of truth.")]
    SyncConfig(SyncConfigArgs),

    #[command(about = "Show or save the default configuration file.")]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    #[clap(flatten)]
    pub config: ConfigFileOpts,
    #[clap(flatten)]
    pub manifest: ManifestOpts,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Output directory for the generated document [default: output].",
        help_heading = "Output Control"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'f', long, help = "Output format (json currently carries the markdown body).", value_name = "FORMAT", value_parser = ["md", "json"], help_heading = "Output Control")]
    pub format: Option<String>,

    #[arg(
        long,
        help = "Print the document to standard output instead of saving it.",
        help_heading = "Output Control"
    )]
    pub stdout: bool,

    #[arg(
        long,
        value_name = "DEPTH",
        help = "Maximum depth of the structure listing [default: 3].",
        help_heading = "Output Control"
    )]
    pub max_depth: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    pub config: ConfigFileOpts,
    #[clap(flatten)]
    pub manifest: ManifestOpts,

    #[arg(short = 'f', long, help = "Listing format.", value_name = "FORMAT", value_parser = ["table", "json"], default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug, Clone)]
pub struct SyncConfigArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = "../bill-of-materials/repos.yaml",
        help = "Upstream manifest to copy from."
    )]
    pub from: String,

    #[arg(
        long,
        value_name = "PATH",
        default_value = "config/repos.yaml",
        help = "Local manifest to overwrite."
    )]
    pub to: String,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(long, help = "Save the default config to ./panorama.toml (overwrites).")]
    pub save: bool,
}
