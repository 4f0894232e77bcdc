pub mod aggregate;
pub mod collect;
pub mod config;
pub mod error;
pub mod manifest;
pub mod policy;
pub mod reader;
pub mod section;
pub mod tree;

pub use aggregate::{RepositoryAggregator, RepositoryFailure};
pub use collect::{Collector, OutputFormat, write_document};
pub use config::Config;
pub use error::{AppError, Result};
pub use manifest::{
    DocFiles, IntegrationQuality, Manifest, ManifestEntry, RepositoryDescriptor, SyncReport,
    sync_manifest,
};
pub use policy::{Category, should_include};
pub use reader::{AbsentReason, FileContent, read_content};
pub use section::format_section;
pub use tree::render_tree;
