use crate::error::{AppError, Result};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use log;
use serde::Deserialize;
use serde_yml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const UNKNOWN_REPOSITORY: &str = "unknown";

/// One repository as described in the manifest. Only `name` and `path` are
/// required; absent optional fields produce no output. Display-only fields are
/// kept as raw YAML so any scalar renders instead of failing the entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub remotes: Option<IndexMap<String, Value>>,
    #[serde(default, rename = "type")]
    pub repo_type: Option<Value>,
    #[serde(default)]
    pub integration_quality: Option<IntegrationQuality>,
    #[serde(default)]
    pub documentation: Option<IndexMap<String, DocFiles>>,
    #[serde(default)]
    pub context_files: Option<IndexMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DocFiles {
    Single(String),
    Many(Vec<String>),
}

impl DocFiles {
    pub fn paths(&self) -> Vec<&str> {
        match self {
            DocFiles::Single(path) => vec![path.as_str()],
            DocFiles::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntegrationQuality {
    #[serde(default)]
    pub notes: Option<Value>,
    #[serde(flatten)]
    pub metrics: IndexMap<String, Value>,
}

/// Text for a manifest value: scalars as written, collections as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// A raw manifest element. Typed parsing is deferred so that one malformed
/// entry only affects its own section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ManifestEntry(Value);

impl ManifestEntry {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNKNOWN_REPOSITORY)
    }

    pub fn descriptor(&self) -> Result<RepositoryDescriptor> {
        Ok(serde_yml::from_value(self.0.clone())?)
    }
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    repos: Option<Vec<ManifestEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    source: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading manifest from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::ManifestNotFound(path.to_path_buf())
            } else {
                AppError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let manifest = Self::from_yaml_str(&content, path)?;
        log::info!("Loaded {} repository entries.", manifest.len());
        Ok(manifest)
    }

    pub fn from_yaml_str(content: &str, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let raw: RawManifest =
            serde_yml::from_str(content).map_err(|e| AppError::InvalidManifest {
                path: source.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            source,
            entries: raw.repos.unwrap_or_default(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub destination: PathBuf,
    pub bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Replaces the local manifest with a copy of the upstream one.
pub fn sync_manifest(source: &Path, destination: &Path) -> Result<SyncReport> {
    if !source.exists() {
        return Err(AppError::ManifestNotFound(source.to_path_buf()));
    }
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let bytes = fs::copy(source, destination).map_err(|e| AppError::FileWrite {
        path: destination.to_path_buf(),
        source: e,
    })?;
    let modified = fs::metadata(destination)
        .and_then(|m| m.modified())
        .map(DateTime::<Local>::from)
        .ok();
    log::info!(
        "Updated {} from {}",
        destination.display(),
        source.display()
    );
    Ok(SyncReport {
        destination: destination.to_path_buf(),
        bytes,
        modified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
repos:
  - name: foundry-bootstrap
    path: ~/dev/foundry/foundry-bootstrap
    description: Bootstraps a workstation
    remotes:
      origin: git@github.com:example/foundry-bootstrap.git
    type: tooling
    integration_quality:
      test_coverage: 80
      ci_status: green
      notes: Stable
    documentation:
      readme: README.md
      guides:
        - docs/setup.md
        - docs/usage.md
    context_files:
      config:
        - config/settings.yaml
      code:
        - src/main.py
  - name: broken
"#;

    #[test]
    fn parses_entries_in_order() {
        let manifest = Manifest::from_yaml_str(MANIFEST, "repos.yaml").unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.source(), Path::new("repos.yaml"));
        assert_eq!(manifest.entries()[0].name(), Some("foundry-bootstrap"));
        assert_eq!(manifest.entries()[1].name(), Some("broken"));
    }

    #[test]
    fn descriptor_carries_optional_groups() {
        let manifest = Manifest::from_yaml_str(MANIFEST, "repos.yaml").unwrap();
        let descriptor = manifest.entries()[0].descriptor().unwrap();
        assert_eq!(descriptor.repo_type.as_ref().map(value_text).as_deref(), Some("tooling"));

        let docs = descriptor.documentation.unwrap();
        let labels: Vec<&String> = docs.keys().collect();
        assert_eq!(labels, ["readme", "guides"]);
        assert_eq!(docs["readme"].paths(), ["README.md"]);
        assert_eq!(docs["guides"].paths(), ["docs/setup.md", "docs/usage.md"]);

        let quality = descriptor.integration_quality.unwrap();
        assert_eq!(quality.notes.as_ref().map(value_text).as_deref(), Some("Stable"));
        let metrics: Vec<&String> = quality.metrics.keys().collect();
        assert_eq!(metrics, ["test_coverage", "ci_status"]);
    }

    #[test]
    fn non_string_display_fields_are_accepted() {
        let yaml = "repos:\n  - name: odd\n    path: /srv/odd\n    description: 2024\n    type: 1\n    remotes:\n      port: 8080\n    integration_quality:\n      notes: 3\n";
        let manifest = Manifest::from_yaml_str(yaml, "repos.yaml").unwrap();
        let descriptor = manifest.entries()[0].descriptor().unwrap();
        assert_eq!(descriptor.description.as_ref().map(value_text).as_deref(), Some("2024"));
        assert_eq!(descriptor.repo_type.as_ref().map(value_text).as_deref(), Some("1"));
        assert_eq!(value_text(&descriptor.remotes.unwrap()["port"]), "8080");
        let notes = descriptor.integration_quality.unwrap().notes.unwrap();
        assert_eq!(value_text(&notes), "3");
    }

    #[test]
    fn value_text_renders_collections_as_json() {
        let value: Value = serde_yml::from_str("[a, 1, true]").unwrap();
        assert_eq!(value_text(&value), r#"["a",1,true]"#);
        assert_eq!(value_text(&Value::Null), "null");
    }

    #[test]
    fn missing_path_fails_only_that_entry() {
        let manifest = Manifest::from_yaml_str(MANIFEST, "repos.yaml").unwrap();
        let err = manifest.entries()[1].descriptor().unwrap_err();
        assert!(err.to_string().contains("path"), "{}", err);
    }

    #[test]
    fn absent_repos_key_is_empty() {
        assert!(Manifest::from_yaml_str("other: 1\n", "m.yaml").unwrap().is_empty());
        assert!(Manifest::from_yaml_str("repos:\n", "m.yaml").unwrap().is_empty());
    }

    #[test]
    fn structurally_invalid_manifest_is_rejected() {
        let err = Manifest::from_yaml_str("- just\n- a list\n", "m.yaml").unwrap_err();
        assert!(matches!(err, AppError::InvalidManifest { .. }));
        let err = Manifest::from_yaml_str("repos: [unclosed\n", "m.yaml").unwrap_err();
        assert!(matches!(err, AppError::InvalidManifest { .. }));
    }

    #[test]
    fn missing_manifest_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("repos.yaml")).unwrap_err();
        assert!(matches!(err, AppError::ManifestNotFound(_)));
    }

    #[test]
    fn sync_copies_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = dir.path().join("bom/repos.yaml");
        fs::create_dir_all(upstream.parent().unwrap()).unwrap();
        fs::write(&upstream, MANIFEST).unwrap();
        let local = dir.path().join("config/repos.yaml");

        let report = sync_manifest(&upstream, &local).unwrap();
        assert_eq!(report.bytes, MANIFEST.len() as u64);
        assert_eq!(fs::read_to_string(&local).unwrap(), MANIFEST);
        assert!(report.modified.is_some());
    }

    #[test]
    fn sync_requires_existing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = sync_manifest(&dir.path().join("nope.yaml"), &dir.path().join("out.yaml"))
            .unwrap_err();
        assert!(matches!(err, AppError::ManifestNotFound(_)));
        assert!(!dir.path().join("out.yaml").exists());
    }
}
