//! Chart values document (`values.yaml`)
//!
//! The document is kept as a generic YAML tree so that keys the manager does
//! not know about survive a load/set/save cycle. Updates address a single
//! dotted path such as `ingress.tls.enabled`; missing intermediate mappings
//! are created, and an intermediate that holds a non-mapping value is
//! replaced by an empty mapping.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml_ng::{Mapping, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A loaded values file
#[derive(Debug, Clone)]
pub struct ChartValues {
    path: PathBuf,
    root: Mapping,
}

impl ChartValues {
    /// Load and parse the values file at `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading values file: {}", path.display());

        if !path.exists() {
            return Err(Error::not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let root = Self::parse_root(&path, &content)?;

        Ok(Self { path, root })
    }

    /// Build a document from YAML text without touching the filesystem
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let root = Self::parse_root(&path, content)?;
        Ok(Self { path, root })
    }

    fn parse_root(path: &Path, content: &str) -> Result<Mapping> {
        match serde_yaml_ng::from_str::<Value>(content)? {
            Value::Mapping(map) => Ok(map),
            Value::Null => Ok(Mapping::new()),
            other => Err(Error::invalid_document(
                path.display().to_string(),
                format!("expected a mapping at the root, found {}", kind_of(&other)),
            )),
        }
    }

    /// Path the document was loaded from and will be saved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level mapping
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Look up the value at a dotted path
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        let segments = split_path(dotted).ok()?;
        let (last, parents) = segments.split_last()?;

        let mut current = &self.root;
        for segment in parents {
            current = current.get(*segment)?.as_mapping()?;
        }
        current.get(*last)
    }

    /// Set the value at a dotted path
    pub fn set(&mut self, dotted: &str, value: impl Into<Value>) -> Result<()> {
        let segments = split_path(dotted)?;
        set_nested(&mut self.root, &segments, value.into());
        Ok(())
    }

    /// Serialize the whole document
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(&self.root)?)
    }

    /// Overwrite the file with the current document
    pub fn save(&self) -> Result<()> {
        let content = self.to_yaml()?;
        fs::write(&self.path, content)?;
        debug!("Wrote values file: {}", self.path.display());
        Ok(())
    }
}

/// Load `path`, set one dotted field and write the file back
pub fn update_field(path: &Path, dotted: &str, value: impl Into<Value>) -> Result<()> {
    let value = value.into();
    let mut values = ChartValues::load(path)?;

    info!("Updating field '{}' in {}", dotted, path.display());
    values.set(dotted, value)?;
    values.save()
}

/// Split a dotted path, rejecting empty segments
pub fn split_path(dotted: &str) -> Result<Vec<&str>> {
    if dotted.is_empty() {
        return Err(Error::validation("field path must not be empty"));
    }

    let segments: Vec<&str> = dotted.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::validation(format!(
            "field path '{}' contains an empty segment",
            dotted
        )));
    }

    Ok(segments)
}

fn set_nested(map: &mut Mapping, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let key = Value::String((*head).to_string());

    if rest.is_empty() {
        map.insert(key, value);
        return;
    }

    let child = map
        .entry(key)
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !child.is_mapping() {
        debug!("Replacing non-mapping value at '{}'", head);
        *child = Value::Mapping(Mapping::new());
    }

    if let Value::Mapping(child_map) = child {
        set_nested(child_map, rest, value);
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
