//! Compose file parsing.
//!
//! Only the ordered service names matter here; everything else in the
//! document is ignored.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::{Error, Result};

/// Extract the ordered list of service names from a compose file.
///
/// Accepts both layouts: a top-level `services:` mapping and the older
/// format where service names are the document's top-level keys.
///
/// # Errors
///
/// Returns [`Error::Compose`] if the file is missing, is not a YAML
/// mapping, or defines no services. Parse failures surface as
/// [`Error::Yaml`].
pub fn load_container_names(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Compose(format!("cannot read {}: {e}", path.display()))
    })?;

    let doc: Value = serde_yaml::from_str(&content)?;
    let Value::Mapping(top) = doc else {
        return Err(Error::Compose(format!(
            "{} is not a mapping document",
            path.display()
        )));
    };

    let services = match top.get("services") {
        Some(Value::Mapping(services)) => service_names(services),
        Some(_) => {
            return Err(Error::Compose(format!(
                "'services' in {} is not a mapping",
                path.display()
            )));
        }
        // v1 layout: service names are the top-level keys.
        None => service_names(&top),
    };

    if services.is_empty() {
        return Err(Error::Compose(format!(
            "{} defines no services",
            path.display()
        )));
    }

    Ok(services)
}

/// Mapping keys in document order, skipping non-string keys and the
/// reserved top-level sections a v1 file may still carry.
fn service_names(mapping: &Mapping) -> Vec<String> {
    mapping
        .keys()
        .filter_map(Value::as_str)
        .filter(|key| !matches!(*key, "version" | "networks" | "volumes" | "configs" | "secrets"))
        .map(str::to_string)
        .collect()
}
