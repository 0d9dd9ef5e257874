//! Persisted ground-truth labels.
//!
//! Same lenient-load/strict-save asymmetry as the weight store: a missing or
//! corrupt file yields an empty table, `save` propagates I/O failures.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use ivclass_core::class::DeviceClass;
use ivclass_core::errors::{IvClassError, IvClassResult};

/// Validated device-id → ground-truth-class table.
#[derive(Debug)]
pub struct LabelStore {
    path: PathBuf,
    labels: HashMap<String, DeviceClass>,
    /// Memcapacitive has a full weight mapping but sits outside the default
    /// label set; accepting it as ground truth is an explicit opt-in.
    accept_memcapacitive: bool,
}

impl LabelStore {
    /// Create an empty store at `path`. Call [`LabelStore::load`] to pick up
    /// persisted labels.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            labels: HashMap::new(),
            accept_memcapacitive: false,
        }
    }

    /// Admit `memcapacitive` as a valid ground-truth label.
    pub fn with_memcapacitive_labels(mut self, accept: bool) -> Self {
        self.accept_memcapacitive = accept;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_valid_label(&self, class: DeviceClass) -> bool {
        class.is_labelable() || (self.accept_memcapacitive && class == DeviceClass::Memcapacitive)
    }

    /// Set a device's ground-truth class. The value is normalized
    /// case-insensitively; anything outside the validated set fails and
    /// leaves state unchanged.
    pub fn set_label(&mut self, device_id: &str, class: &str) -> IvClassResult<()> {
        let parsed: DeviceClass = class.parse()?;
        if !self.is_valid_label(parsed) {
            return Err(IvClassError::InvalidLabel {
                value: class.to_string(),
            });
        }
        self.labels.insert(device_id.to_string(), parsed);
        self.save()
    }

    pub fn get_label(&self, device_id: &str) -> Option<DeviceClass> {
        self.labels.get(device_id).copied()
    }

    pub fn has_label(&self, device_id: &str) -> bool {
        self.labels.contains_key(device_id)
    }

    /// Copy of the full label table.
    pub fn get_all_labels(&self) -> HashMap<String, DeviceClass> {
        self.labels.clone()
    }

    pub fn get_labeled_count(&self) -> usize {
        self.labels.len()
    }

    /// Remove a label, returning whether one was present. Persists on change.
    pub fn remove_label(&mut self, device_id: &str) -> IvClassResult<bool> {
        if self.labels.remove(device_id).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Drop every label and persist the empty table.
    pub fn clear(&mut self) -> IvClassResult<()> {
        self.labels.clear();
        self.save()
    }

    /// Load persisted labels. Missing/corrupt file yields an empty table;
    /// entries with invalid classes are skipped with a warning. Never fails.
    pub fn load(&mut self) {
        self.labels.clear();

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no label file on disk, starting empty");
                return;
            }
        };
        let doc: HashMap<String, String> = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt label file, starting empty");
                return;
            }
        };
        for (device_id, class) in doc {
            match class.parse::<DeviceClass>() {
                Ok(parsed) if self.is_valid_label(parsed) => {
                    self.labels.insert(device_id, parsed);
                }
                _ => {
                    warn!(device_id = %device_id, class = %class, "skipping invalid label from file");
                }
            }
        }
    }

    /// Flush the label table to disk. I/O failures propagate.
    pub fn save(&self) -> IvClassResult<()> {
        let doc: HashMap<&str, &str> = self
            .labels
            .iter()
            .map(|(id, class)| (id.as_str(), class.as_str()))
            .collect();
        let serialized = serde_json::to_string_pretty(&doc)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}
