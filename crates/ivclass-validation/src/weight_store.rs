//! Persisted weight and threshold tables.
//!
//! Two validation policies coexist, mirroring how the tables are reached:
//! single-key setters fail loudly on unknown names (programmer calls should
//! not carry typos), while the bulk setter and `load` log-and-skip unknown
//! keys (config files may carry stale keys). Load is lenient — a missing or
//! corrupt file degrades to compiled defaults — while `save` propagates I/O
//! failures.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ivclass_core::defaults::{self, LEARNING_RATE_KEY};
use ivclass_core::errors::{IvClassError, IvClassResult};

/// On-disk form: `{"weights": {...}, "thresholds": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
struct WeightDocument {
    #[serde(default)]
    weights: HashMap<String, f64>,
    #[serde(default)]
    thresholds: HashMap<String, f64>,
}

/// Validated, persisted weight/threshold state.
///
/// The key set is closed over the compiled defaults; every successful
/// mutation is flushed to disk.
#[derive(Debug)]
pub struct WeightStore {
    path: PathBuf,
    weights: HashMap<String, f64>,
    thresholds: HashMap<String, f64>,
}

impl WeightStore {
    /// Create a store at `path`, initialized to compiled defaults. No I/O is
    /// performed; call [`WeightStore::load`] to pick up persisted state.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            weights: defaults::default_weights(),
            thresholds: defaults::default_thresholds(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the weight table. Caller mutation does not leak back.
    pub fn get_weights(&self) -> HashMap<String, f64> {
        self.weights.clone()
    }

    /// Copy of the threshold table.
    pub fn get_thresholds(&self) -> HashMap<String, f64> {
        self.thresholds.clone()
    }

    pub fn get_weight(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn get_threshold(&self, name: &str) -> Option<f64> {
        self.thresholds.get(name).copied()
    }

    /// Strict single-key write: unknown names and non-finite values fail.
    /// The learning-rate pseudo-weight routes through
    /// [`WeightStore::set_learning_rate`] and keeps its positivity check.
    pub fn set_weight(&mut self, name: &str, value: f64) -> IvClassResult<()> {
        if name == LEARNING_RATE_KEY {
            return self.set_learning_rate(value);
        }
        if !defaults::is_known_weight(name) {
            return Err(IvClassError::UnknownWeight {
                name: name.to_string(),
            });
        }
        if !value.is_finite() {
            return Err(IvClassError::NonFiniteValue {
                name: name.to_string(),
                value,
            });
        }
        self.weights.insert(name.to_string(), value);
        self.save()
    }

    /// Strict single-key threshold write.
    pub fn set_threshold(&mut self, name: &str, value: f64) -> IvClassResult<()> {
        if !defaults::is_known_threshold(name) {
            return Err(IvClassError::UnknownThreshold {
                name: name.to_string(),
            });
        }
        if !value.is_finite() {
            return Err(IvClassError::NonFiniteValue {
                name: name.to_string(),
                value,
            });
        }
        self.thresholds.insert(name.to_string(), value);
        self.save()
    }

    /// Lenient bulk write: unknown keys are logged and skipped, non-finite
    /// values fail the whole call before anything is written.
    pub fn set_weights(&mut self, partial: &HashMap<String, f64>) -> IvClassResult<()> {
        for (name, value) in partial {
            if !value.is_finite() {
                return Err(IvClassError::NonFiniteValue {
                    name: name.clone(),
                    value: *value,
                });
            }
        }
        let mut applied = 0usize;
        for (name, value) in partial {
            if name == LEARNING_RATE_KEY && *value <= 0.0 {
                warn!(value, "skipping non-positive learning rate in bulk update");
            } else if defaults::is_known_weight(name) {
                self.weights.insert(name.clone(), *value);
                applied += 1;
            } else {
                warn!(key = %name, "skipping unknown weight key in bulk update");
            }
        }
        if applied == 0 {
            return Ok(());
        }
        self.save()
    }

    /// Lenient bulk threshold write, symmetric with [`WeightStore::set_weights`].
    pub fn set_thresholds(&mut self, partial: &HashMap<String, f64>) -> IvClassResult<()> {
        for (name, value) in partial {
            if !value.is_finite() {
                return Err(IvClassError::NonFiniteValue {
                    name: name.clone(),
                    value: *value,
                });
            }
        }
        let mut applied = 0usize;
        for (name, value) in partial {
            if defaults::is_known_threshold(name) {
                self.thresholds.insert(name.clone(), *value);
                applied += 1;
            } else {
                warn!(key = %name, "skipping unknown threshold key in bulk update");
            }
        }
        if applied == 0 {
            return Ok(());
        }
        self.save()
    }

    /// Add `delta` to a weight, falling back to the compiled default when the
    /// key is absent from the table. Does not flush; callers applying a batch
    /// of deltas persist once via [`WeightStore::save`].
    pub fn adjust_weight(&mut self, name: &str, delta: f64) -> IvClassResult<()> {
        let base = match self.weights.get(name) {
            Some(v) => *v,
            None => defaults::default_weight(name).ok_or_else(|| IvClassError::UnknownWeight {
                name: name.to_string(),
            })?,
        };
        self.weights.insert(name.to_string(), base + delta);
        Ok(())
    }

    /// Replace both tables with compiled defaults and persist.
    pub fn reset_to_defaults(&mut self) -> IvClassResult<()> {
        self.weights = defaults::default_weights();
        self.thresholds = defaults::default_thresholds();
        self.save()
    }

    /// Current feedback step size.
    pub fn get_learning_rate(&self) -> f64 {
        self.weights
            .get(LEARNING_RATE_KEY)
            .copied()
            .unwrap_or(defaults::DEFAULT_LEARNING_RATE)
    }

    /// Set the feedback step size. Rejects non-positive and non-finite rates.
    pub fn set_learning_rate(&mut self, rate: f64) -> IvClassResult<()> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(IvClassError::InvalidLearningRate { rate });
        }
        self.weights.insert(LEARNING_RATE_KEY.to_string(), rate);
        self.save()
    }

    /// Rescale the scoring weights so they sum to 100, preserving ratios.
    ///
    /// The learning-rate pseudo-weight is a step size, not a score
    /// contribution, and is excluded from the sum. No-op on a zero sum.
    pub fn normalize_weights(&mut self) -> IvClassResult<()> {
        let sum: f64 = self
            .weights
            .iter()
            .filter(|(k, _)| k.as_str() != LEARNING_RATE_KEY)
            .map(|(_, v)| *v)
            .sum();
        if sum.abs() < f64::EPSILON {
            debug!("weight sum is zero, skipping normalization");
            return Ok(());
        }
        let factor = 100.0 / sum;
        for (key, value) in self.weights.iter_mut() {
            if key.as_str() != LEARNING_RATE_KEY {
                *value *= factor;
            }
        }
        self.save()
    }

    /// Load persisted state. A missing or unparsable file degrades to
    /// compiled defaults; unknown or non-finite entries are skipped with a
    /// warning. Never fails.
    pub fn load(&mut self) {
        self.weights = defaults::default_weights();
        self.thresholds = defaults::default_thresholds();

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no weight config on disk, using defaults");
                return;
            }
        };
        let doc: WeightDocument = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt weight config, using defaults");
                return;
            }
        };
        for (name, value) in doc.weights {
            if !value.is_finite() {
                warn!(key = %name, value, "skipping non-finite weight from config");
            } else if name == LEARNING_RATE_KEY && value <= 0.0 {
                warn!(value, "skipping non-positive learning rate from config");
            } else if defaults::is_known_weight(&name) {
                self.weights.insert(name, value);
            } else {
                warn!(key = %name, "skipping unknown weight key from config");
            }
        }
        for (name, value) in doc.thresholds {
            if !value.is_finite() {
                warn!(key = %name, value, "skipping non-finite threshold from config");
            } else if defaults::is_known_threshold(&name) {
                self.thresholds.insert(name, value);
            } else {
                warn!(key = %name, "skipping unknown threshold key from config");
            }
        }
    }

    /// Flush both tables to disk. I/O failures propagate.
    pub fn save(&self) -> IvClassResult<()> {
        let doc = WeightDocument {
            weights: self.weights.clone(),
            thresholds: self.thresholds.clone(),
        };
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
