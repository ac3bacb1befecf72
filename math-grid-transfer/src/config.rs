//! Transfer configuration
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "quadrature_order": 7, "octree": { "max_elements_per_bin": 50 } }
//! ```

use crate::error::{Result, TransferError};
use crate::octree::OctreeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Highest accepted `quadrature_order`; a hexahedral rule of this order
/// has 16^3 points
pub const MAX_QUADRATURE_ORDER: usize = 30;

/// Settings of a coarse-to-fine transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Polynomial degree integrated exactly by the error quadrature
    pub quadrature_order: usize,
    /// Convergence tolerance of the inverse map used for interpolation
    pub inverse_map_tolerance: f64,
    /// Point location index settings
    pub octree: OctreeConfig,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            quadrature_order: 5,
            inverse_map_tolerance: 1e-10,
            octree: OctreeConfig::default(),
        }
    }
}

impl TransferConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| TransferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TransferConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| TransferError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.quadrature_order > MAX_QUADRATURE_ORDER {
            return Err(TransferError::InvalidConfig(format!(
                "quadrature_order must be at most {}, got {}",
                MAX_QUADRATURE_ORDER, self.quadrature_order
            )));
        }
        if !(self.inverse_map_tolerance > 0.0) {
            return Err(TransferError::InvalidConfig(format!(
                "inverse_map_tolerance must be positive, got {}",
                self.inverse_map_tolerance
            )));
        }
        self.octree.validate()
    }
}
