use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::icon::{IconSpec, Rgb};
use crate::png::MAX_ICON_SIZE;

/// Icon set described in TOML:
///
/// ```toml
/// create_dirs = true
///
/// [[icon]]
/// size = 16
/// color = "#6366f1"
/// path = "icons/icon16.png"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSetConfig {
    /// Create missing output directories.
    #[serde(default)]
    pub create_dirs: bool,
    #[serde(rename = "icon", default)]
    pub icons: Vec<IconEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconEntry {
    pub size: u32,
    /// `"#rrggbb"` or `[r, g, b]`.
    pub color: Rgb,
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("icon set is empty")]
    Empty,
    #[error("icon {index} ({path}): size must be between 1 and {max}, got {size}", max = MAX_ICON_SIZE)]
    InvalidSize {
        index: usize,
        path: String,
        size: u32,
    },
}

impl Default for IconSetConfig {
    fn default() -> Self {
        Self {
            create_dirs: false,
            icons: IconSpec::defaults()
                .into_iter()
                .map(|spec| IconEntry {
                    size: spec.size,
                    color: spec.color,
                    path: spec.output_path,
                })
                .collect(),
        }
    }
}

impl IconSetConfig {
    /// Load an icon set from disk. Unlike an implicit config, a file named
    /// on the command line must exist and parse.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::info!(
            "Loaded {} icon(s) from {}",
            config.icons.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.icons.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (index, entry) in self.icons.iter().enumerate() {
            if entry.size == 0 || entry.size > MAX_ICON_SIZE {
                return Err(ConfigError::InvalidSize {
                    index,
                    path: entry.path.display().to_string(),
                    size: entry.size,
                });
            }
        }
        Ok(())
    }

    pub fn specs(&self) -> Vec<IconSpec> {
        self.icons
            .iter()
            .map(|entry| IconSpec::new(entry.size, entry.color, entry.path.clone()))
            .collect()
    }
}
