use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative settings file.
pub const CONFIG_ENV: &str = "INSIGHT_HIVE_CONFIG";
/// Settings file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "insight-hive.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User-tunable options, read from a JSON file. Every field is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Logo image drawn above the steps (png or jpeg).
    pub logo_path: Option<PathBuf>,
    /// Rows shown in the uploaded-data preview table.
    pub preview_rows: usize,
    /// Overlay the fitted regression line on the scatter plot.
    pub show_regression_line: bool,
    /// Screenshots for the step guide, one per step in order.
    pub step_guide_images: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            logo_path: Some(PathBuf::from("images/logo.jpg")),
            preview_rows: 200,
            show_regression_line: true,
            step_guide_images: [
                "Capture Step 1 CSV.PNG",
                "Capture Step 2.PNG",
                "Capture Step 3.PNG",
                "Capture Step 4.PNG",
                "Capture Step 5.PNG",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

impl Settings {
    /// Load from `$INSIGHT_HIVE_CONFIG` or `./insight-hive.json`, falling back
    /// to defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("no settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }
}
