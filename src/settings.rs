//! Startup configuration for the explorer.
//!
//! Settings are read once at launch and never written back: nothing the user
//! does in the UI survives a restart.

use serde::Deserialize;
use std::path::PathBuf;

/// Chart geometry, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Plot area height above the baseline
    pub height: f32,
    /// Space below the baseline reserved for keyword labels
    pub label_band: f32,
    /// Margin on every side of the plot area
    pub margin: f32,
    pub marker_radius: f32,
    /// Vertical distance between stacked keyword label rows
    pub label_row_height: f32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            height: 260.0,
            label_band: 160.0,
            margin: 40.0,
            marker_radius: 4.0,
            label_row_height: 24.0,
        }
    }
}

/// Keyword cloud canvas and typography
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudSettings {
    pub width: f32,
    pub height: f32,
    /// Extra space kept around every placed word
    pub padding: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Fixed seed for rotation and jitter; random when absent
    pub seed: Option<u64>,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            padding: 5.0,
            min_font_size: 12.0,
            max_font_size: 60.0,
            seed: None,
        }
    }
}

/// All startup settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    // Search defaults
    #[serde(default = "default_page")]
    pub default_page: u32,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    // Zoom (pixels per time index)
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: f32,
    #[serde(default = "default_min_pixel_scale")]
    pub min_pixel_scale: f32,
    #[serde(default = "default_max_pixel_scale")]
    pub max_pixel_scale: f32,

    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub cloud: CloudSettings,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

fn default_pixel_scale() -> f32 {
    40.0
}

fn default_min_pixel_scale() -> f32 {
    1.0
}

fn default_max_pixel_scale() -> f32 {
    200.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_page: default_page(),
            default_page_size: default_page_size(),
            pixel_scale: default_pixel_scale(),
            min_pixel_scale: default_min_pixel_scale(),
            max_pixel_scale: default_max_pixel_scale(),
            chart: ChartSettings::default(),
            cloud: CloudSettings::default(),
        }
    }
}

impl Settings {
    /// Get the path to the settings file
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("keyword-timeline");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from disk, returning defaults if the file doesn't exist or is invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            // No file yet, that's fine
            Err(_) => Self::default(),
        }
    }

    /// Parse settings, filling anything missing with defaults
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(contents)?;
        settings.default_page = settings.default_page.max(1);
        settings.default_page_size = settings.default_page_size.max(1);
        settings.min_pixel_scale = settings.min_pixel_scale.max(1.0);
        settings.max_pixel_scale = settings.max_pixel_scale.max(settings.min_pixel_scale);
        settings.pixel_scale = settings
            .pixel_scale
            .clamp(settings.min_pixel_scale, settings.max_pixel_scale);
        Ok(settings)
    }
}
