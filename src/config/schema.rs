use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/catalog-explorer/config.toml`
/// or `~/.config/catalog-explorer/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CATALOG_EXPLORER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub filters: FilterDefaults,
    pub charts: ChartSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Catalog loaded at startup (`.csv`, `.json` or `.parquet`).
    pub source: PathBuf,
    /// Suggested file name for "Export filtered…".
    pub export_file_name: String,
    /// Append `year_added`, `duration_value` and `duration_unit` to exports.
    pub export_derived: bool,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("netflix_titles.csv"),
            export_file_name: "catalog_filtered.csv".to_string(),
            export_derived: false,
        }
    }
}

/// Slider bounds and the initial filter selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    /// Outer limits of the "Year added" slider.
    pub year_bounds: (i32, i32),
    pub year_range: (i32, i32),
    /// Outer limits of the "Duration" slider.
    pub duration_bounds: (u32, u32),
    pub duration_range: (u32, u32),
    /// How many ratings (in order of first appearance) start selected.
    pub initial_ratings: usize,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            year_bounds: (2008, 2021),
            year_range: (2015, 2021),
            duration_bounds: (0, 400),
            duration_range: (50, 200),
            initial_ratings: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub top_countries: usize,
    pub top_directors: usize,
    pub histogram_bins: usize,
    /// Maximum number of words in the genre cloud.
    pub genre_words: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            top_countries: 20,
            top_directors: 10,
            histogram_bins: 30,
            genre_words: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
