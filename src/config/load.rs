use std::{env, path::PathBuf};

use super::schema::Settings;

const ENV_PREFIX: &str = "CATALOG_EXPLORER";
const CONFIG_PATH_VAR: &str = "CATALOG_EXPLORER_CONFIG_PATH";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} range is inverted: {lo} > {hi}")]
    InvertedRange {
        name: &'static str,
        lo: i64,
        hi: i64,
    },
    #[error("{name} default ({lo}, {hi}) lies outside the slider bounds")]
    OutOfBounds {
        name: &'static str,
        lo: i64,
        hi: i64,
    },
    #[error("charts.{0} must be >= 1")]
    ZeroCount(&'static str),
}

/// `Settings::load` layers an optional config file under environment
/// variables (prefix `CATALOG_EXPLORER__`) on top of struct defaults.
impl Settings {
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Reject settings the dashboard cannot render sensibly.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let f = &self.filters;
        check_range("filters.year_bounds", f.year_bounds.0 as i64, f.year_bounds.1 as i64)?;
        check_range("filters.year_range", f.year_range.0 as i64, f.year_range.1 as i64)?;
        check_range(
            "filters.duration_bounds",
            f.duration_bounds.0 as i64,
            f.duration_bounds.1 as i64,
        )?;
        check_range(
            "filters.duration_range",
            f.duration_range.0 as i64,
            f.duration_range.1 as i64,
        )?;

        if f.year_range.0 < f.year_bounds.0 || f.year_range.1 > f.year_bounds.1 {
            return Err(SettingsError::OutOfBounds {
                name: "filters.year_range",
                lo: f.year_range.0 as i64,
                hi: f.year_range.1 as i64,
            });
        }
        if f.duration_range.0 < f.duration_bounds.0 || f.duration_range.1 > f.duration_bounds.1 {
            return Err(SettingsError::OutOfBounds {
                name: "filters.duration_range",
                lo: f.duration_range.0 as i64,
                hi: f.duration_range.1 as i64,
            });
        }

        let c = &self.charts;
        for (name, value) in [
            ("top_countries", c.top_countries),
            ("top_directors", c.top_directors),
            ("histogram_bins", c.histogram_bins),
            ("genre_words", c.genre_words),
        ] {
            if value == 0 {
                return Err(SettingsError::ZeroCount(name));
            }
        }
        Ok(())
    }
}

fn check_range(name: &'static str, lo: i64, hi: i64) -> Result<(), SettingsError> {
    if lo > hi {
        return Err(SettingsError::InvertedRange { name, lo, hi });
    }
    Ok(())
}

/// Resolve the config path from `CATALOG_EXPLORER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/catalog-explorer/config.toml`, or the same under
/// `~/.config` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("catalog-explorer").join("config.toml"))
}
