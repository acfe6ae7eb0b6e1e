use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use super::SettingsError;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        std::env::set_var(key, val);
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_variable() {
    let _lock = env_lock();
    let _g = EnvGuard::set("CATALOG_EXPLORER_CONFIG_PATH", "/tmp/ce-test.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/ce-test.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("catalog-explorer")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("catalog-explorer")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_dashboard() {
    let s = Settings::default();
    assert_eq!(s.data.source, PathBuf::from("netflix_titles.csv"));
    assert_eq!(s.filters.year_bounds, (2008, 2021));
    assert_eq!(s.filters.year_range, (2015, 2021));
    assert_eq!(s.filters.duration_range, (50, 200));
    assert_eq!(s.filters.initial_ratings, 3);
    assert_eq!(s.charts.top_countries, 20);
    assert_eq!(s.charts.top_directors, 10);
    assert_eq!(s.charts.histogram_bins, 30);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_file_then_env() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[data]
source = "/srv/titles.parquet"
export_derived = true

[filters]
year_range = [2010, 2020]
initial_ratings = 5

[charts]
top_directors = 15
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CATALOG_EXPLORER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CATALOG_EXPLORER__CHARTS__HISTOGRAM_BINS", "12");

    let s = Settings::load().unwrap();
    assert_eq!(s.data.source, PathBuf::from("/srv/titles.parquet"));
    assert!(s.data.export_derived);
    assert_eq!(s.data.export_file_name, "catalog_filtered.csv");
    assert_eq!(s.filters.year_range, (2010, 2020));
    assert_eq!(s.filters.initial_ratings, 5);
    assert_eq!(s.filters.duration_range, (50, 200));
    assert_eq!(s.charts.top_directors, 15);
    assert_eq!(s.charts.histogram_bins, 12);
    assert_eq!(s.charts.top_countries, 20);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let _g = EnvGuard::set("CATALOG_EXPLORER_CONFIG_PATH", missing.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert_eq!(s.filters, FilterDefaults::default());
}

#[test]
fn validate_rejects_inverted_and_out_of_bounds_ranges() {
    let mut s = Settings::default();
    s.filters.year_range = (2021, 2015);
    assert!(matches!(
        s.validate(),
        Err(SettingsError::InvertedRange { name: "filters.year_range", .. })
    ));

    let mut s = Settings::default();
    s.filters.duration_range = (0, 500);
    assert!(matches!(
        s.validate(),
        Err(SettingsError::OutOfBounds { name: "filters.duration_range", .. })
    ));

    let mut s = Settings::default();
    s.charts.histogram_bins = 0;
    assert!(matches!(
        s.validate(),
        Err(SettingsError::ZeroCount("histogram_bins"))
    ));
}
