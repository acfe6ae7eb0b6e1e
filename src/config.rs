//! Configuration schema and loading.
//!
//! Settings come from struct defaults, an optional TOML file and
//! `CATALOG_EXPLORER__`-prefixed environment variables.

mod load;
mod schema;

pub use load::SettingsError;
pub use schema::*;

#[cfg(test)]
mod tests;
