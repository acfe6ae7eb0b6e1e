use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::color::ColorMap;
use crate::config::Settings;
use crate::data::aggregate::Summary;
use crate::data::export::{export_to_path, ExportOptions};
use crate::data::filter::{apply, FilterSpec, FilteredView};
use crate::data::loader::load_file;
use crate::data::model::{Catalog, ContentType};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Canonical table, shared read-only (None until a source loads).
    pub catalog: Option<Arc<Catalog>>,

    /// Path the catalog was read from.
    pub source: Option<PathBuf>,

    /// Active predicates.
    pub filters: FilterSpec,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Aggregates over `visible_indices`.
    pub summary: Summary,

    /// Colours per rating, stable across filter changes.
    pub rating_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            catalog: None,
            source: None,
            filters: FilterSpec::default(),
            visible_indices: Vec::new(),
            summary: Summary::default(),
            rating_colors: None,
            status_message: None,
        }
    }

    /// Load a catalog from disk, reporting failure through `status_message`.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(catalog) => {
                self.set_catalog(Arc::new(catalog), path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load catalog: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded catalog, initialise filters and colours.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>, source: PathBuf) {
        self.filters = FilterSpec::for_catalog(&catalog, &self.settings.filters);
        self.rating_colors = Some(ColorMap::new(catalog.ratings().iter().map(String::as_str)));
        self.catalog = Some(catalog);
        self.source = Some(source);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let view = apply(catalog, &self.filters);
        self.summary = Summary::compute(&view, &self.settings.charts);
        log::debug!(
            "{} of {} titles match the current filters",
            view.len(),
            catalog.len()
        );
        self.visible_indices = view.indices().to_vec();
    }

    /// The current filtered view, if a catalog is loaded.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.catalog
            .as_deref()
            .map(|c| FilteredView::from_indices(c, self.visible_indices.clone()))
    }

    pub fn set_title_query(&mut self, query: String) {
        self.filters.title_query = query;
        self.refilter();
    }

    pub fn toggle_type(&mut self, kind: ContentType) {
        if !self.filters.types.remove(&kind) {
            self.filters.types.insert(kind);
        }
        self.refilter();
    }

    pub fn toggle_rating(&mut self, rating: &str) {
        if !self.filters.ratings.remove(rating) {
            self.filters.ratings.insert(rating.to_string());
        }
        self.refilter();
    }

    /// Select every rating present in the catalog.
    pub fn select_all_ratings(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.filters.ratings = catalog.ratings().iter().cloned().collect();
            self.refilter();
        }
    }

    pub fn select_no_ratings(&mut self) {
        self.filters.ratings.clear();
        self.refilter();
    }

    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        self.filters.year_range = (lo, hi);
        self.refilter();
    }

    pub fn set_duration_range(&mut self, lo: u32, hi: u32) {
        self.filters.duration_range = (lo, hi);
        self.refilter();
    }

    /// Write the filtered view to `path` as CSV.
    pub fn export_filtered(&self, path: &Path) -> Result<()> {
        let view = self
            .view()
            .ok_or_else(|| anyhow::anyhow!("no catalog loaded"))?;
        let opts = ExportOptions {
            include_derived: self.settings.data.export_derived,
        };
        export_to_path(&view, opts, path)
    }
}
