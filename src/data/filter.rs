use std::collections::BTreeSet;

use super::model::{Catalog, ContentType, Record};
use crate::config::FilterDefaults;

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// All active user predicates. Every predicate must hold for a record to pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring of the title; empty matches everything.
    pub title_query: String,
    pub types: BTreeSet<ContentType>,
    /// Inclusive. Records without `year_added` never pass.
    pub year_range: (i32, i32),
    pub ratings: BTreeSet<String>,
    /// Inclusive. Records without a duration value never pass.
    pub duration_range: (u32, u32),
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            title_query: String::new(),
            types: [ContentType::Movie, ContentType::TvShow].into_iter().collect(),
            year_range: (i32::MIN, i32::MAX),
            ratings: BTreeSet::new(),
            duration_range: (0, u32::MAX),
        }
    }
}

impl FilterSpec {
    /// Initial selection for a freshly loaded catalog: both kinds, the
    /// configured ranges and the first few ratings in appearance order.
    pub fn for_catalog(catalog: &Catalog, defaults: &FilterDefaults) -> Self {
        Self {
            title_query: String::new(),
            types: [ContentType::Movie, ContentType::TvShow].into_iter().collect(),
            year_range: defaults.year_range,
            ratings: catalog
                .ratings()
                .iter()
                .take(defaults.initial_ratings)
                .cloned()
                .collect(),
            duration_range: defaults.duration_range,
        }
    }

    /// Predicate for a single record; `query` is the lowercased title query.
    fn matches(&self, rec: &Record, query: &str) -> bool {
        if !self.types.contains(&rec.content_type) || !self.ratings.contains(&rec.rating) {
            return false;
        }

        let (y_lo, y_hi) = self.year_range;
        match rec.year_added {
            Some(y) if y >= y_lo && y <= y_hi => {}
            _ => return false,
        }

        let (d_lo, d_hi) = self.duration_range;
        match rec.duration.value {
            Some(d) if d >= u64::from(d_lo) && d <= u64::from(d_hi) => {}
            _ => return false,
        }

        query.is_empty() || rec.title.to_lowercase().contains(query)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Records of a catalog passing a [`FilterSpec`], in catalog order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    catalog: &'a Catalog,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over a precomputed index list (as kept by the UI state).
    pub fn from_indices(catalog: &'a Catalog, indices: Vec<usize>) -> Self {
        Self { catalog, indices }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.catalog.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return indices of records that pass every predicate of `spec`.
///
/// The catalog is only read; order is the catalog's order.
pub fn filtered_indices(catalog: &Catalog, spec: &FilterSpec) -> Vec<usize> {
    let query = spec.title_query.to_lowercase();
    catalog
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| spec.matches(rec, &query))
        .map(|(i, _)| i)
        .collect()
}

/// Filter a catalog into a borrowing view.
pub fn apply<'a>(catalog: &'a Catalog, spec: &FilterSpec) -> FilteredView<'a> {
    FilteredView::from_indices(catalog, filtered_indices(catalog, spec))
}
