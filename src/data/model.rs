use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column names recognised by the normalizer
// ---------------------------------------------------------------------------

pub const COL_TITLE: &str = "title";
pub const COL_TYPE: &str = "type";
pub const COL_DIRECTOR: &str = "director";
pub const COL_CAST: &str = "cast";
pub const COL_COUNTRY: &str = "country";
pub const COL_DATE_ADDED: &str = "date_added";
pub const COL_RATING: &str = "rating";
pub const COL_DURATION: &str = "duration";
pub const COL_LISTED_IN: &str = "listed_in";

/// Columns computed during normalization, only exported on request.
pub const DERIVED_COLUMNS: [&str; 3] = ["year_added", "duration_value", "duration_unit"];

/// Default written into missing text fields.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Kind of title. Values outside the two known kinds are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
    Other(String),
}

impl ContentType {
    /// Parse the catalog spelling (`"Movie"`, `"TV Show"`).
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Movie" => ContentType::Movie,
            "TV Show" | "TVShow" => ContentType::TvShow,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// Text written back to the source format.
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ContentType::Other(_))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Minutes,
    Seasons,
    Unknown,
}

impl DurationUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Minutes => "minutes",
            DurationUnit::Seasons => "seasons",
            DurationUnit::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed form of the free-text `duration` column.
///
/// `value` is `Some` exactly when `unit` is not [`DurationUnit::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub value: Option<u64>,
    pub unit: DurationUnit,
}

impl Duration {
    pub const UNKNOWN: Duration = Duration {
        value: None,
        unit: DurationUnit::Unknown,
    };
}

// ---------------------------------------------------------------------------
// Record – one normalized row
// ---------------------------------------------------------------------------

/// One catalog title after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    pub content_type: ContentType,
    pub director: String,
    pub cast: String,
    pub country: String,
    pub rating: String,
    pub date_added: Option<NaiveDate>,
    pub year_added: Option<i32>,
    pub duration_raw: String,
    pub duration: Duration,
    pub listed_in: Option<String>,
    /// Uninterpreted source cells, indexed by [`Catalog::passthrough_index`].
    pub passthrough: Vec<Option<String>>,
}

impl Record {
    /// Value of a source column as it should appear in an export.
    ///
    /// `passthrough_index` resolves columns the normalizer does not interpret.
    pub fn cell(&self, column: &str, passthrough_index: Option<usize>) -> Option<String> {
        match column {
            COL_TITLE => Some(self.title.clone()),
            COL_TYPE => Some(self.content_type.as_str().to_string()),
            COL_DIRECTOR => Some(self.director.clone()),
            COL_CAST => Some(self.cast.clone()),
            COL_COUNTRY => Some(self.country.clone()),
            COL_RATING => Some(self.rating.clone()),
            COL_DATE_ADDED => self.date_added.map(|d| d.format("%Y-%m-%d").to_string()),
            COL_DURATION => Some(self.duration_raw.clone()),
            COL_LISTED_IN => self.listed_in.clone(),
            _ => passthrough_index.and_then(|i| self.passthrough.get(i).cloned().flatten()),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – the canonical table
// ---------------------------------------------------------------------------

/// The normalized, read-only catalog. Built once by
/// [`normalize`](super::normalize::normalize) and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    columns: Vec<String>,
    passthrough_columns: Vec<String>,
    ratings: Vec<String>,
    rating_mode: String,
    year_bounds: Option<(i32, i32)>,
}

impl Catalog {
    pub(super) fn new(
        records: Vec<Record>,
        columns: Vec<String>,
        passthrough_columns: Vec<String>,
        rating_mode: String,
    ) -> Self {
        let mut ratings: Vec<String> = Vec::new();
        for rec in &records {
            if !ratings.contains(&rec.rating) {
                ratings.push(rec.rating.clone());
            }
        }

        let year_bounds = records
            .iter()
            .filter_map(|r| r.year_added)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });

        Catalog {
            records,
            columns,
            passthrough_columns,
            ratings,
            rating_mode,
            year_bounds,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Source header, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a source column among those carried through uninterpreted.
    pub fn passthrough_index(&self, column: &str) -> Option<usize> {
        self.passthrough_columns.iter().position(|c| c == column)
    }

    /// Distinct ratings in order of first appearance.
    pub fn ratings(&self) -> &[String] {
        &self.ratings
    }

    /// Rating used to fill missing `rating` cells.
    pub fn rating_mode(&self) -> &str {
        &self.rating_mode
    }

    /// Smallest and largest `year_added` present, if any.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
