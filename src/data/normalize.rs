use std::collections::HashMap;

use super::dates::parse_date;
use super::duration::parse_duration;
use super::loader::RawTable;
use super::model::{
    Catalog, ContentType, Duration, Record, COL_CAST, COL_COUNTRY, COL_DATE_ADDED,
    COL_DIRECTOR, COL_DURATION, COL_LISTED_IN, COL_RATING, COL_TITLE, COL_TYPE, UNKNOWN,
};
use chrono::Datelike;

const KNOWN_COLUMNS: [&str; 9] = [
    COL_TITLE,
    COL_TYPE,
    COL_DIRECTOR,
    COL_CAST,
    COL_COUNTRY,
    COL_DATE_ADDED,
    COL_RATING,
    COL_DURATION,
    COL_LISTED_IN,
];

/// Column positions of the interpreted fields in a [`RawTable`].
struct Layout {
    title: Option<usize>,
    content_type: Option<usize>,
    director: Option<usize>,
    cast: Option<usize>,
    country: Option<usize>,
    date_added: Option<usize>,
    rating: Option<usize>,
    duration: Option<usize>,
    listed_in: Option<usize>,
    passthrough: Vec<usize>,
}

impl Layout {
    fn of(raw: &RawTable) -> Self {
        let passthrough = raw
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !KNOWN_COLUMNS.contains(&c.as_str()))
            .map(|(i, _)| i)
            .collect();
        Layout {
            title: raw.column_index(COL_TITLE),
            content_type: raw.column_index(COL_TYPE),
            director: raw.column_index(COL_DIRECTOR),
            cast: raw.column_index(COL_CAST),
            country: raw.column_index(COL_COUNTRY),
            date_added: raw.column_index(COL_DATE_ADDED),
            rating: raw.column_index(COL_RATING),
            duration: raw.column_index(COL_DURATION),
            listed_in: raw.column_index(COL_LISTED_IN),
            passthrough,
        }
    }
}

fn get(row: &[Option<String>], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).and_then(|v| v.as_deref())
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

/// Most frequent value, ties broken by first appearance.
pub fn most_frequent<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        let count = counts.entry(v).or_insert(0);
        if *count == 0 {
            order.push(v);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for v in order {
        let c = counts[v];
        if best.map_or(true, |(_, bc)| c > bc) {
            best = Some((v, c));
        }
    }
    best.map(|(v, _)| v)
}

/// Soft anomalies seen while normalizing; reported once per load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeReport {
    pub missing_titles: usize,
    pub unknown_types: usize,
    pub bad_dates: usize,
    pub bad_durations: usize,
    pub imputed_ratings: usize,
}

impl NormalizeReport {
    fn log(&self) {
        if self.missing_titles > 0 {
            log::warn!("{} rows without a title", self.missing_titles);
        }
        if self.unknown_types > 0 {
            log::warn!("{} rows with an unrecognised type", self.unknown_types);
        }
        if self.bad_dates > 0 {
            log::warn!("{} date_added values could not be parsed", self.bad_dates);
        }
        if self.bad_durations > 0 {
            log::warn!("{} duration values were not recognised", self.bad_durations);
        }
        if self.imputed_ratings > 0 {
            log::info!("{} missing ratings imputed", self.imputed_ratings);
        }
    }
}

/// Turn a raw table into the canonical [`Catalog`]. Never drops a row.
pub fn normalize(raw: RawTable) -> Catalog {
    normalize_with_report(raw).0
}

pub fn normalize_with_report(raw: RawTable) -> (Catalog, NormalizeReport) {
    let layout = Layout::of(&raw);
    let mut report = NormalizeReport::default();

    // Computed over the whole source before anything else.
    let rating_mode = most_frequent(raw.rows.iter().filter_map(|r| get(r, layout.rating)))
        .map(str::to_string)
        .unwrap_or_else(|| {
            if !raw.rows.is_empty() {
                log::warn!("no ratings present, imputing '{UNKNOWN}'");
            }
            UNKNOWN.to_string()
        });

    let records = raw
        .rows
        .iter()
        .enumerate()
        .map(|(row_no, row)| normalize_row(row_no, row, &layout, &rating_mode, &mut report))
        .collect();

    let passthrough_columns = layout
        .passthrough
        .iter()
        .map(|&i| raw.columns[i].clone())
        .collect();

    report.log();
    let catalog = Catalog::new(records, raw.columns, passthrough_columns, rating_mode);
    (catalog, report)
}

fn normalize_row(
    row_no: usize,
    row: &[Option<String>],
    layout: &Layout,
    rating_mode: &str,
    report: &mut NormalizeReport,
) -> Record {
    let title = match get(row, layout.title) {
        Some(t) => t.to_string(),
        None => {
            log::debug!("row {row_no}: missing title");
            report.missing_titles += 1;
            String::new()
        }
    };

    let content_type = ContentType::parse(get(row, layout.content_type).unwrap_or(""));
    if !content_type.is_known() {
        log::debug!("row {row_no}: unrecognised type {:?}", content_type.as_str());
        report.unknown_types += 1;
    }

    let rating = match get(row, layout.rating) {
        Some(r) => r.to_string(),
        None => {
            report.imputed_ratings += 1;
            rating_mode.to_string()
        }
    };

    let date_raw = get(row, layout.date_added);
    let date_added = date_raw.and_then(parse_date);
    if let (Some(text), None) = (date_raw, date_added) {
        log::debug!("row {row_no}: unparseable date_added {text:?}");
        report.bad_dates += 1;
    }

    let duration_cell = get(row, layout.duration);
    let duration = parse_duration(duration_cell);
    if duration == Duration::UNKNOWN && duration_cell.is_some_and(|d| d != UNKNOWN) {
        report.bad_durations += 1;
    }

    Record {
        title,
        content_type,
        director: or_unknown(get(row, layout.director)),
        cast: or_unknown(get(row, layout.cast)),
        country: or_unknown(get(row, layout.country)),
        rating,
        date_added,
        year_added: date_added.map(|d| d.year()),
        duration_raw: or_unknown(duration_cell),
        duration,
        listed_in: get(row, layout.listed_in).map(str::to_string),
        passthrough: layout
            .passthrough
            .iter()
            .map(|&i| row.get(i).cloned().flatten())
            .collect(),
    }
}
