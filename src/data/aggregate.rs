use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::{ContentType, UNKNOWN};
use crate::config::ChartSettings;

/// Words dropped from the genre cloud.
const STOP_WORDS: &[&str] = &["and", "the", "of", "to", "in", "for", "on", "with"];

// ---------------------------------------------------------------------------
// Counting helpers
// ---------------------------------------------------------------------------

/// Count occurrences, most frequent first. Equal counts keep first-seen order.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        let c = counts.entry(v).or_insert(0);
        if *c == 0 {
            order.push(v);
        }
        *c += 1;
    }

    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|v| (v.to_string(), counts[v]))
        .collect();
    // stable: ties stay in first-seen order
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over `[min, max]`; the last bin includes `max`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![Bin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Genre tokens
// ---------------------------------------------------------------------------

/// Word frequencies over all `listed_in` texts, case-insensitive.
///
/// A word is a run of alphanumerics or apostrophes, at least two characters
/// long. The first spelling seen is the one reported.
pub fn genre_frequencies<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();

    for text in texts {
        for word in text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|w| w.trim_matches('\''))
            .filter(|w| w.chars().count() >= 2)
        {
            let key = word.to_lowercase();
            if STOP_WORDS.contains(&key.as_str()) {
                continue;
            }
            let entry = seen.entry(key).or_insert_with(|| {
                order.push(word.to_string());
                (order.len() - 1, 0)
            });
            entry.1 += 1;
        }
    }

    let mut out: Vec<(String, usize)> = vec![(String::new(), 0); order.len()];
    for (slot, count) in seen.into_values() {
        out[slot] = (std::mem::take(&mut order[slot]), count);
    }
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out.truncate(limit);
    out
}

// ---------------------------------------------------------------------------
// Summary – everything the dashboard draws
// ---------------------------------------------------------------------------

/// Aggregates over one filtered view. Recomputed on every filter change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
    /// Mean duration of movies with a known duration.
    pub mean_movie_minutes: Option<f64>,
    pub by_year: BTreeMap<i32, usize>,
    pub by_type: Vec<(String, usize)>,
    pub top_countries: Vec<(String, usize)>,
    pub top_directors: Vec<(String, usize)>,
    pub by_rating: Vec<(String, usize)>,
    pub movie_durations: Vec<Bin>,
    pub genres: Vec<(String, usize)>,
}

impl Summary {
    pub fn compute(view: &FilteredView<'_>, charts: &ChartSettings) -> Self {
        let mut movies = 0;
        let mut tv_shows = 0;
        let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
        let mut movie_minutes: Vec<f64> = Vec::new();

        for rec in view.iter() {
            match rec.content_type {
                ContentType::Movie => {
                    movies += 1;
                    if let Some(m) = rec.duration.value {
                        movie_minutes.push(m as f64);
                    }
                }
                ContentType::TvShow => tv_shows += 1,
                ContentType::Other(_) => {}
            }
            if let Some(y) = rec.year_added {
                *by_year.entry(y).or_default() += 1;
            }
        }

        let mean_movie_minutes = if movie_minutes.is_empty() {
            None
        } else {
            Some(movie_minutes.iter().sum::<f64>() / movie_minutes.len() as f64)
        };

        let mut top_countries = value_counts(
            view.iter()
                .map(|r| r.country.as_str())
                .filter(|c| *c != UNKNOWN),
        );
        top_countries.truncate(charts.top_countries);

        let mut top_directors = value_counts(
            view.iter()
                .map(|r| r.director.as_str())
                .filter(|d| *d != UNKNOWN),
        );
        top_directors.truncate(charts.top_directors);

        Summary {
            total: view.len(),
            movies,
            tv_shows,
            mean_movie_minutes,
            by_year,
            by_type: value_counts(view.iter().map(|r| r.content_type.as_str())),
            top_countries,
            top_directors,
            by_rating: value_counts(view.iter().map(|r| r.rating.as_str())),
            movie_durations: histogram(&movie_minutes, charts.histogram_bins),
            genres: genre_frequencies(
                view.iter().filter_map(|r| r.listed_in.as_deref()),
                charts.genre_words,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSpec};
    use crate::data::loader::read_csv;
    use crate::data::model::Catalog;
    use crate::data::normalize::normalize;

    fn catalog() -> Catalog {
        normalize(
            read_csv(
                "title,type,director,country,date_added,rating,duration,listed_in\n\
                 A,Movie,Ava,India,2019-01-01,TV-MA,90 min,\"Dramas, International Movies\"\n\
                 B,TV Show,,United States,2019-06-01,TV-14,2 Seasons,\"International TV Shows, TV Dramas\"\n\
                 C,Movie,Bo,,2020-01-01,TV-MA,110 min,Comedies\n\
                 D,Movie,Ava,United States,,R,Unknown,\n\
                 E,Movie,Bo,India,2021-03-03,TV-MA,130 min,\"Dramas, Comedies\"\n"
                    .as_bytes(),
            )
            .unwrap(),
        )
    }

    fn everything() -> FilterSpec {
        FilterSpec {
            ratings: ["TV-MA", "TV-14", "R"].iter().map(|s| s.to_string()).collect(),
            ..FilterSpec::default()
        }
    }

    #[test]
    fn value_counts_orders_by_count_then_first_seen() {
        let counts = value_counts(["b", "a", "a", "c", "b", "d"]);
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1)
            ]
        );
    }

    #[test]
    fn histogram_edges() {
        assert!(histogram(&[], 30).is_empty());

        let single = histogram(&[90.0, 90.0], 30);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);

        let bins = histogram(&[0.0, 5.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[1].end, 10.0);
    }

    #[test]
    fn genre_words_are_case_folded() {
        let words = genre_frequencies(
            ["Dramas, International Movies", "International TV Shows, TV Dramas", "dramas"],
            10,
        );
        assert_eq!(words[0], ("Dramas".to_string(), 3));
        assert_eq!(words[1], ("International".to_string(), 2));
        assert_eq!(words[2], ("TV".to_string(), 2));
        assert!(words.iter().all(|(w, _)| w.len() >= 2));

        assert_eq!(genre_frequencies(["Action & Adventure"], 10).len(), 2);
        assert_eq!(genre_frequencies(["a b c"], 10), vec![]);
    }

    #[test]
    fn summary_over_all_titles() {
        let cat = catalog();
        // D has no year or duration, so only four titles pass
        let view = apply(&cat, &everything());
        assert_eq!(view.len(), 4);

        let s = Summary::compute(&view, &ChartSettings::default());
        assert_eq!(s.total, 4);
        assert_eq!(s.movies, 3);
        assert_eq!(s.tv_shows, 1);
        assert_eq!(s.mean_movie_minutes, Some(110.0));
        assert_eq!(s.by_year.get(&2019), Some(&2));
        assert_eq!(s.by_year.get(&2021), Some(&1));
        assert_eq!(
            s.by_type,
            vec![("Movie".to_string(), 3), ("TV Show".to_string(), 1)]
        );
        assert_eq!(
            s.top_countries,
            vec![("India".to_string(), 2), ("United States".to_string(), 1)]
        );
        assert_eq!(s.top_directors, vec![("Bo".to_string(), 2), ("Ava".to_string(), 1)]);
        assert_eq!(s.by_rating[0], ("TV-MA".to_string(), 3));
        assert_eq!(s.movie_durations.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(s.genres[0].0, "Dramas");
    }

    #[test]
    fn summary_truncates_top_lists() {
        let cat = catalog();
        let view = apply(&cat, &everything());
        let charts = ChartSettings {
            top_countries: 1,
            top_directors: 1,
            ..ChartSettings::default()
        };
        let s = Summary::compute(&view, &charts);
        assert_eq!(s.top_countries.len(), 1);
        assert_eq!(s.top_directors.len(), 1);
    }

    #[test]
    fn empty_view_degrades_gracefully() {
        let cat = catalog();
        let spec = FilterSpec {
            ratings: Default::default(),
            ..everything()
        };
        let view = apply(&cat, &spec);
        let s = Summary::compute(&view, &ChartSettings::default());
        assert_eq!(s.total, 0);
        assert_eq!(s.mean_movie_minutes, None);
        assert!(s.by_year.is_empty());
        assert!(s.movie_durations.is_empty());
        assert!(s.genres.is_empty());
    }
}
