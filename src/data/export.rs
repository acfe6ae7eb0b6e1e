use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use super::model::DERIVED_COLUMNS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Append `year_added`, `duration_value` and `duration_unit`.
    pub include_derived: bool,
}

/// Write a filtered view as CSV using the source's column order.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, opts: ExportOptions, out: W) -> Result<()> {
    let catalog = view.catalog();
    let columns = catalog.columns();
    let passthrough: Vec<Option<usize>> = columns
        .iter()
        .map(|c| catalog.passthrough_index(c))
        .collect();

    let mut wrt = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
    if opts.include_derived {
        header.extend(DERIVED_COLUMNS);
    }
    wrt.write_record(&header).context("writing CSV header")?;

    for (n, rec) in view.iter().enumerate() {
        let mut row: Vec<String> = columns
            .iter()
            .zip(&passthrough)
            .map(|(col, pt)| rec.cell(col, *pt).unwrap_or_default())
            .collect();
        if opts.include_derived {
            row.push(rec.year_added.map(|y| y.to_string()).unwrap_or_default());
            row.push(rec.duration.value.map(|v| v.to_string()).unwrap_or_default());
            row.push(rec.duration.unit.to_string());
        }
        wrt.write_record(&row)
            .with_context(|| format!("writing CSV row {n} ({:?})", rec.title))?;
    }

    wrt.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn export_to_path(view: &FilteredView<'_>, opts: ExportOptions, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(view, opts, std::io::BufWriter::new(file))?;
    log::info!("Exported {} titles to {}", view.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSpec};
    use crate::data::loader::{load_file, read_csv};
    use crate::data::model::{Catalog, Record};
    use crate::data::normalize::normalize;

    fn to_csv_string(view: &FilteredView<'_>, opts: ExportOptions) -> Result<String> {
        let mut buf = Vec::new();
        write_csv(view, opts, &mut buf)?;
        String::from_utf8(buf).context("CSV output is not UTF-8")
    }

    const SOURCE: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,\"A father, a daughter\"
s2,TV Show,Blood & Water,,Ama Qamata,South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas\",
s3,Movie,Ganglands,Julien Leclercq,Sami Bouajila,,\"September 24, 2021\",2021,,91 min,\"Crime TV Shows, International TV Shows\",Heist
s4,Movie,Jailbirds,,,,bogus,2021,TV-MA,Unknown,,
";

    fn catalog() -> Catalog {
        normalize(read_csv(SOURCE.as_bytes()).unwrap())
    }

    fn spec() -> FilterSpec {
        FilterSpec {
            ratings: ["PG-13", "TV-MA"].iter().map(|s| s.to_string()).collect(),
            year_range: (2015, 2021),
            duration_range: (1, 200),
            ..FilterSpec::default()
        }
    }

    /// Source-column cells of a record, i.e. everything but derived fields.
    fn source_cells(cat: &Catalog, r: &Record) -> Vec<Option<String>> {
        cat.columns()
            .iter()
            .map(|c| r.cell(c, cat.passthrough_index(c)))
            .collect()
    }

    #[test]
    fn header_matches_source_columns() {
        let cat = catalog();
        let view = apply(&cat, &spec());
        let text = to_csv_string(&view, ExportOptions::default()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, cat.columns().join(","));
    }

    #[test]
    fn export_writes_imputed_values_and_iso_dates() {
        let cat = catalog();
        let view = apply(&cat, &spec());
        // s1, s2 and s3 (rating imputed to TV-MA) pass; s4 has no year
        assert_eq!(view.len(), 3);

        let text = to_csv_string(&view, ExportOptions::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[1],
            "s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,Unknown,United States,2021-09-25,2020,PG-13,90 min,Documentaries,\"A father, a daughter\""
        );
        assert!(lines[3].contains(",TV-MA,91 min,"));
    }

    #[test]
    fn derived_columns_only_on_request() {
        let cat = catalog();
        let view = apply(&cat, &spec());
        let opts = ExportOptions {
            include_derived: true,
        };
        let text = to_csv_string(&view, opts).unwrap();
        let mut lines = text.lines();
        assert!(lines
            .next()
            .unwrap()
            .ends_with(",year_added,duration_value,duration_unit"));
        assert!(lines.next().unwrap().ends_with(",2021,90,minutes"));
        assert!(lines.next().unwrap().ends_with(",2021,2,seasons"));
    }

    #[test]
    fn export_then_reload_preserves_source_fields() {
        let cat = catalog();
        let view = apply(&cat, &spec());
        let text = to_csv_string(&view, ExportOptions::default()).unwrap();

        let reloaded = normalize(read_csv(text.as_bytes()).unwrap());
        assert_eq!(reloaded.columns(), cat.columns());
        assert_eq!(reloaded.len(), view.len());
        for (orig, back) in view.iter().zip(reloaded.records()) {
            assert_eq!(source_cells(&cat, orig), source_cells(&reloaded, back));
            assert_eq!(orig.date_added, back.date_added);
            assert_eq!(orig.content_type, back.content_type);
            assert_eq!(orig.year_added, back.year_added);
            assert_eq!(orig.duration, back.duration);
        }
    }

    #[test]
    fn export_to_path_round_trips_through_the_loader() {
        let cat = catalog();
        let view = apply(&cat, &spec());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");

        export_to_path(&view, ExportOptions::default(), &path).unwrap();
        let reloaded = load_file(&path).unwrap();
        let titles: Vec<&str> = reloaded.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Dick Johnson Is Dead", "Blood & Water", "Ganglands"]);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let cat = catalog();
        let spec = FilterSpec {
            ratings: Default::default(),
            ..spec()
        };
        let view = apply(&cat, &spec);
        let text = to_csv_string(&view, ExportOptions::default()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
