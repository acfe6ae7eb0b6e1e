use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;
use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Title",
    "Type",
    "Director",
    "Country",
    "Date added",
    "Rating",
    "Duration",
    "Genres",
];

fn cells(rec: &Record) -> [String; 8] {
    [
        rec.title.clone(),
        rec.content_type.to_string(),
        rec.director.clone(),
        rec.country.clone(),
        rec.date_added
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        rec.rating.clone(),
        rec.duration_raw.clone(),
        rec.listed_in.clone().unwrap_or_default(),
    ]
}

/// Scrollable table of the filtered titles.
pub fn filtered_table(ui: &mut Ui, state: &AppState) {
    let Some(catalog) = &state.catalog else {
        ui.label("No catalog loaded.");
        return;
    };
    if catalog.is_empty() {
        ui.label("The catalog has no titles.");
        return;
    }
    let records = catalog.records();
    let rows = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(240.0).at_least(80.0).clip(true))
        .columns(Column::auto(), 6)
        .column(Column::remainder().clip(true))
        .header(22.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let rec = &records[rows[row.index()]];
                for (i, text) in cells(rec).into_iter().enumerate() {
                    row.col(|ui| {
                        if i == 0 {
                            ui.label(RichText::new(text).strong());
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::normalize::normalize;

    #[test]
    fn cells_follow_header_order() {
        let cat = normalize(
            read_csv(
                "title,type,date_added,rating,duration,listed_in\n\
                 Alpha,TV Show,\"April 2, 2019\",TV-PG,1 Season,Kids' TV\n"
                    .as_bytes(),
            )
            .unwrap(),
        );
        let row = cells(&cat.records()[0]);
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[1], "TV Show");
        assert_eq!(row[2], "Unknown");
        assert_eq!(row[4], "2019-04-02");
        assert_eq!(row[6], "1 Season");
        assert_eq!(row[7], "Kids' TV");
    }
}
