use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::color::{ACCENT, SECONDARY};
use crate::data::aggregate::{Bin, Summary};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render metric cards and every chart for the current filtered view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.catalog.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to explore it  (File → Open…)");
        });
        return;
    }

    let summary = &state.summary;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric_cards(ui, summary);
            ui.add_space(8.0);

            if summary.total == 0 {
                ui.label(RichText::new("No titles match the current filters.").italics());
                return;
            }

            ui.columns(2, |cols| {
                cols[0].strong("Content added over years");
                year_trend(&mut cols[0], summary);
                cols[1].strong("Content type split");
                category_bars(&mut cols[1], "type_split", &summary.by_type, false, |label| {
                    if label == "Movie" {
                        ACCENT
                    } else {
                        SECONDARY
                    }
                });
            });

            ui.columns(2, |cols| {
                cols[0].strong("Content by country");
                category_bars(&mut cols[0], "countries", &summary.top_countries, true, |_| {
                    ACCENT
                });
                cols[1].strong("Top directors");
                category_bars(&mut cols[1], "directors", &summary.top_directors, true, |_| {
                    ACCENT
                });
            });

            ui.columns(2, |cols| {
                cols[0].strong("Rating distribution");
                let colors = state.rating_colors.clone();
                category_bars(&mut cols[0], "ratings", &summary.by_rating, false, move |label| {
                    colors
                        .as_ref()
                        .map_or(SECONDARY, |cm| cm.color_for(label))
                });
                cols[1].strong("Movie duration distribution");
                duration_histogram(&mut cols[1], &summary.movie_durations);
            });

            ui.add_space(8.0);
            ui.strong("Most common genres");
            genre_cloud(ui, &summary.genres);
        });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metric_cards(ui: &mut Ui, summary: &Summary) {
    let mean = summary
        .mean_movie_minutes
        .map_or_else(|| "–".to_string(), |m| format!("{m:.0} min"));

    ui.columns(4, |cols| {
        card(&mut cols[0], summary.total.to_string(), "Total titles");
        card(&mut cols[1], summary.movies.to_string(), "Movies");
        card(&mut cols[2], summary.tv_shows.to_string(), "TV shows");
        card(&mut cols[3], mean, "Avg movie length");
    });
}

fn card(ui: &mut Ui, value: String, caption: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(value).size(26.0).strong().color(ACCENT));
            ui.label(caption);
        });
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn year_trend(ui: &mut Ui, summary: &Summary) {
    let pts: Vec<[f64; 2]> = summary
        .by_year
        .iter()
        .map(|(&year, &count)| [year as f64, count as f64])
        .collect();

    Plot::new("year_trend")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Year added")
        .y_axis_label("Titles")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(pts.clone()))
                    .color(ACCENT)
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(pts)).color(ACCENT).radius(3.0));
        });
}

/// Label for a category axis tick; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 0.01 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Bar chart of `(label, count)` pairs, first item first.
fn category_bars(
    ui: &mut Ui,
    id: &str,
    items: &[(String, usize)],
    horizontal: bool,
    color_for: impl Fn(&str) -> Color32,
) {
    // Horizontal charts list the largest entry at the top.
    let ordered: Vec<&(String, usize)> = if horizontal {
        items.iter().rev().collect()
    } else {
        items.iter().collect()
    };
    let labels: Vec<String> = ordered.iter().map(|(l, _)| l.clone()).collect();

    let bars: Vec<Bar> = ordered
        .iter()
        .enumerate()
        .map(|(pos, (label, count))| {
            Bar::new(pos as f64, *count as f64)
                .name(label)
                .fill(color_for(label))
                .width(0.7)
        })
        .collect();

    let mut chart = BarChart::new(bars);
    if horizontal {
        chart = chart.horizontal();
    }

    let formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        category_label(&labels, mark.value)
    };

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .show_grid([!horizontal, horizontal]);
    plot = if horizontal {
        plot.y_axis_formatter(formatter).x_axis_label("Titles")
    } else {
        plot.x_axis_formatter(formatter).y_axis_label("Titles")
    };

    plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn duration_histogram(ui: &mut Ui, bins: &[Bin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            let width = (b.end - b.start).max(1.0);
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(width)
                .name(format!("{:.0}–{:.0} min", b.start, b.end))
                .fill(ACCENT)
        })
        .collect();

    Plot::new("duration_histogram")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Duration (min)")
        .y_axis_label("Count")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));
}

/// Words sized by frequency, wrapped like a cloud.
fn genre_cloud(ui: &mut Ui, genres: &[(String, usize)]) {
    let Some(max) = genres.iter().map(|(_, c)| *c).max() else {
        return;
    };
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (word, count) in genres {
            let weight = *count as f32 / max as f32;
            let size = 12.0 + 28.0 * weight;
            let color = ACCENT.gamma_multiply(0.4 + 0.6 * weight);
            ui.label(RichText::new(word).size(size).color(color))
                .on_hover_text(format!("{count}"));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_only_on_whole_positions() {
        let labels = vec!["PG".to_string(), "R".to_string()];
        assert_eq!(category_label(&labels, 0.0), "PG");
        assert_eq!(category_label(&labels, 1.004), "R");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
