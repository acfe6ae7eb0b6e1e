use eframe::egui;

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

/// What the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Table,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CatalogExplorerApp {
    pub state: AppState,
    tab: Tab,
}

impl CatalogExplorerApp {
    /// Build the app and load the configured catalog, once per session.
    pub fn new(settings: Settings) -> Self {
        let source = settings.data.source.clone();
        let mut state = AppState::new(settings);
        if source.exists() {
            state.open(&source);
        } else {
            log::warn!("Catalog {} not found, waiting for File → Open…", source.display());
            state.status_message = Some(format!("{} not found", source.display()));
        }
        Self {
            state,
            tab: Tab::Dashboard,
        }
    }
}

impl eframe::App for CatalogExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard or table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Dashboard, "Dashboard");
                ui.selectable_value(&mut self.tab, Tab::Table, "Table");
            });
            ui.separator();
            match self.tab {
                Tab::Dashboard => charts::dashboard(ui, &self.state),
                Tab::Table => table::filtered_table(ui, &self.state),
            }
        });
    }
}
