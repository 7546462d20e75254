//! Dashboard application wiring
//!
//! Owns the tokio runtime, the controller, and the settled dashboard
//! state. User events dispatch through the controller pipeline and the
//! widgets only ever see the state that comes back.

use std::sync::Arc;

use eframe::egui::{self, CentralPanel, ScrollArea};
use shelter_core::events::EventBus;
use shelter_core::{
    DashboardController, DashboardSettings, DashboardState, RecordSource, RescueFilter,
};
use shelter_data::ShelterGateway;
use shelter_ui::{apply_theme, footer, header, AppShell, FilterPanel, Theme};
use shelter_views::{BreedChartView, DashboardPanel, MapView, RecordTableView};
use tracing::error;

use crate::config::DashboardConfig;

/// Main application state
pub struct ShelterDashApp {
    /// Tokio runtime driving the store queries
    runtime: tokio::runtime::Runtime,

    /// The reactive core
    controller: DashboardController,

    /// The settled dashboard state all widgets render from
    state: DashboardState,

    _settings: DashboardSettings,
    shell: AppShell,
    filter_panel: FilterPanel,

    /// Stacked dashboard panels, rendered in order
    panels: Vec<Box<dyn DashboardPanel>>,

    /// Store label for the footer
    source_name: String,

    /// Last store failure surfaced to the user
    last_error: Option<String>,
}

impl ShelterDashApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        gateway: Arc<ShelterGateway>,
        events: Arc<EventBus>,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        let theme = Theme {
            dark_mode: config.dark_mode,
            ..Theme::default()
        };
        apply_theme(&cc.egui_ctx, &theme);

        let settings = DashboardSettings {
            page_size: config.page_size,
            dark_mode: config.dark_mode,
            ..DashboardSettings::default()
        };

        let source_name = gateway.source_name().to_string();
        let source: Arc<dyn RecordSource> = gateway;
        let controller = DashboardController::new(source, events);

        let mut table = RecordTableView::new("Data from Local Animal Shelters");
        table.config.page_size = settings.page_size;

        let mut panels: Vec<Box<dyn DashboardPanel>> = vec![Box::new(table)];
        if settings.show_map {
            panels.push(Box::new(MapView::new("Geolocation")));
        }
        if settings.show_breed_chart {
            panels.push(Box::new(BreedChartView::new("Animal Breeds")));
        }

        let mut app = Self {
            runtime,
            controller,
            state: DashboardState::default(),
            _settings: settings,
            shell: AppShell::new(
                config.window_title.clone(),
                "Select a row to inspect an animal's location",
            ),
            filter_panel: FilterPanel::new(),
            panels,
            source_name,
            last_error: None,
        };

        // Initial unfiltered load so the page opens populated
        app.dispatch_filter(None);
        app
    }

    /// Run the filter-change pipeline to completion and adopt its state
    fn dispatch_filter(&mut self, selection: Option<RescueFilter>) {
        match self
            .runtime
            .block_on(self.controller.on_filter_change(selection))
        {
            Ok(state) => {
                self.state = state;
                self.last_error = None;
            }
            Err(err) => {
                error!(%err, "filter change failed");
                self.last_error = Some(err.to_string());
            }
        }
    }
}

impl eframe::App for ShelterDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        header(ctx, &self.shell);

        let record_count = self.state.table.rows.len();
        let source_name = self.source_name.clone();
        footer(ctx, self.last_error.as_deref(), |ui| {
            ui.label(format!("Store: {source_name}"));
            ui.separator();
            ui.label(format!("{record_count} records"));
        });

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                if let Some(selection) = self.filter_panel.show(ui) {
                    self.dispatch_filter(selection);
                }
                ui.separator();

                let mut picked_row = None;
                for panel in &mut self.panels {
                    ui.heading(panel.title());
                    let response = panel.ui(ui, &self.state);
                    if response.selected_row.is_some() {
                        picked_row = response.selected_row;
                    }
                    ui.separator();
                }

                if picked_row.is_some() {
                    self.controller.on_selection_change(&mut self.state, picked_row);
                }
            });
        });
    }
}
