//! Geolocation map view
//!
//! Plots the focused record's coordinate with a marker, tooltip, and a
//! popup panel. An empty focus renders an explicit empty state.

use egui::Ui;
use egui_plot::{Plot, PlotBounds, PlotPoint, Points, Text};
use shelter_core::{DashboardState, MapFocus};
use uuid::Uuid;

use crate::{DashboardPanel, PanelResponse, ViewId};

/// Map view configuration
#[derive(Debug, Clone)]
pub struct MapViewConfig {
    /// Half-span of the view window, in degrees
    pub window_degrees: f64,
    pub marker_radius: f32,
    pub show_popup: bool,
    pub height: f32,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            window_degrees: 0.35,
            marker_radius: 6.0,
            show_popup: true,
            height: 320.0,
        }
    }
}

/// Geolocation view for the focused record
pub struct MapView {
    id: ViewId,
    title: String,
    pub config: MapViewConfig,
}

impl MapView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            config: MapViewConfig::default(),
        }
    }

    fn render_map(&self, ui: &mut Ui, focus: &MapFocus) {
        let span = self.config.window_degrees;
        let center = [focus.longitude, focus.latitude];

        Plot::new(self.id)
            .height(self.config.height)
            .data_aspect(1.0)
            .show_axes([true, true])
            .allow_scroll(true)
            .allow_drag(true)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [center[0] - span, center[1] - span],
                    [center[0] + span, center[1] + span],
                ));
                plot_ui.points(
                    Points::new(vec![center])
                        .radius(self.config.marker_radius)
                        .color(egui::Color32::from_rgb(250, 100, 100))
                        .name(&focus.breed),
                );
                // Tooltip text above the marker
                plot_ui.text(Text::new(
                    PlotPoint::new(center[0], center[1] + span * 0.08),
                    focus.breed.clone(),
                ));
            });
    }

    fn render_popup(&self, ui: &mut Ui, focus: &MapFocus) {
        ui.group(|ui| {
            ui.strong("Animal Breed");
            ui.label(&focus.breed);
            ui.strong("Animal Name");
            if focus.name.is_empty() {
                ui.label("(no name recorded)");
            } else {
                ui.label(&focus.name);
            }
            ui.strong("Location");
            ui.label(format!("{:.4}, {:.4}", focus.latitude, focus.longitude));
        });
    }
}

impl DashboardPanel for MapView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ui: &mut Ui, state: &DashboardState) -> PanelResponse {
        match &state.focus {
            None => {
                ui.label("No location to display: the current filter matched no records.");
            }
            Some(focus) => {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| self.render_map(ui, focus));
                    if self.config.show_popup {
                        self.render_popup(ui, focus);
                    }
                });
            }
        }
        PanelResponse::default()
    }
}
