//! Breed distribution pie chart

use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use shelter_core::{BreedDistribution, DashboardState};
use uuid::Uuid;

use crate::colors::categorical_color;
use crate::{DashboardPanel, PanelResponse, ViewId};

const TAU: f64 = 2.0 * std::f64::consts::PI;

/// Breed chart configuration
#[derive(Debug, Clone)]
pub struct BreedChartConfig {
    pub show_labels: bool,
    /// Slices smaller than this fraction get no in-slice label
    pub label_threshold: f64,
    pub show_legend: bool,
    pub show_tooltip: bool,
}

impl Default for BreedChartConfig {
    fn default() -> Self {
        Self {
            show_labels: true,
            label_threshold: 0.04,
            show_legend: true,
            show_tooltip: true,
        }
    }
}

/// One computed pie slice
#[derive(Debug, Clone)]
struct Slice {
    breed: String,
    count: usize,
    fraction: f64,
    angle_start: f64,
    angle_end: f64,
    color: Color32,
}

/// Pie chart over the breed distribution of the current row set
pub struct BreedChartView {
    id: ViewId,
    title: String,
    pub config: BreedChartConfig,
}

impl BreedChartView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            config: BreedChartConfig::default(),
        }
    }

    fn draw_slice(&self, painter: &egui::Painter, center: Pos2, radius: f32, slice: &Slice) {
        let span = slice.angle_end - slice.angle_start;
        let segments = ((span * 180.0 / std::f64::consts::PI).max(8.0)) as usize;

        // Triangle fan from the center out to the rim
        for i in 0..segments {
            let a0 = slice.angle_start + span * (i as f64 / segments as f64);
            let a1 = slice.angle_start + span * ((i + 1) as f64 / segments as f64);
            let p0 = center + Vec2::new(radius * a0.cos() as f32, radius * a0.sin() as f32);
            let p1 = center + Vec2::new(radius * a1.cos() as f32, radius * a1.sin() as f32);

            painter.add(Shape::convex_polygon(
                vec![center, p0, p1],
                slice.color,
                Stroke::new(1.0, Color32::from_gray(240)),
            ));
        }

        if self.config.show_labels && slice.fraction > self.config.label_threshold {
            let mid_angle = (slice.angle_start + slice.angle_end) / 2.0;
            let label_pos = center
                + Vec2::new(
                    radius * 0.62 * mid_angle.cos() as f32,
                    radius * 0.62 * mid_angle.sin() as f32,
                );
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                format!("{:.0}%", slice.fraction * 100.0),
                FontId::proportional(11.0),
                Color32::from_gray(20),
            );
        }
    }

    fn draw_legend(&self, ui: &mut Ui, slices: &[Slice]) {
        for slice in slices {
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                ui.painter().rect_filled(rect, 2.0, slice.color);
                ui.label(format!(
                    "{}: {} ({:.1}%)",
                    slice.breed,
                    slice.count,
                    slice.fraction * 100.0
                ));
            });
        }
    }
}

/// Turn the distribution into angle-assigned slices
fn layout_slices(breeds: &BreedDistribution) -> Vec<Slice> {
    let total = breeds.total();
    if total == 0 {
        return Vec::new();
    }

    let mut slices = Vec::with_capacity(breeds.len());
    let mut angle = 0.0_f64;
    for (index, (breed, count)) in breeds.iter().enumerate() {
        let fraction = count as f64 / total as f64;
        let angle_end = angle + fraction * TAU;
        slices.push(Slice {
            breed: breed.to_string(),
            count,
            fraction,
            angle_start: angle,
            angle_end,
            color: categorical_color(index),
        });
        angle = angle_end;
    }
    slices
}

impl DashboardPanel for BreedChartView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ui: &mut Ui, state: &DashboardState) -> PanelResponse {
        let slices = layout_slices(&state.breeds);
        if slices.is_empty() {
            ui.label("No breed data for the current filter.");
            return PanelResponse::default();
        }

        ui.horizontal_top(|ui| {
            let size = ui.available_height().max(220.0).min(320.0);
            let (rect, response) =
                ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let radius = size / 2.0 * 0.9;

            for slice in &slices {
                self.draw_slice(&painter, center, radius, slice);
            }

            if self.config.show_tooltip {
                if let Some(pos) = response.hover_pos() {
                    let offset = pos - center;
                    if offset.length() <= radius {
                        let mut angle = (offset.y as f64).atan2(offset.x as f64);
                        if angle < 0.0 {
                            angle += TAU;
                        }
                        if let Some(slice) = slices
                            .iter()
                            .find(|s| angle >= s.angle_start && angle < s.angle_end)
                        {
                            egui::show_tooltip_at_pointer(
                                ui.ctx(),
                                egui::Id::new(self.id).with("slice"),
                                |ui| {
                                    ui.label(format!("{}: {}", slice.breed, slice.count));
                                },
                            );
                        }
                    }
                }
            }

            if self.config.show_legend {
                ui.vertical(|ui| self.draw_legend(ui, &slices));
            }
        });

        PanelResponse::default()
    }
}
