//! Color utilities for the dashboard widgets

use egui::Color32;

/// Get a categorical color from the palette
pub fn categorical_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(100, 150, 250), // Blue
        Color32::from_rgb(250, 150, 100), // Orange
        Color32::from_rgb(150, 250, 100), // Green
        Color32::from_rgb(250, 100, 150), // Pink
        Color32::from_rgb(150, 100, 250), // Purple
        Color32::from_rgb(250, 250, 100), // Yellow
        Color32::from_rgb(100, 250, 250), // Cyan
        Color32::from_rgb(250, 100, 100), // Red
    ];
    PALETTE[index % PALETTE.len()]
}
