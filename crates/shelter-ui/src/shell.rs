//! Application shell: header and footer chrome

use egui::{Context, TopBottomPanel, Ui};

/// Application shell that manages the page structure
pub struct AppShell {
    pub title: String,
    pub subtitle: String,
}

impl AppShell {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Render the page header
pub fn header(ctx: &Context, shell: &AppShell) {
    TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(6.0);
            ui.heading(&shell.title);
            if !shell.subtitle.is_empty() {
                ui.label(&shell.subtitle);
            }
            ui.add_space(6.0);
        });
    });
}

/// Render the page footer with an optional status line
pub fn footer(ctx: &Context, status: Option<&str>, add_contents: impl FnOnce(&mut Ui)) {
    TopBottomPanel::bottom("dashboard_footer").show(ctx, |ui| {
        ui.horizontal(|ui| {
            add_contents(ui);
            if let Some(status) = status {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(250, 150, 100), status);
            }
        });
    });
}
