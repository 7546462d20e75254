//! Filter preset panel
//!
//! Radio items for the rescue presets plus Reset. Exactly one item is
//! active at a time; the panel reports a change only on the frame the
//! user picks a different item.

use egui::Ui;
use shelter_core::RescueFilter;

/// Filter panel configuration
#[derive(Debug, Clone)]
pub struct FilterPanelConfig {
    /// Prompt shown above the radio items
    pub prompt: String,
    pub horizontal: bool,
}

impl Default for FilterPanelConfig {
    fn default() -> Self {
        Self {
            prompt: "Select a type of rescue to filter results:".to_string(),
            horizontal: true,
        }
    }
}

/// Radio-items preset selector
pub struct FilterPanel {
    config: FilterPanelConfig,
    selection: Option<RescueFilter>,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self {
            config: FilterPanelConfig::default(),
            selection: None,
        }
    }

    pub fn with_config(config: FilterPanelConfig) -> Self {
        Self {
            config,
            selection: None,
        }
    }

    /// The currently active selection; `None` is Reset
    pub fn selection(&self) -> Option<RescueFilter> {
        self.selection
    }

    fn radio_items(&mut self, ui: &mut Ui) {
        for filter in RescueFilter::ALL {
            ui.radio_value(&mut self.selection, Some(filter), filter.label());
        }
        ui.radio_value(&mut self.selection, None, "Reset");
    }

    /// Render the panel; returns the new selection when it changed
    pub fn show(&mut self, ui: &mut Ui) -> Option<Option<RescueFilter>> {
        let before = self.selection;

        ui.heading(&self.config.prompt);
        if self.config.horizontal {
            ui.horizontal(|ui| self.radio_items(ui));
        } else {
            self.radio_items(ui);
        }

        (self.selection != before).then_some(self.selection)
    }
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self::new()
    }
}
