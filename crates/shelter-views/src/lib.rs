//! Dashboard widgets for the rescue animal dashboard
//!
//! Every widget consumes derived view state only; the reactive pipeline
//! lives in `shelter-core`.

mod breed_chart;
mod colors;
mod map_view;
mod table;

pub use breed_chart::{BreedChartConfig, BreedChartView};
pub use colors::categorical_color;
pub use map_view::{MapView, MapViewConfig};
pub use table::{RecordTableView, TableConfig};

use egui::Ui;
use shelter_core::DashboardState;
use uuid::Uuid;

/// Unique identifier for a dashboard panel
pub type ViewId = Uuid;

/// Reaction reported by a panel after rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelResponse {
    /// Row picked by the user this frame, if any
    pub selected_row: Option<usize>,
}

/// Base trait for the stacked dashboard panels
pub trait DashboardPanel: Send + Sync {
    /// Get the unique ID of this panel
    fn id(&self) -> ViewId;

    /// Get the section title shown above the panel
    fn title(&self) -> &str;

    /// Draw the UI from the settled dashboard state
    fn ui(&mut self, ui: &mut Ui, state: &DashboardState) -> PanelResponse;
}
