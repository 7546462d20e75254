//! UI chrome for the rescue animal dashboard

mod filter_panel;
mod shell;
mod theme;

pub use filter_panel::{FilterPanel, FilterPanelConfig};
pub use shell::{footer, header, AppShell};
pub use theme::{apply_theme, Theme};
