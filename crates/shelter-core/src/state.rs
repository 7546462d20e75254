//! Dashboard settings

/// User-tunable dashboard settings
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// Rows shown per table page
    pub page_size: usize,

    /// Whether to show the breed chart panel
    pub show_breed_chart: bool,

    /// Whether to show the geolocation panel
    pub show_map: bool,

    /// Whether to use dark mode
    pub dark_mode: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            show_breed_chart: true,
            show_map: true,
            dark_mode: true,
        }
    }
}
