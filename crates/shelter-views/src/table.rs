//! Record table view

use egui::Ui;
use shelter_core::{DashboardState, TableState};
use uuid::Uuid;

use crate::{DashboardPanel, PanelResponse, ViewId};

/// Configuration for the record table
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub show_row_numbers: bool,
    pub striped_rows: bool,
    pub resizable_columns: bool,
    /// Rows per page
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            striped_rows: true,
            resizable_columns: true,
            page_size: 10,
        }
    }
}

/// Table view over the current filtered row set with single-row selection
pub struct RecordTableView {
    id: ViewId,
    title: String,
    pub config: TableConfig,

    // Pager state; reset whenever the row set changes size
    page: usize,
    last_row_count: usize,
}

impl RecordTableView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            config: TableConfig::default(),
            page: 0,
            last_row_count: 0,
        }
    }

    fn page_count(&self, table: &TableState) -> usize {
        let pages = table.rows.len().div_ceil(self.config.page_size);
        pages.max(1)
    }

    fn pager_controls(&mut self, ui: &mut Ui, table: &TableState) {
        let pages = self.page_count(table);
        ui.horizontal(|ui| {
            if ui.add_enabled(self.page > 0, egui::Button::new("◀")).clicked() {
                self.page -= 1;
            }
            ui.label(format!("Page {} of {}", self.page + 1, pages));
            if ui
                .add_enabled(self.page + 1 < pages, egui::Button::new("▶"))
                .clicked()
            {
                self.page += 1;
            }
            ui.separator();
            ui.label(format!("{} records", table.rows.len()));
        });
    }

    fn render_table(&mut self, ui: &mut Ui, table: &TableState) -> Option<usize> {
        use egui_extras::{Column, TableBuilder};

        let mut picked = None;
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

        let start = self.page * self.config.page_size;
        let page_rows = table
            .rows
            .len()
            .saturating_sub(start)
            .min(self.config.page_size);

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true);

        // Selection circle column
        builder = builder.column(Column::initial(28.0).at_least(24.0));
        if self.config.show_row_numbers {
            builder = builder.column(Column::initial(50.0).at_least(40.0));
        }
        for _ in table.columns {
            builder = builder.column(
                Column::initial(120.0)
                    .at_least(60.0)
                    .at_most(300.0)
                    .clip(true)
                    .resizable(self.config.resizable_columns),
            );
        }

        builder
            .header(20.0, |mut header| {
                header.col(|_ui| {});
                if self.config.show_row_numbers {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                }
                for column in table.columns {
                    header.col(|ui| {
                        ui.strong(column.title).on_hover_text(column.id);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, page_rows, |row_index, mut row| {
                    let global_index = start + row_index;
                    let record = &table.rows[global_index];
                    let is_selected = table.selected == Some(global_index);

                    row.col(|ui| {
                        if ui.radio(is_selected, "").clicked() && !is_selected {
                            picked = Some(global_index);
                        }
                    });
                    if self.config.show_row_numbers {
                        row.col(|ui| {
                            ui.label(global_index.to_string());
                        });
                    }
                    for column in table.columns {
                        row.col(|ui| {
                            ui.label(record.field_text(column.id));
                        });
                    }
                });
            });

        picked
    }

    /// Render the table; returns the row the user picked this frame
    pub fn show(&mut self, ui: &mut Ui, table: &TableState) -> Option<usize> {
        if table.rows.len() != self.last_row_count {
            self.last_row_count = table.rows.len();
            self.page = 0;
        }

        if table.rows.is_empty() {
            ui.label("No records match the current filter.");
            return None;
        }

        self.pager_controls(ui, table);
        self.render_table(ui, table)
    }
}

impl DashboardPanel for RecordTableView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ui: &mut Ui, state: &DashboardState) -> PanelResponse {
        PanelResponse {
            selected_row: self.show(ui, &state.table),
        }
    }
}
