use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use variant_panel::color::significance_color;
use variant_panel::data::model::Variant;
use variant_panel::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Variant table (central panel)
// ---------------------------------------------------------------------------

/// Render the displayed variants and the "show all" control.
pub fn variant_table(ui: &mut Ui, state: &mut AppState) {
    let Some(service) = &state.service else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view variants  (File → Open…)");
        });
        return;
    };

    let displayed = service.displayed_variants();
    let remaining = service.filtered_count().saturating_sub(displayed.len());
    let more_available = service.show_all_variants_available();

    let mut show_all_clicked = false;
    if more_available
        && ui
            .button(format!("Show all ({remaining} more)"))
            .clicked()
    {
        show_all_clicked = true;
    }

    if displayed.is_empty() {
        ui.label("No variants match the current filters.");
    } else {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(160.0))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto().at_least(200.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in ["Variant", "Genotype", "Significance", "HGVS", "External sources"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for variant in &displayed {
                    body.row(ROW_HEIGHT, |mut row| {
                        variant_row(&mut row, variant);
                    });
                }
            });
    }

    if show_all_clicked {
        state.show_all();
    }
}

fn variant_row(row: &mut egui_extras::TableRow<'_, '_>, variant: &Variant) {
    row.col(|ui| {
        ui.label(&variant.allele_name);
    });
    row.col(|ui| {
        ui.label(&variant.genotype);
    });
    row.col(|ui| {
        let mut text = RichText::new(&variant.significance);
        if let Some(c) = significance_color(&variant.significance) {
            text = text.color(c).strong();
        }
        // Values outside the known options are shown, but set apart.
        if variant.significance_kind().is_none() {
            text = text.italics().weak();
        }
        ui.label(text);
    });
    row.col(|ui| {
        let hgvs: Vec<&str> = variant.hgvs_values().collect();
        ui.label(hgvs.join(", "));
    });
    row.col(|ui| {
        for entry in &variant.external_source_entries {
            let label = if entry.source_genetic_variant_identifier.is_empty() {
                entry.annotation_source_name.clone()
            } else {
                format!(
                    "{} {}",
                    entry.annotation_source_name, entry.source_genetic_variant_identifier
                )
            };
            if entry.source_genetic_variant_url.is_empty() {
                ui.label(label);
            } else {
                ui.hyperlink_to(label, &entry.source_genetic_variant_url);
            }
        }
    });
}
