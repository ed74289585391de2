use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use variant_panel::color::{legend_entries, significance_color};
use variant_panel::data::model::{significance_options, GenotypeChoice};
use variant_panel::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

fn option_label(value: &str) -> &str {
    if value.is_empty() {
        "Any"
    } else {
        value
    }
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(service) = state.service.as_mut() else {
        ui.label("No variants loaded.");
        return;
    };

    let mut changed = false;
    let criteria = &mut service.criteria;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Significance ----
            ui.strong("Significance");
            let current = criteria.selected_significance.clone();
            let mut selected_text = RichText::new(option_label(&current));
            if let Some(c) = significance_color(&current) {
                selected_text = selected_text.color(c);
            }
            egui::ComboBox::from_id_salt("significance")
                .selected_text(selected_text)
                .show_ui(ui, |ui: &mut Ui| {
                    changed |= ui
                        .selectable_value(&mut criteria.selected_significance, String::new(), "Any")
                        .changed();
                    for option in significance_options() {
                        let mut text = RichText::new(option.as_str());
                        if let Some(c) = significance_color(option.as_str()) {
                            text = text.color(c);
                        }
                        changed |= ui
                            .selectable_value(
                                &mut criteria.selected_significance,
                                option.as_str().to_string(),
                                text,
                            )
                            .changed();
                    }
                });
            ui.add_space(4.0);

            // ---- Genotype ----
            ui.strong("Genotype");
            let current = criteria.selected_genotype.clone();
            egui::ComboBox::from_id_salt("genotype")
                .selected_text(option_label(&current))
                .show_ui(ui, |ui: &mut Ui| {
                    changed |= ui
                        .selectable_value(&mut criteria.selected_genotype, String::new(), "Any")
                        .changed();
                    for choice in GenotypeChoice::ALL {
                        changed |= ui
                            .selectable_value(
                                &mut criteria.selected_genotype,
                                choice.as_str().to_string(),
                                choice.as_str(),
                            )
                            .changed();
                    }
                });
            ui.add_space(4.0);

            // ---- Free-text filters ----
            ui.strong("Variant name");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut criteria.variant_name_filter)
                        .hint_text("e.g. BRCA1"),
                )
                .changed();
            ui.add_space(4.0);

            ui.strong("HGVS");
            changed |= ui
                .add(egui::TextEdit::singleline(&mut criteria.hgvs_filter).hint_text("e.g. c.68_69"))
                .changed();
            ui.add_space(8.0);

            if ui
                .add_enabled(!criteria.is_empty(), egui::Button::new("Clear filters"))
                .clicked()
            {
                criteria.clear();
                changed = true;
            }

            ui.separator();

            // ---- Legend ----
            ui.strong("Legend");
            for (significance, color) in legend_entries() {
                let mut text = RichText::new(significance.as_str());
                if let Some(c) = color {
                    text = text.color(c);
                }
                ui.label(text);
            }
        });

    // Every criteria change resets the window to the first page.
    if changed {
        service.filter_variants();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some((loaded, matching, shown)) = state.counts() {
            ui.label(format!(
                "{loaded} variants loaded, {matching} matching, {shown} shown"
            ));
        }

        if let Some(path) = &state.source {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open variant list")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
