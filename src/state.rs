use std::path::{Path, PathBuf};

use crate::data::filter::VariantFilterService;
use crate::data::loader::load_file;
use crate::data::model::Variant;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded variants and their filter (None until user loads a file).
    pub service: Option<VariantFilterService>,

    /// File the current variants came from.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded variant list and show its first page.
    pub fn set_variants(&mut self, variants: Vec<Variant>) {
        let mut service = VariantFilterService::new(variants);
        service.load_initial_variants();

        self.service = Some(service);
        self.status_message = None;
    }

    /// Load a file, replacing the current variants on success.
    /// On failure the previous variants are kept and the error is shown.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(variants) => {
                log::info!("Loaded {} variants from {}", variants.len(), path.display());
                self.set_variants(variants);
                self.source = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Reset the display window after a filter change.
    pub fn refilter(&mut self) {
        if let Some(service) = &mut self.service {
            service.filter_variants();
        }
    }

    pub fn show_all(&mut self) {
        if let Some(service) = &mut self.service {
            service.show_all();
        }
    }

    pub fn clear_filters(&mut self) {
        if let Some(service) = &mut self.service {
            service.clear_filters();
        }
    }

    /// `(loaded, matching, shown)` counts for the status bar.
    pub fn counts(&self) -> Option<(usize, usize, usize)> {
        self.service
            .as_ref()
            .map(|s| (s.len(), s.filtered_count(), s.displayed_count()))
    }
}
