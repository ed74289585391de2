use super::model::{genotype_mapping, Variant};

/// Number of variants shown by [`VariantFilterService::load_initial_variants`].
pub const INITIAL_PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Filter criteria: one text value per filter control
// ---------------------------------------------------------------------------

/// Current filter selections. An empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact significance token, e.g. `PATHOGENIC`.
    pub selected_significance: String,
    /// UI genotype token (`HETEROZYGOTE` / `HOMOZYGOTE`), mapped before comparison.
    pub selected_genotype: String,
    /// Case-insensitive substring of the allele name.
    pub variant_name_filter: String,
    /// Case-insensitive substring of any HGVS value.
    pub hgvs_filter: String,
}

impl FilterCriteria {
    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.selected_significance.is_empty()
            && self.selected_genotype.is_empty()
            && self.variant_name_filter.is_empty()
            && self.hgvs_filter.is_empty()
    }

    /// Reset every criterion to "no constraint".
    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Return whether `variant` satisfies every active criterion.
    ///
    /// A non-empty genotype selection that has no canonical mapping matches
    /// nothing.
    pub fn matches(&self, variant: &Variant) -> bool {
        if !self.selected_significance.is_empty()
            && variant.significance != self.selected_significance
        {
            return false;
        }

        if !self.selected_genotype.is_empty() {
            match genotype_mapping(&self.selected_genotype) {
                Some(canonical) if variant.genotype == canonical => {}
                _ => return false,
            }
        }

        if !self.variant_name_filter.is_empty() {
            let needle = self.variant_name_filter.to_lowercase();
            if !variant.allele_name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if !self.hgvs_filter.is_empty() {
            let needle = self.hgvs_filter.to_lowercase();
            if !variant
                .hgvs_values()
                .any(|value| value.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }
}

/// Return indices of variants that pass all active criteria, in input order.
pub fn filtered_indices(variants: &[Variant], criteria: &FilterCriteria) -> Vec<usize> {
    variants
        .iter()
        .enumerate()
        .filter(|(_, v)| criteria.matches(v))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// VariantFilterService – live filtered view + manually advanced display window
// ---------------------------------------------------------------------------

/// Holds a fixed variant list, the filter criteria, and the window of
/// variants currently shown.
///
/// The filtered view is recomputed from `criteria` on every read. The
/// displayed window is a snapshot taken by [`load_initial_variants`] or
/// [`show_all`] and does not follow later criteria changes until one of
/// them is called again.
///
/// [`load_initial_variants`]: VariantFilterService::load_initial_variants
/// [`show_all`]: VariantFilterService::show_all
#[derive(Debug, Clone, Default)]
pub struct VariantFilterService {
    variants: Vec<Variant>,
    /// Filter selections, bound directly to the UI controls.
    pub criteria: FilterCriteria,
    /// Indices into `variants`.
    displayed: Vec<usize>,
}

impl VariantFilterService {
    pub fn new(variants: Vec<Variant>) -> Self {
        Self {
            variants,
            criteria: FilterCriteria::default(),
            displayed: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn filtered_indices(&self) -> Vec<usize> {
        filtered_indices(&self.variants, &self.criteria)
    }

    /// Variants matching the current criteria.
    pub fn filtered_variants(&self) -> Vec<&Variant> {
        self.variants
            .iter()
            .filter(|v| self.criteria.matches(v))
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.variants
            .iter()
            .filter(|v| self.criteria.matches(v))
            .count()
    }

    /// Variants in the display window, as of the last load / show-all.
    pub fn displayed_variants(&self) -> Vec<&Variant> {
        self.displayed.iter().map(|&i| &self.variants[i]).collect()
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    /// Show the first [`INITIAL_PAGE_SIZE`] matching variants.
    pub fn load_initial_variants(&mut self) {
        let mut indices = self.filtered_indices();
        indices.truncate(INITIAL_PAGE_SIZE);
        self.displayed = indices;
        log::debug!(
            "Displaying first {} of {} variants",
            self.displayed.len(),
            self.variants.len()
        );
    }

    /// Reset the display window after a criteria change.
    pub fn filter_variants(&mut self) {
        if !self.criteria.selected_genotype.is_empty()
            && genotype_mapping(&self.criteria.selected_genotype).is_none()
        {
            log::warn!(
                "Genotype filter '{}' has no mapping; no variant will match",
                self.criteria.selected_genotype
            );
        }
        self.load_initial_variants();
    }

    /// Show every matching variant.
    pub fn show_all(&mut self) {
        self.displayed = self.filtered_indices();
        log::debug!("Displaying all {} matching variants", self.displayed.len());
    }

    /// Whether more variants match than are currently displayed.
    pub fn show_all_variants_available(&self) -> bool {
        self.displayed.len() < self.filtered_count()
    }

    /// Clear all criteria and reset the display window.
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.filter_variants();
    }
}
