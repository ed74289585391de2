use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Significance – controlled vocabulary for clinical classification
// ---------------------------------------------------------------------------

/// Clinical significance of a variant, in the order shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Significance {
    Pathogenic,
    LikelyPathogenic,
    Benign,
    Undefined,
    Uncertain,
    LikelyBenign,
}

const SIGNIFICANCE_OPTIONS: [Significance; 6] = [
    Significance::Pathogenic,
    Significance::LikelyPathogenic,
    Significance::Benign,
    Significance::Undefined,
    Significance::Uncertain,
    Significance::LikelyBenign,
];

/// All significance values, for populating choice controls.
pub fn significance_options() -> &'static [Significance] {
    &SIGNIFICANCE_OPTIONS
}

impl Significance {
    /// The wire token, e.g. `LIKELY_PATHOGENIC`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Significance::Pathogenic => "PATHOGENIC",
            Significance::LikelyPathogenic => "LIKELY_PATHOGENIC",
            Significance::Benign => "BENIGN",
            Significance::Undefined => "UNDEFINED",
            Significance::Uncertain => "UNCERTAIN",
            Significance::LikelyBenign => "LIKELY_BENIGN",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown significance '{0}'")]
pub struct ParseSignificanceError(pub String);

impl FromStr for Significance {
    type Err = ParseSignificanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        significance_options()
            .iter()
            .copied()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| ParseSignificanceError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Genotype – UI vocabulary vs. stored vocabulary
// ---------------------------------------------------------------------------

/// Genotype as offered in the filter controls.
///
/// Stored variants use a different vocabulary (`HETEROZYGOUS` / `HOMOZYGOUS`),
/// see [`GenotypeChoice::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenotypeChoice {
    Heterozygote,
    Homozygote,
}

impl GenotypeChoice {
    pub const ALL: [GenotypeChoice; 2] = [GenotypeChoice::Heterozygote, GenotypeChoice::Homozygote];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenotypeChoice::Heterozygote => "HETEROZYGOTE",
            GenotypeChoice::Homozygote => "HOMOZYGOTE",
        }
    }

    /// The genotype string stored on a [`Variant`].
    pub fn canonical(&self) -> &'static str {
        match self {
            GenotypeChoice::Heterozygote => "HETEROZYGOUS",
            GenotypeChoice::Homozygote => "HOMOZYGOUS",
        }
    }
}

impl fmt::Display for GenotypeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genotype '{0}', expected HETEROZYGOTE or HOMOZYGOTE")]
pub struct ParseGenotypeError(pub String);

impl FromStr for GenotypeChoice {
    type Err = ParseGenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenotypeChoice::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseGenotypeError(s.to_string()))
    }
}

/// Map a UI genotype token to the stored genotype string.
/// Returns `None` for anything that is not a known token.
pub fn genotype_mapping(selected: &str) -> Option<&'static str> {
    selected.parse::<GenotypeChoice>().ok().map(|g| g.canonical())
}

// ---------------------------------------------------------------------------
// Variant – one row of the variant table
// ---------------------------------------------------------------------------

/// `null` reads as an empty string.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// HGVS maps may carry `null` for notation types without a value.
fn null_values_as_empty<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

/// Link to the same variant in an external annotation source (ClinVar, dbSNP, …).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSourceEntry {
    #[serde(
        default,
        alias = "maybeAnnotationSourceGeneticVariantIdentifier",
        deserialize_with = "null_as_empty"
    )]
    pub source_genetic_variant_identifier: String,
    #[serde(
        default,
        alias = "maybeAnnotationSourceGeneticVariantUrl",
        deserialize_with = "null_as_empty"
    )]
    pub source_genetic_variant_url: String,
    pub annotation_source_name: String,
}

/// A single genetic variant call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub allele_name: String,
    /// Canonical genotype, e.g. `HETEROZYGOUS`.
    pub genotype: String,
    /// Usually a [`Significance`] token, but kept as text: unknown values are
    /// displayed as-is and simply never match a significance filter.
    pub significance: String,
    /// Notation type (`c.`, `p.`, `g.`) → HGVS string.
    #[serde(default, deserialize_with = "null_values_as_empty")]
    pub hgvs: BTreeMap<String, String>,
    #[serde(default)]
    pub external_source_entries: Vec<ExternalSourceEntry>,
}

impl Variant {
    /// Parsed significance, if it is one of the known options.
    pub fn significance_kind(&self) -> Option<Significance> {
        self.significance.parse().ok()
    }

    /// Non-empty HGVS values in key order.
    pub fn hgvs_values(&self) -> impl Iterator<Item = &str> {
        self.hgvs.values().map(String::as_str).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significance_options_order() {
        let tokens: Vec<&str> = significance_options().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            tokens,
            [
                "PATHOGENIC",
                "LIKELY_PATHOGENIC",
                "BENIGN",
                "UNDEFINED",
                "UNCERTAIN",
                "LIKELY_BENIGN"
            ]
        );
    }

    #[test]
    fn test_significance_parse_is_exact() {
        assert_eq!("LIKELY_BENIGN".parse::<Significance>(), Ok(Significance::LikelyBenign));
        assert!("pathogenic".parse::<Significance>().is_err());
        let err = "VUS".parse::<Significance>().unwrap_err();
        assert_eq!(err.to_string(), "unknown significance 'VUS'");
    }

    #[test]
    fn test_genotype_mapping() {
        assert_eq!(genotype_mapping("HETEROZYGOTE"), Some("HETEROZYGOUS"));
        assert_eq!(genotype_mapping("HOMOZYGOTE"), Some("HOMOZYGOUS"));
        assert_eq!(genotype_mapping("HETEROZYGOUS"), None);
        assert_eq!(genotype_mapping("heterozygote"), None);
        assert_eq!(genotype_mapping(""), None);
    }

    #[test]
    fn test_variant_deserialize_wire_names() {
        let json = r#"{
            "alleleName": "BRCA1 c.68_69delAG",
            "genotype": "HETEROZYGOUS",
            "significance": "PATHOGENIC",
            "hgvs": { "c.": "c.68_69delAG", "p.": "p.Glu23fs" },
            "externalSourceEntries": [
                {
                    "maybeAnnotationSourceGeneticVariantIdentifier": "17662",
                    "maybeAnnotationSourceGeneticVariantUrl": "https://www.ncbi.nlm.nih.gov/clinvar/variation/17662/",
                    "annotationSourceName": "ClinVar"
                },
                { "annotationSourceName": "dbSNP" }
            ]
        }"#;
        let v: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(v.allele_name, "BRCA1 c.68_69delAG");
        assert_eq!(v.significance_kind(), Some(Significance::Pathogenic));
        assert_eq!(v.hgvs.get("p.").map(String::as_str), Some("p.Glu23fs"));
        assert_eq!(v.external_source_entries.len(), 2);
        assert_eq!(v.external_source_entries[0].source_genetic_variant_identifier, "17662");
        assert_eq!(v.external_source_entries[1].source_genetic_variant_url, "");
    }

    #[test]
    fn test_significance_kind_unknown_is_none() {
        let v = Variant {
            significance: "CONFLICTING".into(),
            ..Default::default()
        };
        assert_eq!(v.significance_kind(), None);
    }

    #[test]
    fn test_null_hgvs_value_reads_as_empty() {
        let json = r#"{
            "alleleName": "X",
            "genotype": "HETEROZYGOUS",
            "significance": "BENIGN",
            "hgvs": { "c.": "c.1A>T", "p.": null }
        }"#;
        let v: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(v.hgvs.get("p.").map(String::as_str), Some(""));
        assert_eq!(v.hgvs_values().collect::<Vec<_>>(), ["c.1A>T"]);
    }

    #[test]
    fn test_null_hgvs_map_reads_as_empty() {
        let json = r#"{ "alleleName": "X", "genotype": "", "significance": "", "hgvs": null }"#;
        let v: Variant = serde_json::from_str(json).unwrap();
        assert!(v.hgvs.is_empty());
    }

    #[test]
    fn test_null_external_source_fields_read_as_empty() {
        let json = r#"{
            "maybeAnnotationSourceGeneticVariantIdentifier": null,
            "maybeAnnotationSourceGeneticVariantUrl": null,
            "annotationSourceName": "ClinVar"
        }"#;
        let entry: ExternalSourceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.source_genetic_variant_identifier, "");
        assert_eq!(entry.source_genetic_variant_url, "");
        assert_eq!(entry.annotation_source_name, "ClinVar");
    }

    #[test]
    fn test_hgvs_values_skip_empty() {
        let mut v = Variant::default();
        v.hgvs.insert("c.".into(), "c.123A>T".into());
        v.hgvs.insert("p.".into(), String::new());
        assert_eq!(v.hgvs_values().collect::<Vec<_>>(), ["c.123A>T"]);
    }
}
