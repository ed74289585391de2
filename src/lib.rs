//! Variant table filtering: significance, genotype, allele name and HGVS
//! criteria over an in-memory variant list, with a first-page / show-all
//! display window and colour hints for clinical significance.

pub mod color;
pub mod data;
pub mod state;
