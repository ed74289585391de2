//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<Variant>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────────┐
//!   │ VariantFilterService  │  criteria → filtered view → displayed window
//!   └──────────────────────┘
//! ```

pub mod loader;
pub mod model;
pub mod filter;
