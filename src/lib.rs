//! # Food Additives
//!
//! Finds food additives in free-form ingredient text and rates them on a
//! seven-tier harmfulness scale.
//!
//! ```
//! use food_additives::reference_table::{AdditiveRecord, ReferenceTable};
//! use food_additives::text_processing::analyze;
//!
//! let table = ReferenceTable::from_records(vec![
//!     AdditiveRecord::new("e621", "monosodium glutamate", "4"),
//!     AdditiveRecord::new("e300", "ascorbic acid", "1"),
//! ]);
//!
//! let outcome = analyze("Contains E 621 and ascorbic acid", &table);
//! assert_eq!(outcome.len(), 2);
//! ```

pub mod config;
pub mod errors;
pub mod harmfulness;
pub mod load_errors;
pub mod localization;
pub mod observability;
pub mod observability_config;
pub mod reference_table;
pub mod report;
pub mod text_processing;

// Re-export types for easier access
pub use harmfulness::{harmfulness_scale, HarmfulnessTier, SeverityLevel};
pub use load_errors::LoadError;
pub use reference_table::{
    bundled_reference_table, load_reference_table, load_reference_table_from_path,
    load_reference_table_or_empty, AdditiveRecord, ReferenceTable,
};
pub use text_processing::{analyze, AdditiveMatcher, AnalysisOutcome, MatcherConfig};
