// src/extractors/mod.rs
pub mod release;

// Re-export key extraction types for convenience
pub use release::{extract_release_notes, extract_release_notes_range, RangeBound};
