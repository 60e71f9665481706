//! Neighborhood extraction for exemplar and output pyramids

/// Precomputed full neighborhoods of every exemplar pixel
pub mod field;
/// Causal and full neighborhood windows
pub mod neighborhood;
