// Catalog integration and record normalization

pub mod integrations;
pub mod normalizer;
