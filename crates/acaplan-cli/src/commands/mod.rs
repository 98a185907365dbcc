pub mod plan;
pub mod skus;
