pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod polling;
pub mod report;
pub mod simulation;
