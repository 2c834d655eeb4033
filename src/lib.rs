// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod growth;
pub mod learning;
pub mod persistence;
pub mod report;

pub use crate::core::engine::ProfileEngine;
pub use crate::core::types::{Category, PerCategory, Profile};
pub use crate::error::StoreError;
pub use crate::growth::{GrowthReport, GrowthState, GrowthTracker};
pub use crate::learning::LearningEngine;
