//! Core domain types and aggregation logic.

pub mod sales;
pub mod segmentation;
pub mod forecast;
pub mod dashboard;
pub mod error;
