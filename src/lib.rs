//! BuildCost - Construction cost estimation
//!
//! This crate turns a built-up area and a quality grade into a per-material
//! cost breakdown, and can ask an AI advisor to review the result.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
