//! Workforce analytics core.
//!
//! Turns raw per-employee records into deterministic, bounded analytical
//! profiles, rolls them up by department, role, skill and location, and
//! tracks per-dashboard drill-down navigation over the filtered data.

pub mod aggregation;
pub mod automation;
pub mod config;
pub mod cost;
pub mod derivation;
pub mod engine;
pub mod error;
pub mod filter;
pub mod leadership;
pub mod learning;
pub mod loader;
pub mod model;
pub mod navigation;
pub mod normalizer;
pub mod profile;
pub mod redeployment;
pub mod rng;
pub mod role;
pub mod synthetic;
pub mod types;
