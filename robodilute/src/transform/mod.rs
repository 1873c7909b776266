//! Transformation module.
//!
//! This module turns a plate table into a dilution worksheet:
//! - Reshape: grid to ordered well entries
//! - Dilution: per-well sample and buffer volumes
//! - Pipeline: the full read-validate-compute-export run

pub mod dilution;
pub mod pipeline;
pub mod reshape;

pub use dilution::{compute_volumes, Volumes};
pub use pipeline::*;
pub use reshape::reshape;
