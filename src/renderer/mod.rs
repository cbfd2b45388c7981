//! Render extract
//!
//! The simulation owns positions and shapes; this module flattens them into
//! `Pod` records a GPU renderer can upload as instance data.

pub mod instance;

pub use instance::{BodyInstance, extract_dynamic, extract_instances};
