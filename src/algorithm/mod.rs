//! Algorithm implementations for the ED flow monitor
//!
//! This module contains the synthetic visit generator and the dashboard's
//! filter and aggregate engine.

pub mod dashboard;
pub mod generation;
