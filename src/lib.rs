//! Emergency-department flow monitoring: a seeded synthetic visit generator
//! and the filter and aggregate engine of an operations dashboard.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{AppConfig, DashboardConfig, GenerationPlan, GeneratorConfig};
pub use error::{EdFlowError, Result};
pub use models::{Visit, VisitRecord, VisitTable};

// Generation
pub use algorithm::generation::{VisitGenerator, generate, generate_to_file};

// Dashboard engine
pub use algorithm::dashboard::{
    DashboardReport, DateRange, FilterOptions, KpiSummary, Metric, MetricSelection, VisitFilter,
};
pub use session::{DashboardSession, DataCache};

// File exchange
pub use utils::io::{read_visits, read_visits_from, write_visits, write_visits_to};
