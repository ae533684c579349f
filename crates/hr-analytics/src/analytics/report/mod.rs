mod summary;
pub mod views;

pub use summary::WorkforceReport;
pub use views::{CategoryCount, WorkforceDistribution};
