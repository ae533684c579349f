//! Workforce scoring, aggregation and segmentation.
//!
//! Everything here is a pure function of the roster slice and the
//! [`MetricsCalculator`] passed in; nothing is cached between calls.

pub mod bands;
pub mod classification;
pub mod domain;
pub mod filter;
pub mod insights;
pub mod kpi;
pub mod metrics;
pub mod report;
pub mod turnover;
pub mod validation;

#[cfg(test)]
mod tests;

pub use classification::{ClassifierError, KeywordRule, PositionClassifier, SalaryBand};
pub use domain::{
    CareerPath, ContractType, Employee, EmployeeMetrics, Gender, HRMetrics, PerformanceLevel,
    RetirementRisk, SkillLevel, SuccessorReadiness, TrainingNeeds, TurnoverRisk,
};
pub use filter::{EmployeeFilter, RangeFilter};
pub use insights::{generate_hr_insights, HRInsight, InsightPriority, InsightType};
pub use kpi::{calculate_dashboard_kpis, DashboardKPI, GenderRatio};
pub use metrics::{calculate_employee_metrics, MetricsCalculator};
pub use report::{CategoryCount, WorkforceDistribution, WorkforceReport};
pub use turnover::{analyze_turnover, BandRisks, TurnoverAnalysis};
pub use validation::{validate_employee, validate_roster, ValidationError};
