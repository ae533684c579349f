use super::super::domain::Employee;
use super::super::filter::EmployeeFilter;
use super::super::insights::{insights_from_metrics, HRInsight};
use super::super::kpi::{aggregate, DashboardKPI};
use super::super::metrics::MetricsCalculator;
use super::super::turnover::{analyze_with_metrics, TurnoverAnalysis};
use super::views::WorkforceDistribution;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkforceReport {
    pub reference_date: NaiveDate,
    pub headcount_before_filter: usize,
    pub kpis: DashboardKPI,
    pub insights: Vec<HRInsight>,
    pub turnover: TurnoverAnalysis,
    pub distribution: WorkforceDistribution,
}

impl WorkforceReport {
    /// Filters the roster, then scores each remaining employee once and feeds
    /// the shared metrics to every aggregator.
    pub fn build(
        employees: &[Employee],
        filter: &EmployeeFilter,
        calculator: &MetricsCalculator<'_>,
    ) -> Self {
        let selected = if filter.is_empty() {
            employees.to_vec()
        } else {
            filter.apply(employees, calculator)
        };
        let metrics = calculator.calculate_all(&selected);

        let insights = insights_from_metrics(&metrics);
        debug!(
            roster = employees.len(),
            selected = selected.len(),
            insights = insights.len(),
            "workforce report assembled"
        );

        Self {
            reference_date: calculator.today(),
            headcount_before_filter: employees.len(),
            kpis: aggregate(&selected, &metrics),
            insights,
            turnover: analyze_with_metrics(&selected, &metrics),
            distribution: WorkforceDistribution::build(&selected, &metrics),
        }
    }
}
