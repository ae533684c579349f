use super::super::bands::{age_band, resolve_band, tenure_band, AGE_BANDS, TENURE_BANDS};
use super::super::domain::{Employee, Gender, HRMetrics, PerformanceLevel, RetirementRisk};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Headcount series behind the dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkforceDistribution {
    pub by_department: Vec<CategoryCount>,
    pub by_gender: Vec<CategoryCount>,
    pub by_age_band: Vec<CategoryCount>,
    pub by_tenure_band: Vec<CategoryCount>,
    pub by_management_level: Vec<CategoryCount>,
    pub by_retirement_risk: Vec<CategoryCount>,
    pub by_performance_level: Vec<CategoryCount>,
}

impl WorkforceDistribution {
    /// `metrics[i]` must belong to `employees[i]`.
    pub(crate) fn build(employees: &[Employee], metrics: &[HRMetrics]) -> Self {
        let by_gender = Gender::ordered()
            .into_iter()
            .map(|gender| count(gender.label(), employees.iter().filter(|e| e.sexe == gender)))
            .collect();

        // Stored band labels win; records without one fall back to the computed band.
        let by_age_band = AGE_BANDS
            .iter()
            .map(|band| {
                count(
                    band,
                    employees
                        .iter()
                        .filter(|e| resolve_band(&e.tranche_age, age_band(e.age)) == *band),
                )
            })
            .collect();
        let by_tenure_band = TENURE_BANDS
            .iter()
            .map(|band| {
                count(
                    band,
                    employees.iter().filter(|e| {
                        resolve_band(&e.tranche_anciennete, tenure_band(e.anciennete)) == *band
                    }),
                )
            })
            .collect();

        let by_retirement_risk = RetirementRisk::ordered()
            .into_iter()
            .map(|risk| {
                count(
                    risk.label(),
                    metrics.iter().filter(|m| m.retirement_risk == risk),
                )
            })
            .collect();
        let by_performance_level = PerformanceLevel::ordered()
            .into_iter()
            .map(|level| {
                count(
                    level.label(),
                    metrics.iter().filter(|m| m.performance_level == level),
                )
            })
            .collect();

        Self {
            by_gender,
            by_age_band,
            by_tenure_band,
            by_department: tally(metrics.iter().map(|m| m.department.as_str())),
            by_management_level: tally(metrics.iter().map(|m| m.management_level.as_str())),
            by_retirement_risk,
            by_performance_level,
        }
    }
}

fn count<I: Iterator>(label: &str, items: I) -> CategoryCount {
    CategoryCount {
        label: label.to_string(),
        count: items.count(),
    }
}

fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect()
}
