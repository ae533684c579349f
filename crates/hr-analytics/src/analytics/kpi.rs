use super::domain::{Employee, Gender, HRMetrics};
use super::metrics::MetricsCalculator;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderRatio {
    pub male: usize,
    pub female: usize,
}

/// Fixed-shape dashboard summary. All zero for an empty roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKPI {
    pub total_employees: usize,
    pub avg_age: f64,
    pub avg_tenure: f64,
    pub new_hires: usize,
    pub near_retirement: usize,
    pub gender_ratio: GenderRatio,
    pub diversity_index: u32,
    pub retention_rate: u32,
    pub performance_index: u32,
    pub turnover_rate: f64,
    pub turnover_risk_index: u32,
}

pub fn calculate_dashboard_kpis(
    employees: &[Employee],
    calculator: &MetricsCalculator<'_>,
) -> DashboardKPI {
    if employees.is_empty() {
        return DashboardKPI::default();
    }

    let metrics = calculator.calculate_all(employees);
    aggregate(employees, &metrics)
}

/// Folds precomputed metrics; `metrics[i]` must belong to `employees[i]`.
pub(crate) fn aggregate(employees: &[Employee], metrics: &[HRMetrics]) -> DashboardKPI {
    if employees.is_empty() {
        return DashboardKPI::default();
    }

    let total = employees.len();
    let count = total as f64;

    let gender_ratio = employees
        .iter()
        .fold(GenderRatio::default(), |mut ratio, employee| {
            match employee.sexe {
                Gender::Male => ratio.male += 1,
                Gender::Female => ratio.female += 1,
            }
            ratio
        });

    let nationalities: HashSet<&str> = employees
        .iter()
        .map(|employee| employee.nationalite.as_str())
        .collect();
    let diversity_index = ((nationalities.len() as f64 / count) * 1000.0)
        .min(100.0)
        .round() as u32;

    DashboardKPI {
        total_employees: total,
        avg_age: round_to_tenth(employees.iter().map(|e| e.age).sum::<f64>() / count),
        avg_tenure: round_to_tenth(employees.iter().map(|e| e.anciennete).sum::<f64>() / count),
        new_hires: employees.iter().filter(|e| e.anciennete <= 1.0).count(),
        near_retirement: employees.iter().filter(|e| e.age >= 55.0).count(),
        gender_ratio,
        diversity_index,
        retention_rate: rounded_mean(metrics.iter().map(|m| m.retention_probability as f64)),
        performance_index: rounded_mean(
            metrics
                .iter()
                .map(|m| m.performance_level.ordinal() as f64 * 20.0),
        ),
        turnover_rate: high_turnover_rate(metrics),
        turnover_risk_index: rounded_mean(metrics.iter().map(|m| m.turnover_index as f64)),
    }
}

/// Share of employees whose categorical turnover risk is Élevé or Critique, in percent.
pub(crate) fn high_turnover_rate(metrics: &[HRMetrics]) -> f64 {
    if metrics.is_empty() {
        return 0.0;
    }
    let high = metrics
        .iter()
        .filter(|m| m.turnover_risk.is_high())
        .count();
    round_to_tenth(high as f64 / metrics.len() as f64 * 100.0)
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub(crate) fn rounded_mean(values: impl Iterator<Item = f64>) -> u32 {
    mean(values).map(|value| value.round().max(0.0) as u32).unwrap_or(0)
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_tenth_rounds_half_up() {
        assert_eq!(round_to_tenth(33.25), 33.3);
        assert_eq!(round_to_tenth(12.0), 12.0);
        assert_eq!(round_to_tenth(66.666), 66.7);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(rounded_mean(std::iter::empty()), 0);
        assert_eq!(rounded_mean([1.0, 2.0].into_iter()), 2);
    }
}
