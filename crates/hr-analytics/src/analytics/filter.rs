use super::domain::{
    ContractType, Employee, Gender, HRMetrics, PerformanceLevel, RetirementRisk, TurnoverRisk,
};
use super::metrics::{months_until, MetricsCalculator};
use serde::{Deserialize, Serialize};

/// Inclusive numeric bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter<T> {
    #[serde(default)]
    pub min: Option<T>,
    #[serde(default)]
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> RangeFilter<T> {
    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Dashboard filter criteria. Every criterion is AND-combined; an empty
/// selection or unset range does not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeFilter {
    pub search: Option<String>,
    pub genders: Vec<Gender>,
    pub positions: Vec<String>,
    pub nationalities: Vec<String>,
    pub affectations: Vec<String>,
    pub departments: Vec<String>,
    pub management_levels: Vec<String>,
    pub contract_types: Vec<ContractType>,
    pub retirement_risks: Vec<RetirementRisk>,
    pub turnover_risks: Vec<TurnoverRisk>,
    pub performance_levels: Vec<PerformanceLevel>,
    pub age: RangeFilter<f64>,
    pub tenure: RangeFilter<f64>,
    pub salary: RangeFilter<i64>,
    pub inclusion_score: RangeFilter<i32>,
    pub retention_probability: RangeFilter<i32>,
    pub hire_year: RangeFilter<i32>,
    pub contract_expiring_within_months: Option<u32>,
}

impl EmployeeFilter {
    /// True when nothing would be filtered out. A blank search counts as unset.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && *self
                == Self {
                    search: self.search.clone(),
                    ..Self::default()
                }
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Whether any criterion needs the per-employee metrics.
    pub fn needs_metrics(&self) -> bool {
        !self.departments.is_empty()
            || !self.management_levels.is_empty()
            || !self.retirement_risks.is_empty()
            || !self.turnover_risks.is_empty()
            || !self.performance_levels.is_empty()
            || self.salary.is_active()
            || self.inclusion_score.is_active()
            || self.retention_probability.is_active()
    }

    pub fn apply(&self, employees: &[Employee], calculator: &MetricsCalculator<'_>) -> Vec<Employee> {
        employees
            .iter()
            .filter(|employee| self.matches(employee, calculator))
            .cloned()
            .collect()
    }

    pub fn matches(&self, employee: &Employee, calculator: &MetricsCalculator<'_>) -> bool {
        if !self.matches_raw(employee, calculator) {
            return false;
        }
        if !self.needs_metrics() {
            return true;
        }
        let metrics = calculator.calculate(employee);
        self.matches_metrics(&metrics)
    }

    fn matches_raw(&self, employee: &Employee, calculator: &MetricsCalculator<'_>) -> bool {
        if let Some(search) = self.search_term() {
            if !matches_search(employee, search) {
                return false;
            }
        }

        selected(&self.genders, &employee.sexe)
            && selected_text(&self.positions, &employee.poste)
            && selected_text(&self.nationalities, &employee.nationalite)
            && selected_text(&self.affectations, &employee.affectation)
            && selected(&self.contract_types, &employee.contract_type())
            && self.age.contains(employee.age)
            && self.tenure.contains(employee.anciennete)
            && (!self.hire_year.is_active()
                || employee
                    .annee_embauche
                    .is_some_and(|year| self.hire_year.contains(year)))
            && self.contract_window_matches(employee, calculator)
    }

    fn contract_window_matches(
        &self,
        employee: &Employee,
        calculator: &MetricsCalculator<'_>,
    ) -> bool {
        let Some(window) = self.contract_expiring_within_months else {
            return true;
        };
        employee.date_fin_contrat.is_some_and(|end| {
            let months = months_until(end, calculator.today());
            months >= 0.0 && months <= f64::from(window)
        })
    }

    fn matches_metrics(&self, metrics: &HRMetrics) -> bool {
        selected_text(&self.departments, &metrics.department)
            && selected_text(&self.management_levels, &metrics.management_level)
            && selected(&self.retirement_risks, &metrics.retirement_risk)
            && selected(&self.turnover_risks, &metrics.turnover_risk)
            && selected(&self.performance_levels, &metrics.performance_level)
            && self.salary.contains(metrics.salary)
            && self.inclusion_score.contains(metrics.inclusion_score)
            && self.retention_probability.contains(metrics.retention_probability)
    }
}

/// Case-insensitive substring search over name, position, nationality and site.
fn matches_search(employee: &Employee, search: &str) -> bool {
    let needle = search.to_lowercase();
    [
        &employee.noms,
        &employee.poste,
        &employee.nationalite,
        &employee.affectation,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn selected<T: PartialEq>(selection: &[T], value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

fn selected_text(selection: &[String], value: &str) -> bool {
    selection.is_empty() || selection.iter().any(|choice| choice == value)
}
