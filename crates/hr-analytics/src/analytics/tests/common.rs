use chrono::{Duration, NaiveDate};

use crate::analytics::bands::{age_band, tenure_band};
use crate::analytics::domain::{Employee, Gender};
use crate::analytics::{MetricsCalculator, PositionClassifier};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn calculator() -> MetricsCalculator<'static> {
    MetricsCalculator::new(PositionClassifier::shared(), today())
}

pub(super) fn employee(id: &str, age: f64, tenure: f64, poste: &str) -> Employee {
    Employee {
        id: id.to_string(),
        noms: format!("Employé {id}"),
        sexe: Gender::Male,
        nationalite: "Française".to_string(),
        date_naissance: None,
        date_embauche: None,
        date_fin_contrat: None,
        annee_naissance: Some(2025 - age as i32),
        annee_embauche: Some(2025 - tenure as i32),
        age,
        anciennete: tenure,
        tranche_age: age_band(age).to_string(),
        tranche_anciennete: tenure_band(tenure).to_string(),
        poste: poste.to_string(),
        personne_contacter: String::new(),
        affectation: "Dépôt Central".to_string(),
        salaire: String::new(),
        year: Some(2025),
    }
}

pub(super) fn female(mut employee: Employee) -> Employee {
    employee.sexe = Gender::Female;
    employee
}

pub(super) fn with_contract_ending_in_days(mut employee: Employee, days: i64) -> Employee {
    employee.date_fin_contrat = Some(today() + Duration::days(days));
    employee
}

/// Mid-career permanent staff with no risk signals: performance Satisfaisant,
/// retirement Faible, turnover Très faible, turnover index 35 and no successor
/// ready within a year.
pub(super) fn steady_team(size: usize) -> Vec<Employee> {
    (0..size)
        .map(|n| employee(&format!("S{n}"), 40.0, 6.0, "Chauffeur"))
        .collect()
}
