use super::bands::{age_band, resolve_band, tenure_band, AGE_BANDS, TENURE_BANDS};
use super::domain::{Employee, HRMetrics};
use super::kpi::{high_turnover_rate, round_to_tenth, rounded_mean};
use super::metrics::MetricsCalculator;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

const GROUP_RISK_THRESHOLD: u32 = 60;
const HIGH_INDEX_THRESHOLD: i32 = 70;
const TEMPORARY_SHARE_THRESHOLD: f64 = 20.0;
const RETENTION_PROGRAM_THRESHOLD: f64 = 15.0;
const YOUNG_BAND: &str = "21 - 30";
const NEW_HIRE_BAND: &str = "0 - 5";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverAnalysis {
    pub turnover_rate: f64,
    pub turnover_risk_index: u32,
    pub high_risk_employees: usize,
    pub department_risks: BTreeMap<String, u32>,
    pub age_group_risks: BandRisks,
    pub tenure_group_risks: BandRisks,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Mean turnover index per band, kept in band-table order. Serializes as a
/// JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandRisks(Vec<(&'static str, u32)>);

impl BandRisks {
    pub fn get(&self, band: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(label, _)| *label == band)
            .map(|(_, risk)| *risk)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for BandRisks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (band, risk) in &self.0 {
            map.serialize_entry(band, risk)?;
        }
        map.end()
    }
}

pub fn analyze_turnover(
    employees: &[Employee],
    calculator: &MetricsCalculator<'_>,
) -> TurnoverAnalysis {
    let metrics = calculator.calculate_all(employees);
    analyze_with_metrics(employees, &metrics)
}

/// `metrics[i]` must belong to `employees[i]`.
pub(crate) fn analyze_with_metrics(employees: &[Employee], metrics: &[HRMetrics]) -> TurnoverAnalysis {
    let pairs = || employees.iter().zip(metrics.iter());

    let turnover_rate = high_turnover_rate(metrics);
    let turnover_risk_index = rounded_mean(metrics.iter().map(|m| m.turnover_index as f64));
    let high_risk_employees = metrics
        .iter()
        .filter(|m| m.turnover_index > HIGH_INDEX_THRESHOLD)
        .count();

    let mut by_department: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for m in metrics {
        by_department
            .entry(m.department.as_str())
            .or_default()
            .push(m.turnover_index as f64);
    }
    let department_risks: BTreeMap<String, u32> = by_department
        .into_iter()
        .map(|(department, indices)| (department.to_string(), rounded_mean(indices.into_iter())))
        .collect();

    let age_group_risks = band_risks(&AGE_BANDS, |band| {
        pairs()
            .filter(move |(employee, _)| {
                resolve_band(&employee.tranche_age, age_band(employee.age)) == band
            })
            .map(|(_, m)| m.turnover_index as f64)
            .collect()
    });
    let tenure_group_risks = band_risks(&TENURE_BANDS, |band| {
        pairs()
            .filter(move |(employee, _)| {
                let computed = tenure_band(employee.anciennete);
                resolve_band(&employee.tranche_anciennete, computed) == band
            })
            .map(|(_, m)| m.turnover_index as f64)
            .collect()
    });

    let temporary_share = if employees.is_empty() {
        0.0
    } else {
        let temporary = employees
            .iter()
            .filter(|employee| employee.date_fin_contrat.is_some())
            .count();
        round_to_tenth(temporary as f64 / employees.len() as f64 * 100.0)
    };

    let young_risk_high = age_group_risks.get(YOUNG_BAND).unwrap_or(0) > GROUP_RISK_THRESHOLD;
    let new_hire_risk_high =
        tenure_group_risks.get(NEW_HIRE_BAND).unwrap_or(0) > GROUP_RISK_THRESHOLD;
    let flagged_departments: Vec<(&str, u32)> = department_risks
        .iter()
        .filter(|(_, risk)| **risk > GROUP_RISK_THRESHOLD)
        .map(|(department, risk)| (department.as_str(), *risk))
        .collect();
    let temporary_share_high = temporary_share > TEMPORARY_SHARE_THRESHOLD;

    let mut risk_factors = Vec::new();
    if young_risk_high {
        risk_factors.push("Risque de départ élevé chez les jeunes employés (21-30 ans)".to_string());
    }
    if new_hire_risk_high {
        risk_factors.push(
            "Risque de départ élevé chez les nouveaux employés (0-5 ans d'ancienneté)".to_string(),
        );
    }
    for (department, risk) in &flagged_departments {
        risk_factors.push(format!(
            "Département {department} à risque élevé (indice {risk}/100)"
        ));
    }
    if temporary_share_high {
        risk_factors.push(format!(
            "Proportion élevée de contrats temporaires ({temporary_share:.1}%)"
        ));
    }

    let mut recommendations = Vec::new();
    if turnover_rate > RETENTION_PROGRAM_THRESHOLD {
        recommendations.push(
            "Mettre en place un programme de fidélisation ciblant les profils à risque".to_string(),
        );
    }
    for (department, _) in &flagged_departments {
        recommendations.push(format!(
            "Analyser les causes de départ dans le département {department}"
        ));
    }
    if new_hire_risk_high {
        recommendations
            .push("Renforcer le processus d'intégration des nouveaux arrivants".to_string());
    }
    if young_risk_high {
        recommendations
            .push("Développer des parcours de carrière pour les jeunes talents".to_string());
    }
    if temporary_share_high {
        recommendations.push("Étudier la conversion des CDD en CDI pour les postes clés".to_string());
    }
    recommendations.push("Conduire des entretiens de sortie systématiques".to_string());
    recommendations.push("Réaliser des enquêtes d'engagement régulières".to_string());

    TurnoverAnalysis {
        turnover_rate,
        turnover_risk_index,
        high_risk_employees,
        department_risks,
        age_group_risks,
        tenure_group_risks,
        risk_factors,
        recommendations,
    }
}

/// Mean index per fixed band; bands without members report 0.
fn band_risks<F>(bands: &[&'static str], indices_for: F) -> BandRisks
where
    F: Fn(&'static str) -> Vec<f64>,
{
    BandRisks(
        bands
            .iter()
            .map(|band| (*band, rounded_mean(indices_for(*band).into_iter())))
            .collect(),
    )
}
