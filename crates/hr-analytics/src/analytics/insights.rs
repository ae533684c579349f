use super::domain::{Employee, HRMetrics, RetirementRisk};
use super::kpi::mean;
use super::metrics::MetricsCalculator;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Risk,
    Opportunity,
    Recommendation,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl InsightPriority {
    /// Sort rank, higher is more urgent.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HRInsight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub priority: InsightPriority,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub actions: Vec<String>,
    pub timeline: String,
    pub kpis: Vec<String>,
}

const LOW_PERFORMER_SHARE: f64 = 0.15;
const HIGH_INDEX_SHARE: f64 = 0.10;
const HIGH_INDEX_THRESHOLD: i32 = 70;

pub fn generate_hr_insights(
    employees: &[Employee],
    calculator: &MetricsCalculator<'_>,
) -> Vec<HRInsight> {
    let metrics = calculator.calculate_all(employees);
    insights_from_metrics(&metrics)
}

pub(crate) fn insights_from_metrics(metrics: &[HRMetrics]) -> Vec<HRInsight> {
    if metrics.is_empty() {
        return Vec::new();
    }

    let total = metrics.len() as f64;
    let mut insights = Vec::new();

    let critical_retirement = metrics
        .iter()
        .filter(|m| m.retirement_risk == RetirementRisk::Critical)
        .count();
    if critical_retirement > 0 {
        insights.push(HRInsight {
            insight_type: InsightType::Risk,
            priority: InsightPriority::Critical,
            title: "Départs à la retraite imminents".to_string(),
            description: format!(
                "{critical_retirement} employé(s) ont atteint 62 ans ou plus et peuvent partir à la retraite à tout moment."
            ),
            impact: format!(
                "Perte de savoir-faire critique sur {critical_retirement} poste(s) sans relève identifiée."
            ),
            actions: strings(&[
                "Identifier les postes clés concernés",
                "Organiser le transfert de connaissances (binômes, documentation)",
                "Lancer le recrutement ou la promotion des successeurs",
                "Proposer des aménagements de fin de carrière",
            ]),
            timeline: "0-6 mois".to_string(),
            kpis: strings(&[
                "Taux de couverture de la relève",
                "Nombre de départs à la retraite",
            ]),
        });
    }

    let low_performers = metrics
        .iter()
        .filter(|m| m.performance_level.is_low())
        .count();
    if low_performers as f64 > total * LOW_PERFORMER_SHARE {
        let share = low_performers as f64 / total * 100.0;
        insights.push(HRInsight {
            insight_type: InsightType::Alert,
            priority: InsightPriority::High,
            title: "Performance en dessous des attentes".to_string(),
            description: format!(
                "{low_performers} employé(s) ({share:.0}%) ont une performance à améliorer ou insuffisante."
            ),
            impact: "Baisse de productivité et de qualité de service sur les équipes concernées."
                .to_string(),
            actions: strings(&[
                "Mettre en place des plans d'amélioration individuels",
                "Renforcer l'accompagnement managérial",
                "Cibler les formations sur les compétences clés",
            ]),
            timeline: "3-6 mois".to_string(),
            kpis: strings(&["Indice de performance", "Taux de réalisation des objectifs"]),
        });
    }

    let high_turnover = metrics
        .iter()
        .filter(|m| m.turnover_risk.is_high())
        .count();
    if high_turnover > 0 {
        insights.push(HRInsight {
            insight_type: InsightType::Risk,
            priority: InsightPriority::High,
            title: "Risque de départ élevé".to_string(),
            description: format!(
                "{high_turnover} employé(s) présentent un risque de départ élevé ou critique."
            ),
            impact: "Coûts de remplacement et perte de continuité opérationnelle.".to_string(),
            actions: strings(&[
                "Conduire des entretiens de fidélisation",
                "Revoir les conditions de rémunération et d'évolution",
                "Sécuriser les contrats temporaires stratégiques",
            ]),
            timeline: "1-3 mois".to_string(),
            kpis: strings(&["Taux de rotation", "Taux de rétention"]),
        });
    }

    let average_index = mean(metrics.iter().map(|m| m.turnover_index as f64)).unwrap_or(0.0);
    let very_high_index = metrics
        .iter()
        .filter(|m| m.turnover_index > HIGH_INDEX_THRESHOLD)
        .count();
    if average_index > 50.0 || very_high_index as f64 > total * HIGH_INDEX_SHARE {
        let priority = if average_index > 60.0 {
            InsightPriority::Critical
        } else {
            InsightPriority::High
        };
        insights.push(HRInsight {
            insight_type: InsightType::Alert,
            priority,
            title: "Indice de rotation préoccupant".to_string(),
            description: format!(
                "Indice de risque de rotation moyen de {average_index:.0}/100, {very_high_index} employé(s) au-dessus de {HIGH_INDEX_THRESHOLD}."
            ),
            impact: "Risque de désorganisation des services et hausse des coûts de recrutement."
                .to_string(),
            actions: strings(&[
                "Analyser les facteurs de risque par département",
                "Renforcer l'intégration des nouveaux arrivants",
                "Développer les parcours de carrière internes",
                "Mettre en place un suivi mensuel de l'indice",
            ]),
            timeline: "1-6 mois".to_string(),
            kpis: strings(&[
                "Indice de risque de rotation",
                "Employés à risque élevé",
                "Taux de rotation",
            ]),
        });
    }

    let ready_successors = metrics
        .iter()
        .filter(|m| m.successor_readiness.is_ready_soon())
        .count();
    if ready_successors > 0 {
        insights.push(HRInsight {
            insight_type: InsightType::Opportunity,
            priority: InsightPriority::Medium,
            title: "Vivier de successeurs disponible".to_string(),
            description: format!(
                "{ready_successors} employé(s) sont prêts à prendre des responsabilités supérieures d'ici un an."
            ),
            impact: "Continuité du leadership et réduction des recrutements externes.".to_string(),
            actions: strings(&[
                "Formaliser les plans de succession",
                "Proposer des missions de développement",
                "Planifier les promotions internes",
            ]),
            timeline: "6-12 mois".to_string(),
            kpis: strings(&["Taux de promotion interne", "Couverture de la relève"]),
        });
    }

    // Vec::sort_by is stable, equal priorities keep rule order
    insights.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    insights
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_critical_first() {
        assert!(InsightPriority::Critical.rank() > InsightPriority::High.rank());
        assert!(InsightPriority::High.rank() > InsightPriority::Medium.rank());
        assert!(InsightPriority::Medium.rank() > InsightPriority::Low.rank());
    }

    #[test]
    fn no_metrics_yields_no_insights() {
        assert!(insights_from_metrics(&[]).is_empty());
    }

    #[test]
    fn insight_type_serializes_under_type_key() {
        let insight = HRInsight {
            insight_type: InsightType::Opportunity,
            priority: InsightPriority::Medium,
            title: String::new(),
            description: String::new(),
            impact: String::new(),
            actions: Vec::new(),
            timeline: String::new(),
            kpis: Vec::new(),
        };
        let value = serde_json::to_value(&insight).expect("serialize insight");
        assert_eq!(value["type"], "opportunity");
        assert_eq!(value["priority"], "medium");
    }
}
