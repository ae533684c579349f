use super::common::*;
use crate::analytics::domain::{
    CareerPath, PerformanceLevel, RetirementRisk, SkillLevel, SuccessorReadiness, TrainingNeeds,
    TurnoverRisk,
};
use crate::analytics::calculate_employee_metrics;

#[test]
fn senior_director_scores_as_expert_near_retirement() {
    let director = employee("D1", 63.0, 20.0, "Directeur Régional");

    let metrics = calculator().calculate(&director);

    assert_eq!(metrics.retirement_risk, RetirementRisk::Critical);
    assert_eq!(metrics.department, "Direction");
    assert_eq!(metrics.management_level, "Direction");
    assert_eq!(metrics.skill_level, SkillLevel::Expert);
    assert_eq!(metrics.performance_level, PerformanceLevel::Excellent);
    assert_eq!(metrics.turnover_risk, TurnoverRisk::VeryLow);
    assert_eq!(metrics.training_needs, TrainingNeeds::NoNeed);
    assert_eq!(metrics.career_path, CareerPath::Stable);
    assert_eq!(
        metrics.successor_readiness,
        SuccessorReadiness::DevelopmentRequired
    );
    assert_eq!(metrics.retention_probability, 90);
    assert_eq!(metrics.salary, 164_550);
    assert_eq!(metrics.inclusion_score, 90);
    assert_eq!(metrics.turnover_index, 15);
}

#[test]
fn young_driver_on_expiring_contract_hits_index_ceiling() {
    let driver = with_contract_ending_in_days(employee("C1", 24.0, 0.5, "Chauffeur"), 60);

    let metrics = calculator().calculate(&driver);

    // 50 + 30 + 15 + 15 (À améliorer) + 25 = 135 before clamping
    assert_eq!(metrics.performance_level, PerformanceLevel::NeedsImprovement);
    assert_eq!(metrics.turnover_index, 100);
    assert_eq!(metrics.turnover_risk, TurnoverRisk::Critical);
    assert_eq!(metrics.retention_probability, 20);
    assert_eq!(metrics.department, "Logistique");
    assert_eq!(metrics.management_level, "Opérationnel");
}

#[test]
fn new_hire_collects_both_tenure_points_for_turnover_risk() {
    // 40 (< 1 year) + 20 (< 3 years) = 60 even without any other signal
    let hire = employee("N1", 30.0, 0.5, "Agent d'accueil");

    let metrics = calculator().calculate(&hire);

    assert_eq!(metrics.turnover_risk, TurnoverRisk::Critical);
}

#[test]
fn contract_window_steps_turnover_index() {
    let calculator = calculator();
    let base = employee("T1", 40.0, 6.0, "Chauffeur");
    assert_eq!(calculator.calculate(&base).turnover_index, 35);

    let cases = [(-10, 60), (90, 60), (150, 50), (300, 45), (400, 35)];
    for (days, expected) in cases {
        let temp = with_contract_ending_in_days(base.clone(), days);
        assert_eq!(
            calculator.calculate(&temp).turnover_index,
            expected,
            "contract ending in {days} day(s)"
        );
    }
}

#[test]
fn temporary_contract_raises_categorical_risk() {
    let temp = with_contract_ending_in_days(employee("T2", 40.0, 6.0, "Chauffeur"), 400);

    let metrics = calculator().calculate(&temp);

    assert_eq!(metrics.turnover_risk, TurnoverRisk::Moderate);
}

#[test]
fn salary_combines_base_tenure_experience_and_performance() {
    let driver = employee("P1", 40.0, 6.0, "Chauffeur");

    let metrics = calculator().calculate(&driver);

    // 32000 + 2880 + 14400 + 1600
    assert_eq!(metrics.performance_level, PerformanceLevel::Satisfactory);
    assert_eq!(metrics.salary, 50_880);
}

#[test]
fn foreign_national_gains_inclusion_points() {
    let mut driver = employee("I1", 40.0, 6.0, "Chauffeur");
    driver.nationalite = "Sénégalaise".to_string();

    let metrics = calculator().calculate(&driver);

    // 70 + 12 + 8 + 6 + 5
    assert_eq!(metrics.inclusion_score, 100);
}

#[test]
fn scores_stay_within_documented_bounds() {
    let calculator = calculator();
    let postes = ["Chauffeur", "Directeur Général", "Responsable RH", "Gardien"];

    for poste in postes {
        for age in (16..=75).step_by(3) {
            for tenure in [0.0, 0.5, 1.0, 2.5, 4.0, 7.0, 12.0, 18.0, 30.0] {
                for contract in [None, Some(-30), Some(45), Some(200), Some(800)] {
                    let mut subject = employee("B", age as f64, tenure, poste);
                    if let Some(days) = contract {
                        subject = with_contract_ending_in_days(subject, days);
                    }
                    let metrics = calculator.calculate(&subject);
                    assert!((20..=95).contains(&metrics.retention_probability));
                    assert!((0..=100).contains(&metrics.inclusion_score));
                    assert!((0..=100).contains(&metrics.turnover_index));
                }
            }
        }
    }
}

#[test]
fn retirement_risk_never_decreases_with_age() {
    let calculator = calculator();
    let mut previous = RetirementRisk::Low;

    for age in 18..=70 {
        let risk = calculator
            .calculate(&employee("R", age as f64, 5.0, "Chauffeur"))
            .retirement_risk;
        assert!(risk >= previous, "risk dropped at age {age}");
        previous = risk;
    }
    assert_eq!(previous, RetirementRisk::Critical);
}

#[test]
fn repeated_scoring_is_identical() {
    let subject = with_contract_ending_in_days(employee("X", 33.0, 2.0, "Commercial"), 100);

    let first = calculate_employee_metrics(&subject, today());
    let second = calculate_employee_metrics(&subject, today());

    assert_eq!(first, second);
}

#[test]
fn metrics_serialize_with_dashboard_labels() {
    let director = employee("D2", 63.0, 20.0, "Directeur Régional");

    let value = serde_json::to_value(calculator().calculate(&director)).expect("serialize");

    assert_eq!(value["retirementRisk"], "Critique");
    assert_eq!(value["performanceLevel"], "Excellent");
    assert_eq!(value["turnoverRisk"], "Très faible");
    assert_eq!(value["successorReadiness"], "Développement requis");
    assert_eq!(value["trainingNeeds"], "Aucun");
}
