use chrono::NaiveDate;
use hr_analytics::analytics::{
    analyze_turnover, calculate_dashboard_kpis, generate_hr_insights, Employee, EmployeeFilter,
    Gender, InsightPriority, MetricsCalculator, PositionClassifier, WorkforceReport,
};
use hr_analytics::roster::RosterImporter;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid reference date")
}

fn roster() -> Vec<Employee> {
    let data = include_bytes!("../roster_sample.csv");
    RosterImporter::from_reader(&data[..], today()).expect("roster imports")
}

fn calculator() -> MetricsCalculator<'static> {
    MetricsCalculator::new(PositionClassifier::shared(), today())
}

#[test]
fn full_roster_report_matches_individual_aggregators() {
    let employees = roster();
    let calculator = calculator();

    let report = WorkforceReport::build(&employees, &EmployeeFilter::default(), &calculator);

    assert_eq!(report.headcount_before_filter, 10);
    assert_eq!(report.kpis, calculate_dashboard_kpis(&employees, &calculator));
    assert_eq!(report.insights, generate_hr_insights(&employees, &calculator));
    assert_eq!(report.turnover, analyze_turnover(&employees, &calculator));
}

#[test]
fn full_roster_surfaces_retirement_and_contract_risks() {
    let report = WorkforceReport::build(&roster(), &EmployeeFilter::default(), &calculator());

    assert_eq!(report.kpis.gender_ratio.female, 4);
    assert_eq!(report.kpis.near_retirement, 2);
    assert_eq!(report.insights[0].priority, InsightPriority::Critical);
    assert_eq!(report.insights[0].title, "Départs à la retraite imminents");
    assert_eq!(report.turnover.high_risk_employees, 3);
    assert_eq!(report.turnover.turnover_risk_index, 48);
    let index_insight = report
        .insights
        .iter()
        .find(|insight| insight.title == "Indice de rotation préoccupant")
        .expect("three of ten above 70 raise the index alert");
    assert_eq!(index_insight.priority, InsightPriority::High);
    assert!(report
        .turnover
        .risk_factors
        .iter()
        .any(|factor| factor.starts_with("Proportion élevée de contrats temporaires")));

    let logistics = report
        .distribution
        .by_department
        .iter()
        .find(|entry| entry.label == "Logistique")
        .expect("logistics present");
    assert_eq!(logistics.count, 3);
}

#[test]
fn filtered_report_matches_aggregating_the_subset() {
    let employees = roster();
    let calculator = calculator();
    let filter = EmployeeFilter {
        genders: vec![Gender::Female],
        search: Some("siège".to_string()),
        ..EmployeeFilter::default()
    };

    let subset = filter.apply(&employees, &calculator);
    let report = WorkforceReport::build(&employees, &filter, &calculator);

    let ids: Vec<&str> = subset.iter().map(|employee| employee.id.as_str()).collect();
    assert_eq!(ids, vec!["T002", "T003"]);
    assert_eq!(report.kpis, calculate_dashboard_kpis(&subset, &calculator));
    assert_eq!(report.turnover, analyze_turnover(&subset, &calculator));
}

#[test]
fn contract_window_filter_uses_reference_date() {
    let employees = roster();
    let filter = EmployeeFilter {
        contract_expiring_within_months: Some(3),
        ..EmployeeFilter::default()
    };

    let selected = filter.apply(&employees, &calculator());
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, "T005");

    let later = NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date");
    let selected = filter.apply(&employees, &MetricsCalculator::new(PositionClassifier::shared(), later));
    let ids: Vec<&str> = selected.iter().map(|employee| employee.id.as_str()).collect();
    assert_eq!(ids, vec!["T010"]);
}

#[test]
fn report_serializes_dashboard_contract() {
    let report = WorkforceReport::build(&roster(), &EmployeeFilter::default(), &calculator());

    let value = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(value["reference_date"], "2025-06-30");
    assert!(value["kpis"].get("turnoverRiskIndex").is_some());
    assert!(value["turnover"].get("ageGroupRisks").is_some());
    assert_eq!(value["insights"][0]["type"], "risk");
    assert_eq!(value["distribution"]["by_gender"][0]["label"], "M");
}

#[test]
fn empty_roster_report_is_all_zero() {
    let report = WorkforceReport::build(&[], &EmployeeFilter::default(), &calculator());

    assert_eq!(report.kpis.total_employees, 0);
    assert!(report.insights.is_empty());
    assert_eq!(report.turnover.recommendations.len(), 2);
    assert!(report
        .distribution
        .by_age_band
        .iter()
        .all(|entry| entry.count == 0));
}
