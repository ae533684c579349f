use crate::infra::{parse_date, AnalyticsContext};
use chrono::{Datelike, Duration, NaiveDate};
use clap::Args;
use hr_analytics::analytics::bands::{age_band, tenure_band};
use hr_analytics::analytics::{Employee, EmployeeFilter, Gender, WorkforceReport};
use hr_analytics::config::AppConfig;
use hr_analytics::error::AppError;
use hr_analytics::roster::RosterImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV roster export with ID, NOMS, SEXE, AGE, ANCIENNETE, POSTE, ... columns
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Reference date for contract windows (defaults to APP_REFERENCE_DATE, then today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Keep only these departments (repeatable)
    #[arg(long)]
    pub(crate) department: Vec<String>,
    /// Keep only this gender, M or F (repeatable)
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Vec<Gender>,
    /// Case-insensitive search over name, position, nationality and site
    #[arg(long)]
    pub(crate) search: Option<String>,
}

impl ReportArgs {
    fn filter(&self) -> EmployeeFilter {
        EmployeeFilter {
            search: self.search.clone(),
            genders: self.gender.clone(),
            departments: self.department.clone(),
            ..EmployeeFilter::default()
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the sample roster (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::parse(raw).ok_or_else(|| format!("unknown gender '{raw}', expected M or F"))
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let analytics = AnalyticsContext::from_config(&config.analytics)?;
    let today = analytics.today(args.today);

    let employees = RosterImporter::from_path(&args.roster, today)?;
    let calculator = analytics.calculator(today);
    let report = WorkforceReport::build(&employees, &args.filter(), &calculator);

    emit(&report, args.json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let analytics = AnalyticsContext::default();
    let today = analytics.today(args.today);

    let employees = sample_roster(today);
    let calculator = analytics.calculator(today);
    let report = WorkforceReport::build(&employees, &EmployeeFilter::default(), &calculator);

    if !args.json {
        println!("HR analytics demo ({} sample employees)", employees.len());
    }
    emit(&report, args.json)
}

fn emit(report: &WorkforceReport, json: bool) -> Result<(), AppError> {
    if json {
        let body = serde_json::to_string_pretty(report).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        render_report(report);
    }
    Ok(())
}

pub(crate) fn render_report(report: &WorkforceReport) {
    let kpis = &report.kpis;
    println!(
        "Reference date: {} | {} of {} employees selected",
        report.reference_date, kpis.total_employees, report.headcount_before_filter
    );

    println!("\nKey indicators");
    println!(
        "- Average age {:.1} | average tenure {:.1} years",
        kpis.avg_age, kpis.avg_tenure
    );
    println!(
        "- {} new hires | {} near retirement | {} men / {} women",
        kpis.new_hires, kpis.near_retirement, kpis.gender_ratio.male, kpis.gender_ratio.female
    );
    println!(
        "- Diversity {} | retention {}% | performance {} | turnover {:.1}% (index {})",
        kpis.diversity_index,
        kpis.retention_rate,
        kpis.performance_index,
        kpis.turnover_rate,
        kpis.turnover_risk_index
    );

    println!("\nHeadcount by department");
    for entry in &report.distribution.by_department {
        println!("- {}: {}", entry.label, entry.count);
    }

    if report.insights.is_empty() {
        println!("\nInsights: none");
    } else {
        println!("\nInsights");
        for insight in &report.insights {
            println!(
                "- [{:?}] {}: {}",
                insight.priority, insight.title, insight.description
            );
            for action in &insight.actions {
                println!("    * {}", action);
            }
        }
    }

    let turnover = &report.turnover;
    println!(
        "\nTurnover: {} high-risk employee(s), index {}",
        turnover.high_risk_employees, turnover.turnover_risk_index
    );
    for (department, risk) in &turnover.department_risks {
        println!("- {}: {}/100", department, risk);
    }
    if !turnover.risk_factors.is_empty() {
        println!("Risk factors");
        for factor in &turnover.risk_factors {
            println!("- {}", factor);
        }
    }
    println!("Recommendations");
    for recommendation in &turnover.recommendations {
        println!("- {}", recommendation);
    }
}

/// Small mixed roster covering every department keyword and both contract types.
pub(crate) fn sample_roster(today: NaiveDate) -> Vec<Employee> {
    let rows: [(&str, &str, Gender, &str, f64, f64, &str, &str, Option<i64>); 12] = [
        ("E001", "Moussa Traoré", Gender::Male, "Malienne", 63.0, 28.0, "Directeur Général", "Siège", None),
        ("E002", "Claire Dubois", Gender::Female, "Française", 47.0, 12.0, "Directeur Financier", "Siège", None),
        ("E003", "Fatou Ndiaye", Gender::Female, "Sénégalaise", 38.0, 9.0, "Responsable RH", "Siège", None),
        ("E004", "Jean Martin", Gender::Male, "Française", 52.0, 18.0, "Chef de Dépôt", "Dépôt Nord", None),
        ("E005", "Karim Benali", Gender::Male, "Française", 24.0, 0.5, "Chauffeur", "Dépôt Nord", Some(45)),
        ("E006", "Lucas Petit", Gender::Male, "Française", 29.0, 1.0, "Chauffeur Poids Lourd", "Dépôt Sud", Some(150)),
        ("E007", "Aminata Koné", Gender::Female, "Ivoirienne", 35.0, 6.0, "Agent Transport", "Dépôt Sud", None),
        ("E008", "Pierre Lambert", Gender::Male, "Française", 59.0, 31.0, "Motoriste", "Atelier", None),
        ("E009", "Sophie Bernard", Gender::Female, "Française", 31.0, 4.0, "Commercial", "Agence Centre", None),
        ("E010", "Yao Kouassi", Gender::Male, "Togolaise", 27.0, 2.0, "Comptable", "Siège", Some(300)),
        ("E011", "Marc Girard", Gender::Male, "Française", 44.0, 10.0, "Technicien Maintenance", "Atelier", None),
        ("E012", "Nadia Haddad", Gender::Female, "Française", 33.0, 3.0, "Assistante Administrative", "Siège", None),
    ];

    rows.into_iter()
        .map(
            |(id, noms, sexe, nationalite, age, anciennete, poste, affectation, contract_days)| {
                let hired = today - Duration::days((anciennete * 365.25) as i64);
                Employee {
                    id: id.to_string(),
                    noms: noms.to_string(),
                    sexe,
                    nationalite: nationalite.to_string(),
                    date_naissance: None,
                    date_embauche: Some(hired),
                    date_fin_contrat: contract_days.map(|days| today + Duration::days(days)),
                    annee_naissance: Some(today.year() - age as i32),
                    annee_embauche: Some(hired.year()),
                    age,
                    anciennete,
                    tranche_age: age_band(age).to_string(),
                    tranche_anciennete: tenure_band(anciennete).to_string(),
                    poste: poste.to_string(),
                    personne_contacter: String::new(),
                    affectation: affectation.to_string(),
                    salaire: String::new(),
                    year: Some(today.year()),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_analytics::analytics::validate_roster;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    #[test]
    fn sample_roster_passes_validation() {
        let roster = sample_roster(today());
        assert_eq!(roster.len(), 12);
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn sample_report_surfaces_retirement_and_turnover() {
        let analytics = AnalyticsContext::default();
        let roster = sample_roster(today());

        let report = WorkforceReport::build(
            &roster,
            &EmployeeFilter::default(),
            &analytics.calculator(today()),
        );

        assert_eq!(report.kpis.total_employees, 12);
        assert_eq!(report.kpis.gender_ratio.female, 5);
        assert!(report
            .insights
            .iter()
            .any(|insight| insight.title == "Départs à la retraite imminents"));
        assert!(report.turnover.high_risk_employees >= 1);
        assert!(report
            .distribution
            .by_department
            .iter()
            .any(|entry| entry.label == "Logistique" && entry.count == 3));
    }

    #[test]
    fn report_args_build_filter() {
        let args = ReportArgs {
            roster: PathBuf::from("roster.csv"),
            today: None,
            json: false,
            department: vec!["Finance".to_string()],
            gender: vec![Gender::Female],
            search: Some("siège".to_string()),
        };

        let filter = args.filter();

        assert_eq!(filter.departments, vec!["Finance".to_string()]);
        assert_eq!(filter.genders, vec![Gender::Female]);
        assert!(filter.needs_metrics());
    }
}
