use super::classification::PositionClassifier;
use super::domain::{
    CareerPath, Employee, EmployeeMetrics, HRMetrics, PerformanceLevel, RetirementRisk,
    SkillLevel, SuccessorReadiness, TrainingNeeds, TurnoverRisk,
};
use chrono::NaiveDate;

const DAYS_PER_MONTH: f64 = 30.0;

/// Stateless scorer turning an [`Employee`] into its [`HRMetrics`].
///
/// `today` anchors the contract-expiry window so results are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCalculator<'a> {
    classifier: &'a PositionClassifier,
    today: NaiveDate,
}

impl<'a> MetricsCalculator<'a> {
    pub fn new(classifier: &'a PositionClassifier, today: NaiveDate) -> Self {
        Self { classifier, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn classifier(&self) -> &'a PositionClassifier {
        self.classifier
    }

    pub fn calculate(&self, employee: &Employee) -> HRMetrics {
        let poste = employee.poste_lowercase();
        let age = employee.age;
        let tenure = employee.anciennete;

        let performance_level = performance_level(age, tenure, &poste);
        let turnover_risk = turnover_risk(employee);
        let skill_level = skill_level(tenure, &poste);

        HRMetrics {
            retirement_risk: retirement_risk(age),
            performance_level,
            turnover_risk,
            skill_level,
            training_needs: training_needs(age, tenure, skill_level),
            career_path: career_path(age, tenure, performance_level),
            successor_readiness: successor_readiness(age, tenure, performance_level),
            retention_probability: retention_probability(
                age,
                tenure,
                performance_level,
                turnover_risk,
            ),
            department: self.classifier.department(&poste).to_string(),
            management_level: self.classifier.management_level(&poste).to_string(),
            salary: self.estimated_salary(age, tenure, &poste, performance_level),
            inclusion_score: inclusion_score(employee),
            turnover_index: turnover_index(employee, &poste, performance_level, self.today),
        }
    }

    pub fn calculate_all(&self, employees: &[Employee]) -> Vec<HRMetrics> {
        employees
            .iter()
            .map(|employee| self.calculate(employee))
            .collect()
    }

    pub fn employee_metrics(&self, employee: &Employee) -> EmployeeMetrics {
        EmployeeMetrics {
            id: employee.id.clone(),
            name: employee.noms.clone(),
            position: employee.poste.clone(),
            metrics: self.calculate(employee),
        }
    }

    fn estimated_salary(
        &self,
        age: f64,
        tenure: f64,
        poste: &str,
        performance: PerformanceLevel,
    ) -> i64 {
        let base = self.classifier.base_salary(poste);
        let tenure_bonus = base * tenure * 0.015;
        let experience_bonus = (age - 22.0).max(0.0) * 800.0;
        let performance_bonus = base * (performance.salary_multiplier() - 1.0);
        (base + tenure_bonus + experience_bonus + performance_bonus).round() as i64
    }
}

/// Scores one employee against the standard keyword table.
pub fn calculate_employee_metrics(employee: &Employee, today: NaiveDate) -> HRMetrics {
    MetricsCalculator::new(PositionClassifier::shared(), today).calculate(employee)
}

fn retirement_risk(age: f64) -> RetirementRisk {
    if age >= 62.0 {
        RetirementRisk::Critical
    } else if age >= 58.0 {
        RetirementRisk::High
    } else if age >= 55.0 {
        RetirementRisk::Moderate
    } else {
        RetirementRisk::Low
    }
}

fn position_bonus(poste: &str) -> f64 {
    if poste.contains("directeur") {
        20.0
    } else if poste.contains("resp") {
        15.0
    } else if poste.contains("admin") {
        10.0
    } else {
        5.0
    }
}

fn performance_level(age: f64, tenure: f64, poste: &str) -> PerformanceLevel {
    let score = tenure * 3.0 + age * 0.8 + position_bonus(poste);

    if score > 80.0 {
        PerformanceLevel::Excellent
    } else if score > 60.0 {
        PerformanceLevel::Good
    } else if score > 40.0 {
        PerformanceLevel::Satisfactory
    } else if score > 25.0 {
        PerformanceLevel::NeedsImprovement
    } else {
        PerformanceLevel::Insufficient
    }
}

// Conditions stack: a hire under one year collects both the <1 and <3 points.
fn turnover_risk(employee: &Employee) -> TurnoverRisk {
    let mut score = 0;
    if employee.anciennete < 1.0 {
        score += 40;
    }
    if employee.anciennete < 3.0 {
        score += 20;
    }
    if employee.age < 25.0 {
        score += 15;
    }
    if employee.age > 55.0 {
        score += 10;
    }
    if employee.date_fin_contrat.is_some() {
        score += 25;
    }

    if score > 50 {
        TurnoverRisk::Critical
    } else if score > 35 {
        TurnoverRisk::High
    } else if score > 20 {
        TurnoverRisk::Moderate
    } else if score > 10 {
        TurnoverRisk::Low
    } else {
        TurnoverRisk::VeryLow
    }
}

fn skill_level(tenure: f64, poste: &str) -> SkillLevel {
    let mut score = tenure;
    if poste.contains("directeur") {
        score += 10.0;
    }
    if poste.contains("resp") {
        score += 5.0;
    }

    if score > 20.0 {
        SkillLevel::Expert
    } else if score > 15.0 {
        SkillLevel::Advanced
    } else if score > 8.0 {
        SkillLevel::Intermediate
    } else if score > 3.0 {
        SkillLevel::Beginner
    } else {
        SkillLevel::InTraining
    }
}

fn training_needs(age: f64, tenure: f64, skill: SkillLevel) -> TrainingNeeds {
    let mut score = (25.0 - tenure).max(0.0);
    if age < 35.0 {
        score += 10.0;
    }
    if skill == SkillLevel::Beginner {
        score += 15.0;
    }

    if score > 30.0 {
        TrainingNeeds::Urgent
    } else if score > 20.0 {
        TrainingNeeds::Priority
    } else if score > 10.0 {
        TrainingNeeds::Desirable
    } else if score > 5.0 {
        TrainingNeeds::Optional
    } else {
        TrainingNeeds::NoNeed
    }
}

fn career_path(age: f64, tenure: f64, performance: PerformanceLevel) -> CareerPath {
    if age < 30.0 && performance == PerformanceLevel::Excellent {
        CareerPath::Ascendant
    } else if age > 55.0 && tenure > 20.0 {
        CareerPath::Stable
    } else if age > 50.0 && performance != PerformanceLevel::Excellent {
        CareerPath::Plateau
    } else if performance == PerformanceLevel::NeedsImprovement {
        CareerPath::Transition
    } else {
        CareerPath::Stable
    }
}

fn successor_readiness(
    age: f64,
    tenure: f64,
    performance: PerformanceLevel,
) -> SuccessorReadiness {
    match performance {
        PerformanceLevel::Excellent if tenure > 8.0 && age < 50.0 => SuccessorReadiness::ReadyNow,
        PerformanceLevel::Good if tenure > 5.0 => SuccessorReadiness::ReadyInOneYear,
        PerformanceLevel::Satisfactory if tenure > 3.0 => {
            SuccessorReadiness::ReadyInTwoToThreeYears
        }
        PerformanceLevel::Insufficient => SuccessorReadiness::NotIdentified,
        _ => SuccessorReadiness::DevelopmentRequired,
    }
}

fn retention_probability(
    age: f64,
    tenure: f64,
    performance: PerformanceLevel,
    turnover: TurnoverRisk,
) -> i32 {
    let mut probability = 50;

    if tenure > 15.0 {
        probability += 30;
    } else if tenure > 10.0 {
        probability += 25;
    } else if tenure > 5.0 {
        probability += 15;
    } else if tenure > 2.0 {
        probability += 10;
    }

    probability += match performance {
        PerformanceLevel::Excellent => 15,
        PerformanceLevel::Good => 10,
        PerformanceLevel::Satisfactory => 0,
        PerformanceLevel::NeedsImprovement => -10,
        PerformanceLevel::Insufficient => -20,
    };

    if age > 55.0 {
        probability -= 15;
    } else if age < 25.0 {
        probability -= 10;
    }

    probability += match turnover {
        TurnoverRisk::Critical => -25,
        TurnoverRisk::High => -15,
        TurnoverRisk::Moderate => -5,
        TurnoverRisk::Low => 0,
        TurnoverRisk::VeryLow => 10,
    };

    probability.clamp(20, 95)
}

fn inclusion_score(employee: &Employee) -> i32 {
    let mut score = 70;

    if employee.nationalite.trim() != "Française" {
        score += 12;
    }

    if (25.0..=55.0).contains(&employee.age) {
        score += 8;
    } else {
        score += 5;
    }

    let tenure = employee.anciennete;
    if tenure > 10.0 {
        score += 10;
    } else if tenure > 5.0 {
        score += 6;
    } else if tenure > 2.0 {
        score += 3;
    }

    if tenure > 1.0 {
        score += 5;
    }

    score.clamp(0, 100)
}

/// Months from `today` until the contract ends; negative once expired.
pub(crate) fn months_until(end: NaiveDate, today: NaiveDate) -> f64 {
    (end - today).num_days() as f64 / DAYS_PER_MONTH
}

// Tenure and age blocks are first-match cascades, unlike `turnover_risk`.
fn turnover_index(
    employee: &Employee,
    poste: &str,
    performance: PerformanceLevel,
    today: NaiveDate,
) -> i32 {
    let tenure = employee.anciennete;
    let age = employee.age;
    let mut index = 50;

    if tenure < 1.0 {
        index += 30;
    } else if tenure < 2.0 {
        index += 20;
    } else if tenure < 3.0 {
        index += 15;
    } else if tenure < 5.0 {
        index += 10;
    } else if tenure > 10.0 {
        index -= 15;
    } else if tenure > 5.0 {
        index -= 10;
    }

    if age < 25.0 {
        index += 15;
    } else if age < 30.0 {
        index += 10;
    } else if age > 55.0 {
        index += 5;
    } else if (35.0..=45.0).contains(&age) {
        index -= 5;
    }

    index += match performance {
        PerformanceLevel::Excellent => -15,
        PerformanceLevel::Good => -10,
        PerformanceLevel::Satisfactory => 0,
        PerformanceLevel::NeedsImprovement => 15,
        PerformanceLevel::Insufficient => 25,
    };

    if let Some(end) = employee.date_fin_contrat {
        let months = months_until(end, today);
        if months <= 3.0 {
            index += 25;
        } else if months <= 6.0 {
            index += 15;
        } else if months <= 12.0 {
            index += 10;
        }
    }

    if poste.contains("directeur") || poste.contains("resp") {
        index -= 10;
    }

    index.clamp(0, 100)
}
