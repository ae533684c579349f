use super::bands::{age_band, resolve_band, tenure_band};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Roster entry as supplied by the HR store.
///
/// Field names serialize to the upper-case column names the dashboard and
/// export layers pattern-match on. AGE and ANCIENNETE are trusted as given;
/// only the contract window is derived from a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Employee {
    pub id: String,
    pub noms: String,
    pub sexe: Gender,
    #[serde(default)]
    pub nationalite: String,
    #[serde(default)]
    pub date_naissance: Option<NaiveDate>,
    #[serde(default)]
    pub date_embauche: Option<NaiveDate>,
    #[serde(default)]
    pub date_fin_contrat: Option<NaiveDate>,
    #[serde(default)]
    pub annee_naissance: Option<i32>,
    #[serde(default)]
    pub annee_embauche: Option<i32>,
    pub age: f64,
    pub anciennete: f64,
    #[serde(default)]
    pub tranche_age: String,
    #[serde(default)]
    pub tranche_anciennete: String,
    #[serde(default)]
    pub poste: String,
    #[serde(default)]
    pub personne_contacter: String,
    #[serde(default)]
    pub affectation: String,
    #[serde(default)]
    pub salaire: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl Employee {
    pub fn contract_type(&self) -> ContractType {
        if self.date_fin_contrat.is_some() {
            ContractType::Temporary
        } else {
            ContractType::Permanent
        }
    }

    /// Fills blank TRANCHE_AGE / TRANCHE_ANCIENNETE from AGE and ANCIENNETE
    /// and trims the stored labels.
    pub fn fill_missing_bands(&mut self) {
        self.tranche_age = resolve_band(&self.tranche_age, age_band(self.age)).to_string();
        self.tranche_anciennete =
            resolve_band(&self.tranche_anciennete, tenure_band(self.anciennete)).to_string();
    }

    pub(crate) fn poste_lowercase(&self) -> String {
        self.poste.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const fn ordered() -> [Self; 2] {
        [Self::Male, Self::Female]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "M" | "H" | "HOMME" | "MASCULIN" => Some(Self::Male),
            "F" | "FEMME" | "FEMININ" | "FÉMININ" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Permanent contracts carry no end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "CDI")]
    Permanent,
    #[serde(rename = "CDD")]
    Temporary,
}

impl ContractType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Permanent => "CDI",
            Self::Temporary => "CDD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RetirementRisk {
    #[serde(rename = "Faible")]
    Low,
    #[serde(rename = "Modéré")]
    Moderate,
    #[serde(rename = "Élevé")]
    High,
    #[serde(rename = "Critique")]
    Critical,
}

impl RetirementRisk {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Moderate, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Faible",
            Self::Moderate => "Modéré",
            Self::High => "Élevé",
            Self::Critical => "Critique",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceLevel {
    Excellent,
    #[serde(rename = "Bon")]
    Good,
    #[serde(rename = "Satisfaisant")]
    Satisfactory,
    #[serde(rename = "À améliorer")]
    NeedsImprovement,
    #[serde(rename = "Insuffisant")]
    Insufficient,
}

impl PerformanceLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Excellent,
            Self::Good,
            Self::Satisfactory,
            Self::NeedsImprovement,
            Self::Insufficient,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Bon",
            Self::Satisfactory => "Satisfaisant",
            Self::NeedsImprovement => "À améliorer",
            Self::Insufficient => "Insuffisant",
        }
    }

    /// Ordinal used by the performance index (Excellent = 5 .. Insuffisant = 1).
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Excellent => 5,
            Self::Good => 4,
            Self::Satisfactory => 3,
            Self::NeedsImprovement => 2,
            Self::Insufficient => 1,
        }
    }

    /// Salary multiplier applied on top of the base salary.
    pub const fn salary_multiplier(self) -> f64 {
        match self {
            Self::Excellent => 1.25,
            Self::Good => 1.15,
            Self::Satisfactory => 1.05,
            Self::NeedsImprovement => 0.95,
            Self::Insufficient => 0.85,
        }
    }

    pub const fn is_low(self) -> bool {
        matches!(self, Self::NeedsImprovement | Self::Insufficient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnoverRisk {
    #[serde(rename = "Très faible")]
    VeryLow,
    #[serde(rename = "Faible")]
    Low,
    #[serde(rename = "Modéré")]
    Moderate,
    #[serde(rename = "Élevé")]
    High,
    #[serde(rename = "Critique")]
    Critical,
}

impl TurnoverRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Très faible",
            Self::Low => "Faible",
            Self::Moderate => "Modéré",
            Self::High => "Élevé",
            Self::Critical => "Critique",
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Expert,
    #[serde(rename = "Avancé")]
    Advanced,
    #[serde(rename = "Intermédiaire")]
    Intermediate,
    #[serde(rename = "Débutant")]
    Beginner,
    #[serde(rename = "En formation")]
    InTraining,
}

impl SkillLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expert => "Expert",
            Self::Advanced => "Avancé",
            Self::Intermediate => "Intermédiaire",
            Self::Beginner => "Débutant",
            Self::InTraining => "En formation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingNeeds {
    Urgent,
    #[serde(rename = "Prioritaire")]
    Priority,
    #[serde(rename = "Souhaitable")]
    Desirable,
    #[serde(rename = "Optionnel")]
    Optional,
    #[serde(rename = "Aucun")]
    NoNeed,
}

impl TrainingNeeds {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Priority => "Prioritaire",
            Self::Desirable => "Souhaitable",
            Self::Optional => "Optionnel",
            Self::NoNeed => "Aucun",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareerPath {
    Ascendant,
    Stable,
    Plateau,
    Transition,
}

impl CareerPath {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascendant => "Ascendant",
            Self::Stable => "Stable",
            Self::Plateau => "Plateau",
            Self::Transition => "Transition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessorReadiness {
    #[serde(rename = "Prêt maintenant")]
    ReadyNow,
    #[serde(rename = "Prêt dans 1 an")]
    ReadyInOneYear,
    #[serde(rename = "Prêt dans 2-3 ans")]
    ReadyInTwoToThreeYears,
    #[serde(rename = "Développement requis")]
    DevelopmentRequired,
    #[serde(rename = "Non identifié")]
    NotIdentified,
}

impl SuccessorReadiness {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReadyNow => "Prêt maintenant",
            Self::ReadyInOneYear => "Prêt dans 1 an",
            Self::ReadyInTwoToThreeYears => "Prêt dans 2-3 ans",
            Self::DevelopmentRequired => "Développement requis",
            Self::NotIdentified => "Non identifié",
        }
    }

    pub const fn is_ready_soon(self) -> bool {
        matches!(self, Self::ReadyNow | Self::ReadyInOneYear)
    }
}

/// Per-employee derived metrics. Recomputed on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HRMetrics {
    pub retirement_risk: RetirementRisk,
    pub performance_level: PerformanceLevel,
    pub turnover_risk: TurnoverRisk,
    pub skill_level: SkillLevel,
    pub training_needs: TrainingNeeds,
    pub career_path: CareerPath,
    pub successor_readiness: SuccessorReadiness,
    pub retention_probability: i32,
    pub department: String,
    pub management_level: String,
    pub salary: i64,
    pub inclusion_score: i32,
    pub turnover_index: i32,
}

/// Metrics paired with the identity of the employee they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMetrics {
    pub id: String,
    pub name: String,
    pub position: String,
    pub metrics: HRMetrics,
}
