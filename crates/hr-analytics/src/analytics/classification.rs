use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Maps any of `keywords` (substring of the lower-cased job title) to `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub label: String,
}

impl KeywordRule {
    fn new(keywords: &[&str], label: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            label: label.to_string(),
        }
    }

    fn matches(&self, poste: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| poste.contains(keyword.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub keyword: String,
    pub base_salary: f64,
}

/// Ordered keyword tables used to classify free-text job titles.
///
/// Every table is first-match-wins in list order, so a title such as
/// "Directeur Général Adjoint" resolves by the earliest rule it hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionClassifier {
    pub departments: Vec<KeywordRule>,
    pub default_department: String,
    pub management_levels: Vec<KeywordRule>,
    pub default_management_level: String,
    pub salary_bands: Vec<SalaryBand>,
    pub default_base_salary: f64,
}

impl PositionClassifier {
    pub fn standard() -> Self {
        Self {
            departments: vec![
                KeywordRule::new(&["directeur"], "Direction"),
                KeywordRule::new(&["admin", "rh"], "Administration"),
                KeywordRule::new(&["chauffeur", "transport"], "Logistique"),
                KeywordRule::new(&["motor", "production"], "Production"),
                KeywordRule::new(&["commercial", "vente"], "Commercial"),
                KeywordRule::new(&["finance", "compta"], "Finance"),
                KeywordRule::new(&["it", "informatique"], "IT"),
                KeywordRule::new(&["maintenance", "technique"], "Technique"),
            ],
            default_department: "Support".to_string(),
            management_levels: vec![
                KeywordRule::new(&["directeur général", "pdg"], "Direction générale"),
                KeywordRule::new(&["directeur"], "Direction"),
                KeywordRule::new(&["resp", "manager"], "Management"),
                KeywordRule::new(&["chef", "superviseur"], "Supervision"),
                KeywordRule::new(&["senior", "principal"], "Senior"),
            ],
            default_management_level: "Opérationnel".to_string(),
            salary_bands: [
                ("directeur général", 120_000.0),
                ("directeur", 85_000.0),
                ("resp", 55_000.0),
                ("manager", 50_000.0),
                ("admin", 38_000.0),
                ("chauffeur", 32_000.0),
                ("motor", 35_000.0),
                ("technique", 40_000.0),
                ("commercial", 45_000.0),
            ]
            .into_iter()
            .map(|(keyword, base_salary)| SalaryBand {
                keyword: keyword.to_string(),
                base_salary,
            })
            .collect(),
            default_base_salary: 35_000.0,
        }
    }

    /// Process-wide standard table, built once.
    pub fn shared() -> &'static Self {
        static STANDARD: OnceLock<PositionClassifier> = OnceLock::new();
        STANDARD.get_or_init(Self::standard)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let mut classifier: Self = serde_json::from_str(raw)?;
        classifier.normalize();
        classifier.validate()?;
        Ok(classifier)
    }

    /// `poste` must already be lower-cased.
    pub fn department(&self, poste: &str) -> &str {
        first_label(&self.departments, poste).unwrap_or(&self.default_department)
    }

    /// `poste` must already be lower-cased.
    pub fn management_level(&self, poste: &str) -> &str {
        first_label(&self.management_levels, poste).unwrap_or(&self.default_management_level)
    }

    /// `poste` must already be lower-cased.
    pub fn base_salary(&self, poste: &str) -> f64 {
        self.salary_bands
            .iter()
            .find(|band| poste.contains(band.keyword.as_str()))
            .map(|band| band.base_salary)
            .unwrap_or(self.default_base_salary)
    }

    fn normalize(&mut self) {
        for rule in self
            .departments
            .iter_mut()
            .chain(self.management_levels.iter_mut())
        {
            for keyword in &mut rule.keywords {
                *keyword = keyword.trim().to_lowercase();
            }
        }
        for band in &mut self.salary_bands {
            band.keyword = band.keyword.trim().to_lowercase();
        }
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        let rules = self.departments.iter().chain(self.management_levels.iter());
        for rule in rules {
            if rule.keywords.iter().any(|keyword| keyword.is_empty()) {
                return Err(ClassifierError::EmptyKeyword {
                    label: rule.label.clone(),
                });
            }
        }
        if let Some(band) = self
            .salary_bands
            .iter()
            .find(|band| band.keyword.is_empty() || band.base_salary < 0.0)
        {
            return Err(ClassifierError::InvalidSalaryBand {
                keyword: band.keyword.clone(),
            });
        }
        if self.default_base_salary < 0.0 {
            return Err(ClassifierError::InvalidSalaryBand {
                keyword: "default".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PositionClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

fn first_label<'a>(rules: &'a [KeywordRule], poste: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| rule.matches(poste))
        .map(|rule| rule.label.as_str())
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read keyword table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid keyword table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("keyword rule '{label}' contains an empty keyword")]
    EmptyKeyword { label: String },
    #[error("salary band '{keyword}' must have a keyword and a non-negative base salary")]
    InvalidSalaryBand { keyword: String },
}
