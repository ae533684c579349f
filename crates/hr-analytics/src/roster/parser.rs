use super::normalizer::{normalize_text, parse_decimal};
use super::RecordError;
use crate::analytics::domain::{Employee, Gender};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    noms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sexe: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    nationalite: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_naissance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_embauche: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_fin_contrat: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    annee_naissance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    annee_embauche: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    anciennete: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tranche_age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tranche_anciennete: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    poste: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    personne_contacter: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    affectation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salaire: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    year: Option<String>,
}

impl RosterRow {
    /// Builds the employee, deriving AGE/ANCIENNETE, the year columns and the
    /// band labels from dates when the export left them blank.
    pub(crate) fn into_employee(self, today: NaiveDate) -> Result<Employee, RecordError> {
        let date_naissance = optional_date("DATE_NAISSANCE", self.date_naissance)?;
        let date_embauche = optional_date("DATE_EMBAUCHE", self.date_embauche)?;
        let date_fin_contrat = optional_date("DATE_FIN_CONTRAT", self.date_fin_contrat)?;

        let sexe = match self.sexe {
            Some(raw) => Gender::parse(&raw).ok_or(RecordError::InvalidField {
                field: "SEXE",
                value: raw,
            })?,
            None => return Err(RecordError::MissingField("SEXE")),
        };

        let age = match self.age {
            Some(raw) => decimal("AGE", raw)?,
            None => date_naissance
                .map(|born| years_between(born, today))
                .ok_or(RecordError::MissingField("AGE"))?,
        };
        let anciennete = match self.anciennete {
            Some(raw) => decimal("ANCIENNETE", raw)?,
            None => date_embauche
                .map(|hired| years_between(hired, today))
                .ok_or(RecordError::MissingField("ANCIENNETE"))?,
        };

        let annee_naissance = optional_year("ANNEE_NAISSANCE", self.annee_naissance)?
            .or_else(|| date_naissance.map(|date| date.year()));
        let annee_embauche = optional_year("ANNEE_EMBAUCHE", self.annee_embauche)?
            .or_else(|| date_embauche.map(|date| date.year()));
        let year = optional_year("YEAR", self.year)?;

        let mut employee = Employee {
            id: text(self.id),
            noms: text(self.noms),
            sexe,
            nationalite: text(self.nationalite),
            date_naissance,
            date_embauche,
            date_fin_contrat,
            annee_naissance,
            annee_embauche,
            age,
            anciennete,
            tranche_age: text(self.tranche_age),
            tranche_anciennete: text(self.tranche_anciennete),
            poste: text(self.poste),
            personne_contacter: text(self.personne_contacter),
            affectation: text(self.affectation),
            salaire: text(self.salaire),
            year,
        };
        employee.fill_missing_bands();
        Ok(employee)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn text(value: Option<String>) -> String {
    value.map(|raw| normalize_text(&raw)).unwrap_or_default()
}

fn decimal(field: &'static str, raw: String) -> Result<f64, RecordError> {
    parse_decimal(&raw).ok_or(RecordError::InvalidField { field, value: raw })
}

fn optional_year(field: &'static str, raw: Option<String>) -> Result<Option<i32>, RecordError> {
    raw.map(|value| {
        normalize_text(&value)
            .parse::<i32>()
            .map_err(|_| RecordError::InvalidField { field, value })
    })
    .transpose()
}

fn optional_date(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<NaiveDate>, RecordError> {
    raw.map(|value| parse_date(&value).ok_or(RecordError::InvalidField { field, value }))
        .transpose()
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `DD/MM/YYYY`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

/// Elapsed years to one decimal; a future `from` yields a negative value,
/// which validation then rejects.
fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    let years = (to - from).num_days() as f64 / DAYS_PER_YEAR;
    (years * 10.0).floor() / 10.0
}
