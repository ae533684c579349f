use super::domain::Employee;
use thiserror::Error;

/// Record-level problems caught at ingestion. The scoring functions
/// themselves accept any values and never consult this.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("employee record is missing an ID")]
    MissingId,
    #[error("employee {id}: AGE must not be negative (got {age})")]
    NegativeAge { id: String, age: f64 },
    #[error("employee {id}: ANCIENNETE must not be negative (got {tenure})")]
    NegativeTenure { id: String, tenure: f64 },
    #[error("employee {id}: ANCIENNETE ({tenure}) exceeds AGE ({age})")]
    TenureExceedsAge { id: String, age: f64, tenure: f64 },
    #[error("employee {id}: POSTE is blank")]
    MissingPosition { id: String },
    #[error("employee {id}: DATE_FIN_CONTRAT precedes DATE_EMBAUCHE")]
    ContractEndsBeforeHire { id: String },
}

pub fn validate_employee(employee: &Employee) -> Result<(), ValidationError> {
    let id = employee.id.trim();
    if id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    let id = id.to_string();

    if !employee.age.is_finite() || employee.age < 0.0 {
        return Err(ValidationError::NegativeAge {
            id,
            age: employee.age,
        });
    }
    if !employee.anciennete.is_finite() || employee.anciennete < 0.0 {
        return Err(ValidationError::NegativeTenure {
            id,
            tenure: employee.anciennete,
        });
    }
    if employee.anciennete > employee.age {
        return Err(ValidationError::TenureExceedsAge {
            id,
            age: employee.age,
            tenure: employee.anciennete,
        });
    }
    if employee.poste.trim().is_empty() {
        return Err(ValidationError::MissingPosition { id });
    }
    if let (Some(hired), Some(ends)) = (employee.date_embauche, employee.date_fin_contrat) {
        if ends < hired {
            return Err(ValidationError::ContractEndsBeforeHire { id });
        }
    }

    Ok(())
}

/// Validates every record, stopping at the first failure.
pub fn validate_roster(employees: &[Employee]) -> Result<(), ValidationError> {
    employees.iter().try_for_each(validate_employee)
}
