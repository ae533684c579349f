use chrono::{Local, NaiveDate};
use hr_analytics::analytics::{MetricsCalculator, PositionClassifier};
use hr_analytics::config::AnalyticsConfig;
use hr_analytics::error::AppError;
use hr_analytics::roster::parse_date as parse_roster_date;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) analytics: Arc<AnalyticsContext>,
}

/// Scoring inputs shared by every request.
#[derive(Debug)]
pub(crate) struct AnalyticsContext {
    pub(crate) classifier: PositionClassifier,
    pub(crate) reference_date: Option<NaiveDate>,
}

impl AnalyticsContext {
    pub(crate) fn from_config(config: &AnalyticsConfig) -> Result<Self, AppError> {
        Ok(Self {
            classifier: load_classifier(config)?,
            reference_date: config.reference_date,
        })
    }

    /// Request override, then the configured reference date, then the local clock.
    pub(crate) fn today(&self, requested: Option<NaiveDate>) -> NaiveDate {
        requested
            .or(self.reference_date)
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub(crate) fn calculator(&self, today: NaiveDate) -> MetricsCalculator<'_> {
        MetricsCalculator::new(&self.classifier, today)
    }
}

impl Default for AnalyticsContext {
    fn default() -> Self {
        Self {
            classifier: PositionClassifier::standard(),
            reference_date: None,
        }
    }
}

pub(crate) fn load_classifier(config: &AnalyticsConfig) -> Result<PositionClassifier, AppError> {
    match &config.classifier_path {
        Some(path) => {
            let classifier = PositionClassifier::from_path(path)?;
            info!(
                path = %path.display(),
                departments = classifier.departments.len(),
                "custom position classifier loaded"
            );
            Ok(classifier)
        }
        None => Ok(PositionClassifier::standard()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_roster_date(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD or DD/MM/YYYY"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn today_prefers_request_then_configuration() {
        let configured = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let requested = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        let context = AnalyticsContext {
            reference_date: Some(configured),
            ..AnalyticsContext::default()
        };

        assert_eq!(context.today(Some(requested)), requested);
        assert_eq!(context.today(None), configured);
    }

    #[test]
    fn missing_classifier_file_is_reported() {
        let config = AnalyticsConfig {
            reference_date: None,
            classifier_path: Some(PathBuf::from("./does-not-exist.json")),
        };

        let error = load_classifier(&config).expect_err("missing file rejected");

        assert!(matches!(error, AppError::Classifier(_)));
    }

    #[test]
    fn parse_date_accepts_french_layout() {
        assert_eq!(
            parse_date("31/12/2025"),
            Ok(NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date"))
        );
        assert!(parse_date("soon").is_err());
    }
}
