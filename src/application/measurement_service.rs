// Measurement service - Form submission, report download and data export
use crate::application::error::ApiError;
use crate::application::navigation::Route;
use crate::application::water_quality_api::{ExportFormat, WaterQualityApi};
use crate::domain::measurement::{FieldError, WaterQualityInput};
use crate::domain::prediction::WaterQualityPrediction;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Predicted(WaterQualityPrediction),
    /// Rejected locally; nothing was sent
    Invalid(Vec<FieldError>),
    LoginRequired(Route),
    Failed(String),
}

#[derive(Clone)]
pub struct MeasurementService {
    api: Arc<dyn WaterQualityApi>,
    download_dir: PathBuf,
}

impl MeasurementService {
    pub fn new(api: Arc<dyn WaterQualityApi>, download_dir: PathBuf) -> Self {
        Self { api, download_dir }
    }

    pub async fn submit(&self, input: &WaterQualityInput) -> SubmitOutcome {
        if let Err(errors) = input.check() {
            tracing::debug!("Measurement rejected by validation: {:?}", errors);
            return SubmitOutcome::Invalid(errors);
        }

        tracing::debug!("Submitting measurement: {:?}", input);
        match self.api.predict(input).await {
            Ok(prediction) => {
                tracing::info!(
                    "Water quality analysis completed: WQI {:.1} ({})",
                    prediction.wqi_value,
                    prediction.quality_category
                );
                SubmitOutcome::Predicted(prediction)
            }
            Err(ApiError::MissingToken) => SubmitOutcome::LoginRequired(Route::Login),
            Err(e) => {
                tracing::error!("Error submitting measurement: {}", e);
                SubmitOutcome::Failed(e.user_message())
            }
        }
    }

    /// Generates the PDF report for `input` and saves it, returning the file path
    pub async fn download_report(&self, input: &WaterQualityInput) -> anyhow::Result<PathBuf> {
        let bytes = self
            .api
            .generate_report(input)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))
            .context("Failed to download report")?;

        let path = self.download_dir.join(report_file_name(Utc::now()));
        save(&path, &bytes).await?;
        tracing::info!("Report downloaded to {}", path.display());
        Ok(path)
    }

    pub async fn export(&self, format: ExportFormat) -> anyhow::Result<PathBuf> {
        let bytes = self
            .api
            .export_data(format)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))
            .context("Failed to export data")?;

        let path = self
            .download_dir
            .join(format!("water_quality_data.{}", format.file_extension()));
        save(&path, &bytes).await?;
        tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// `water_quality_report_2024-03-01T101500.pdf`
pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("water_quality_report_{}.pdf", now.format("%Y-%m-%dT%H%M%S"))
}

async fn save(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
