use std::time::Duration;

use crate::{
    config::AppConfig,
    core::{
        error::CheckError,
        i18n::{Locale, Translator},
        random::{RandomSource, RngSource},
        types::SecurityReport,
    },
    pipeline::synthesizer::synthesize_report,
};

/// Runs analyses after the configured simulated latency. Holds no mutable
/// state, so one engine can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Engine {
    pub config: AppConfig,
}

impl Engine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.config.analysis_delay_ms)
    }

    pub async fn analyze(
        &self,
        url: &str,
        locale: Locale,
        rng: &mut dyn RandomSource,
    ) -> Result<SecurityReport, CheckError> {
        tokio::time::sleep(self.delay()).await;
        let tr = Translator::new(locale);
        tracing::debug!("performing security analysis for {} ({})", url, tr.locale());
        let report = synthesize_report(url, &tr, rng)?;
        tracing::debug!(
            score = report.overall_score,
            risk = %report.risk_level,
            details = report.details.len(),
            "analysis finished"
        );
        Ok(report)
    }

    /// Same as `analyze`, drawing from OS entropy.
    pub async fn analyze_url(&self, url: &str, locale: Locale) -> Result<SecurityReport, CheckError> {
        let mut rng = RngSource::from_entropy();
        self.analyze(url, locale, &mut rng).await
    }
}
