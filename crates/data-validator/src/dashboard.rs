//! Car Dashboard Facade
//!
//! Ties raw input parsing, the validation pipeline, and the display unit
//! together. A record only reaches the display after it was parsed and
//! accepted by every validation stage.

use crate::error::{ConfigError, DashboardError};
use crate::validator::{ValidationConfig, ValidationPipeline};
use dashboard_protocol::Reading;

/// Downstream renderer driving gauges and indicators
pub trait DisplayUnit {
    /// Render an accepted reading (move hands, show digital values, etc.)
    fn render(&mut self, reading: &Reading);
}

impl<D: DisplayUnit + ?Sized> DisplayUnit for &mut D {
    fn render(&mut self, reading: &Reading) {
        (**self).render(reading)
    }
}

/// Validating front end of a dashboard display
pub struct CarDashboard<D> {
    pipeline: ValidationPipeline,
    display: D,
}

impl<D: DisplayUnit> CarDashboard<D> {
    /// Create a new dashboard with an empty history
    pub fn new(config: ValidationConfig, display: D) -> Self {
        Self {
            pipeline: ValidationPipeline::new(config),
            display,
        }
    }

    /// Create a new dashboard, rejecting unusable thresholds
    pub fn try_new(config: ValidationConfig, display: D) -> Result<Self, ConfigError> {
        Ok(Self {
            pipeline: ValidationPipeline::try_new(config)?,
            display,
        })
    }

    /// Parse, validate, and display one raw record
    pub fn process(&mut self, raw: Option<&str>) -> Result<Reading, DashboardError> {
        let reading = Reading::parse(raw)?;
        let accepted = self.pipeline.submit(reading)?;
        self.display.render(&accepted);
        Ok(accepted)
    }

    /// Snapshot of the accepted readings, oldest first
    pub fn history(&self) -> Vec<Reading> {
        self.pipeline.history().to_vec()
    }

    pub fn pipeline(&self) -> &ValidationPipeline {
        &self.pipeline
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Split into the pipeline and the display unit
    pub fn into_parts(self) -> (ValidationPipeline, D) {
        (self.pipeline, self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use dashboard_protocol::ParseError;

    #[derive(Default)]
    struct Recorder {
        rendered: Vec<Reading>,
    }

    impl DisplayUnit for Recorder {
        fn render(&mut self, reading: &Reading) {
            self.rendered.push(*reading);
        }
    }

    #[test]
    fn test_accepted_reading_is_rendered() {
        let mut dashboard = CarDashboard::new(ValidationConfig::automatic(), Recorder::default());
        let reading = dashboard
            .process(Some("100|3200|2.3|D|true|false|true"))
            .unwrap();
        assert_eq!(dashboard.display().rendered, vec![reading]);
        assert_eq!(dashboard.history(), vec![reading]);
    }

    #[test]
    fn test_rejected_reading_never_rendered() {
        let mut dashboard = CarDashboard::new(ValidationConfig::automatic(), Recorder::default());

        let err = dashboard.process(None).unwrap_err();
        assert_eq!(err, DashboardError::Parse(ParseError::InputMissing));
        assert_eq!(err.kind(), "input_missing");

        let err = dashboard
            .process(Some("10|0|0|N|true|false|false"))
            .unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Validation(ValidationError::EngineNotRunning { .. })
        ));

        assert!(dashboard.display().rendered.is_empty());
        assert!(dashboard.history().is_empty());
    }

    #[test]
    fn test_try_new_rejects_zero_history() {
        let config = ValidationConfig {
            history_len: 0,
            ..ValidationConfig::automatic()
        };
        assert!(CarDashboard::try_new(config, Recorder::default()).is_err());
    }

    #[test]
    fn test_borrowed_display() {
        let mut recorder = Recorder::default();
        {
            let mut dashboard = CarDashboard::new(ValidationConfig::automatic(), &mut recorder);
            dashboard.process(Some("0|0|0|P|false|false|false")).unwrap();
        }
        assert_eq!(recorder.rendered.len(), 1);
    }
}
