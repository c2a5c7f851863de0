//! Configuration validation.

use buildport_protocols::SlotType;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_extract(config, &mut result);
        Self::validate_resolve(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.window_width == 0 || config.browser.window_height == 0 {
            result.add_error(ValidationError::new(
                "browser.window_width",
                "Window size must be greater than 0",
            ));
        }

        if config.browser.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_extract(config: &Config, result: &mut ValidationResult) {
        let extract = &config.extract;

        if extract.click_delay_ms > 5_000 {
            result.add_warning(ValidationWarning::new(
                "extract.click_delay_ms",
                "click_delay_ms is very high (>5000), imports will be slow",
            ));
        }

        if extract.poll_for_render && extract.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "extract.poll_interval_ms",
                "poll_interval_ms must be greater than 0 when poll_for_render is set",
            ));
        }

        for (path, text) in [
            ("extract.aspects_header", &extract.aspects_header),
            ("extract.gear_stats_header", &extract.gear_stats_header),
            ("extract.aspect_marker", &extract.aspect_marker),
        ] {
            if text.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Text cannot be empty"));
            }
        }

        for (path, selector) in [
            ("extract.selectors.panel_header", &extract.selectors.panel_header),
            ("extract.selectors.panel_container", &extract.selectors.panel_container),
        ] {
            if !selector.value().contains("{header}") {
                result.add_warning(ValidationWarning::new(
                    path,
                    "Selector has no {header} placeholder; both panels will resolve to the same element",
                ));
            }
        }

        if extract.slot_labels.is_empty() {
            result.add_error(ValidationError::new(
                "extract.slot_labels",
                "At least one slot label is required",
            ));
        }

        for slot in SlotType::ALL {
            if !extract.slot_labels.iter().any(|l| l.slot == slot) {
                result.add_warning(ValidationWarning::new(
                    "extract.slot_labels",
                    format!("No label maps to slot '{}'", slot),
                ));
            }
        }
    }

    fn validate_resolve(config: &Config, result: &mut ValidationResult) {
        if config.resolve.max_concurrent == 0 {
            result.add_error(ValidationError::new(
                "resolve.max_concurrent",
                "max_concurrent must be greater than 0",
            ));
        }

        if config.resolve.low_confidence_score > 100 {
            result.add_error(ValidationError::new(
                "resolve.low_confidence_score",
                "Scores range from 0 to 100",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
