// Settings module
// Engine configuration read from config.toml

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::ui::CalendarView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between auto-reset passes
    pub reset_check_interval_secs: u64,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    pub default_view: CalendarView,
    /// Overrides the household snapshot location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reset_check_interval_secs: 60,
            first_day_of_week: 0, // Sunday
            default_view: CalendarView::Week,
            data_file: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err("First day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }
        if self.reset_check_interval_secs == 0 {
            return Err("Reset check interval must be at least one second".to_string());
        }
        Ok(())
    }

    pub fn week_start(&self) -> Weekday {
        match self.first_day_of_week {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    pub fn reset_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.reset_check_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.reset_check_interval_secs, 60);
        assert_eq!(settings.week_start(), Weekday::Sun);
        assert_eq!(settings.default_view, CalendarView::Week);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let settings = Settings {
            first_day_of_week: 7,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            reset_check_interval_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_week_start_mapping() {
        let settings = Settings {
            first_day_of_week: 1,
            ..Settings::default()
        };
        assert_eq!(settings.week_start(), Weekday::Mon);
    }
}
