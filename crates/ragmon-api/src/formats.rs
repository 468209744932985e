use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

pub const DATE_TIME: &str = "date-time";
pub const DATE: &str = "date";
pub const UUID: &str = "uuid";

pub type FormatChecker = fn(&str) -> bool;

/// Registry of named string formats used by payload validation.
#[derive(Clone)]
pub struct Formats {
    checkers: HashMap<String, FormatChecker>,
}

impl Formats {
    pub fn empty() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Registers `checker` under `name`, returning the checker it replaced.
    pub fn add(&mut self, name: impl Into<String>, checker: FormatChecker) -> Option<FormatChecker> {
        self.checkers.insert(name.into(), checker)
    }

    /// Unknown formats accept every value.
    pub fn validates(&self, name: &str, value: &str) -> bool {
        self.checkers
            .get(name)
            .is_none_or(|checker| checker(value))
    }
}

impl Default for Formats {
    fn default() -> Self {
        let mut formats = Self::empty();
        formats.add(DATE_TIME, is_date_time);
        formats.add(DATE, is_date);
        formats.add(UUID, is_uuid);
        formats
    }
}

impl std::fmt::Debug for Formats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Formats").field("names", &names).finish()
    }
}

fn is_date_time(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::{DATE, DATE_TIME, Formats, UUID};

    #[test]
    fn builtin_formats() {
        let formats = Formats::default();

        assert!(formats.validates(DATE_TIME, "2024-05-01T12:30:00Z"));
        assert!(formats.validates(DATE_TIME, "2024-05-01T12:30:00.250+02:00"));
        assert!(!formats.validates(DATE_TIME, "2024-05-01 12:30"));

        assert!(formats.validates(DATE, "2024-05-01"));
        assert!(!formats.validates(DATE, "05/01/2024"));

        assert!(formats.validates(UUID, "67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!formats.validates(UUID, "run-1"));
    }

    #[test]
    fn unknown_format_accepts_anything() {
        let formats = Formats::empty();
        assert!(formats.validates(DATE_TIME, "whenever"));
    }

    #[test]
    fn custom_format_overrides_builtin() {
        let mut formats = Formats::default();
        let previous = formats.add(UUID, |value| value.starts_with("run-"));
        assert!(previous.is_some());
        assert!(formats.validates(UUID, "run-1"));
    }
}
