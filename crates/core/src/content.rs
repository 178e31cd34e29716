//! Content rules shared by the entity handlers: achievement categories,
//! alumni graduation years, admission windows and account passwords.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Earliest graduation year accepted on an alumni testimony.
pub const MIN_GRADUATION_YEAR: i32 = 1900;

/// Minimum password length for user accounts.
pub const MIN_PASSWORD_LENGTH: usize = 3;

// ---------------------------------------------------------------------------
// Achievement category
// ---------------------------------------------------------------------------

pub const CATEGORY_ACADEMIC: &str = "ACADEMIC";
pub const CATEGORY_SPORTS: &str = "SPORTS";
pub const CATEGORY_ARTS: &str = "ARTS";

/// Valid achievement categories.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_ACADEMIC, CATEGORY_SPORTS, CATEGORY_ARTS];

/// Validate an achievement category.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Category must be one of ACADEMIC, SPORTS, ARTS".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Testimony
// ---------------------------------------------------------------------------

/// Validate an alumni graduation year against `[1900, current_year]`.
pub fn validate_graduation_year(year: i64, current_year: i32) -> Result<i32, CoreError> {
    if year < i64::from(MIN_GRADUATION_YEAR) || year > i64::from(current_year) {
        return Err(CoreError::Validation(format!(
            "Graduation year must be between {MIN_GRADUATION_YEAR} and {current_year}"
        )));
    }
    Ok(year as i32)
}

// ---------------------------------------------------------------------------
// PPDB (admissions)
// ---------------------------------------------------------------------------

/// Validate that an admission window ends strictly after it starts.
pub fn validate_admission_window(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(
            "End date must be after start date".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Validate that a password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn categories() {
        assert!(validate_category("SPORTS").is_ok());
        assert_matches!(validate_category("MUSIC"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn graduation_year_bounds() {
        assert_eq!(validate_graduation_year(1900, 2026).unwrap(), 1900);
        assert_eq!(validate_graduation_year(2026, 2026).unwrap(), 2026);
        assert_matches!(validate_graduation_year(1899, 2026), Err(CoreError::Validation(_)));
        assert_matches!(validate_graduation_year(2027, 2026), Err(CoreError::Validation(_)));
    }

    #[test]
    fn admission_window_must_move_forward() {
        let start = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        assert!(validate_admission_window(start, end).is_ok());
        assert_matches!(validate_admission_window(end, start), Err(CoreError::Validation(_)));
        assert_matches!(validate_admission_window(start, start), Err(CoreError::Validation(_)));
    }

    #[test]
    fn password_minimum() {
        assert!(validate_password_strength("abc").is_ok());
        assert_matches!(
            validate_password_strength("ab"),
            Err(CoreError::Validation(m)) if m.contains("at least 3")
        );
    }
}
