//! School statistics: academic majors, enrolment summaries and the
//! oldest-first decrement planner.
//!
//! A major's student count may be spread over several `school_info` rows.
//! Summaries add them up; decrements drain them in ascending id order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Major
// ---------------------------------------------------------------------------

/// Academic track used to bucket school-statistics records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Major {
    Science,
    Social,
    Language,
    Religion,
    Vocational,
}

impl Major {
    /// Every major, in declaration order.
    pub const ALL: [Major; 5] = [
        Major::Science,
        Major::Social,
        Major::Language,
        Major::Religion,
        Major::Vocational,
    ];

    /// Database / wire representation (`"SCIENCE"`, `"SOCIAL"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Science => "SCIENCE",
            Self::Social => "SOCIAL",
            Self::Language => "LANGUAGE",
            Self::Religion => "RELIGION",
            Self::Vocational => "VOCATIONAL",
        }
    }

    /// Parse from the wire representation. Matching is exact.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid major '{name}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Major {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Count validation
// ---------------------------------------------------------------------------

/// Validate a stored student count (must be `>= 0`).
pub fn validate_total_students(total_students: i64) -> Result<i32, CoreError> {
    if total_students < 0 {
        return Err(CoreError::Validation(format!(
            "totalStudents must be >= 0, got {total_students}"
        )));
    }
    i32::try_from(total_students).map_err(|_| {
        CoreError::Validation(format!("totalStudents is too large: {total_students}"))
    })
}

/// Validate a decrement amount (must be `>= 1`).
pub fn validate_decrease_amount(amount: i64) -> Result<i64, CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "amount must be >= 1, got {amount}"
        )));
    }
    Ok(amount)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregated enrolment figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_students: i64,
    pub students_by_major: BTreeMap<String, i64>,
}

/// Sum student counts globally and per major.
///
/// Accepts `(major, total_students)` pairs. An empty input yields zero totals
/// and an empty per-major map.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    records
        .into_iter()
        .fold(Summary::default(), |mut acc, (major, count)| {
            let count = i64::from(count);
            acc.total_students += count;
            *acc.students_by_major.entry(major.to_string()).or_insert(0) += count;
            acc
        })
}

// ---------------------------------------------------------------------------
// Decrement planning
// ---------------------------------------------------------------------------

/// The current count held by one `school_info` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorCount {
    pub id: DbId,
    pub total_students: i32,
}

/// One row touched by a decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecreaseStep {
    pub id: DbId,
    pub before: i32,
    pub after: i32,
    pub subtracted: i32,
}

/// Plan the subtraction of `amount` students from a major's rows.
///
/// `records` must be ordered by ascending id. Each row gives up
/// `min(row.total_students, remaining)` until nothing remains, so older rows
/// are exhausted first and no row ever drops below zero.
///
/// # Errors
///
/// - [`CoreError::Validation`] if `amount <= 0`.
/// - [`CoreError::NoMatches`] if `records` is empty.
/// - [`CoreError::InsufficientCapacity`] if the rows hold fewer than
///   `amount` students in total. The caller must not apply a partial plan.
pub fn plan_decrease(
    major: Major,
    records: &[MajorCount],
    amount: i64,
) -> Result<Vec<DecreaseStep>, CoreError> {
    let amount = validate_decrease_amount(amount)?;

    if records.is_empty() {
        return Err(CoreError::NoMatches {
            entity: "SchoolInfo",
            filter: format!("major {major}"),
        });
    }

    let mut remaining = amount;
    let mut steps = Vec::new();

    for record in records {
        if remaining == 0 {
            break;
        }
        let available = i64::from(record.total_students.max(0));
        let take = available.min(remaining);
        if take == 0 {
            continue;
        }
        remaining -= take;

        // `take <= record.total_students`, so the cast is lossless.
        let subtracted = take as i32;
        steps.push(DecreaseStep {
            id: record.id,
            before: record.total_students,
            after: record.total_students - subtracted,
            subtracted,
        });
    }

    if remaining > 0 {
        return Err(CoreError::InsufficientCapacity {
            major: major.as_str().to_string(),
            remaining,
        });
    }

    Ok(steps)
}
