use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// Unvalidated leave input as submitted by the form. Every field may be
/// missing or blank; that is a validation failure, never a parse error.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDraft {
    #[schema(example = "Flu")]
    pub reason: Option<String>,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub start_date: Option<String>,
    #[schema(example = "2024-03-03", format = "date", value_type = String)]
    pub end_date: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValidationFault {
    MissingReason,
    MissingStartDate,
    MissingEndDate,
    InvalidDateRange,
}

impl ValidationFault {
    /// Field messages shown verbatim next to the form inputs.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationFault::MissingReason => "Reason is required",
            ValidationFault::MissingStartDate => "Start date is required",
            ValidationFault::MissingEndDate => "End date is required",
            ValidationFault::InvalidDateRange => "End date must be after start date",
        }
    }
}

/// Field name → fault mapping; serializes as `{"reason": "Reason is required"}`
/// so the client can attach each message to its input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, ValidationFault>,
}

impl ValidationErrors {
    fn insert(&mut self, field: &'static str, fault: ValidationFault) {
        self.fields.insert(field, fault);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<ValidationFault> {
        self.fields.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, fault) in &self.fields {
            map.serialize_entry(field, fault.message())?;
        }
        map.end()
    }
}

/// A draft that passed every check; the only way to get one is `validate`.
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Check a draft for completeness and date ordering. All checks are
/// independent: every failing field is reported, not just the first.
pub fn validate(draft: &LeaveDraft) -> Result<ValidatedDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let reason = draft.reason.as_deref().unwrap_or("").trim();
    if reason.is_empty() {
        errors.insert("reason", ValidationFault::MissingReason);
    }

    let start_date = parse_date(draft.start_date.as_deref());
    if start_date.is_none() {
        errors.insert("startDate", ValidationFault::MissingStartDate);
    }

    let end_date = parse_date(draft.end_date.as_deref());
    if end_date.is_none() {
        errors.insert("endDate", ValidationFault::MissingEndDate);
    }

    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => {
            errors.insert("endDate", ValidationFault::InvalidDateRange);
        }
        (Some(start), Some(end)) if errors.is_empty() => {
            return Ok(ValidatedDraft {
                reason: reason.to_string(),
                start_date: start,
                end_date: end,
            });
        }
        _ => {}
    }

    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(reason: &str, start: &str, end: &str) -> LeaveDraft {
        LeaveDraft {
            reason: Some(reason.to_string()),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    #[test]
    fn accepts_complete_draft() {
        let validated = validate(&draft("Flu", "2024-03-01", "2024-03-03")).unwrap();
        assert_eq!(validated.reason, "Flu");
        assert_eq!(validated.start_date.to_string(), "2024-03-01");
        assert_eq!(validated.end_date.to_string(), "2024-03-03");
    }

    #[test]
    fn reports_all_missing_fields_at_once() {
        let errors = validate(&draft("", "", "")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("reason"), Some(ValidationFault::MissingReason));
        assert_eq!(errors.get("startDate"), Some(ValidationFault::MissingStartDate));
        assert_eq!(errors.get("endDate"), Some(ValidationFault::MissingEndDate));
    }

    #[test]
    fn absent_fields_fail_like_blank_ones() {
        let errors = validate(&LeaveDraft::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn whitespace_reason_is_missing() {
        let errors = validate(&draft("   ", "2024-03-01", "2024-03-03")).unwrap_err();
        assert_eq!(errors.get("reason"), Some(ValidationFault::MissingReason));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn reason_check_is_independent_of_date_checks() {
        // bad reason must not mask the date-range check
        let errors = validate(&draft(" ", "2024-03-05", "2024-03-01")).unwrap_err();
        assert_eq!(errors.get("reason"), Some(ValidationFault::MissingReason));
        assert_eq!(errors.get("endDate"), Some(ValidationFault::InvalidDateRange));
    }

    #[test]
    fn unparseable_date_counts_as_missing() {
        let errors = validate(&draft("Flu", "03/01/2024", "2024-03-03")).unwrap_err();
        assert_eq!(errors.get("startDate"), Some(ValidationFault::MissingStartDate));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let errors = validate(&draft("Flu", "2024-03-03", "2024-03-01")).unwrap_err();
        assert_eq!(errors.get("endDate"), Some(ValidationFault::InvalidDateRange));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn single_day_leave_is_allowed() {
        assert!(validate(&draft("Flu", "2024-03-01", "2024-03-01")).is_ok());
    }

    #[test]
    fn errors_serialize_as_field_message_map() {
        let errors = validate(&draft("", "2024-03-01", "2024-03-03")).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "reason": "Reason is required" }));
    }
}
