//! Tuition records posted by guardians

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::code::TuitionCode;
use crate::errors::{SharedError, SharedResult};

/// Lifecycle of a posted tuition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TuitionStatus {
    #[default]
    Open,
    Assigned,
    Closed,
}

/// Request payload for posting a tuition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTuition {
    pub guardian_name: String,
    pub guardian_phone: String,
    pub student_class: String,
    pub subjects: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub salary: Option<u32>,
    #[serde(default)]
    pub days_per_week: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Code chosen by an administrator instead of the allocator
    #[serde(default)]
    pub requested_code: Option<String>,
}

impl NewTuition {
    /// Check required fields before a code is allocated
    pub fn validate(&self) -> SharedResult<()> {
        let required = [
            ("guardian_name", &self.guardian_name),
            ("guardian_phone", &self.guardian_phone),
            ("student_class", &self.student_class),
            ("location", &self.location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SharedError::invalid_tuition(field, "must not be empty"));
            }
        }

        if self.subjects.iter().all(|s| s.trim().is_empty()) {
            return Err(SharedError::invalid_tuition(
                "subjects",
                "at least one subject is required",
            ));
        }

        if let Some(days) = self.days_per_week {
            if !(1..=7).contains(&days) {
                return Err(SharedError::invalid_tuition(
                    "days_per_week",
                    format!("{days} is outside 1..=7"),
                ));
            }
        }

        Ok(())
    }
}

/// A stored tuition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tuition {
    pub id: Uuid,
    pub code: TuitionCode,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub student_class: String,
    pub subjects: Vec<String>,
    pub location: String,
    pub salary: Option<u32>,
    pub days_per_week: Option<u8>,
    pub notes: Option<String>,
    pub status: TuitionStatus,
    pub created_at: DateTime<Utc>,
}

impl Tuition {
    /// Build a record from a validated request and its allocated code
    pub fn new(code: TuitionCode, request: NewTuition) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            guardian_name: request.guardian_name.trim().to_string(),
            guardian_phone: request.guardian_phone.trim().to_string(),
            student_class: request.student_class.trim().to_string(),
            subjects: request
                .subjects
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            location: request.location.trim().to_string(),
            salary: request.salary,
            days_per_week: request.days_per_week,
            notes: request.notes,
            status: TuitionStatus::Open,
            created_at: Utc::now(),
        }
    }

    /// Same record under a different code, used when an insert must be retried
    pub fn with_code(mut self, code: TuitionCode) -> Self {
        self.code = code;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> NewTuition {
        NewTuition {
            guardian_name: "Rahima Khatun".to_string(),
            guardian_phone: "01700000000".to_string(),
            student_class: "Class 8".to_string(),
            subjects: vec!["Math".to_string(), " ".to_string(), " Physics ".to_string()],
            location: "Dhanmondi".to_string(),
            salary: Some(6000),
            days_per_week: Some(4),
            notes: None,
            requested_code: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_missing_guardian_name() {
        let mut request = sample_request();
        request.guardian_name = "  ".to_string();

        let err = request.validate().unwrap_err();
        assert!(matches!(
            err,
            SharedError::InvalidTuition { ref field, .. } if field == "guardian_name"
        ));
    }

    #[test]
    fn test_subjects_required() {
        let mut request = sample_request();
        request.subjects = vec![" ".to_string()];
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_days_per_week_bounds() {
        let mut request = sample_request();
        request.days_per_week = Some(0);
        assert!(request.validate().is_err());

        request.days_per_week = Some(8);
        assert!(request.validate().is_err());

        request.days_per_week = Some(7);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_new_tuition_trims_and_drops_blank_subjects() {
        let tuition = Tuition::new(TuitionCode::from_sequence(110), sample_request());

        assert_eq!(tuition.code.as_str(), "ST110");
        assert_eq!(tuition.subjects, vec!["Math".to_string(), "Physics".to_string()]);
        assert_eq!(tuition.status, TuitionStatus::Open);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TuitionStatus::Assigned).unwrap();
        assert_eq!(json, "\"assigned\"");
    }
}
