//! Test helpers for registry integration tests

use std::ops::RangeInclusive;

use shared::{NewTuition, Tuition, TuitionCode};

/// A valid tuition request
pub fn sample_request() -> NewTuition {
    NewTuition {
        guardian_name: "Nasrin Akter".to_string(),
        guardian_phone: "01822222222".to_string(),
        student_class: "HSC 1st year".to_string(),
        subjects: vec!["Chemistry".to_string()],
        location: "Mohammadpur".to_string(),
        salary: Some(8000),
        days_per_week: Some(3),
        notes: Some("Female tutor preferred".to_string()),
        requested_code: None,
    }
}

/// Stored tuitions for every sequential code in `numbers`
pub fn tuitions_for(numbers: RangeInclusive<u32>) -> Vec<Tuition> {
    numbers
        .map(|n| Tuition::new(TuitionCode::from_sequence(n), sample_request()))
        .collect()
}
