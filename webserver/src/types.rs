//! Request and response bodies for the HTTP API

use registry::{Allocation, AllocationSource};
use serde::{Deserialize, Serialize};
use shared::{Tuition, TuitionStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub input: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub code: String,
    pub available: bool,
}

/// Preview of the next code; `verified` is false for fallback codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextCodeResponse {
    pub code: String,
    pub source: AllocationSource,
    pub verified: bool,
}

impl From<Allocation> for NextCodeResponse {
    fn from(allocation: Allocation) -> Self {
        Self {
            verified: allocation.source.is_verified(),
            code: allocation.code.into_string(),
            source: allocation.source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuitionListResponse {
    pub count: usize,
    pub tuitions: Vec<Tuition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: TuitionStatus,
}
