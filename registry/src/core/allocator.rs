//! Tuition code allocation
//!
//! Codes are reconstructed from the store on every call rather than kept in a
//! counter. The allocator snapshots the stored codes, walks the gap-fill range
//! and then the sequential range, and re-checks the first free-looking
//! candidate against the store before handing it out. Nothing is reserved:
//! two callers working from the same snapshot can receive the same code, and
//! the store's duplicate-code rejection on insert settles which one wins.
//!
//! Allocation never fails. An exhausted range or a store fault yields a
//! `ST<unix-millis>_<random>` code that is not checked for uniqueness.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{logging, service_debug, service_info, service_warn, ServiceId, TuitionCode};

use crate::core::config::AllocatorConfig;
use crate::error::StoreResult;
use crate::traits::TuitionStore;

/// Which step of the allocation produced a code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationSource {
    /// Backfilled a number below the sequential range
    GapFill,
    /// Next free number in the sequential range
    Sequential,
    /// Every number in range was taken
    Exhausted,
    /// The store faulted during the scan
    Degraded,
}

impl AllocationSource {
    /// Whether the code was checked against the store before being returned
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::GapFill | Self::Sequential)
    }
}

impl fmt::Display for AllocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GapFill => write!(f, "gap_fill"),
            Self::Sequential => write!(f, "sequential"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// A code handed out by the allocator and how it was found
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub code: TuitionCode,
    pub source: AllocationSource,
}

/// Produces tuition codes that do not collide with any stored code
pub struct CodeAllocator<S: TuitionStore> {
    store: Arc<S>,
    config: AllocatorConfig,
}

impl<S: TuitionStore> Clone for CodeAllocator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: TuitionStore> CodeAllocator<S> {
    pub fn new(store: Arc<S>, config: AllocatorConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocate a code for a new tuition.
    ///
    /// The code is not reserved; persist the tuition right away and allocate
    /// again if the store rejects it as a duplicate.
    pub async fn allocate_code(&self) -> TuitionCode {
        self.allocate().await.code
    }

    /// Allocate a code and report which step produced it
    pub async fn allocate(&self) -> Allocation {
        match self.scan().await {
            Ok(Some(allocation)) => {
                service_debug!(
                    ServiceId::current(),
                    code = %allocation.code,
                    source = %allocation.source,
                    "Allocated tuition code"
                );
                allocation
            }
            Ok(None) => {
                let code = TuitionCode::fallback_now();
                service_warn!(
                    ServiceId::current(),
                    code = %code,
                    range_end = self.config.sequence_end,
                    "Code range exhausted, using timestamp fallback"
                );
                Allocation {
                    code,
                    source: AllocationSource::Exhausted,
                }
            }
            Err(e) => {
                logging::log_degraded(ServiceId::current(), "Tuition code allocation", &e);
                Allocation {
                    code: TuitionCode::fallback_now(),
                    source: AllocationSource::Degraded,
                }
            }
        }
    }

    /// Check whether `code` is free with a single lookup.
    ///
    /// Returns `false` when the store cannot be reached.
    pub async fn is_code_available(&self, code: &TuitionCode) -> bool {
        match self.store.find_by_code(code).await {
            Ok(existing) => existing.is_none(),
            Err(e) => {
                logging::log_degraded(ServiceId::current(), "Code availability check", &e);
                false
            }
        }
    }

    async fn scan(&self) -> StoreResult<Option<Allocation>> {
        let existing: HashSet<TuitionCode> = self.store.list_codes().await?.into_iter().collect();

        for number in self.config.gap_fill_range() {
            if let Some(code) = self.claimable(number, &existing).await? {
                service_info!(ServiceId::current(), code = %code, "Backfilling tuition code gap");
                return Ok(Some(Allocation {
                    code,
                    source: AllocationSource::GapFill,
                }));
            }
        }

        for number in self.config.sequential_range() {
            if let Some(code) = self.claimable(number, &existing).await? {
                return Ok(Some(Allocation {
                    code,
                    source: AllocationSource::Sequential,
                }));
            }
        }

        Ok(None)
    }

    /// The candidate for `number` if it is absent from both the snapshot and
    /// the store.
    async fn claimable(
        &self,
        number: u32,
        existing: &HashSet<TuitionCode>,
    ) -> StoreResult<Option<TuitionCode>> {
        let candidate = TuitionCode::from_sequence(number);
        if existing.contains(&candidate) {
            return Ok(None);
        }

        if self.store.find_by_code(&candidate).await?.is_some() {
            service_debug!(
                ServiceId::current(),
                code = %candidate,
                "Candidate taken since snapshot, continuing scan"
            );
            return Ok(None);
        }

        Ok(Some(candidate))
    }
}
