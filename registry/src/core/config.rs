//! Allocator and registry configuration

use std::ops::{Range, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Numeric ranges scanned by the code allocator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// First number of the gap-fill pass
    pub gap_fill_start: u32,
    /// End (exclusive) of the gap-fill pass and start of the sequential pass
    pub gap_fill_end: u32,
    /// Last number (inclusive) of the sequential pass
    pub sequence_end: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            gap_fill_start: 110,
            gap_fill_end: 150,
            sequence_end: 2000,
        }
    }
}

impl AllocatorConfig {
    pub fn new(gap_fill_start: u32, gap_fill_end: u32, sequence_end: u32) -> RegistryResult<Self> {
        let config = Self {
            gap_fill_start,
            gap_fill_end,
            sequence_end,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RegistryResult<()> {
        if self.gap_fill_start > self.gap_fill_end {
            return Err(RegistryError::config(
                "gap_fill_start",
                format!("{} is past gap_fill_end {}", self.gap_fill_start, self.gap_fill_end),
            ));
        }
        if self.gap_fill_end > self.sequence_end {
            return Err(RegistryError::config(
                "sequence_end",
                format!("{} is before gap_fill_end {}", self.sequence_end, self.gap_fill_end),
            ));
        }
        Ok(())
    }

    pub fn gap_fill_range(&self) -> Range<u32> {
        self.gap_fill_start..self.gap_fill_end
    }

    pub fn sequential_range(&self) -> RangeInclusive<u32> {
        self.gap_fill_end..=self.sequence_end
    }
}

/// Registry service settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub allocator: AllocatorConfig,
    /// Allocations tried before giving up on duplicate-key rejections
    pub max_insert_attempts: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allocator: AllocatorConfig::default(),
            max_insert_attempts: 3,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> RegistryResult<()> {
        self.allocator.validate()?;
        if self.max_insert_attempts == 0 {
            return Err(RegistryError::config("max_insert_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let config = AllocatorConfig::default();
        assert_eq!(config.gap_fill_range(), 110..150);
        assert_eq!(config.sequential_range(), 150..=2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        assert!(AllocatorConfig::new(200, 150, 2000).is_err());
        assert!(AllocatorConfig::new(110, 150, 120).is_err());
        assert!(AllocatorConfig::new(1, 1, 1).is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = RegistryConfig {
            max_insert_attempts: 0,
            ..RegistryConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RegistryError::ConfigurationError { ref field, .. })
                if field == "max_insert_attempts"
        ));
    }
}
