//! Construction parameters for [`ChainedHashTable`](crate::ChainedHashTable)

use thiserror::Error;

/// Number of buckets allocated when no capacity is given
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Ratio of entries to buckets above which the table grows
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Rejected construction parameters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The table must own at least one bucket
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    /// The growth threshold must be a finite, strictly positive ratio
    #[error("max load factor must be finite and greater than 0, got {0}")]
    InvalidLoadFactor(f64),
}

/// Initial capacity and growth threshold of a table.
///
/// Both values are fixed once the table is built; capacity then only grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated up front
    pub initial_capacity: usize,
    /// Threshold on `len / capacity` that triggers a rehash
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Sets the number of buckets allocated up front
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor above which the table doubles
    #[must_use]
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Checks that the parameters describe a usable table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] for an empty bucket array and
    /// [`ConfigError::InvalidLoadFactor`] for a NaN, infinite, zero or negative factor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity, 16);
        assert!((config.max_load_factor - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = TableConfig::default().with_initial_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_bad_load_factors_rejected() {
        for factor in [0.0, -1.0, f64::INFINITY] {
            let config = TableConfig::default().with_max_load_factor(factor);
            assert_eq!(config.validate(), Err(ConfigError::InvalidLoadFactor(factor)));
        }

        let nan = TableConfig::default().with_max_load_factor(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidLoadFactor(f)) if f.is_nan()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::ZeroCapacity.to_string(), "initial capacity must be at least 1");
        assert_eq!(
            ConfigError::InvalidLoadFactor(-0.5).to_string(),
            "max load factor must be finite and greater than 0, got -0.5"
        );
    }

    #[test]
    fn test_load_factor_above_one_is_allowed() {
        let config = TableConfig::default().with_initial_capacity(3).with_max_load_factor(4.0);
        assert_eq!(config.validate(), Ok(()));
    }
}
