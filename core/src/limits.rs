//! Per-field size limits, enforced the same way on write and on read.

use serde::{Deserialize, Serialize};

use crate::types::{Field, Result, WreckError};

/// Maximum byte length per segment. `0` means unlimited.
///
/// The vector limit applies to the encoded bytes, not the element count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub max_unique_key: usize,
    pub max_sort_key: usize,
    pub max_vector: usize,
}

impl FieldLimits {
    /// No limits.
    pub const fn unlimited() -> Self {
        Self { max_unique_key: 0, max_sort_key: 0, max_vector: 0 }
    }

    pub fn with_max_unique_key(mut self, v: usize) -> Self {
        self.max_unique_key = v;
        self
    }

    pub fn with_max_sort_key(mut self, v: usize) -> Self {
        self.max_sort_key = v;
        self
    }

    pub fn with_max_vector(mut self, v: usize) -> Self {
        self.max_vector = v;
        self
    }

    pub fn max(&self, field: Field) -> usize {
        match field {
            Field::UniqueKey => self.max_unique_key,
            Field::SortKey => self.max_sort_key,
            Field::Vector => self.max_vector,
        }
    }

    /// Check one segment against its limit.
    pub fn check_field(&self, field: Field, len: usize) -> Result<()> {
        let max = self.max(field);
        if max > 0 && len > max {
            return Err(WreckError::LengthExceeded { field, len, max });
        }
        Ok(())
    }

    /// Check all three segments, in `uniqueKey`, `sortKey`, `vector` order.
    pub fn check(&self, unique_key: usize, sort_key: usize, vector: usize) -> Result<()> {
        self.check_field(Field::UniqueKey, unique_key)?;
        self.check_field(Field::SortKey, sort_key)?;
        self.check_field(Field::Vector, vector)
    }
}
