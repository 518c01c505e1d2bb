use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::errors::ServiceError;

/// A quantity broken down by the three pump variants. Every ledger column
/// group (received, forwarded, manufactured) is one of these; the breakdown
/// invariant hp_3 + hp_5 + hp_7_5 == total holds for every persisted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuantitySet {
    pub total: i32,
    pub hp_3: i32,
    pub hp_5: i32,
    pub hp_7_5: i32,
}

impl QuantitySet {
    pub const ZERO: QuantitySet = QuantitySet {
        total: 0,
        hp_3: 0,
        hp_5: 0,
        hp_7_5: 0,
    };

    pub fn new(total: i32, hp_3: i32, hp_5: i32, hp_7_5: i32) -> Self {
        Self {
            total,
            hp_3,
            hp_5,
            hp_7_5,
        }
    }

    /// Named buckets in a fixed order, for per-bucket validation messages.
    pub fn buckets(&self) -> [(&'static str, i32); 4] {
        [
            ("total", self.total),
            ("hp_3", self.hp_3),
            ("hp_5", self.hp_5),
            ("hp_7_5", self.hp_7_5),
        ]
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Checks the breakdown invariant: no bucket negative, HP buckets sum to
    /// the total. Rejections name the offending field and both numbers.
    pub fn validate_breakdown(&self) -> Result<(), ServiceError> {
        for (name, value) in self.buckets() {
            if value < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "{} quantity ({}) must not be negative",
                    name, value
                )));
            }
        }

        let sum = self.hp_3 + self.hp_5 + self.hp_7_5;
        if sum != self.total {
            return Err(ServiceError::ValidationError(format!(
                "sum of HP quantities ({}) must equal total quantity assigned ({})",
                sum, self.total
            )));
        }

        Ok(())
    }

    /// Breakdown invariant plus the movement rule: an operation that moves
    /// units must move at least one.
    pub fn validate_movement(&self) -> Result<(), ServiceError> {
        self.validate_breakdown()?;
        if self.total == 0 {
            return Err(ServiceError::ValidationError(
                "total quantity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-bucket `self >= other`, conjunctive across all four buckets.
    pub fn covers(&self, other: &QuantitySet) -> bool {
        self.total >= other.total
            && self.hp_3 >= other.hp_3
            && self.hp_5 >= other.hp_5
            && self.hp_7_5 >= other.hp_7_5
    }

    /// First bucket where `self` exceeds `cap`, with both amounts.
    pub fn first_excess(&self, cap: &QuantitySet) -> Option<BucketExcess> {
        for ((name, value), (_, limit)) in self.buckets().iter().zip(cap.buckets().iter()) {
            if value > limit {
                return Some(BucketExcess {
                    bucket: name,
                    attempted: *value,
                    available: *limit,
                });
            }
        }
        None
    }
}

impl Add for QuantitySet {
    type Output = QuantitySet;

    fn add(self, rhs: QuantitySet) -> QuantitySet {
        QuantitySet {
            total: self.total + rhs.total,
            hp_3: self.hp_3 + rhs.hp_3,
            hp_5: self.hp_5 + rhs.hp_5,
            hp_7_5: self.hp_7_5 + rhs.hp_7_5,
        }
    }
}

impl Sub for QuantitySet {
    type Output = QuantitySet;

    fn sub(self, rhs: QuantitySet) -> QuantitySet {
        QuantitySet {
            total: self.total - rhs.total,
            hp_3: self.hp_3 - rhs.hp_3,
            hp_5: self.hp_5 - rhs.hp_5,
            hp_7_5: self.hp_7_5 - rhs.hp_7_5,
        }
    }
}

/// One bucket overflowing its cap, for capacity error messages.
#[derive(Debug, Clone, Copy)]
pub struct BucketExcess {
    pub bucket: &'static str,
    pub attempted: i32,
    pub available: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_accepts_consistent_sets() {
        assert!(QuantitySet::new(18, 6, 6, 6).validate_breakdown().is_ok());
        assert!(QuantitySet::ZERO.validate_breakdown().is_ok());
        assert!(QuantitySet::new(10, 10, 0, 0).validate_breakdown().is_ok());
    }

    #[test]
    fn breakdown_rejects_sum_mismatch_naming_both_numbers() {
        let err = QuantitySet::new(10, 5, 3, 3).validate_breakdown().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: sum of HP quantities (11) must equal total quantity assigned (10)"
        );
    }

    #[test]
    fn breakdown_rejects_negative_bucket_naming_field() {
        let err = QuantitySet::new(4, -2, 3, 3).validate_breakdown().unwrap_err();
        assert!(err.to_string().contains("hp_3 quantity (-2)"));
    }

    #[test]
    fn movement_rejects_zero_total() {
        let err = QuantitySet::ZERO.validate_movement().unwrap_err();
        assert!(err
            .to_string()
            .contains("total quantity must be greater than zero"));
    }

    #[test]
    fn add_and_sub_are_per_bucket() {
        let a = QuantitySet::new(10, 4, 3, 3);
        let b = QuantitySet::new(8, 2, 3, 3);
        assert_eq!(a + b, QuantitySet::new(18, 6, 6, 6));
        assert_eq!(a - b, QuantitySet::new(2, 2, 0, 0));
    }

    #[test]
    fn covers_is_conjunctive_across_buckets() {
        let pool = QuantitySet::new(10, 4, 3, 3);
        assert!(pool.covers(&QuantitySet::new(10, 4, 3, 3)));
        assert!(pool.covers(&QuantitySet::ZERO));
        // Total matches but one bucket is short.
        assert!(!pool.covers(&QuantitySet::new(10, 5, 3, 2)));
    }

    #[test]
    fn first_excess_reports_the_offending_bucket() {
        let cap = QuantitySet::new(10, 4, 3, 3);
        let excess = QuantitySet::new(10, 5, 3, 2).first_excess(&cap).unwrap();
        assert_eq!(excess.bucket, "hp_3");
        assert_eq!(excess.attempted, 5);
        assert_eq!(excess.available, 4);

        assert!(QuantitySet::new(9, 4, 3, 2).first_excess(&cap).is_none());
    }
}
