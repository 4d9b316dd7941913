//! The Combat Results Table.
//!
//! The table maps a combat-skill difference bucket and a random digit to
//! an endurance-loss pair for each side. Exact numeric contents are game
//! content, so the table arrives as external configuration and is
//! validated here at load time; once constructed it is total over every
//! (ratio, digit) pair via clamping.

use serde::{Deserialize, Serialize};

use crate::error::{CombatError, CombatResult};

/// Endurance losses for one (bucket, digit) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossPair {
    /// Endurance the character loses this round.
    pub character: u32,
    /// Endurance the enemy loses this round.
    pub enemy: u32,
}

/// One contiguous range of combat-ratio values and its ten loss pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioBucket {
    /// Lowest combat ratio this bucket covers (inclusive).
    pub min_ratio: i32,
    /// Highest combat ratio this bucket covers (inclusive).
    pub max_ratio: i32,
    /// Loss pairs indexed by random digit 0–9; must hold exactly ten.
    pub losses: Vec<LossPair>,
}

/// A validated Combat Results Table.
///
/// Termination precondition: the resolver imposes no round cap of its
/// own, so the table must yield a strictly positive combined loss for
/// every reachable (bucket, digit) pair — or callers must set
/// `ResolveOptions::max_rounds` and accept a stall error instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsTable {
    buckets: Vec<RatioBucket>,
}

impl ResultsTable {
    /// Validate raw bucket configuration into a usable table.
    ///
    /// Fails with [`CombatError::InvalidTable`] listing every violation:
    /// empty table, a bucket with `min > max` or without exactly ten loss
    /// pairs, or buckets that are unordered, overlapping, or gapped.
    pub fn new(buckets: Vec<RatioBucket>) -> CombatResult<Self> {
        let mut violations = Vec::new();

        if buckets.is_empty() {
            violations.push("table has no buckets".to_string());
        }

        for (i, bucket) in buckets.iter().enumerate() {
            if bucket.min_ratio > bucket.max_ratio {
                violations.push(format!(
                    "bucket {i} has min_ratio {} > max_ratio {}",
                    bucket.min_ratio, bucket.max_ratio
                ));
            }
            if bucket.losses.len() != 10 {
                violations.push(format!(
                    "bucket {i} has {} loss pairs, expected 10 (digits 0-9)",
                    bucket.losses.len()
                ));
            }
        }

        for pair in buckets.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.min_ratio != a.max_ratio + 1 {
                violations.push(format!(
                    "bucket covering {}..={} is not contiguous with bucket covering {}..={}",
                    a.min_ratio, a.max_ratio, b.min_ratio, b.max_ratio
                ));
            }
        }

        if violations.is_empty() {
            Ok(Self { buckets })
        } else {
            Err(CombatError::InvalidTable(violations))
        }
    }

    /// Parse and validate a table from JSON bucket configuration.
    pub fn from_json(json: &str) -> CombatResult<Self> {
        let buckets: Vec<RatioBucket> = serde_json::from_str(json)?;
        Self::new(buckets)
    }

    /// Look up the loss pair for a combat ratio and digit.
    ///
    /// Ratios outside the covered range clamp to the nearest bucket;
    /// digits above 9 clamp to 9. Total for any validated table.
    pub fn lookup(&self, ratio: i32, digit: u8) -> LossPair {
        let clamped = ratio.clamp(
            self.buckets[0].min_ratio,
            self.buckets[self.buckets.len() - 1].max_ratio,
        );
        let bucket = self
            .buckets
            .iter()
            .find(|b| clamped >= b.min_ratio && clamped <= b.max_ratio)
            .unwrap_or(&self.buckets[0]);
        bucket.losses[usize::from(digit.min(9))]
    }

    /// The ratio range the table covers before clamping.
    pub fn covered_range(&self) -> (i32, i32) {
        (
            self.buckets[0].min_ratio,
            self.buckets[self.buckets.len() - 1].max_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small three-bucket table: losses encode their origin so lookups
    /// are easy to assert on (character loss = bucket index, enemy loss =
    /// digit).
    fn test_table() -> ResultsTable {
        let bucket = |idx: u32, min: i32, max: i32| RatioBucket {
            min_ratio: min,
            max_ratio: max,
            losses: (0..10)
                .map(|d| LossPair {
                    character: idx,
                    enemy: d,
                })
                .collect(),
        };
        ResultsTable::new(vec![
            bucket(0, -5, -1),
            bucket(1, 0, 0),
            bucket(2, 1, 5),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_by_bucket_and_digit() {
        let table = test_table();
        assert_eq!(table.lookup(-3, 4), LossPair { character: 0, enemy: 4 });
        assert_eq!(table.lookup(0, 9), LossPair { character: 1, enemy: 9 });
        assert_eq!(table.lookup(3, 0), LossPair { character: 2, enemy: 0 });
    }

    #[test]
    fn lookup_clamps_ratio() {
        let table = test_table();
        assert_eq!(table.lookup(-40, 2).character, 0);
        assert_eq!(table.lookup(40, 2).character, 2);
    }

    #[test]
    fn covered_range() {
        assert_eq!(test_table().covered_range(), (-5, 5));
    }

    #[test]
    fn empty_table_rejected() {
        let err = ResultsTable::new(vec![]).unwrap_err();
        match err {
            CombatError::InvalidTable(violations) => {
                assert!(violations[0].contains("no buckets"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_digit_count_rejected() {
        let err = ResultsTable::new(vec![RatioBucket {
            min_ratio: 0,
            max_ratio: 0,
            losses: vec![LossPair { character: 1, enemy: 1 }; 9],
        }])
        .unwrap_err();
        match err {
            CombatError::InvalidTable(violations) => {
                assert!(violations[0].contains("9 loss pairs"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn gap_between_buckets_rejected() {
        let losses = || vec![LossPair { character: 0, enemy: 1 }; 10];
        let err = ResultsTable::new(vec![
            RatioBucket {
                min_ratio: -5,
                max_ratio: -1,
                losses: losses(),
            },
            RatioBucket {
                min_ratio: 1,
                max_ratio: 5,
                losses: losses(),
            },
        ])
        .unwrap_err();
        match err {
            CombatError::InvalidTable(violations) => {
                assert!(violations[0].contains("not contiguous"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn overlapping_buckets_rejected() {
        let losses = || vec![LossPair { character: 0, enemy: 1 }; 10];
        let result = ResultsTable::new(vec![
            RatioBucket {
                min_ratio: -5,
                max_ratio: 0,
                losses: losses(),
            },
            RatioBucket {
                min_ratio: 0,
                max_ratio: 5,
                losses: losses(),
            },
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn inverted_bucket_rejected() {
        let result = ResultsTable::new(vec![RatioBucket {
            min_ratio: 5,
            max_ratio: -5,
            losses: vec![LossPair { character: 0, enemy: 1 }; 10],
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn all_violations_collected() {
        let err = ResultsTable::new(vec![
            RatioBucket {
                min_ratio: 3,
                max_ratio: 0,
                losses: vec![LossPair { character: 0, enemy: 1 }; 4],
            },
            RatioBucket {
                min_ratio: 9,
                max_ratio: 9,
                losses: vec![LossPair { character: 0, enemy: 1 }; 10],
            },
        ])
        .unwrap_err();
        match err {
            CombatError::InvalidTable(violations) => {
                // Inverted range, wrong pair count, and the gap.
                assert_eq!(violations.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_json() {
        let json = r#"[
            {
                "min_ratio": 0,
                "max_ratio": 0,
                "losses": [
                    {"character": 0, "enemy": 1}, {"character": 0, "enemy": 1},
                    {"character": 0, "enemy": 1}, {"character": 0, "enemy": 1},
                    {"character": 0, "enemy": 1}, {"character": 0, "enemy": 1},
                    {"character": 0, "enemy": 1}, {"character": 0, "enemy": 1},
                    {"character": 0, "enemy": 1}, {"character": 0, "enemy": 1}
                ]
            }
        ]"#;
        let table = ResultsTable::from_json(json).unwrap();
        assert_eq!(table.lookup(0, 5), LossPair { character: 0, enemy: 1 });
    }

    #[test]
    fn from_json_negative_loss_rejected() {
        // Losses are unsigned; negative content fails at parse time.
        let json = r#"[
            {"min_ratio": 0, "max_ratio": 0,
             "losses": [{"character": -1, "enemy": 1}]}
        ]"#;
        assert!(matches!(
            ResultsTable::from_json(json),
            Err(CombatError::TableParse(_))
        ));
    }
}
