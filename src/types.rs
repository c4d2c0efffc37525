//! # Core Types for the Voting Service
//!
//! This module defines the data carried between the counter store, the vote
//! service and the HTTP layer.
//!
//! ## Type Categories
//!
//! - [`VoteChoice`]: the closed two-value ballot domain
//! - [`VoteTally`]: one persisted counter row per choice
//! - [`VoteResult`]: the aggregate snapshot served to clients
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::Utc;
//! use jjvote::types::{VoteChoice, VoteResult, VoteTally};
//!
//! let now = Utc::now();
//! let tallies = vec![
//!     VoteTally { choice: VoteChoice::Jjajang, count: 3, last_modified: now },
//!     VoteTally { choice: VoteChoice::Jjamppong, count: 2, last_modified: now },
//! ];
//!
//! let result = VoteResult::from_tallies(&tallies, now);
//! assert_eq!(result.total, 5);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, validation_error};

/// Unix timestamp in milliseconds
///
/// Cooldown markers travel in cookies as this value rendered in base 10.
pub type Timestamp = i64;

/// One of the two ballot options
///
/// The set is closed: parsing is exact and case-sensitive, and there is no
/// way to register further options at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Jjajang,
    Jjamppong,
}

impl VoteChoice {
    /// Every choice, in the order the store returns rows (`ORDER BY choice`)
    pub const ALL: [VoteChoice; 2] = [VoteChoice::Jjajang, VoteChoice::Jjamppong];

    /// The literal used on the wire and as the store key
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Jjajang => "jjajang",
            VoteChoice::Jjamppong => "jjamppong",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoteChoice::ALL
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| {
                validation_error!("invalid choice '{}' (expected jjajang or jjamppong)", s)
            })
    }
}

/// Persisted counter row for a single choice
///
/// Field names on the wire follow the store columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub choice: VoteChoice,
    pub count: i64,
    #[serde(rename = "updated_at")]
    pub last_modified: DateTime<Utc>,
}

/// Aggregate snapshot of both tallies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub jjajang: i64,
    pub jjamppong: i64,
    pub total: i64,
    pub updated_at: DateTime<Utc>,
}

impl VoteResult {
    /// Aggregate store rows into a snapshot
    ///
    /// A choice without a row counts as zero. `updated_at` is the latest
    /// `last_modified` among the rows, or `fallback` when there are none. An
    /// empty table means the seed rows were never created, so that case is
    /// logged as a misconfiguration rather than passed over.
    pub fn from_tallies(tallies: &[VoteTally], fallback: DateTime<Utc>) -> Self {
        let count_of = |choice: VoteChoice| {
            tallies
                .iter()
                .find(|tally| tally.choice == choice)
                .map_or(0, |tally| tally.count)
        };

        let jjajang = count_of(VoteChoice::Jjajang);
        let jjamppong = count_of(VoteChoice::Jjamppong);

        let updated_at = match tallies.iter().map(|tally| tally.last_modified).max() {
            Some(latest) => latest,
            None => {
                tracing::warn!("votes table has no tally rows; seed rows are missing");
                fallback
            }
        };

        Self {
            jjajang,
            jjamppong,
            total: jjajang + jjamppong,
            updated_at,
        }
    }

    /// All-zero snapshot used when the store cannot be read
    pub fn zeroed(now: DateTime<Utc>) -> Self {
        Self {
            jjajang: 0,
            jjamppong: 0,
            total: 0,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_choice_literals() {
        assert_eq!(VoteChoice::Jjajang.as_str(), "jjajang");
        assert_eq!(VoteChoice::Jjamppong.to_string(), "jjamppong");
        assert_eq!(
            serde_json::to_string(&VoteChoice::Jjamppong).unwrap(),
            "\"jjamppong\""
        );
    }

    #[test]
    fn test_choice_parsing_is_exact() {
        assert_eq!("jjajang".parse::<VoteChoice>().unwrap(), VoteChoice::Jjajang);
        assert!("Jjajang".parse::<VoteChoice>().is_err());
        assert!(" jjajang".parse::<VoteChoice>().is_err());
        assert!("".parse::<VoteChoice>().is_err());

        let err = "kimchi".parse::<VoteChoice>().unwrap_err();
        assert!(err.to_string().contains("kimchi"));
    }

    #[test]
    fn test_result_from_tallies() {
        let older = Utc::now() - Duration::minutes(5);
        let newer = Utc::now();
        let tallies = vec![
            VoteTally {
                choice: VoteChoice::Jjajang,
                count: 7,
                last_modified: newer,
            },
            VoteTally {
                choice: VoteChoice::Jjamppong,
                count: 4,
                last_modified: older,
            },
        ];

        let result = VoteResult::from_tallies(&tallies, older - Duration::days(1));
        assert_eq!(result.jjajang, 7);
        assert_eq!(result.jjamppong, 4);
        assert_eq!(result.total, 11);
        assert_eq!(result.updated_at, newer);
    }

    #[test]
    fn test_result_missing_rows() {
        let now = Utc::now();
        let tallies = vec![VoteTally {
            choice: VoteChoice::Jjamppong,
            count: 2,
            last_modified: now,
        }];

        let result = VoteResult::from_tallies(&tallies, now - Duration::hours(1));
        assert_eq!(result.jjajang, 0);
        assert_eq!(result.total, 2);
        assert_eq!(result.updated_at, now);

        let empty = VoteResult::from_tallies(&[], now);
        assert_eq!(empty, VoteResult::zeroed(now));
    }

    #[test]
    fn test_result_wire_format() {
        let result = VoteResult::zeroed(Utc::now());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["total"], 0);

        let tally = VoteTally {
            choice: VoteChoice::Jjajang,
            count: 1,
            last_modified: Utc::now(),
        };
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["choice"], "jjajang");
        assert!(json.get("updated_at").is_some());
    }
}
