// src/review_log.rs
// A record of one answer, for callers that keep a review history.

use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::deck::CardType;
use crate::scheduler::Rating;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    pub card_id: String,
    pub rating: Rating,
    /// Epoch seconds of the answer.
    pub reviewed_at: i64,
    /// Card type before the answer.
    pub card_type: CardType,
    /// Ease after the answer.
    pub ease_factor: u32,
    pub last_interval: u32,
    pub interval: u32,
}

impl fmt::Display for ReviewLog {
    /// Format: timestamp_iso,card_id,rating,card_type,ease,old_ivl,new_ivl
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.reviewed_at, 0) {
            Some(at) => write!(f, "{}", at.to_rfc3339())?,
            None => write!(f, "{}", self.reviewed_at)?,
        }
        write!(
            f,
            ",{},{:?},{:?},{},{},{}",
            self.card_id,
            self.rating,
            self.card_type,
            self.ease_factor,
            self.last_interval,
            self.interval
        )
    }
}
