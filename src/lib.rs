// src/lib.rs
// Spaced-repetition scheduling for study decks.
//
// Every `due` value handled by this crate is in epoch seconds, including
// review cards, whose due instant is `now + interval * 86400`.

pub mod config;
pub mod deck;
pub mod review_log;
pub mod scheduler;
pub mod time;

pub use config::{ConfigError, DeckConfig};
pub use deck::cloze::{format_content, Side};
pub use deck::legacy::{migrate_legacy_card, LegacyCard};
pub use deck::{Card, CardType, ModelType, Queue};
pub use review_log::ReviewLog;
pub use scheduler::{deck_counts, DeckCounts, Rating, Scheduler};
pub use time::FuzzSource;
