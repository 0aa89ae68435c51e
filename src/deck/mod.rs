// src/deck/mod.rs
// Card records and the enums that describe their scheduling phase.

pub mod cloze;
pub mod legacy;

use serde::{Deserialize, Serialize};

use crate::config::DeckConfig;

/// Which set of transition rules applies to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    New,
    Learn,
    Review,
    Relearn,
}

impl CardType {
    /// Maps Anki's integer card type.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CardType::New),
            1 => Some(CardType::Learn),
            2 => Some(CardType::Review),
            3 => Some(CardType::Relearn),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "new" => Some(CardType::New),
            "learn" | "learning" => Some(CardType::Learn),
            "review" => Some(CardType::Review),
            "relearn" | "relearning" => Some(CardType::Relearn),
            _ => None,
        }
    }

    /// The queue a card of this type sits in when nothing else applies.
    pub fn default_queue(self) -> Queue {
        match self {
            CardType::New => Queue::New,
            CardType::Learn | CardType::Relearn => Queue::Learn,
            CardType::Review => Queue::Review,
        }
    }
}

/// Presentation bucket. Mirrors the card type; the scheduler never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Queue {
    New,
    Learn,
    Review,
    DayLearn,
    Suspended,
    SchedBuried,
    UserBuried,
}

impl Queue {
    /// Maps Anki's integer queue, where negative values mark hidden cards.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Queue::New),
            1 => Some(Queue::Learn),
            2 => Some(Queue::Review),
            3 => Some(Queue::DayLearn),
            -1 => Some(Queue::Suspended),
            -2 => Some(Queue::SchedBuried),
            -3 => Some(Queue::UserBuried),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "new" => Some(Queue::New),
            "learn" | "learning" => Some(Queue::Learn),
            "review" => Some(Queue::Review),
            "daylearn" => Some(Queue::DayLearn),
            "suspended" => Some(Queue::Suspended),
            "schedburied" => Some(Queue::SchedBuried),
            "userburied" => Some(Queue::UserBuried),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    #[default]
    Basic,
    Cloze,
}

/// One flashcard and its memory state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub deck_id: String,
    pub note_id: String,
    pub card_type: CardType,
    pub queue: Queue,
    /// Epoch seconds in every phase. Learning cards are due `step * 60`
    /// seconds after the answer; review cards `interval * 86400` seconds
    /// after it. Review due is not a day index.
    pub due: i64,
    pub interval: u32,    // Interval in days
    pub ease_factor: u32, // Permille, 2500 = 250%
    pub reps: u32,
    pub lapses: u32,
    /// Steps left before graduation. Only read in Learn and Relearn.
    pub remaining_steps: u32,
    pub front: String,
    pub back: String,
    pub model_type: ModelType,
}

impl Card {
    /// A fresh card that is due right away.
    pub fn new(
        id: impl Into<String>,
        deck_id: impl Into<String>,
        note_id: impl Into<String>,
        config: &DeckConfig,
        now: i64,
    ) -> Self {
        Card {
            id: id.into(),
            deck_id: deck_id.into(),
            note_id: note_id.into(),
            card_type: CardType::New,
            queue: Queue::New,
            due: now,
            interval: 0,
            ease_factor: config.initial_ease,
            reps: 0,
            lapses: 0,
            remaining_steps: 0,
            front: String::new(),
            back: String::new(),
            model_type: ModelType::Basic,
        }
    }

    pub fn with_content(
        mut self,
        front: impl Into<String>,
        back: impl Into<String>,
        model_type: ModelType,
    ) -> Self {
        self.front = front.into();
        self.back = back.into();
        self.model_type = model_type;
        self
    }

    pub fn is_learning(&self) -> bool {
        matches!(self.card_type, CardType::Learn | CardType::Relearn)
    }
}
