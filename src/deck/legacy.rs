// src/deck/legacy.rs
// Normalizes card records from older, unversioned storage.

use serde_json::Value;

use super::{Card, CardType, ModelType, Queue};
use crate::config::MINIMUM_EASE;

const DEFAULT_EASE: u32 = 2_500;

/// Everything a stored record might carry, each field optional.
/// A field of the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyCard {
    pub id: Option<String>,
    pub deck_id: Option<String>,
    pub note_id: Option<String>,
    pub card_type: Option<CardType>,
    /// Older records used a free-form `state` string instead of `cardType`.
    pub state: Option<CardType>,
    pub queue: Option<Queue>,
    /// Epoch seconds.
    pub due: Option<i64>,
    /// Epoch milliseconds.
    pub due_date_ms: Option<i64>,
    pub ease_factor: Option<u32>,
    /// Ease as a plain ratio, e.g. 2.5.
    pub ease: Option<f64>,
    pub interval: Option<u32>,
    pub reps: Option<u32>,
    pub lapses: Option<u32>,
    pub remaining_steps: Option<u32>,
    pub front: Option<String>,
    pub back: Option<String>,
    pub model_type: Option<ModelType>,
}

impl LegacyCard {
    pub fn from_value(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            if !raw.is_null() {
                log::warn!("Legacy card is not an object, using defaults");
            }
            return LegacyCard::default();
        };
        let field = |key: &str| map.get(key).filter(|v| !v.is_null());

        LegacyCard {
            id: read(field("id"), "id", as_string),
            deck_id: read(field("deckId"), "deckId", as_string),
            note_id: read(field("noteId"), "noteId", as_string),
            card_type: read(field("cardType"), "cardType", |v| match v {
                Value::Number(n) => n.as_i64().and_then(CardType::from_code),
                Value::String(s) => CardType::from_name(s),
                _ => None,
            }),
            state: read(field("state"), "state", |v| match v.as_str()? {
                "learning" => Some(CardType::Learn),
                "review" => Some(CardType::Review),
                "relearning" => Some(CardType::Relearn),
                _ => None,
            }),
            queue: read(field("queue"), "queue", |v| match v {
                Value::Number(n) => n.as_i64().and_then(Queue::from_code),
                Value::String(s) => Queue::from_name(s),
                _ => None,
            }),
            due: read(field("due"), "due", as_i64),
            due_date_ms: read(field("dueDate"), "dueDate", as_i64),
            ease_factor: read(field("easeFactor"), "easeFactor", as_u32),
            ease: read(field("ease"), "ease", |v| {
                v.as_f64().filter(|e| e.is_finite() && *e >= 0.0)
            }),
            interval: read(field("interval"), "interval", as_u32),
            reps: read(field("reps"), "reps", as_u32),
            lapses: read(field("lapses"), "lapses", as_u32),
            remaining_steps: read(field("remainingSteps"), "remainingSteps", as_u32),
            front: read(field("front"), "front", as_string),
            back: read(field("back"), "back", as_string),
            model_type: read(field("modelType"), "modelType", |v| {
                match v.as_str()?.to_ascii_lowercase().as_str() {
                    "basic" => Some(ModelType::Basic),
                    "cloze" => Some(ModelType::Cloze),
                    _ => None,
                }
            }),
        }
    }

    /// Fills every gap with a default and returns a card that satisfies the
    /// usual card invariants.
    pub fn normalize(self, now: i64) -> Card {
        let card_type = self.card_type.or(self.state).unwrap_or(CardType::New);
        let queue = self.queue.unwrap_or_else(|| card_type.default_queue());
        let due = self
            .due
            .or(self.due_date_ms.map(|ms| ms.div_euclid(1_000)))
            .unwrap_or(now);
        let ease_factor = self
            .ease_factor
            .or(self.ease.map(|e| (e * 1_000.0).round().min(u32::MAX as f64) as u32))
            .unwrap_or(DEFAULT_EASE)
            .max(MINIMUM_EASE);

        Card {
            id: self.id.unwrap_or_default(),
            deck_id: self.deck_id.unwrap_or_default(),
            note_id: self.note_id.unwrap_or_default(),
            card_type,
            queue,
            due,
            interval: self.interval.unwrap_or(0),
            ease_factor,
            reps: self.reps.unwrap_or(0),
            lapses: self.lapses.unwrap_or(0),
            remaining_steps: self.remaining_steps.unwrap_or(0),
            front: self.front.unwrap_or_default(),
            back: self.back.unwrap_or_default(),
            model_type: self.model_type.unwrap_or_default(),
        }
    }
}

/// Builds a valid card from whatever a stored record holds. Never fails.
pub fn migrate_legacy_card(raw: &Value, now: i64) -> Card {
    LegacyCard::from_value(raw).normalize(now)
}

fn read<T>(value: Option<&Value>, key: &str, parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = value?;
    let parsed = parse(value);
    if parsed.is_none() {
        log::warn!("Ignoring unreadable legacy field {}: {}", key, value);
    }
    parsed
}

fn as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

fn as_u32(v: &Value) -> Option<u32> {
    as_i64(v).and_then(|n| u32::try_from(n).ok())
}
