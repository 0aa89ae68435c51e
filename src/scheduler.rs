// src/scheduler.rs
// Contains the logic for the spaced repetition system.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, DeckConfig, MINIMUM_EASE};
use crate::deck::{Card, CardType, Queue};
use crate::review_log::ReviewLog;
use crate::time::{self, FuzzSource, LEARN_AHEAD_SECS, SECS_PER_DAY, SECS_PER_MINUTE};

/// Represents the user's rating for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

/// Due totals for one deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCounts {
    pub new: usize,
    pub learn: usize,
    pub review: usize,
}

impl DeckCounts {
    /// Limits the new and review totals to the deck's daily limits.
    pub fn capped(self, config: &DeckConfig) -> Self {
        DeckCounts {
            new: self.new.min(config.new_per_day as usize),
            learn: self.learn,
            review: self.review.min(config.reviews_per_day as usize),
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.learn + self.review
    }
}

/// Counts the cards of a deck that can be studied at `now`.
///
/// New cards always count. Learning cards count once they are due within
/// the learn-ahead window, review cards only once they are actually due.
pub fn deck_counts<'a>(cards: impl IntoIterator<Item = &'a Card>, now: i64) -> DeckCounts {
    cards.into_iter().fold(DeckCounts::default(), |mut counts, card| {
        if card.is_learning() {
            if card.due <= now + LEARN_AHEAD_SECS {
                counts.learn += 1;
            }
        } else if card.card_type == CardType::New {
            counts.new += 1;
        } else if card.due <= now {
            counts.review += 1;
        }
        counts
    })
}

/// Schedules answers for the cards of one deck.
///
/// Holds nothing but the deck's validated config, so one instance can be
/// shared across threads. Answers for the same card must still be applied
/// one at a time.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: DeckConfig,
}

impl Scheduler {
    pub fn new(config: DeckConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Scheduler { config })
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Computes the state of `card` after it is answered with `rating` at
    /// `now` (epoch seconds). The input card is left untouched.
    pub fn answer_card(
        &self,
        card: &Card,
        rating: Rating,
        now: i64,
        rng: &mut impl FuzzSource,
    ) -> Card {
        let mut next = card.clone();
        next.reps = next.reps.saturating_add(1);

        match next.card_type {
            CardType::New | CardType::Learn | CardType::Relearn => {
                self.answer_learning(&mut next, rating, now)
            }
            CardType::Review => self.answer_review(&mut next, rating, now, rng),
        }
        // Learning steps leave the interval alone, so a stored interval above
        // a since-lowered maximum is only caught here.
        next.interval = next.interval.min(self.config.maximum_review_interval);
        next.ease_factor = next.ease_factor.max(MINIMUM_EASE);

        log::debug!(
            "Card {} answered {:?}: {:?} -> {:?}, ivl {} -> {}, ease {}, due in {}s",
            card.id,
            rating,
            card.card_type,
            next.card_type,
            card.interval,
            next.interval,
            next.ease_factor,
            next.due - now
        );
        next
    }

    /// Answers with the wall clock and the thread-local RNG.
    pub fn answer_card_now(&self, card: &Card, rating: Rating) -> Card {
        self.answer_card(card, rating, time::now_secs(), &mut rand::thread_rng())
    }

    /// Like [`Scheduler::answer_card`], also returning a log entry for the answer.
    pub fn answer_with_log(
        &self,
        card: &Card,
        rating: Rating,
        now: i64,
        rng: &mut impl FuzzSource,
    ) -> (Card, ReviewLog) {
        let next = self.answer_card(card, rating, now, rng);
        let entry = ReviewLog {
            card_id: card.id.clone(),
            rating,
            reviewed_at: now,
            card_type: card.card_type,
            ease_factor: next.ease_factor,
            last_interval: card.interval,
            interval: next.interval,
        };
        (next, entry)
    }

    /// Deck counts limited by the daily new and review limits.
    pub fn daily_counts<'a>(
        &self,
        cards: impl IntoIterator<Item = &'a Card>,
        now: i64,
    ) -> DeckCounts {
        deck_counts(cards, now).capped(&self.config)
    }

    fn answer_learning(&self, card: &mut Card, rating: Rating, now: i64) {
        if card.card_type == CardType::New {
            card.card_type = CardType::Learn;
            card.remaining_steps = self.config.learn_steps.len() as u32;
        }

        let steps: &[u32] = match card.card_type {
            CardType::Relearn => &self.config.relearn_steps,
            _ => &self.config.learn_steps,
        };
        let total = steps.len() as u32;
        // Records from older storage may carry an out-of-range step count.
        let remaining = card.remaining_steps.clamp(1, total);
        let index = (total - remaining) as usize;
        let current = minutes(steps[index]);

        match rating {
            Rating::Again => {
                card.remaining_steps = total;
                reschedule(card, minutes(steps[0]), now);
            }
            Rating::Hard => {
                // Halfway to the next step, so repeated Hard answers still move on.
                let delay = match steps.get(index + 1) {
                    Some(&next) => (current + minutes(next)) / 2,
                    None => current * 2,
                };
                card.remaining_steps = remaining;
                reschedule(card, delay, now);
            }
            Rating::Good if remaining > 1 => {
                card.remaining_steps = remaining - 1;
                reschedule(card, minutes(steps[index + 1]), now);
            }
            Rating::Good => self.graduate(card, self.config.graduating_interval_good, now),
            Rating::Easy => self.graduate(card, self.config.graduating_interval_easy, now),
        }
    }

    fn answer_review(&self, card: &mut Card, rating: Rating, now: i64, rng: &mut impl FuzzSource) {
        let current = card.interval;
        let ease = card.ease_factor;

        let base = match rating {
            Rating::Again => {
                self.lapse(card, now);
                return;
            }
            Rating::Hard => {
                card.ease_factor = ease.saturating_sub(150).max(MINIMUM_EASE);
                (current as f64 * self.config.hard_multiplier).floor()
            }
            Rating::Good => (current as u64 * ease as u64 / 1_000) as f64,
            Rating::Easy => {
                card.ease_factor = ease.saturating_add(150);
                let bonus = self.config.easy_multiplier as u64;
                let grown = (current as u64 * card.ease_factor as u64).saturating_mul(bonus);
                (grown / 1_000_000) as f64
            }
        };
        let maximum = self.config.maximum_review_interval;
        // `as` saturates, so oversized products land on u32::MAX before the cap.
        let scaled = (base * self.config.interval_multiplier).floor() as u32;

        let interval = match rating {
            Rating::Good | Rating::Easy => {
                // A successful review always moves the card further out.
                let grown = if scaled <= current { current.saturating_add(1) } else { scaled };
                time::fuzz_interval_at_least(grown.min(maximum), current.saturating_add(1), rng)
            }
            _ => time::fuzz_interval(scaled.clamp(1, maximum), rng),
        };
        schedule_review(card, interval, maximum, now);
    }

    fn lapse(&self, card: &mut Card, now: i64) {
        card.card_type = CardType::Relearn;
        card.lapses = card.lapses.saturating_add(1);
        card.ease_factor = card.ease_factor.saturating_sub(200).max(MINIMUM_EASE);

        let kept = (card.interval as f64 * self.config.lapse_multiplier).floor() as u32;
        card.interval = kept.max(1).min(self.config.maximum_review_interval);

        card.remaining_steps = self.config.relearn_steps.len() as u32;
        reschedule(card, minutes(self.config.relearn_steps[0]), now);
    }

    fn graduate(&self, card: &mut Card, interval: u32, now: i64) {
        card.card_type = CardType::Review;
        card.remaining_steps = 0;
        schedule_review(card, interval, self.config.maximum_review_interval, now);
    }
}

fn minutes(steps: u32) -> i64 {
    steps as i64 * SECS_PER_MINUTE
}

fn reschedule(card: &mut Card, delay_secs: i64, now: i64) {
    card.queue = Queue::Learn;
    card.due = now + delay_secs;
}

fn schedule_review(card: &mut Card, interval: u32, maximum: u32, now: i64) {
    card.interval = interval.min(maximum);
    card.queue = Queue::Review;
    card.due = now + card.interval as i64 * SECS_PER_DAY;
}
