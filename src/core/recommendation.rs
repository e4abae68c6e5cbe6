//! Recommendation quiz - narrows the catalog by occasion and budget.
//!
//! The quiz is two steps (pick an event, then a price bracket) whose state lives in a
//! caller-owned [`QuizSession`]. Once resolved, [`recommend`] runs the filter.
//!
//! Both criteria follow the same rule: a name that does not resolve yields an empty
//! result rather than being ignored. Blank names count as "not supplied".

use crate::{
    core::{event::get_event_by_name, price_bracket::get_price_bracket_by_name},
    entities::{Bouquet, BouquetEvent, bouquet, bouquet_event},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use tracing::debug;

/// Where a quiz session currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuizState {
    /// Waiting for the occasion
    #[default]
    AwaitingEvent,
    /// Occasion chosen (or skipped), waiting for the budget
    AwaitingBudget {
        /// Selected event name
        event: Option<String>,
    },
    /// Both answers in; the filter can run
    Resolved {
        /// Selected event name
        event: Option<String>,
        /// Selected price bracket name
        price_bracket: Option<String>,
    },
}

impl QuizState {
    /// Short state name used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AwaitingEvent => "awaiting_event",
            Self::AwaitingBudget { .. } => "awaiting_budget",
            Self::Resolved { .. } => "resolved",
        }
    }
}

/// Caller-owned state of one pass through the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    state: QuizState,
}

impl QuizSession {
    /// Starts a new session awaiting the event answer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &QuizState {
        &self.state
    }

    /// Drops any answers and goes back to the first step.
    pub fn restart(&mut self) {
        self.state = QuizState::AwaitingEvent;
    }

    /// Records the event answer. Answering again from any state restarts the flow
    /// with this answer.
    pub fn select_event(&mut self, event: Option<String>) {
        self.state = QuizState::AwaitingBudget {
            event: normalize(event),
        };
    }

    /// Records the budget answer and resolves the session.
    ///
    /// # Errors
    /// `QuizOutOfOrder` unless the session is awaiting the budget.
    pub fn select_budget(&mut self, price_bracket: Option<String>) -> Result<()> {
        match std::mem::take(&mut self.state) {
            QuizState::AwaitingBudget { event } => {
                self.state = QuizState::Resolved {
                    event,
                    price_bracket: normalize(price_bracket),
                };
                Ok(())
            }
            other => {
                let actual = other.name();
                self.state = other;
                Err(Error::QuizOutOfOrder {
                    expected: "awaiting_budget",
                    actual,
                })
            }
        }
    }

    /// The (event, price bracket) answers of a resolved session.
    ///
    /// # Errors
    /// `QuizOutOfOrder` when the session has not been resolved yet.
    pub fn criteria(&self) -> Result<(Option<&str>, Option<&str>)> {
        match &self.state {
            QuizState::Resolved {
                event,
                price_bracket,
            } => Ok((event.as_deref(), price_bracket.as_deref())),
            other => Err(Error::QuizOutOfOrder {
                expected: "resolved",
                actual: other.name(),
            }),
        }
    }
}

fn normalize(answer: Option<String>) -> Option<String> {
    answer
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Result of a catalog filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    /// Matching bouquets, cheapest first
    pub bouquets: Vec<bouquet::Model>,
    /// Whether anything matched, so callers can tell "no match" from "no catalog"
    pub has_matches: bool,
}

impl Recommendation {
    fn from_bouquets(bouquets: Vec<bouquet::Model>) -> Self {
        let has_matches = !bouquets.is_empty();
        Self {
            bouquets,
            has_matches,
        }
    }
}

/// Filters the catalog by an optional event tag and an optional price bracket.
///
/// Supplying neither returns the whole catalog. An event or bracket name that does not
/// resolve produces an empty result. Only storage failures are errors.
///
/// Bracket bounds are compared against the cached `total_price`, both inclusive.
/// Availability is not considered. Results come cheapest first, ties broken by name.
///
/// # Arguments
/// * `event_name` - Occasion tag; `None` or blank means any occasion
/// * `bracket_name` - Price bracket name; `None` or blank means any price
pub async fn filter_bouquets<C>(
    db: &C,
    event_name: Option<&str>,
    bracket_name: Option<&str>,
) -> Result<Recommendation>
where
    C: ConnectionTrait,
{
    let event_name = event_name.map(str::trim).filter(|name| !name.is_empty());
    let bracket_name = bracket_name.map(str::trim).filter(|name| !name.is_empty());

    let mut query = Bouquet::find();

    if let Some(name) = event_name {
        let Some(event) = get_event_by_name(db, name).await? else {
            debug!("Unknown event '{}', no bouquets match", name);
            return Ok(Recommendation::default());
        };
        query = query
            .inner_join(BouquetEvent)
            .filter(bouquet_event::Column::EventId.eq(event.id));
    }

    if let Some(name) = bracket_name {
        let Some(bracket) = get_price_bracket_by_name(db, name).await? else {
            debug!("Unknown price bracket '{}', no bouquets match", name);
            return Ok(Recommendation::default());
        };
        if let Some(min) = bracket.min_price {
            query = query.filter(bouquet::Column::TotalPrice.gte(min));
        }
        if let Some(max) = bracket.max_price {
            query = query.filter(bouquet::Column::TotalPrice.lte(max));
        }
    }

    let bouquets = query
        .order_by_asc(bouquet::Column::TotalPrice)
        .order_by_asc(bouquet::Column::Name)
        .all(db)
        .await?;

    debug!(
        "Filter event={:?} bracket={:?} matched {} bouquet(s)",
        event_name,
        bracket_name,
        bouquets.len()
    );
    Ok(Recommendation::from_bouquets(bouquets))
}

/// Runs the filter with the answers of a resolved quiz session.
///
/// # Errors
/// `QuizOutOfOrder` when the session is not resolved, or a storage failure.
pub async fn recommend<C>(db: &C, session: &QuizSession) -> Result<Recommendation>
where
    C: ConnectionTrait,
{
    let (event, price_bracket) = session.criteria()?;
    filter_bouquets(db, event, price_bracket).await
}
