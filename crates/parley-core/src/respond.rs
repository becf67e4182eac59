//! Response Evaluation
//!
//! Decides how an agent answers the offers on the table: take the deal,
//! sweeten it with a counter-offer, or walk away. Pure decision logic - all
//! state mutation (rejection bookkeeping, turn advance) belongs to the
//! protocol driver.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::action::Offer;
use crate::agent::{Agent, AgentId};
use crate::counter::generate_counter_offers;

/// The three possible answers to a tendered offer.
///
/// `Accept` and `Reject` are terminal; `Counter` keeps the session going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Accept,
    Reject,
    Counter,
}

impl Response {
    /// True for the session-ending categories.
    pub fn is_terminal(self) -> bool {
        matches!(self, Response::Accept | Response::Reject)
    }
}

/// Evaluates the offers on the table from `agent`'s side.
///
/// Only the first offer is live; any others are informational alternatives
/// and are deliberately not evaluated (the driver still records and retires
/// them). Acceptance is at utility `>= 0`: an agent will perform a package
/// it is indifferent to. Below zero it tries to counter with
/// `need = -utility`, filtering candidates already rejected this session and
/// keeping at most `max_options`. With no viable counter the answer is
/// `Reject` with no offers.
pub fn respond_to_offer(
    agent: &Agent,
    partner: &AgentId,
    offers: &[Offer],
    rejected: &HashSet<Offer>,
    max_options: usize,
) -> (Response, Vec<Offer>) {
    let Some(active) = offers.first() else {
        return (Response::Reject, Vec::new());
    };

    let utility = agent.evaluate_offer(active);
    if utility >= 0 {
        return (Response::Accept, vec![active.clone()]);
    }

    let counters: Vec<Offer> =
        generate_counter_offers(agent, partner, active, -utility, rejected, max_options)
            .into_iter()
            .filter(|offer| !rejected.contains(offer))
            .take(max_options)
            .collect();

    if counters.is_empty() {
        (Response::Reject, Vec::new())
    } else {
        (Response::Counter, counters)
    }
}
