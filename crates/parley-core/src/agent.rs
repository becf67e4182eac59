//! Negotiating Agents
//!
//! An agent is an identity plus an injected strategy: how it values actions
//! and which actions it could put on the table. Strategies are plain trait
//! objects so two agents in the same session can score with entirely
//! different, even incompatible, schemes - the protocol only ever compares
//! an agent's utility against its own prior values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::action::{Action, Offer};

/// Unique identifier for a negotiating agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-agent negotiation strategy, supplied by the host.
///
/// `evaluate_action` must be pure at call time: no side effects, same answer
/// for the same action for the duration of one session. `candidate_actions`
/// returns only actions the agent could legitimately offer right now;
/// feasibility is the host's responsibility and is not re-validated here.
pub trait Strategy {
    /// Signed utility of a single action, from this agent's point of view.
    fn evaluate_action(&self, action: &Action) -> i32;

    /// Actions this agent could add to an offer aimed at `partner`.
    ///
    /// Must be duplicate-free and in a stable order; the counter-offer
    /// generator relies on stable input order for tie-breaking.
    fn candidate_actions(&self, partner: &AgentId) -> Vec<Action>;
}

/// A negotiating party: identity plus strategy.
pub struct Agent {
    id: AgentId,
    strategy: Box<dyn Strategy>,
}

impl Agent {
    pub fn new(id: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self { id: AgentId::new(id), strategy }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Utility of one action under this agent's strategy.
    pub fn evaluate_action(&self, action: &Action) -> i32 {
        self.strategy.evaluate_action(action)
    }

    /// Utility of a whole offer: the sum of its per-action utilities.
    pub fn evaluate_offer(&self, offer: &Offer) -> i32 {
        offer.actions().iter().map(|a| self.evaluate_action(a)).sum()
    }

    /// Actions this agent could offer to `partner` right now.
    pub fn candidate_actions(&self, partner: &AgentId) -> Vec<Action> {
        self.strategy.candidate_actions(partner)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Table-driven strategy: a fixed utility score per action and a fixed list
/// of offerable actions. The workhorse for tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct TableStrategy {
    utilities: HashMap<Action, i32>,
    offerable: Vec<Action>,
}

impl TableStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action with the given utility and makes it offerable.
    pub fn with_action(mut self, token: impl Into<String>, utility: i32) -> Self {
        let action = Action::new(token);
        if !self.offerable.contains(&action) {
            self.offerable.push(action.clone());
        }
        self.utilities.insert(action, utility);
        self
    }

    /// Scores an action without making it offerable (e.g. the partner's ask).
    pub fn with_valuation(mut self, token: impl Into<String>, utility: i32) -> Self {
        self.utilities.insert(Action::new(token), utility);
        self
    }
}

impl Strategy for TableStrategy {
    fn evaluate_action(&self, action: &Action) -> i32 {
        self.utilities.get(action).copied().unwrap_or(0)
    }

    fn candidate_actions(&self, _partner: &AgentId) -> Vec<Action> {
        self.offerable.clone()
    }
}
