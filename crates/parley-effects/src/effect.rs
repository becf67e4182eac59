//! Effect Types
//!
//! Tagged descriptions of what a negotiable action does to the world. A
//! catalog is written from one agent's viewpoint for one partner: every
//! effect names the party it lands on relative to the catalog's owner, so
//! the scorer never needs to know about concrete host types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use parley_core::Action;

/// Whose ledger an effect lands on, relative to the catalog's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The agent this catalog belongs to.
    Own,
    /// The agent on the other side of the table.
    Partner,
}

/// Relationship facet a negotiation action can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    /// Mutual esteem; gained by good words, lost by slights.
    Respect,
    /// Favor debt: gaining means being owed, losing means the debt clears.
    Favors,
}

/// One consequence of performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Effect {
    GainItem { party: Party, item: String, quantity: u32 },
    LoseItem { party: Party, item: String, quantity: u32 },
    GainKnowledge { party: Party, item: String },
    GainRelationship { party: Party, facet: Facet },
    LoseRelationship { party: Party, facet: Facet },
}

impl Effect {
    /// The party this effect lands on.
    pub fn party(&self) -> Party {
        match self {
            Effect::GainItem { party, .. }
            | Effect::LoseItem { party, .. }
            | Effect::GainKnowledge { party, .. }
            | Effect::GainRelationship { party, .. }
            | Effect::LoseRelationship { party, .. } => *party,
        }
    }
}

/// Everything the scorer needs to know about one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Multiplier applied to the summed effect utility. Urgent or weighty
    /// actions carry a higher priority.
    pub priority: i32,
    pub effects: Vec<Effect>,
}

impl ActionSpec {
    pub fn new(priority: i32, effects: Vec<Effect>) -> Self {
        Self { priority, effects }
    }
}

/// Action-token-to-spec table for one (agent, partner) viewpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectCatalog {
    entries: HashMap<String, ActionSpec>,
}

impl EffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(
        mut self,
        token: impl Into<String>,
        priority: i32,
        effects: Vec<Effect>,
    ) -> Self {
        self.entries.insert(token.into(), ActionSpec::new(priority, effects));
        self
    }

    pub fn spec(&self, action: &Action) -> Option<&ActionSpec> {
        self.entries.get(action.token())
    }

    /// Effects of an action, or nothing for tokens the catalog doesn't know.
    pub fn effects(&self, action: &Action) -> &[Effect] {
        self.spec(action).map(|s| s.effects.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
