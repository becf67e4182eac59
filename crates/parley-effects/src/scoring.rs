//! Effect-Driven Utility Scoring
//!
//! A negotiation strategy that prices an action by pattern-matching its
//! effects against the agent's situation: production inputs are rational
//! demand, everything else falls back to a stable per-agent quirk valuation,
//! and relationship facets follow the asymmetric favor economics of the
//! social model (owing is expensive, being owed is only worth much the
//! first time).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use parley_core::{Action, AgentId, Offer, Strategy};

use crate::effect::{Effect, EffectCatalog, Facet, Party};
use crate::inventory::{Inventory, Produces};

/// Utility weight constants for effect scoring
pub mod weights {
    /// Face value of any item changing hands
    pub const ITEM_BASE: i32 = 1;
    /// Premium on items the agent's trade consumes
    pub const ITEM_PRODUCTION_INPUT: i32 = 4;
    /// Upper bound of the idiosyncratic per-agent item valuation
    pub const ITEM_QUIRK_MAX: i32 = 3;
    /// Knowledge about a production input
    pub const KNOWLEDGE_PRODUCTION_INPUT: i32 = 2;
    /// Respect gained or lost
    pub const RESPECT: i32 = 1;
    /// A brand-new favor owed to the agent
    pub const FRESH_FAVOR: i32 = 2;
    /// Spending a favor the agent is owed
    pub const SPEND_FAVOR: i32 = -2;
    /// Coming to owe the partner a favor
    pub const OWE_FAVOR: i32 = -5;
    /// Clearing a favor the agent owes
    pub const DISCHARGE_FAVOR: i32 = 5;
}

/// World snapshot for one agent at session start.
///
/// The scorer reads this and nothing else, so a strategy stays pure for the
/// duration of one session even when the live world keeps moving.
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    pub production: Produces,
    pub inventory: Inventory,
    pub partner_inventory: Inventory,
    /// Favors the partner currently owes this agent.
    pub favors_owed_by_partner: u32,
    /// Favors this agent currently owes the partner.
    pub favors_owed_to_partner: u32,
    /// Seed of the agent's idiosyncratic item valuations.
    pub quirk_seed: u64,
}

/// Strategy scoring actions through an [`EffectCatalog`].
pub struct EffectStrategy {
    catalog: EffectCatalog,
    context: AgentContext,
    offerable: Vec<Action>,
}

impl EffectStrategy {
    pub fn new(catalog: EffectCatalog, context: AgentContext) -> Self {
        Self { catalog, context, offerable: Vec::new() }
    }

    /// Declares the actions this agent may put on the table.
    pub fn with_offerable(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.offerable = actions.into_iter().collect();
        self
    }

    /// Idiosyncratic valuation of an item with no rational demand, stable
    /// per (agent, item) so replays stay deterministic.
    fn quirk_value(&self, item: &str) -> i32 {
        let mut hasher = DefaultHasher::new();
        self.context.quirk_seed.hash(&mut hasher);
        item.hash(&mut hasher);
        let mut rng = SmallRng::seed_from_u64(hasher.finish());
        rng.gen_range(0..=weights::ITEM_QUIRK_MAX)
    }

    /// What one unit of `item` is worth to this agent beyond face value.
    fn item_demand(&self, item: &str) -> i32 {
        if self.context.production.requires_item(item) {
            weights::ITEM_PRODUCTION_INPUT
        } else {
            self.quirk_value(item)
        }
    }

    fn score_effect(&self, effect: &Effect) -> i32 {
        match effect {
            Effect::GainItem { party: Party::Own, item, .. } => {
                weights::ITEM_BASE + self.item_demand(item)
            }
            Effect::LoseItem { party: Party::Own, item, .. } => {
                -(weights::ITEM_BASE + self.item_demand(item))
            }
            Effect::GainItem { party: Party::Partner, .. }
            | Effect::LoseItem { party: Party::Partner, .. } => 0,

            Effect::GainKnowledge { party: Party::Own, item } => {
                if self.context.production.requires_item(item) {
                    weights::KNOWLEDGE_PRODUCTION_INPUT
                } else {
                    0
                }
            }
            Effect::GainKnowledge { party: Party::Partner, .. } => 0,

            Effect::GainRelationship { party: Party::Own, facet: Facet::Respect } => {
                weights::RESPECT
            }
            Effect::LoseRelationship { party: Party::Own, facet: Facet::Respect } => {
                -weights::RESPECT
            }
            Effect::GainRelationship { party: Party::Partner, facet: Facet::Respect }
            | Effect::LoseRelationship { party: Party::Partner, facet: Facet::Respect } => 0,

            // Favor economics are asymmetric on purpose: a serial debtor's
            // new promise is worth nothing, and clearing one's own debt
            // outweighs the fresh credit it cost.
            Effect::GainRelationship { party: Party::Own, facet: Facet::Favors } => {
                if self.context.favors_owed_by_partner > 0 {
                    0
                } else {
                    weights::FRESH_FAVOR
                }
            }
            Effect::LoseRelationship { party: Party::Own, facet: Facet::Favors } => {
                weights::SPEND_FAVOR
            }
            Effect::GainRelationship { party: Party::Partner, facet: Facet::Favors } => {
                weights::OWE_FAVOR
            }
            Effect::LoseRelationship { party: Party::Partner, facet: Facet::Favors } => {
                if self.context.favors_owed_to_partner > 0 {
                    weights::DISCHARGE_FAVOR
                } else {
                    0
                }
            }
        }
    }

    /// True when both inventories cover the action's item losses on its own.
    pub fn action_is_fulfillable(&self, action: &Action) -> bool {
        self.catalog.effects(action).iter().all(|effect| match effect {
            Effect::LoseItem { party: Party::Own, item, quantity } => {
                self.context.inventory.count(item) >= *quantity
            }
            Effect::LoseItem { party: Party::Partner, item, quantity } => {
                self.context.partner_inventory.count(item) >= *quantity
            }
            _ => true,
        })
    }
}

impl Strategy for EffectStrategy {
    fn evaluate_action(&self, action: &Action) -> i32 {
        let Some(spec) = self.catalog.spec(action) else {
            return 0;
        };
        let summed: i32 = spec.effects.iter().map(|e| self.score_effect(e)).sum();
        summed * spec.priority
    }

    fn candidate_actions(&self, _partner: &AgentId) -> Vec<Action> {
        self.offerable
            .iter()
            .filter(|a| self.action_is_fulfillable(a))
            .cloned()
            .collect()
    }
}

/// True when both inventories cover the cumulative item losses of
/// `base ++ candidate`.
///
/// Gains are deliberately ignored: counting them would let an agent promise
/// away items it only hypothetically receives later in the same package.
/// Hosts that assemble candidate pools against a live offer use this; the
/// engine itself trusts its candidate source.
pub fn offer_is_fulfillable(
    catalog: &EffectCatalog,
    base: &Offer,
    candidate: &Action,
    own_inventory: &Inventory,
    partner_inventory: &Inventory,
) -> bool {
    let mut losses: HashMap<(Party, &str), u32> = HashMap::new();
    for action in base.actions().iter().chain(std::iter::once(candidate)) {
        for effect in catalog.effects(action) {
            if let Effect::LoseItem { party, item, quantity } = effect {
                *losses.entry((*party, item.as_str())).or_insert(0) += quantity;
            }
        }
    }

    losses.into_iter().all(|((party, item), total)| {
        let held = match party {
            Party::Own => own_inventory.count(item),
            Party::Partner => partner_inventory.count(item),
        };
        held >= total
    })
}
