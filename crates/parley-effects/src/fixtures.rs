//! Sample data fixtures for testing.
//!
//! A ready-made brewer/farmer trade scenario for exercising effect-driven
//! negotiations. Enable the `test-fixtures` feature to use these helpers
//! from other crates.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // parley-effects = { path = "../parley-effects", features = ["test-fixtures"] }
//!
//! use parley_effects::fixtures;
//!
//! let brewer = fixtures::brewer_agent();
//! let farmer = fixtures::farmer_agent();
//! ```

use parley_core::{Action, Agent};

use crate::effect::{Effect, EffectCatalog, Facet, Party};
use crate::inventory::{Inventory, Produces};
use crate::scoring::{AgentContext, EffectStrategy};

/// Action tokens of the trade scenario, shared by both viewpoints.
pub mod actions {
    pub const GRAIN: &str = "farmer_hands_over_grain";
    pub const BEER: &str = "brewer_hands_over_beer";
    pub const PRAISE: &str = "brewer_praises_farmer";
    pub const FAVOR: &str = "farmer_owes_favor";
}

fn all_actions() -> Vec<Action> {
    [actions::GRAIN, actions::BEER, actions::PRAISE, actions::FAVOR]
        .into_iter()
        .map(Action::new)
        .collect()
}

/// The brewer's viewpoint: needs grain for the mash, parts with beer.
pub fn brewer_catalog() -> EffectCatalog {
    EffectCatalog::new()
        .with_action(
            actions::GRAIN,
            1,
            vec![
                Effect::GainItem { party: Party::Own, item: "grain".into(), quantity: 1 },
                Effect::LoseItem { party: Party::Partner, item: "grain".into(), quantity: 1 },
            ],
        )
        .with_action(
            actions::BEER,
            1,
            vec![
                Effect::LoseItem { party: Party::Own, item: "beer".into(), quantity: 1 },
                Effect::GainItem { party: Party::Partner, item: "beer".into(), quantity: 1 },
            ],
        )
        .with_action(
            actions::PRAISE,
            1,
            vec![Effect::GainRelationship { party: Party::Partner, facet: Facet::Respect }],
        )
        .with_action(
            actions::FAVOR,
            1,
            vec![Effect::GainRelationship { party: Party::Own, facet: Facet::Favors }],
        )
}

/// The farmer's viewpoint: thirsty, proud, and reluctant to owe anyone.
pub fn farmer_catalog() -> EffectCatalog {
    EffectCatalog::new()
        .with_action(
            actions::GRAIN,
            1,
            vec![
                Effect::LoseItem { party: Party::Own, item: "grain".into(), quantity: 1 },
                Effect::GainItem { party: Party::Partner, item: "grain".into(), quantity: 1 },
            ],
        )
        .with_action(
            actions::BEER,
            1,
            vec![
                Effect::GainItem { party: Party::Own, item: "beer".into(), quantity: 1 },
                Effect::LoseItem { party: Party::Partner, item: "beer".into(), quantity: 1 },
            ],
        )
        .with_action(
            actions::PRAISE,
            1,
            vec![Effect::GainRelationship { party: Party::Own, facet: Facet::Respect }],
        )
        .with_action(
            actions::FAVOR,
            1,
            vec![Effect::GainRelationship { party: Party::Partner, facet: Facet::Favors }],
        )
}

pub fn brewer_context() -> AgentContext {
    AgentContext {
        production: Produces::new(
            vec!["beer".to_string()],
            vec!["grain".to_string(), "hops".to_string()],
        ),
        inventory: Inventory::new().with_item("beer", 3),
        partner_inventory: Inventory::new().with_item("grain", 3),
        favors_owed_by_partner: 0,
        favors_owed_to_partner: 0,
        quirk_seed: 11,
    }
}

pub fn farmer_context() -> AgentContext {
    AgentContext {
        production: Produces::new(vec!["grain".to_string()], vec!["beer".to_string()]),
        inventory: Inventory::new().with_item("grain", 3),
        partner_inventory: Inventory::new().with_item("beer", 3),
        favors_owed_by_partner: 0,
        favors_owed_to_partner: 0,
        quirk_seed: 22,
    }
}

pub fn brewer_agent() -> Agent {
    let strategy =
        EffectStrategy::new(brewer_catalog(), brewer_context()).with_offerable(all_actions());
    Agent::new("brewer", Box::new(strategy))
}

pub fn farmer_agent() -> Agent {
    let strategy =
        EffectStrategy::new(farmer_catalog(), farmer_context()).with_offerable(all_actions());
    Agent::new("farmer", Box::new(strategy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{negotiate_with_trace, NegotiationConfig, Offer, TraceEvent};

    #[test]
    fn test_brewer_buys_grain_with_beer_and_praise() {
        // The farmer is down at most 4 on handing over grain; praise (+1)
        // alone never covers it, so beer (+5) joins the bundle and the
        // package stays a net win for the brewer.
        let brewer = brewer_agent();
        let farmer = farmer_agent();

        let outcome = negotiate_with_trace(
            &brewer,
            &farmer,
            Action::new(actions::GRAIN),
            &NegotiationConfig::default(),
        );

        let expected = Offer::new([
            Action::new(actions::GRAIN),
            Action::new(actions::PRAISE),
            Action::new(actions::BEER),
        ]);
        assert_eq!(outcome.agreement, Some(expected));
        assert_eq!(outcome.rounds, 2);
        assert!(outcome
            .trace
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::Countered { agent, .. } if agent.0 == "farmer")));
    }

    #[test]
    fn test_farmer_never_bundles_the_favor() {
        // Owing a favor scores -5 for the farmer; the generator must leave
        // it out of every counter bundle.
        let farmer = farmer_agent();
        assert!(farmer.evaluate_action(&Action::new(actions::FAVOR)) < 0);

        let brewer = brewer_agent();
        let outcome = negotiate_with_trace(
            &brewer,
            &farmer,
            Action::new(actions::GRAIN),
            &NegotiationConfig::default(),
        );
        if let Some(agreement) = outcome.agreement {
            assert!(!agreement.contains(&Action::new(actions::FAVOR)));
        }
    }
}
