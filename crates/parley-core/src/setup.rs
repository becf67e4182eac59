//! Demo Agent Setup
//!
//! Seeded random table agents over a small action alphabet - the population
//! used by the demo binary and the property tests. Every generated agent is
//! guaranteed at least one positively-valued action, which doubles as the
//! thing it prefers to ask a partner for.

use rand::Rng;

use crate::action::Action;
use crate::agent::{Agent, TableStrategy};
use crate::config::DemoConfig;

/// Token for the i-th action of the demo alphabet: `a`..`z`, then `act26`...
fn alphabet_token(index: usize) -> String {
    if index < 26 {
        char::from(b'a' + index as u8).to_string()
    } else {
        format!("act{}", index)
    }
}

/// Builds an agent whose utility table is drawn uniformly from the demo's
/// utility range, plus the action it would open a negotiation by asking for.
pub fn random_table_agent<R: Rng>(
    name: impl Into<String>,
    rng: &mut R,
    demo: &DemoConfig,
) -> (Agent, Action) {
    let mut strategy = TableStrategy::new();
    for index in 0..demo.alphabet_size {
        let utility = rng.gen_range(demo.utility_min..=demo.utility_max);
        strategy = strategy.with_action(alphabet_token(index), utility);
    }

    // Force one positive entry so the agent always has something to want.
    let preferred = alphabet_token(rng.gen_range(0..demo.alphabet_size));
    let forced = rng.gen_range(1..=demo.utility_max.max(1));
    strategy = strategy.with_action(preferred.clone(), forced);

    (Agent::new(name, Box::new(strategy)), Action::new(preferred))
}
