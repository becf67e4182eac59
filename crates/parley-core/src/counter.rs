//! Counter-Offer Generation
//!
//! When an offer is worth less than nothing to the responder, it can sweeten
//! the deal: extend the offer with actions of its own that it values
//! positively until the package covers the deficit. The search is a single
//! greedy forward pass, not a subset search - it trades optimality for
//! determinism and speed.

use std::collections::HashSet;

use crate::action::{Action, Offer};
use crate::agent::{Agent, AgentId};

/// Builds counter-offers for `agent` in response to `base`, an offer whose
/// utility to the agent falls short by `need`.
///
/// The candidate pool is the agent's offerable actions with positive utility,
/// minus anything already in `base`, sorted ascending by the agent's own
/// utility (stable, so ties keep the strategy's order). Cheap actions are
/// consumed first, which bundles many small concessions before reaching for
/// an expensive one and keeps the overpayment low.
///
/// Walking the pool once, actions accumulate into a bundle; when the bundle's
/// summed utility strictly exceeds `need` the bundle is closed and
/// `base ++ bundle` becomes one candidate, unless that exact offer has
/// already been rejected this session. A trailing bundle that never reaches
/// the threshold is discarded. At most `max_options` candidates are
/// returned, in generation order.
pub fn generate_counter_offers(
    agent: &Agent,
    partner: &AgentId,
    base: &Offer,
    need: i32,
    rejected: &HashSet<Offer>,
    max_options: usize,
) -> Vec<Offer> {
    let mut pool: Vec<(Action, i32)> = agent
        .candidate_actions(partner)
        .into_iter()
        .filter(|a| !base.contains(a))
        .map(|a| {
            let utility = agent.evaluate_action(&a);
            (a, utility)
        })
        .filter(|(_, utility)| *utility > 0)
        .collect();
    pool.sort_by_key(|(_, utility)| *utility);

    let mut counters: Vec<Offer> = Vec::new();
    let mut bundle: Vec<Action> = Vec::new();
    let mut bundle_utility = 0;

    for (action, utility) in pool {
        bundle_utility += utility;
        bundle.push(action);

        // A bundle qualifies only once it is worth strictly more than the
        // deficit; equality would leave the responder indifferent.
        if bundle_utility > need {
            let candidate = base.extended(bundle.drain(..));
            if !rejected.contains(&candidate) {
                counters.push(candidate);
            }
            bundle_utility = 0;
            if counters.len() == max_options {
                break;
            }
        }
    }

    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::TableStrategy;

    fn agent(strategy: TableStrategy) -> Agent {
        Agent::new("responder", Box::new(strategy))
    }

    fn partner() -> AgentId {
        AgentId::new("partner")
    }

    #[test]
    fn test_bundles_cheap_actions_until_need_exceeded() {
        // Asked action is worth -3; own actions y:+2 and z:+4 must both go
        // into one bundle (2 is not > 3, 2+4 = 6 is).
        let agent = agent(
            TableStrategy::new()
                .with_valuation("ask", -3)
                .with_action("z", 4)
                .with_action("y", 2),
        );
        let base = Offer::single(Action::new("ask"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 3, &HashSet::new(), 2);

        assert_eq!(counters.len(), 1);
        let expected = Offer::new([Action::new("ask"), Action::new("y"), Action::new("z")]);
        assert_eq!(counters[0], expected);
        // Ascending walk: the cheap action comes before the expensive one.
        let tokens: Vec<&str> = counters[0].actions().iter().map(Action::token).collect();
        assert_eq!(tokens, vec!["ask", "y", "z"]);
    }

    #[test]
    fn test_emits_multiple_disjoint_bundles() {
        let agent = agent(
            TableStrategy::new()
                .with_action("a", 1)
                .with_action("b", 2)
                .with_action("c", 3)
                .with_action("d", 5),
        );
        let base = Offer::single(Action::new("ask"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 2, &HashSet::new(), 4);

        // Ascending pool a(1) b(2) c(3) d(5): a+b = 3 > 2 closes the first
        // bundle, c = 3 > 2 the second, d = 5 > 2 the third.
        assert_eq!(counters.len(), 3);
        assert_eq!(counters[0], base.extended([Action::new("a"), Action::new("b")]));
        assert_eq!(counters[1], base.extended([Action::new("c")]));
        assert_eq!(counters[2], base.extended([Action::new("d")]));
    }

    #[test]
    fn test_truncates_to_max_options() {
        let agent = agent(
            TableStrategy::new()
                .with_action("a", 3)
                .with_action("b", 3)
                .with_action("c", 3),
        );
        let base = Offer::single(Action::new("ask"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 2, &HashSet::new(), 2);
        assert_eq!(counters.len(), 2);
    }

    #[test]
    fn test_bundle_equal_to_need_is_not_emitted() {
        let agent = agent(TableStrategy::new().with_action("a", 3));
        let base = Offer::single(Action::new("ask"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 3, &HashSet::new(), 2);
        assert!(counters.is_empty());
    }

    #[test]
    fn test_trailing_partial_bundle_is_discarded() {
        let agent = agent(TableStrategy::new().with_action("a", 1).with_action("b", 1));
        let base = Offer::single(Action::new("ask"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 5, &HashSet::new(), 2);
        assert!(counters.is_empty());
    }

    #[test]
    fn test_rejected_candidates_are_skipped() {
        let agent = agent(TableStrategy::new().with_action("a", 4));
        let base = Offer::single(Action::new("ask"));
        let mut rejected = HashSet::new();
        rejected.insert(base.extended([Action::new("a")]));

        let counters = generate_counter_offers(&agent, &partner(), &base, 2, &rejected, 2);
        assert!(counters.is_empty());
    }

    #[test]
    fn test_pool_excludes_base_offer_and_non_positive_actions() {
        let agent = agent(
            TableStrategy::new()
                .with_action("already_in", 5)
                .with_action("worthless", 0)
                .with_action("bad", -2)
                .with_action("good", 3),
        );
        let base = Offer::single(Action::new("already_in"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 1, &HashSet::new(), 4);

        assert_eq!(counters.len(), 1);
        assert_eq!(counters[0], base.extended([Action::new("good")]));
    }

    #[test]
    fn test_ties_keep_stable_pool_order() {
        let agent = agent(
            TableStrategy::new()
                .with_action("first", 2)
                .with_action("second", 2),
        );
        let base = Offer::single(Action::new("ask"));
        let counters =
            generate_counter_offers(&agent, &partner(), &base, 1, &HashSet::new(), 4);

        assert_eq!(counters.len(), 2);
        assert_eq!(counters[0], base.extended([Action::new("first")]));
        assert_eq!(counters[1], base.extended([Action::new("second")]));
    }
}
