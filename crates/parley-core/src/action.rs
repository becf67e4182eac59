//! Actions and Offers
//!
//! The two value types every negotiation is built from. An action is an
//! opaque token naming one unit of exchange ("give bread", "put in a good
//! word"); an offer is a duplicate-free bundle of actions proposed as a
//! single package.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An atomic negotiable unit of value exchange.
///
/// Actions carry no intrinsic utility; value is always assigned by an
/// observing agent's strategy. Equality and hashing are by token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action(pub String);

impl Action {
    /// Creates an action from any token-like value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The identity token.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, duplicate-free bundle of actions proposed as one package.
///
/// Insertion order is preserved for trace output, but equality and hashing
/// treat an offer as a set: `[a, b]` and `[b, a]` are the same offer. Offers
/// placed in a rejection set are never mutated; counters are built by
/// copy-on-extend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Action>", into = "Vec<Action>")]
pub struct Offer {
    actions: Vec<Action>,
}

impl Offer {
    /// Builds an offer from a sequence of actions, dropping duplicates while
    /// keeping the first occurrence's position.
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        let mut deduped: Vec<Action> = Vec::new();
        for action in actions {
            if !deduped.contains(&action) {
                deduped.push(action);
            }
        }
        Self { actions: deduped }
    }

    /// The single-action offer used to open a negotiation.
    pub fn single(action: Action) -> Self {
        Self { actions: vec![action] }
    }

    /// Returns a new offer consisting of this offer followed by `additions`,
    /// with duplicates dropped. The original offer is untouched.
    pub fn extended(&self, additions: impl IntoIterator<Item = Action>) -> Self {
        Self::new(self.actions.iter().cloned().chain(additions))
    }

    /// Actions in proposal order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    /// True if every action of `other` is present in this offer.
    pub fn is_superset_of(&self, other: &Offer) -> bool {
        other.actions.iter().all(|a| self.contains(a))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl PartialEq for Offer {
    fn eq(&self, other: &Self) -> bool {
        self.actions.len() == other.actions.len()
            && self.actions.iter().all(|a| other.contains(a))
    }
}

impl Eq for Offer {}

impl Hash for Offer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-insensitive: combine per-action hashes commutatively so
        // permuted offers collide with their set-equal counterparts.
        let mut combined: u64 = 0;
        for action in &self.actions {
            let mut hasher = DefaultHasher::new();
            action.hash(&mut hasher);
            combined ^= hasher.finish();
        }
        state.write_u64(combined);
        state.write_usize(self.actions.len());
    }
}

impl From<Vec<Action>> for Offer {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}

impl From<Offer> for Vec<Action> {
    fn from(offer: Offer) -> Self {
        offer.actions
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, action) in self.actions.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", action)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn offer(tokens: &[&str]) -> Offer {
        Offer::new(tokens.iter().map(|t| Action::new(*t)))
    }

    #[test]
    fn test_new_drops_duplicates() {
        let o = offer(&["a", "b", "a", "c", "b"]);
        assert_eq!(o.len(), 3);
        assert_eq!(o.actions()[0], Action::new("a"));
        assert_eq!(o.actions()[2], Action::new("c"));
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(offer(&["a", "b", "c"]), offer(&["c", "a", "b"]));
        assert_ne!(offer(&["a", "b"]), offer(&["a", "c"]));
        assert_ne!(offer(&["a", "b"]), offer(&["a", "b", "c"]));
    }

    #[test]
    fn test_hash_ignores_order() {
        let mut rejected = HashSet::new();
        rejected.insert(offer(&["a", "b", "c"]));
        assert!(rejected.contains(&offer(&["b", "c", "a"])));
        assert!(!rejected.contains(&offer(&["b", "c"])));
    }

    #[test]
    fn test_extended_is_copy_on_extend() {
        let base = offer(&["a"]);
        let grown = base.extended([Action::new("b"), Action::new("a")]);
        assert_eq!(base.len(), 1);
        assert_eq!(grown, offer(&["a", "b"]));
        assert!(grown.is_superset_of(&base));
    }

    #[test]
    fn test_display_preserves_proposal_order() {
        let o = offer(&["trade", "good_word"]);
        assert_eq!(o.to_string(), "[trade,good_word]");
    }

    #[test]
    fn test_serde_round_trips_through_action_list() {
        let o = offer(&["a", "b"]);
        let json = serde_json::to_string(&o).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let back: Offer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }
}
