//! Consequence vocabulary and effect-driven utility scoring.
//!
//! The negotiation engine treats actions as opaque tokens; this crate gives
//! hosts a concrete way to describe what an action *does* - items changing
//! hands, knowledge shared, relationship facets shifting - and a strategy
//! that scores actions by pattern-matching those effects. Pure data and
//! logic, no I/O.

pub mod effect;
pub mod inventory;
pub mod scoring;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use effect::{ActionSpec, Effect, EffectCatalog, Facet, Party};
pub use inventory::{Inventory, Produces};
pub use scoring::{offer_is_fulfillable, AgentContext, EffectStrategy};
