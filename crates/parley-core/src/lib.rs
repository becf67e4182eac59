//! Bilateral Negotiation Engine
//!
//! Turn-based offer/counter-offer negotiation between two simulated agents.
//! The host supplies utility scoring and candidate actions per agent; the
//! engine searches for a mutually acceptable package of reciprocal actions
//! and reports a full round-by-round trace. Applying an agreement's
//! real-world effects is the host's job.

pub mod action;
pub mod agent;
pub mod config;
pub mod counter;
pub mod protocol;
pub mod respond;
pub mod setup;
pub mod trace;

pub use action::{Action, Offer};
pub use agent::{Agent, AgentId, Strategy, TableStrategy};
pub use config::{Config, ConfigError, DemoConfig, NegotiationConfig};
pub use counter::generate_counter_offers;
pub use protocol::{
    choose_initial_ask, negotiate, negotiate_preferred, negotiate_with_trace, NegotiationState,
    Session, SessionOutcome, Turn,
};
pub use respond::{respond_to_offer, Response};
pub use trace::{NegotiationTrace, TraceEvent};
