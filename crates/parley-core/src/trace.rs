//! Negotiation Trace
//!
//! A round-by-round record of one session, kept for observability rather
//! than control flow. Every event renders as exactly one line, stable enough
//! for snapshot tests; `to_jsonl` emits the same events as JSON lines for
//! hosts that log sessions to file.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::{Action, Offer};
use crate::agent::AgentId;

/// One observable step of a negotiation session.
///
/// Utilities are always reported in (initiator, responder) order, matching
/// the agents passed to the protocol driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TraceEvent {
    /// The session opens with the initiator's ask.
    Opening {
        initiator: AgentId,
        responder: AgentId,
        offers: Vec<Offer>,
    },
    /// An offer sat on the table this round, with both sides' utilities.
    Tabled {
        offer: Offer,
        initiator_utility: i32,
        responder_utility: i32,
    },
    /// An agent answered with one or more counter-offers.
    Countered { agent: AgentId, offers: Vec<Offer> },
    /// An agent accepted an offer, ending the session.
    Accepted { agent: AgentId, offer: Offer },
    /// An agent walked away, ending the session.
    Rejected { agent: AgentId },
    /// Closing per-action utility summary, one event per discussed action.
    Breakdown {
        action: Action,
        initiator_utility: i32,
        responder_utility: i32,
    },
}

/// Joins alternative offers the way they are spoken: "[a] OR [a,b]".
fn format_offers(offers: &[Offer]) -> String {
    offers
        .iter()
        .map(Offer::to_string)
        .collect::<Vec<_>>()
        .join(" OR ")
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Opening { initiator, responder, offers } => {
                write!(f, "{} opens by asking {} for {}", initiator, responder, format_offers(offers))
            }
            TraceEvent::Tabled { offer, initiator_utility, responder_utility } => {
                write!(f, "on the table: {} [{}:{}]", offer, initiator_utility, responder_utility)
            }
            TraceEvent::Countered { agent, offers } => {
                write!(f, "{} counters with {}", agent, format_offers(offers))
            }
            TraceEvent::Accepted { agent, offer } => {
                write!(f, "{} accepts {}", agent, offer)
            }
            TraceEvent::Rejected { agent } => write!(f, "{} rejects", agent),
            TraceEvent::Breakdown { action, initiator_utility, responder_utility } => {
                write!(f, "{} => [{}:{}]", action, initiator_utility, responder_utility)
            }
        }
    }
}

/// The full ordered trace of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegotiationTrace {
    events: Vec<TraceEvent>,
}

impl NegotiationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Renders the trace as text, one line per event.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.to_string());
            out.push('\n');
        }
        out
    }

    /// Serializes the trace as JSONL, one event per line.
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl fmt::Display for NegotiationTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> NegotiationTrace {
        let mut trace = NegotiationTrace::new();
        trace.push(TraceEvent::Opening {
            initiator: AgentId::new("alice"),
            responder: AgentId::new("bob"),
            offers: vec![Offer::single(Action::new("ask"))],
        });
        trace.push(TraceEvent::Tabled {
            offer: Offer::single(Action::new("ask")),
            initiator_utility: 3,
            responder_utility: -2,
        });
        trace.push(TraceEvent::Countered {
            agent: AgentId::new("bob"),
            offers: vec![
                Offer::new([Action::new("ask"), Action::new("y")]),
                Offer::new([Action::new("ask"), Action::new("z")]),
            ],
        });
        trace.push(TraceEvent::Rejected { agent: AgentId::new("alice") });
        trace.push(TraceEvent::Breakdown {
            action: Action::new("ask"),
            initiator_utility: 3,
            responder_utility: -2,
        });
        trace
    }

    #[test]
    fn test_render_is_one_line_per_event() {
        let trace = sample_trace();
        let rendered = trace.render();
        assert_eq!(rendered.lines().count(), trace.len());
        assert_eq!(
            rendered,
            "alice opens by asking bob for [ask]\n\
             on the table: [ask] [3:-2]\n\
             bob counters with [ask,y] OR [ask,z]\n\
             alice rejects\n\
             ask => [3:-2]\n"
        );
    }

    #[test]
    fn test_jsonl_tags_events_by_type() {
        let trace = sample_trace();
        let jsonl = trace.to_jsonl().unwrap();
        let first = jsonl.lines().next().unwrap();
        assert!(first.contains(r#""type":"opening""#));
        assert_eq!(jsonl.lines().count(), trace.len());
    }
}
