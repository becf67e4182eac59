//! Negotiation Protocol
//!
//! Turn-alternating offer/counter-offer loop between two agents. The session
//! owns its `NegotiationState` exclusively, runs to a terminal result within
//! one call (no suspension points), and leaves every side effect - applying
//! the agreed actions, adjusting relationships - to the host.

use rand::Rng;
use std::collections::HashSet;

use crate::action::{Action, Offer};
use crate::agent::Agent;
use crate::config::NegotiationConfig;
use crate::respond::{respond_to_offer, Response};
use crate::trace::{NegotiationTrace, TraceEvent};

/// Which side answers the offers currently on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The agent who opened with the initial ask.
    Initiator,
    /// The agent the ask was addressed to.
    Responder,
}

impl Turn {
    pub fn other(self) -> Self {
        match self {
            Turn::Initiator => Turn::Responder,
            Turn::Responder => Turn::Initiator,
        }
    }
}

/// Mutable state of one negotiation session.
///
/// Created fresh per session, mutated in place each round, discarded once a
/// terminal result is reached. `rejected_offers` only ever grows; the first
/// entry of `current_offers` is the live offer, the rest are informational
/// alternatives.
#[derive(Debug)]
pub struct NegotiationState {
    pub initial_ask: Action,
    pub current_offers: Vec<Offer>,
    pub rejected_offers: HashSet<Offer>,
    pub last_result: Response,
    pub turn: Turn,
}

impl NegotiationState {
    /// Opens a session around a single-action ask. `last_result` starts as
    /// `Counter` so the driver enters its loop, and the responder answers
    /// first.
    pub fn open(ask: Action) -> Self {
        Self {
            initial_ask: ask.clone(),
            current_offers: vec![Offer::single(ask)],
            rejected_offers: HashSet::new(),
            last_result: Response::Counter,
            turn: Turn::Responder,
        }
    }

    /// The offer actually under evaluation this round.
    pub fn active_offer(&self) -> Option<&Offer> {
        self.current_offers.first()
    }
}

/// Terminal result of a session: the agreement (if any) plus the trace.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The accepted offer, or `None` when the session ended in rejection.
    pub agreement: Option<Offer>,
    /// Rounds evaluated before the terminal result.
    pub rounds: u32,
    pub trace: NegotiationTrace,
}

impl SessionOutcome {
    /// The no-session outcome: nothing worth asking for, nothing agreed.
    pub fn empty() -> Self {
        Self { agreement: None, rounds: 0, trace: NegotiationTrace::new() }
    }

    pub fn accepted(&self) -> bool {
        self.agreement.is_some()
    }
}

/// One live negotiation session between two agents.
///
/// `step` runs a single round, so callers (and tests) can watch the state
/// between rounds; `run` drives the loop to its terminal result.
pub struct Session<'a> {
    initiator: &'a Agent,
    responder: &'a Agent,
    config: &'a NegotiationConfig,
    state: NegotiationState,
    trace: NegotiationTrace,
    discussed: Vec<Action>,
    rounds: u32,
}

impl<'a> Session<'a> {
    pub fn new(
        initiator: &'a Agent,
        responder: &'a Agent,
        ask: Action,
        config: &'a NegotiationConfig,
    ) -> Self {
        let state = NegotiationState::open(ask);
        let mut trace = NegotiationTrace::new();
        trace.push(TraceEvent::Opening {
            initiator: initiator.id().clone(),
            responder: responder.id().clone(),
            offers: state.current_offers.clone(),
        });
        Self { initiator, responder, config, state, trace, discussed: Vec::new(), rounds: 0 }
    }

    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.last_result.is_terminal()
    }

    /// Runs one round: record the tabled offers, let the agent whose turn it
    /// is respond to the live offer, retire every tabled offer into the
    /// rejection set, then advance the turn if the session continues.
    ///
    /// Termination is guaranteed: a counter must extend the live offer with
    /// at least one action and must not match any retired offer, and the
    /// action pool on each side is finite, so the live offer can only grow
    /// a bounded number of times.
    pub fn step(&mut self) -> Response {
        self.rounds += 1;

        for offer in &self.state.current_offers {
            self.trace.push(TraceEvent::Tabled {
                offer: offer.clone(),
                initiator_utility: self.initiator.evaluate_offer(offer),
                responder_utility: self.responder.evaluate_offer(offer),
            });
            for action in offer.actions() {
                if !self.discussed.contains(action) {
                    self.discussed.push(action.clone());
                }
            }
        }

        let (active, partner) = match self.state.turn {
            Turn::Responder => (self.responder, self.initiator),
            Turn::Initiator => (self.initiator, self.responder),
        };

        let (result, offers) = respond_to_offer(
            active,
            partner.id(),
            &self.state.current_offers,
            &self.state.rejected_offers,
            self.config.max_counter_options,
        );
        tracing::debug!(
            round = self.rounds,
            agent = %active.id(),
            result = ?result,
            options = offers.len(),
            "negotiation round evaluated"
        );

        // Every offer tabled this round is retired, including one that was
        // just accepted or countered: the session must never circle back to
        // an identical package.
        self.state.rejected_offers.extend(self.state.current_offers.iter().cloned());

        match &result {
            Response::Counter => {
                self.trace.push(TraceEvent::Countered {
                    agent: active.id().clone(),
                    offers: offers.clone(),
                });
                self.state.current_offers = offers;
                self.state.turn = self.state.turn.other();
            }
            Response::Accept => {
                if let Some(offer) = offers.first() {
                    self.trace.push(TraceEvent::Accepted {
                        agent: active.id().clone(),
                        offer: offer.clone(),
                    });
                }
                self.state.current_offers = offers;
            }
            Response::Reject => {
                self.trace.push(TraceEvent::Rejected { agent: active.id().clone() });
                self.state.current_offers = Vec::new();
            }
        }
        self.state.last_result = result;
        result
    }

    /// Drives the loop to a terminal result and closes the trace with the
    /// per-action utility breakdown of everything discussed.
    pub fn run(mut self) -> SessionOutcome {
        while !self.is_done() {
            self.step();
        }

        for action in &self.discussed {
            self.trace.push(TraceEvent::Breakdown {
                action: action.clone(),
                initiator_utility: self.initiator.evaluate_action(action),
                responder_utility: self.responder.evaluate_action(action),
            });
        }

        let agreement = match self.state.last_result {
            Response::Accept => self.state.current_offers.into_iter().next(),
            _ => None,
        };
        SessionOutcome { agreement, rounds: self.rounds, trace: self.trace }
    }
}

/// Runs a full session and returns its outcome with the trace attached.
pub fn negotiate_with_trace(
    initiator: &Agent,
    responder: &Agent,
    ask: Action,
    config: &NegotiationConfig,
) -> SessionOutcome {
    Session::new(initiator, responder, ask, config).run()
}

/// Runs a full session and returns just the agreed offer, if any.
pub fn negotiate(
    initiator: &Agent,
    responder: &Agent,
    ask: Action,
    config: &NegotiationConfig,
) -> Option<Offer> {
    negotiate_with_trace(initiator, responder, ask, config).agreement
}

/// Picks what the initiator opens by asking for: a seeded-random choice
/// among the candidate actions it values positively. `None` means the
/// initiator has nothing worth asking for and no session should start.
pub fn choose_initial_ask<R: Rng>(
    initiator: &Agent,
    responder: &Agent,
    rng: &mut R,
) -> Option<Action> {
    let mut wants: Vec<Action> = initiator
        .candidate_actions(responder.id())
        .into_iter()
        .filter(|a| initiator.evaluate_action(a) > 0)
        .collect();
    if wants.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..wants.len());
    Some(wants.swap_remove(idx))
}

/// Opens a session over a seeded-random preferred ask. With nothing worth
/// asking for, returns the empty agreement immediately - a normal outcome,
/// not a fault.
pub fn negotiate_preferred<R: Rng>(
    initiator: &Agent,
    responder: &Agent,
    rng: &mut R,
    config: &NegotiationConfig,
) -> SessionOutcome {
    match choose_initial_ask(initiator, responder, rng) {
        Some(ask) => negotiate_with_trace(initiator, responder, ask, config),
        None => SessionOutcome::empty(),
    }
}
