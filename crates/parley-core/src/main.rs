//! Negotiation Demo
//!
//! Runs seeded negotiation sessions between randomly generated table agents
//! and prints each session's trace - a quick way to eyeball the protocol and
//! to reproduce a session from its seed.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use parley_core::config::Config;
use parley_core::protocol::negotiate_with_trace;
use parley_core::setup::random_table_agent;

/// Command line arguments for the demo
#[derive(Parser, Debug)]
#[command(name = "parley_demo")]
#[command(about = "A bilateral negotiation engine demo")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of negotiation sessions to run
    #[arg(long, default_value_t = 3)]
    sessions: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load_or_default();

    println!("Parley Negotiation Demo");
    println!("=======================");
    println!("Seed: {}", args.seed);
    println!("Sessions: {}", args.sessions);
    println!();

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut agreements = 0u64;

    for session in 1..=args.sessions {
        let (initiator, ask) =
            random_table_agent(format!("agent_{}a", session), &mut rng, &config.demo);
        let (responder, _) =
            random_table_agent(format!("agent_{}b", session), &mut rng, &config.demo);

        println!("--- session {} ---", session);
        let outcome = negotiate_with_trace(&initiator, &responder, ask, &config.negotiation);
        print!("{}", outcome.trace.render());

        match &outcome.agreement {
            Some(offer) => {
                agreements += 1;
                println!("agreed in {} rounds: {}", outcome.rounds, offer);
            }
            None => println!("no agreement after {} rounds", outcome.rounds),
        }
        println!();
    }

    println!("{}/{} sessions ended in agreement", agreements, args.sessions);
}
