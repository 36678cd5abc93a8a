//! Coin-operated turnstile
//!
//! This demo shows guarded rules, first-match ordering and callbacks.
//!
//! Key concepts:
//! - Guards read host state every time an event is dispatched
//! - The first eligible rule wins; later rules act as fallbacks
//! - `before`/`after` flank real changes, `self` fires on loops
//!
//! Run with: RUST_LOG=statechart=debug cargo run --example turnstile

use statechart::builder::StateMachineBuilder;
use statechart::core::{Guard, TransitionContext};
use statechart::state_enum;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

state_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
        Broken,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "statechart=info".to_string()))
        .init();

    println!("=== Turnstile Example ===\n");

    let jams = Arc::new(AtomicU32::new(0));
    let jam_count = Arc::clone(&jams);

    let mut turnstile = StateMachineBuilder::new()
        .add_states([Turnstile::Locked, Turnstile::Unlocked, Turnstile::Broken])?
        .set_initial_state(Turnstile::Locked)?
        .when(
            "push",
            Guard::new(move |_ctx: &TransitionContext<'_, Turnstile>| {
                jam_count.load(Ordering::SeqCst) >= 3
            }),
            Turnstile::Locked,
            Turnstile::Broken,
        )?
        .on("push", Turnstile::Locked, Turnstile::Locked)?
        .on("push", Turnstile::Unlocked, Turnstile::Locked)?
        .on("coin", Turnstile::Locked, Turnstile::Unlocked)?
        .on("coin", Turnstile::Unlocked, Turnstile::Unlocked)?
        .before("coin", |ctx: &TransitionContext<'_, Turnstile>| {
            println!("  accepting coin while {:?}", ctx.from);
            Ok(())
        })
        .on_self("coin", |_ctx: &TransitionContext<'_, Turnstile>| {
            println!("  already unlocked, returning coin");
            Ok(())
        })
        .on_self("push", {
            let jams = Arc::clone(&jams);
            move |_ctx: &TransitionContext<'_, Turnstile>| {
                let count = jams.fetch_add(1, Ordering::SeqCst) + 1;
                println!("  pushed a locked turnstile ({count} times)");
                Ok(())
            }
        })
        .build()?;

    for event in ["push", "coin", "coin", "push", "push", "push", "push", "coin"] {
        let outcome = turnstile.fire(event)?;
        println!("{event:>5} -> {:?} ({:?})", turnstile.current_state(), outcome);
    }

    println!("\nPath: {:?}", turnstile.history().get_path());
    println!("\n=== Example Complete ===");
    Ok(())
}
