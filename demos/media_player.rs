//! Media player with a compound "Active" state
//!
//! This demo shows nested states, entry points and sharing one
//! definition between several machine instances.
//!
//! Key concepts:
//! - Targeting a compound state enters its entry point
//! - `is_in` answers for the whole nested hierarchy
//! - The configuration audit reports suspicious setups as warnings
//!
//! Run with: RUST_LOG=statechart=debug cargo run --example media_player

use statechart::builder::StateMachineBuilder;
use statechart::engine::StateMachine;
use statechart::state_enum;
use std::sync::Arc;

state_enum! {
    enum Player {
        Off,
        Active,
        Playing,
        Paused,
        Ejected,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "statechart=info".to_string()))
        .init();

    println!("=== Media Player Example ===\n");

    let definition = StateMachineBuilder::new()
        .add_states([Player::Off, Player::Active, Player::Ejected])?
        .add_compound_state(Player::Playing, Player::Active)?
        .add_compound_state(Player::Paused, Player::Active)?
        .set_entry_point(Player::Playing)?
        .set_exit_point(Player::Paused)?
        .set_initial_state(Player::Off)?
        .set_final_state(Player::Ejected)?
        .on("power", Player::Off, Player::Active)?
        .on("pause", Player::Playing, Player::Paused)?
        .on("resume", Player::Paused, Player::Playing)?
        .on("eject", Player::Paused, Player::Ejected)?
        .build_definition()?;

    let mut living_room = StateMachine::new(Arc::clone(&definition));
    let mut kitchen = StateMachine::new(Arc::clone(&definition));

    living_room.fire("power")?;
    println!("Living room: {:?}", living_room.current_state());
    println!("  active? {}", living_room.is_in(&Player::Active));
    println!("  can eject? {}", living_room.can_fire("eject"));

    living_room.fire("pause")?;
    println!("Living room: {:?}", living_room.current_state());
    println!("  available: {:?}", living_room.available_events());

    living_room.fire("eject")?;
    println!("Living room final? {}", living_room.is_final());

    let outcome = kitchen.fire("pause")?;
    println!("Kitchen: {:?} ({:?})", kitchen.current_state(), outcome);

    println!("\n=== Example Complete ===");
    Ok(())
}
