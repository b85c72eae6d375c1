//! Interacting with a Value Store
//!
//! This example walks a deployed store through its operations.
//!
//! Key concepts:
//! - Open operations (increment, addValue) callable by anyone
//! - Owner-only operations (setValue, reset, transferOwnership)
//! - Rejected calls leave the store unchanged
//! - Every committed call appends exactly one event
//!
//! Run with: RUST_LOG=valuestore=debug cargo run --example interact

use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use valuestore::builder::SubstrateBuilder;
use valuestore::clock::SystemClock;
use valuestore::core::Identity;

fn print_info(substrate: &valuestore::Substrate) {
    let info = substrate.storage_info();
    println!("   - Value: {}", info.value);
    println!("   - Owner: {}", info.owner);
    println!("   - Last Updated: {}", info.last_updated.to_rfc3339());
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Value Store Interaction Example ===\n");

    let owner = Identity::repeat_byte(0xA1);
    let user1 = Identity::repeat_byte(0xB2);
    let user2 = Identity::repeat_byte(0xC3);

    println!("Interacting as owner: {owner}");
    println!("Additional users: {user1}, {user2}");

    let substrate = SubstrateBuilder::new()
        .deployer(owner)
        .initial_value(42)
        .clock(Arc::new(SystemClock))
        .build()?;

    println!("\nInitial state:");
    print_info(&substrate);

    println!("\n1. increment() by {user1}");
    substrate.increment(user1)?;
    println!("   ✓ Value after increment: {}", substrate.value());

    println!("\n2. addValue(10) by {user2}");
    substrate.add_value(user2, 10)?;
    println!("   ✓ Value after adding 10: {}", substrate.value());

    println!("\n3. setValue(100) by owner");
    substrate.set_value(owner, 100)?;
    println!("   ✓ Value after setValue(100): {}", substrate.value());

    println!("\n4. setValue(200) by {user1} (should fail)");
    match substrate.set_value(user1, 200) {
        Ok(_) => println!("   ✗ Unexpected success"),
        Err(e) => println!("   ✓ Rejected: {e}"),
    }
    println!("   Value unchanged: {}", substrate.value());

    println!("\n5. decrement() by {user2}");
    substrate.decrement(user2)?;
    println!("   ✓ Value after decrement: {}", substrate.value());

    println!("\n6. reset() by owner");
    substrate.reset(owner)?;
    println!("   ✓ Value after reset: {}", substrate.value());

    println!("\n7. decrement() at zero (should fail)");
    if let Err(e) = substrate.decrement(user1) {
        println!("   ✓ Rejected: {e}");
    }

    println!("\nFinal state:");
    print_info(&substrate);

    println!("\nEvents:");
    for record in substrate.events() {
        println!("   #{} {:?}", record.sequence, record.event);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
