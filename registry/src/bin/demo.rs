//! Conference Registry Demo
//!
//! Walks through the registry rules against the file blob store:
//! - Attendee registration (duplicate emails are refused)
//! - Pass purchase and exhibition-scoped workshop reservations
//! - Capacity enforcement on a small workshop
//! - Pass upgrade, sales log and capacity report
//!
//! State persists between runs in `EXPOPASS_DATA_DIR`, so a second run
//! shows the rejections for work already done.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use expopass_core::environment::SystemClock;
use expopass_registry::report::total_sales;
use expopass_registry::{
    Attendee, AttendeeId, Config, ExhibitionId, FileBlobStore, PassId, Registry,
    RegistryEnvironment, RegistryError, WorkshopId,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn report(label: &str, result: Result<(), RegistryError>) {
    match result {
        Ok(()) => println!("   ✓ {label}"),
        Err(error) => println!("   ✗ {label}: {error}"),
    }
}

fn register(registry: &mut Registry, id: u32, name: &str, email: &str, phone: &str) -> AttendeeId {
    let attendee = Attendee::new(
        AttendeeId::new(id),
        name.to_string(),
        email.to_string(),
        phone.to_string(),
    );
    match registry.register_attendee(attendee) {
        Ok(()) => {
            println!("   ✓ Registered {name} <{email}>");
            AttendeeId::new(id)
        }
        Err(error) => {
            println!("   ✗ Could not register {name}: {error}");
            registry
                .find_attendee_by_email(email)
                .map_or(AttendeeId::new(id), |existing| existing.id)
        }
    }
}

fn print_workshops(registry: &Registry) {
    for exhibition in registry.exhibitions() {
        println!("   {exhibition}");
        for workshop in exhibition.workshops() {
            println!("      {workshop}");
        }
    }
}

#[allow(clippy::too_many_lines)] // Linear demo script
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), "Configuration loaded");

    let env = RegistryEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(FileBlobStore::new(&config.data_dir)),
    );
    let mut registry = if config.seed_sample_data {
        Registry::open(env)?
    } else {
        Registry::load(env)
    };

    println!("\n=== Exhibitions & Workshops ===");
    print_workshops(&registry);

    println!("\n=== Register Attendee ===");
    let alice = register(&mut registry, 1, "Alice Green", "alice@example.com", "00971-555-000");

    println!("\n=== Purchase Pass (exhibition 1 only) ===");
    report("Alice bought pass 1", registry.purchase_pass(alice, PassId::new(1)));
    if let Some(pass) = registry.pass_of(alice) {
        println!("   Alice's pass: {pass}");
    }

    println!("\n=== Reserve Workshop (should succeed) ===");
    report(
        "Alice reserved workshop 101",
        registry.reserve_workshop(alice, WorkshopId::new(101)),
    );

    println!("\n=== Reserve Workshop in Exhibition 2 (should fail) ===");
    report(
        "Alice reserved workshop 201",
        registry.reserve_workshop(alice, WorkshopId::new(201)),
    );

    println!("\n=== Capacity Test (overbooking workshop 102) ===");
    let bob = register(&mut registry, 2, "Bob", "bob@example.com", "00971-555-111");
    let carol = register(&mut registry, 3, "Carol", "carol@example.com", "00971-555-222");
    for (name, attendee) in [("Bob", bob), ("Carol", carol)] {
        report(
            &format!("{name} bought pass 1"),
            registry.purchase_pass(attendee, PassId::new(1)),
        );
    }
    let ev_charging = WorkshopId::new(102);
    for (name, attendee) in [("Alice", alice), ("Bob", bob), ("Carol", carol)] {
        report(
            &format!("{name} reserved workshop 102"),
            registry.reserve_workshop(attendee, ev_charging),
        );
    }

    println!("\n=== Workshop rosters ===");
    print_workshops(&registry);

    println!("\n=== Upgrade Pass & Reserve in Exhibition 2 ===");
    report(
        "Alice upgraded to exhibition 2",
        registry.upgrade_pass(alice, &[ExhibitionId::new(2)]),
    );
    report(
        "Alice reserved workshop 201",
        registry.reserve_workshop(alice, WorkshopId::new(201)),
    );
    println!(
        "   Alice's workshops: {}",
        registry.reserved_workshop_titles(alice).join(", ")
    );

    println!("\n=== Sales log ===");
    let sales = registry.daily_sales();
    for (day, count) in &sales {
        println!("   {day}: {count}");
    }
    println!("   total: {}", total_sales(&sales));

    println!("\n=== Capacity report ===");
    for row in registry.workshop_capacity_report() {
        println!(
            "   [{}] {} / {}: {}/{} registered, {} left",
            row.exhibition_id,
            row.exhibition_name,
            row.workshop_title,
            row.registered,
            row.capacity,
            row.spots_left
        );
    }

    println!(
        "\n=== Demo Complete === (state saved under {})",
        config.data_dir.display()
    );
    Ok(())
}
