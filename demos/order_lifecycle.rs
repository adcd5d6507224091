//! Order Lifecycle
//!
//! This example walks an order through payment, shipping and delivery.
//!
//! Key concepts:
//! - Event tables with multiple source states
//! - Guards that read the subject
//! - Hooks around the state write
//! - Permitted-event queries for building a UI
//! - Resuming from a stored state
//!
//! Run with: cargo run --example order_lifecycle

use statebound::builder::{EventBuilder, MachineBuilder};
use statebound::persistence::{decode, encode, StateValue};
use statebound::{EventContext, FireOptions, FsmError, HasState, Machine, Registry, State};
use std::sync::Arc;

#[derive(Debug)]
struct Order {
    id: u64,
    status: State,
    total_cents: u64,
    address: Option<String>,
}

impl HasState for Order {
    fn state(&self) -> State {
        self.status.clone()
    }

    fn set_state(&mut self, state: State) {
        self.status = state;
    }
}

fn order_machine() -> Result<Machine<Order>, Box<dyn std::error::Error>> {
    let machine = MachineBuilder::new("status")
        .event(
            EventBuilder::new()
                .name("pay")
                .from("draft")
                .to("paid")
                .when(|ctx: &EventContext<'_, Order>| ctx.subject().total_cents > 0),
        )?
        .event(
            EventBuilder::new()
                .name("ship")
                .from("paid")
                .to("shipped")
                .when(|ctx: &EventContext<'_, Order>| ctx.subject().address.is_some())
                .before(|ctx: &EventContext<'_, Order>| {
                    println!("  printing label for order {}", ctx.subject().id);
                    Ok(())
                }),
        )?
        .event(EventBuilder::new().name("deliver").from("shipped").to("delivered"))?
        .event(
            EventBuilder::new()
                .name("cancel")
                .from_any(["draft", "paid"])
                .to("cancelled"),
        )?
        .after("cancel", |ctx: &EventContext<'_, Order>| {
            println!("  order {} cancelled from {}", ctx.subject().id, ctx.source());
            Ok(())
        })?
        .build();

    Ok(machine)
}

fn show(machine: &Machine<Order>, order: &Order) -> Result<(), FsmError> {
    println!(
        "order {} is {}; may fire {:?} (ignoring guards: {:?})",
        order.id,
        order.status,
        machine.permitted_events(order, FireOptions::default())?,
        machine.permitted_events(order, FireOptions::skipping_guards())?,
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Order Lifecycle Example ===\n");

    let mut registry = Registry::new();
    let machine: Arc<Machine<Order>> = registry.register_machine(order_machine()?);

    let mut order = Order {
        id: 1,
        status: State::from("draft"),
        total_cents: 4_200,
        address: None,
    };

    println!("--- Happy path ---");
    show(&machine, &order)?;
    machine.fire(&mut order, "pay")?;
    show(&machine, &order)?;

    match machine.fire(&mut order, "ship") {
        Err(e @ FsmError::InvalidTransition { .. }) => println!("  rejected: {e}"),
        other => println!("  unexpected: {other:?}"),
    }

    order.address = Some("221B Baker Street".into());
    machine.fire(&mut order, "ship")?;
    registry.fire(&mut order, "deliver")?;
    show(&machine, &order)?;

    match machine.fire(&mut order, "cancel") {
        Err(e @ FsmError::UnknownEvent { .. }) => println!("  rejected: {e}"),
        other => println!("  unexpected: {other:?}"),
    }

    println!("\n--- Resume from storage ---");
    let stored = encode(&State::from("paid"));
    println!("stored column value: {stored:?}");

    let mut resumed = Order {
        id: 2,
        status: decode(stored)?,
        total_cents: 1_000,
        address: None,
    };
    show(&machine, &resumed)?;
    machine.fire(&mut resumed, "cancel")?;
    show(&machine, &resumed)?;

    if let Err(e) = decode(StateValue::Integer(7)) {
        println!("  cannot resume: {e}");
    }

    Ok(())
}
