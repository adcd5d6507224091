//! End-to-end firing scenarios against typed and record-shaped subjects.

use serde_json::json;
use statebound::builder::{EventBuilder, MachineBuilder, MachineSpec};
use statebound::persistence::{decode, encode, StateValue};
use statebound::{
    events, EventContext, EventDefinition, FireOptions, FsmError, Guard, HasState, InternalError,
    Machine, Registry, State,
};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Job {
    status: State,
}

impl Job {
    fn new(status: &str) -> Self {
        Self {
            status: State::from(status),
        }
    }
}

impl HasState for Job {
    fn state(&self) -> State {
        self.status.clone()
    }

    fn set_state(&mut self, state: State) {
        self.status = state;
    }
}

#[derive(Debug)]
struct Declined(&'static str);

impl fmt::Display for Declined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "declined: {}", self.0)
    }
}

impl std::error::Error for Declined {}

fn make_machine(accept: bool) -> Machine<Job> {
    MachineBuilder::new("status")
        .event(
            EventBuilder::new()
                .name("make")
                .from("started")
                .to("finished")
                .when(move |_: &EventContext<'_, Job>| accept),
        )
        .unwrap()
        .build()
}

#[test]
fn accepting_guard_fires() {
    let machine = make_machine(true);
    let mut job = Job::new("started");

    machine.fire(&mut job, "make").unwrap();

    assert_eq!(job.status, "finished");
}

#[test]
fn rejecting_guard_leaves_state() {
    let machine = make_machine(false);
    let mut job = Job::new("started");

    let err = machine.fire(&mut job, "make").unwrap_err();

    match err {
        FsmError::InvalidTransition { event, state } => {
            assert_eq!(event, "make");
            assert_eq!(state, "started");
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
    assert_eq!(job.status, "started");
}

#[test]
fn undefined_event_is_unknown() {
    let machine = make_machine(true);
    let mut job = Job::new("started");

    let err = machine.fire(&mut job, "no_such_event").unwrap_err();

    assert!(matches!(err, FsmError::UnknownEvent { ref event } if event == "no_such_event"));
    assert_eq!(err.to_string(), "event no_such_event does not exist");
    assert_eq!(job.status, "started");
}

#[test]
fn no_outgoing_transitions_yield_empty_list() {
    let machine: Machine<Job> = Machine::new("status", events! {
        "make": ["finished"] => "archived",
    });
    let job = Job::new("started");

    assert!(machine
        .permitted_events(&job, FireOptions::default())
        .unwrap()
        .is_empty());
    assert!(machine
        .permitted_states(&job, FireOptions::default())
        .unwrap()
        .is_empty());
}

#[test]
fn event_defined_elsewhere_is_unknown_from_here() {
    let machine: Machine<Job> = Machine::new("status", events! {
        "make": ["finished"] => "archived",
    });
    let mut job = Job::new("started");

    assert!(matches!(
        machine.fire(&mut job, "make"),
        Err(FsmError::UnknownEvent { .. })
    ));
    assert!(!machine
        .may_fire(&job, "make", FireOptions::skipping_guards())
        .unwrap());
}

#[test]
fn order_lifecycle_walks_through_states() {
    let machine: Machine<Job> = Machine::new("status", events! {
        "pay": ["draft"] => "paid",
        "ship": ["paid"] => "shipped",
        "deliver": ["shipped"] => "delivered",
        "cancel": ["draft", "paid"] => "cancelled",
    });
    let mut order = Job::new("draft");

    assert_eq!(
        machine.permitted_events(&order, FireOptions::default()).unwrap(),
        vec!["pay", "cancel"]
    );

    for event in ["pay", "ship", "deliver"] {
        machine.fire(&mut order, event).unwrap();
    }

    assert_eq!(order.status, "delivered");
    assert!(matches!(
        machine.fire(&mut order, "cancel"),
        Err(FsmError::UnknownEvent { .. })
    ));
}

#[test]
fn guard_error_is_returned_unchanged() {
    let machine: Machine<Job> = MachineBuilder::new("status")
        .event(
            EventBuilder::new()
                .name("make")
                .from("started")
                .to("finished")
                .try_when(|_: &EventContext<'_, Job>| Err(Declined("quota").into())),
        )
        .unwrap()
        .build();
    let mut job = Job::new("started");

    let err = machine.fire(&mut job, "make").unwrap_err();
    assert!(matches!(err, FsmError::Guard(_)));
    assert_eq!(err.to_string(), "declined: quota");
    assert!(err.into_domain().unwrap().downcast_ref::<Declined>().is_some());
    assert_eq!(job.status, "started");

    assert!(machine
        .may_fire(&job, "make", FireOptions::default())
        .is_err());
    assert!(machine
        .may_fire(&job, "make", FireOptions::skipping_guards())
        .unwrap());
}

#[test]
fn guards_short_circuit_in_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);

    let machine: Machine<Job> = MachineBuilder::new("status")
        .event(
            EventBuilder::new()
                .name("make")
                .from("started")
                .to("finished")
                .guard(Guard::new(|_: &EventContext<'_, Job>| false))
                .guard(Guard::new(move |_: &EventContext<'_, Job>| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    true
                })),
        )
        .unwrap()
        .build();
    let mut job = Job::new("started");

    assert!(machine.fire(&mut job, "make").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn hooks_observe_both_sides_of_the_write() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let before = Arc::clone(&seen);
    let after = Arc::clone(&seen);

    let machine: Machine<Job> = MachineBuilder::new("status")
        .event(
            EventBuilder::new()
                .name("make")
                .from("started")
                .to("finished")
                .before(move |ctx: &EventContext<'_, Job>| {
                    before.lock().unwrap().push(format!("before:{}", ctx.subject().status));
                    Ok(())
                })
                .after(move |ctx: &EventContext<'_, Job>| {
                    after.lock().unwrap().push(format!("after:{}", ctx.subject().status));
                    Ok(())
                }),
        )
        .unwrap()
        .build();
    let mut job = Job::new("started");

    machine.fire(&mut job, "make").unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["before:started".to_string(), "after:finished".to_string()]
    );
}

#[test]
fn failing_hooks_report_whether_state_changed() {
    let machine: Machine<Job> = MachineBuilder::new("status")
        .event(EventBuilder::new().name("make").from("started").to("finished"))
        .unwrap()
        .event(EventBuilder::new().name("undo").from("finished").to("started"))
        .unwrap()
        .before("make", |_: &EventContext<'_, Job>| Err(Declined("not yet").into()))
        .unwrap()
        .after("undo", |_: &EventContext<'_, Job>| Err(Declined("audit").into()))
        .unwrap()
        .build();

    let mut job = Job::new("started");
    let err = machine.fire(&mut job, "make").unwrap_err();
    assert!(matches!(err, FsmError::BeforeHook(_)));
    assert!(!err.is_post_mutation());
    assert_eq!(job.status, "started");

    let mut done = Job::new("finished");
    let err = machine.fire(&mut done, "undo").unwrap_err();
    assert!(matches!(err, FsmError::AfterHook(_)));
    assert!(err.is_post_mutation());
    assert_eq!(done.status, "started");
}

#[test]
fn record_subjects_are_addressed_by_attribute() {
    let machine: Machine<serde_json::Value> = Machine::new(
        "phase",
        vec![EventDefinition::new("start", ["idle"], "running")],
    );

    let mut job = json!({ "phase": "idle", "id": 7 });
    machine.fire(&mut job, "start").unwrap();
    assert_eq!(job, json!({ "phase": "running", "id": 7 }));

    let mut missing = json!({ "status": "idle" });
    assert!(matches!(
        machine.fire(&mut missing, "start"),
        Err(FsmError::Internal(InternalError::MissingAttribute { .. }))
    ));

    let mut numeric = json!({ "phase": 3 });
    assert!(matches!(
        machine.fire(&mut numeric, "start"),
        Err(FsmError::Internal(InternalError::NotAssignable { .. }))
    ));

    let scalar = json!("idle");
    assert!(matches!(
        machine.permitted_events(&scalar, FireOptions::default()),
        Err(FsmError::Internal(InternalError::NotARecord))
    ));
}

#[test]
fn declarative_machine_accepts_code_guards() {
    let definition = MachineSpec::from_value(json!({
        "attribute": "status",
        "events": [
            { "name": "submit", "from": ["draft"], "to": "review" },
            { "name": "approve", "from": ["review"], "to": "published" }
        ]
    }))
    .unwrap();

    let machine = definition
        .into_builder::<serde_json::Value>()
        .when("approve", |ctx: &EventContext<'_, serde_json::Value>| {
            ctx.subject()["reviewer"].is_string()
        })
        .unwrap()
        .build();

    let mut doc = json!({ "status": "draft" });
    machine.fire(&mut doc, "submit").unwrap();
    assert!(machine.fire(&mut doc, "approve").is_err());

    doc["reviewer"] = json!("ana");
    machine.fire(&mut doc, "approve").unwrap();
    assert_eq!(doc["status"], "published");
}

#[test]
fn stored_state_resumes_in_registry() {
    let mut registry = Registry::new();
    let handle = registry.register::<Job>("status", events! {
        "pay": ["draft"] => "paid",
        "ship": ["paid"] => "shipped",
    });

    let stored = StateValue::from(&b"paid"[..]);
    let mut job = Job {
        status: decode(stored).unwrap(),
    };

    registry.fire(&mut job, "ship").unwrap();
    assert_eq!(encode(&job.status), StateValue::Text("shipped".into()));
    assert!(handle
        .permitted_events(&job, FireOptions::default())
        .unwrap()
        .is_empty());
}
