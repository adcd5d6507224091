//! Reading and writing the state attribute of a subject.
//!
//! Typed subjects implement [`HasState`] and get [`StateAccessor`] for free;
//! the attribute name a machine was built with is ignored for them, and no
//! lookup can fail. Record-shaped dynamic subjects (`serde_json::Value`
//! objects) are addressed by attribute name and report shape mismatches as
//! [`InternalError`].

use super::state::State;
use crate::machine::InternalError;
use serde_json::Value;

/// Typed access to a subject's current state.
///
/// # Example
///
/// ```rust
/// use statebound::{HasState, State};
///
/// struct Order {
///     status: State,
/// }
///
/// impl HasState for Order {
///     fn state(&self) -> State {
///         self.status.clone()
///     }
///
///     fn set_state(&mut self, state: State) {
///         self.status = state;
///     }
/// }
/// ```
pub trait HasState {
    fn state(&self) -> State;

    fn set_state(&mut self, state: State);
}

/// Attribute-addressed access to a subject's current state.
pub trait StateAccessor {
    /// Read the state stored under `attribute`.
    fn read_state(&self, attribute: &str) -> Result<State, InternalError>;

    /// Overwrite the state stored under `attribute`.
    fn write_state(&mut self, attribute: &str, state: State) -> Result<(), InternalError>;
}

impl<T: HasState> StateAccessor for T {
    fn read_state(&self, _attribute: &str) -> Result<State, InternalError> {
        Ok(HasState::state(self))
    }

    fn write_state(&mut self, _attribute: &str, state: State) -> Result<(), InternalError> {
        HasState::set_state(self, state);
        Ok(())
    }
}

impl StateAccessor for Value {
    fn read_state(&self, attribute: &str) -> Result<State, InternalError> {
        let record = self.as_object().ok_or(InternalError::NotARecord)?;
        match record.get(attribute) {
            Some(Value::String(s)) => Ok(State::from(s.as_str())),
            Some(_) => Err(InternalError::NotAssignable {
                attribute: attribute.to_owned(),
            }),
            None => Err(InternalError::MissingAttribute {
                attribute: attribute.to_owned(),
            }),
        }
    }

    fn write_state(&mut self, attribute: &str, state: State) -> Result<(), InternalError> {
        let record = self.as_object_mut().ok_or(InternalError::NotARecord)?;
        match record.get_mut(attribute) {
            Some(slot @ Value::String(_)) => {
                *slot = Value::String(state.into_inner());
                Ok(())
            }
            Some(_) => Err(InternalError::NotAssignable {
                attribute: attribute.to_owned(),
            }),
            None => Err(InternalError::MissingAttribute {
                attribute: attribute.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Ticket {
        status: State,
    }

    impl HasState for Ticket {
        fn state(&self) -> State {
            self.status.clone()
        }

        fn set_state(&mut self, state: State) {
            self.status = state;
        }
    }

    #[test]
    fn typed_subject_ignores_attribute_name() {
        let mut ticket = Ticket {
            status: State::from("open"),
        };

        assert_eq!(ticket.read_state("anything").unwrap(), "open");
        ticket.write_state("whatever", State::from("closed")).unwrap();
        assert_eq!(ticket.status, "closed");
    }

    #[test]
    fn record_reads_and_writes_named_attribute() {
        let mut record = json!({ "id": 7, "status": "open" });

        assert_eq!(record.read_state("status").unwrap(), "open");
        record.write_state("status", State::from("closed")).unwrap();
        assert_eq!(record["status"], "closed");
    }

    #[test]
    fn non_record_is_rejected() {
        let mut value = json!(["open"]);

        assert_eq!(value.read_state("status"), Err(InternalError::NotARecord));
        assert_eq!(
            value.write_state("status", State::from("x")),
            Err(InternalError::NotARecord)
        );
    }

    #[test]
    fn missing_attribute_is_rejected() {
        let record = json!({ "id": 7 });

        assert_eq!(
            record.read_state("status"),
            Err(InternalError::MissingAttribute {
                attribute: "status".into()
            })
        );
    }

    #[test]
    fn non_string_attribute_is_not_assignable() {
        let mut record = json!({ "status": 3 });

        assert_eq!(
            record.read_state("status"),
            Err(InternalError::NotAssignable {
                attribute: "status".into()
            })
        );
        assert!(record.write_state("status", State::from("x")).is_err());
        assert_eq!(record["status"], 3);
    }
}
