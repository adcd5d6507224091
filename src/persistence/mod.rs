//! Encoding states for storage.
//!
//! Storage layers hand back whatever their column type produced. Bytes and
//! text decode to a [`State`]; every other kind is rejected with
//! [`CodecError::Unsupported`] instead of aborting.

use crate::core::State;

pub mod error;

pub use error::CodecError;

/// A state as read from or written to a storage column.
#[derive(Clone, Debug, PartialEq)]
pub enum StateValue {
    Null,
    Bytes(Vec<u8>),
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl StateValue {
    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }
}

impl From<&str> for StateValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for StateValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for StateValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for StateValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// Decode a stored value into a state.
///
/// # Example
///
/// ```rust
/// use statebound::persistence::{decode, CodecError, StateValue};
///
/// assert_eq!(decode(StateValue::from(&b"paid"[..])).unwrap(), "paid");
/// assert_eq!(decode(StateValue::from("paid")).unwrap(), "paid");
/// assert!(matches!(decode(StateValue::Integer(3)), Err(CodecError::Unsupported { kind: "integer" })));
/// ```
pub fn decode(value: StateValue) -> Result<State, CodecError> {
    match value {
        StateValue::Text(text) => Ok(State::from(text)),
        StateValue::Bytes(bytes) => Ok(State::from(std::str::from_utf8(&bytes)?)),
        other => Err(CodecError::Unsupported { kind: other.kind() }),
    }
}

/// Encode a state for storage. States are always stored as text.
pub fn encode(state: &State) -> StateValue {
    StateValue::Text(state.as_str().to_owned())
}

/// Byte-level codec for storage layers that persist states as blobs.
pub trait StateCodec {
    fn encode(&self, state: &State) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<State, CodecError>;
}

/// The state's label as raw UTF-8.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextCodec;

impl StateCodec for TextCodec {
    fn encode(&self, state: &State) -> Result<Vec<u8>, CodecError> {
        Ok(state.as_str().as_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<State, CodecError> {
        decode(StateValue::from(bytes))
    }
}

/// The state as a JSON string.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl StateCodec for JsonCodec {
    fn encode(&self, state: &State) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(state)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<State, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// The state in bincode's length-prefixed binary form.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl StateCodec for BincodeCodec {
    fn encode(&self, state: &State) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(state)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<State, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
