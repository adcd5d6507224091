//! Transition table and the permitted-event index derived from it.

use crate::core::State;
use std::collections::HashMap;

/// Identifies one row of a transition table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    pub event: String,
    pub source: State,
}

/// One `(event, source) -> destination` mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRow {
    pub key: TransitionKey,
    pub destination: State,
}

/// Immutable `(event, source) -> destination` mapping.
///
/// Rows keep the order they were first inserted in. Inserting a key that is
/// already present replaces its destination in place (last write wins) and
/// does not move the row.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rows: Vec<TransitionRow>,
    index: HashMap<String, HashMap<State, usize>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning the destination it replaced, if any.
    pub(crate) fn insert(
        &mut self,
        event: &str,
        source: State,
        destination: State,
    ) -> Option<State> {
        let by_source = self.index.entry(event.to_owned()).or_default();
        if let Some(&row) = by_source.get(&source) {
            return Some(std::mem::replace(
                &mut self.rows[row].destination,
                destination,
            ));
        }

        by_source.insert(source.clone(), self.rows.len());
        self.rows.push(TransitionRow {
            key: TransitionKey {
                event: event.to_owned(),
                source,
            },
            destination,
        });
        None
    }

    /// Destination for `event` fired from `source`.
    pub fn get(&self, event: &str, source: &State) -> Option<&State> {
        let row = *self.index.get(event)?.get(source)?;
        Some(&self.rows[row].destination)
    }

    /// True if `event` has a transition from any state.
    pub fn defines(&self, event: &str) -> bool {
        self.index.contains_key(event)
    }

    pub fn rows(&self) -> &[TransitionRow] {
        &self.rows
    }

    pub(crate) fn row(&self, index: usize) -> &TransitionRow {
        &self.rows[index]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// State -> rows originating there, in table order.
#[derive(Clone, Debug, Default)]
pub struct PermittedIndex {
    by_source: HashMap<State, Vec<usize>>,
}

impl PermittedIndex {
    /// Invert a finished table in one pass.
    pub fn from_table(table: &TransitionTable) -> Self {
        let mut by_source: HashMap<State, Vec<usize>> = HashMap::new();
        for (index, row) in table.rows().iter().enumerate() {
            by_source
                .entry(row.key.source.clone())
                .or_default()
                .push(index);
        }
        Self { by_source }
    }

    /// Row indices of transitions leaving `state`. Empty for terminal or
    /// unknown states.
    pub(crate) fn rows_from(&self, state: &State) -> &[usize] {
        self.by_source
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of events with a transition leaving `state`, in table order.
    pub fn events<'a>(
        &'a self,
        table: &'a TransitionTable,
        state: &State,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.rows_from(state)
            .iter()
            .map(move |&row| table.row(row).key.event.as_str())
    }
}
