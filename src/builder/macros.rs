//! Macros for terse event tables.

/// Build a `Vec<EventDefinition<_>>` from `name: [sources] => destination`
/// rows.
///
/// # Example
///
/// ```
/// use statebound::{events, Machine};
///
/// let machine: Machine<serde_json::Value> = Machine::new("status", events! {
///     "pay": ["draft"] => "paid",
///     "ship": ["paid"] => "shipped",
///     "cancel": ["draft", "paid"] => "cancelled",
/// });
///
/// assert_eq!(machine.transitions().len(), 4);
/// ```
#[macro_export]
macro_rules! events {
    (
        $(
            $name:literal : [ $($from:expr),* $(,)? ] => $to:expr
        ),* $(,)?
    ) => {
        ::std::vec![
            $(
                $crate::EventDefinition::new($name, {
                    let from: ::std::vec::Vec<$crate::State> =
                        ::std::vec![$($crate::State::from($from)),*];
                    from
                }, $to)
            ),*
        ]
    };
}
