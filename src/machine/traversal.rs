//! Bulk traversal of a machine over a sequence of context items.
//!
//! Every helper repeats the same step per item: resolve the next state with
//! [`Machine::progress`] using the item as context, then invoke that state's
//! action. The first error stops the traversal; later items are not touched.

use crate::core::State;
use crate::machine::error::TransitionError;
use crate::machine::Machine;
use serde_json::Value;
use std::iter::FusedIterator;

/// Lazy sequence of action results produced by [`Machine::map_action`].
///
/// Yields one result per input item, in input order. After an error it
/// yields nothing more.
pub struct MapActions<'m, I> {
    machine: &'m Machine,
    current: Option<&'m State>,
    items: I,
}

impl<'m, I> MapActions<'m, I> {
    /// State reached by the last successful step, `None` after an error.
    pub fn current(&self) -> Option<&'m State> {
        self.current
    }
}

impl<'m, I> Iterator for MapActions<'m, I>
where
    I: Iterator<Item = Value>,
{
    type Item = Result<Value, TransitionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let item = self.items.next()?;

        let machine = self.machine;
        let result = match machine.progress(current, &item) {
            Ok(next) => {
                self.current = Some(next);
                next.do_action(std::slice::from_ref(&item))
            }
            Err(err) => Err(err),
        };

        if result.is_err() {
            self.current = None;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // any item may fail and end the sequence
        match self.current {
            Some(_) => (0, self.items.size_hint().1),
            None => (0, Some(0)),
        }
    }
}

impl<'m, I> FusedIterator for MapActions<'m, I> where I: Iterator<Item = Value> {}

impl Machine {
    /// Map every item through the machine, yielding each resolved state's
    /// action result.
    ///
    /// The action receives `[item]`. Nothing is evaluated until the returned
    /// iterator is advanced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statewright::builder::ActionRegistry;
    /// use statewright::machine::Machine;
    /// use statewright::schema::Schema;
    /// use serde_json::{json, Value};
    ///
    /// let schema = Schema::from_yaml_str(r#"
    /// machine:
    ///   initial_state: start
    /// states:
    ///   start:
    ///     transitions:
    ///       go: { destination: double }
    ///   double:
    ///     action: double
    ///     transitions:
    ///       again: { destination: double }
    /// "#).unwrap();
    ///
    /// let actions = ActionRegistry::new().register("double", |args: &[Value]| {
    ///     Ok(json!(args[0].as_i64().unwrap_or(0) * 2))
    /// });
    /// let machine = Machine::new(&schema, &actions).unwrap();
    ///
    /// let doubled: Result<Vec<Value>, _> = machine
    ///     .map_action(machine.initial(), vec![json!(1), json!(2), json!(3)])
    ///     .collect();
    /// assert_eq!(doubled.unwrap(), vec![json!(2), json!(4), json!(6)]);
    /// ```
    pub fn map_action<'m, I>(&'m self, start: &'m State, items: I) -> MapActions<'m, I::IntoIter>
    where
        I: IntoIterator<Item = Value>,
    {
        MapActions {
            machine: self,
            current: Some(start),
            items: items.into_iter(),
        }
    }

    /// Fold the items through the machine starting from `init`.
    ///
    /// Every item, the first included, is resolved and then passed to the
    /// resolved state's action as `[accumulator, item]`; the result becomes
    /// the new accumulator.
    pub fn fold_action<I>(&self, start: &State, items: I, init: Value) -> Result<Value, TransitionError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.fold_from(start, items.into_iter(), init)
    }

    /// Fold the items through the machine using the first item as the
    /// accumulator.
    ///
    /// The first item is taken as is: it is neither resolved nor passed to
    /// an action, and `start` is still the state the second item is resolved
    /// from. An empty sequence fails with [`TransitionError::EmptySequence`].
    pub fn reduce_action<I>(&self, start: &State, items: I) -> Result<Value, TransitionError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut items = items.into_iter();
        let init = items.next().ok_or(TransitionError::EmptySequence)?;
        self.fold_from(start, items, init)
    }

    /// Drive the machine over every item for the actions' side effects.
    pub fn for_each_action<I>(&self, start: &State, items: I) -> Result<(), TransitionError>
    where
        I: IntoIterator<Item = Value>,
    {
        self.map_action(start, items)
            .try_for_each(|result| result.map(drop))
    }

    fn fold_from<I>(&self, start: &State, items: I, init: Value) -> Result<Value, TransitionError>
    where
        I: Iterator<Item = Value>,
    {
        let mut current = start;
        let mut accumulator = init;
        for item in items {
            current = self.progress(current, &item)?;
            let args = [accumulator, item];
            accumulator = current.do_action(&args)?;
        }
        Ok(accumulator)
    }
}
