//! Macros for ergonomic registry construction.

/// Build an [`ActionRegistry`](crate::builder::ActionRegistry) from
/// `name => callable` pairs.
///
/// # Example
///
/// ```
/// use statewright::actions;
/// use serde_json::json;
///
/// let registry = actions! {
///     "zero" => |_| Ok(json!(0)),
///     "first" => |args| Ok(args[0].clone()),
/// };
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.get("first").unwrap().call(&[json!(5)]).unwrap(), json!(5));
/// ```
#[macro_export]
macro_rules! actions {
    ($($name:expr => $func:expr),* $(,)?) => {{
        let registry = $crate::builder::ActionRegistry::new();
        $(
            let registry = registry.register($name, $func);
        )*
        registry
    }};
}
