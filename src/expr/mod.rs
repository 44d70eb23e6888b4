//! Default rule compiler backed by `evalexpr`.
//!
//! Contexts are bound into an expression scope before every evaluation:
//! - an object binds each field as a variable, nested objects flatten to
//!   dotted names (`order.total`)
//! - any other value binds to a single variable, `item` unless configured
//!
//! Integral numbers become `Int`, other numbers `Float`, arrays become tuples
//! and `null` becomes the empty value. An expression that references an
//! unbound variable or does not produce a boolean fails to evaluate.

use crate::core::{Rule, RuleCompiler, RuleError};
use evalexpr::{ContextWithMutableVariables, HashMapContext, Node, Value as ExprValue};
use serde_json::Value;
use std::sync::Arc;

/// Variable name used for non-object contexts.
pub const DEFAULT_ITEM_BINDING: &str = "item";

/// Compiles rule expressions with `evalexpr`.
///
/// # Example
///
/// ```rust
/// use statewright::core::RuleCompiler;
/// use statewright::expr::ExprCompiler;
/// use serde_json::json;
///
/// let compiler = ExprCompiler::default();
/// let rule = compiler.compile("value > 0 && label == \"ok\"").unwrap();
///
/// assert_eq!(rule.evaluate(&json!({"value": 3, "label": "ok"})), Ok(true));
/// assert_eq!(rule.evaluate(&json!({"value": -3, "label": "ok"})), Ok(false));
///
/// let scalar = compiler.compile("item % 2 == 0").unwrap();
/// assert_eq!(scalar.evaluate(&json!(4)), Ok(true));
/// ```
#[derive(Clone, Debug)]
pub struct ExprCompiler {
    item_binding: String,
}

impl Default for ExprCompiler {
    fn default() -> Self {
        Self {
            item_binding: DEFAULT_ITEM_BINDING.to_string(),
        }
    }
}

impl ExprCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another variable name for non-object contexts.
    pub fn with_item_binding(mut self, name: impl Into<String>) -> Self {
        self.item_binding = name.into();
        self
    }

    pub fn item_binding(&self) -> &str {
        &self.item_binding
    }
}

impl RuleCompiler for ExprCompiler {
    fn compile(&self, expression: &str) -> Result<Rule, RuleError> {
        let node = evalexpr::build_operator_tree(expression).map_err(|err| RuleError::Parse {
            expression: expression.to_string(),
            message: err.to_string(),
        })?;

        let node: Arc<Node> = Arc::new(node);
        let item_binding = self.item_binding.clone();
        let source = expression.to_string();

        Ok(Rule::new(expression, move |context: &Value| {
            let fail = |message: String| RuleError::Evaluation {
                expression: source.clone(),
                message,
            };

            let scope = bind_context(context, &item_binding).map_err(|err| fail(err.to_string()))?;
            node.eval_boolean_with_context(&scope)
                .map_err(|err| fail(err.to_string()))
        }))
    }
}

fn bind_context(context: &Value, item_binding: &str) -> evalexpr::EvalexprResult<HashMapContext> {
    let mut scope = HashMapContext::new();
    match context {
        Value::Object(fields) => {
            for (key, value) in fields {
                bind_value(&mut scope, key.clone(), value)?;
            }
        }
        other => bind_value(&mut scope, item_binding.to_string(), other)?,
    }
    Ok(scope)
}

fn bind_value(
    scope: &mut HashMapContext,
    name: String,
    value: &Value,
) -> evalexpr::EvalexprResult<()> {
    match value {
        Value::Object(fields) => {
            for (key, nested) in fields {
                bind_value(scope, format!("{name}.{key}"), nested)?;
            }
            Ok(())
        }
        other => scope.set_value(name, to_expr_value(other)),
    }
}

fn to_expr_value(value: &Value) -> ExprValue {
    match value {
        Value::Null => ExprValue::Empty,
        Value::Bool(b) => ExprValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ExprValue::Int(i),
            None => ExprValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ExprValue::String(s.clone()),
        Value::Array(items) => ExprValue::Tuple(items.iter().map(to_expr_value).collect()),
        // objects nested in arrays have no expression form
        Value::Object(_) => ExprValue::Empty,
    }
}
