//! Graphviz DOT export.

use crate::machine::Machine;

impl Machine {
    /// Render the machine as a Graphviz DOT digraph.
    ///
    /// One node line per state, then one edge line per transition labelled
    /// with the transition key, both in declaration order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statewright::builder::ActionRegistry;
    /// use statewright::machine::Machine;
    /// use statewright::schema::Schema;
    ///
    /// let schema = Schema::from_yaml_str(r#"
    /// machine:
    ///   initial_state: state1
    /// states:
    ///   state1:
    ///     transitions:
    ///       to_state2: { destination: state2 }
    ///   state2: {}
    /// "#).unwrap();
    /// let machine = Machine::new(&schema, &ActionRegistry::new()).unwrap();
    ///
    /// assert_eq!(
    ///     machine.graph(),
    ///     "digraph {\n    \"state1\" [label=\"state1\"]\n    \"state2\" [label=\"state2\"]\n    \"state1\" -> \"state2\" [label=\"to_state2\"]\n}"
    /// );
    /// ```
    pub fn graph(&self) -> String {
        let nodes = self.states().keys().map(|key| {
            let key = escape(key);
            format!("    \"{key}\" [label=\"{key}\"]")
        });

        let edges = self.transitions().values().map(|transition| {
            format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"]",
                escape(self.origin(transition).key()),
                escape(self.destination(transition).key()),
                escape(transition.key()),
            )
        });

        let lines: Vec<String> = nodes.chain(edges).collect();
        format!("digraph {{\n{}\n}}", lines.join("\n"))
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
