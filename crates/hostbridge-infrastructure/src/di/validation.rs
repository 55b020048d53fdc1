//! Dependency graph validation
//!
//! Depth-first walk with three-colour marking. Every registration is visited
//! once, so the walk terminates on any graph, and each back edge yields one
//! cycle fault. Missing dependencies are reported per edge.

use std::collections::HashMap;
use std::sync::Arc;

use hostbridge_domain::{TokenKey, ValidationFault};

use super::registration::Registration;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Collect every fault in the graph
pub(crate) fn validate_graph(
    registrations: &HashMap<TokenKey, Arc<Registration>>,
) -> Vec<ValidationFault> {
    let mut roots: Vec<TokenKey> = registrations.keys().copied().collect();
    roots.sort();

    let mut walker = Walker {
        registrations,
        marks: HashMap::with_capacity(registrations.len()),
        stack: Vec::new(),
        faults: Vec::new(),
    };
    for root in roots {
        walker.visit(root);
    }
    walker.faults
}

struct Walker<'a> {
    registrations: &'a HashMap<TokenKey, Arc<Registration>>,
    marks: HashMap<TokenKey, Mark>,
    stack: Vec<TokenKey>,
    faults: Vec<ValidationFault>,
}

impl Walker<'_> {
    fn visit(&mut self, key: TokenKey) {
        match self.marks.get(&key) {
            Some(Mark::Done) => return,
            Some(Mark::Visiting) => {
                self.report_cycle(key);
                return;
            }
            None => {}
        }

        let Some(registration) = self.registrations.get(&key) else {
            return;
        };

        self.marks.insert(key, Mark::Visiting);
        self.stack.push(key);

        for dependency in registration.dependencies.iter().copied() {
            if self.registrations.contains_key(&dependency) {
                self.visit(dependency);
            } else {
                self.faults
                    .push(ValidationFault::missing(key.name(), dependency.name()));
            }
        }

        self.stack.pop();
        self.marks.insert(key, Mark::Done);
    }

    fn report_cycle(&mut self, key: TokenKey) {
        let start = self
            .stack
            .iter()
            .position(|entry| *entry == key)
            .unwrap_or(0);
        let mut path: Vec<String> = self.stack[start..]
            .iter()
            .map(|entry| entry.name().to_string())
            .collect();
        path.push(key.name().to_string());
        self.faults.push(ValidationFault::circular(path));
    }
}
