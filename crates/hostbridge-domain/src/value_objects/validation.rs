//! Dependency graph validation results
//!
//! Validation collects every fault in one pass instead of stopping at the
//! first one, so a single report shows everything wrong with the graph.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of structural problem found in the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationFaultKind {
    /// The registration participates in a dependency cycle
    CircularDependency,
    /// The registration depends on (or aliases) an unregistered token
    MissingDependency,
}

/// One problem found while validating the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFault {
    /// Kind of fault
    pub kind: ValidationFaultKind,
    /// Token whose registration is faulty
    pub token: String,
    /// Human readable description
    pub detail: String,
    /// Dependency path that exhibits the fault
    pub path: Vec<String>,
}

impl ValidationFault {
    /// Cycle fault; `path` starts and ends with the same token
    pub fn circular(path: Vec<String>) -> Self {
        let token = path.first().cloned().unwrap_or_default();
        Self {
            kind: ValidationFaultKind::CircularDependency,
            detail: format!("circular dependency: {}", path.join(" -> ")),
            token,
            path,
        }
    }

    /// Missing dependency fault
    pub fn missing<S: Into<String>, D: Into<String>>(token: S, dependency: D) -> Self {
        let token = token.into();
        let dependency = dependency.into();
        Self {
            kind: ValidationFaultKind::MissingDependency,
            detail: format!("{token} depends on unregistered token {dependency}"),
            path: vec![token.clone(), dependency],
            token,
        }
    }
}

impl std::fmt::Display for ValidationFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Every fault found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    faults: Vec<ValidationFault>,
}

impl ValidationReport {
    pub fn new(faults: Vec<ValidationFault>) -> Self {
        Self { faults }
    }

    /// True when no fault was found
    pub fn is_valid(&self) -> bool {
        self.faults.is_empty()
    }

    /// All faults, in discovery order
    pub fn faults(&self) -> &[ValidationFault] {
        &self.faults
    }

    /// Faults of one kind
    pub fn faults_of(&self, kind: ValidationFaultKind) -> impl Iterator<Item = &ValidationFault> {
        self.faults.iter().filter(move |fault| fault.kind == kind)
    }

    /// Whether any fault of `kind` was found
    pub fn has(&self, kind: ValidationFaultKind) -> bool {
        self.faults_of(kind).next().is_some()
    }

    /// Convert into an error when faults were found
    pub fn into_result(self) -> Result<()> {
        if self.faults.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                faults: self.faults,
            })
        }
    }
}
