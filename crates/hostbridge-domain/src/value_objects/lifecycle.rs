//! Registration lifecycles

use serde::{Deserialize, Serialize};

/// How long a resolved instance lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// One instance per container, constructed on first resolution
    #[default]
    Singleton,
    /// A new instance on every resolution, never cached
    Transient,
}

impl Lifecycle {
    /// Whether instances are cached by the container
    pub fn is_cached(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}
