//! Error handling types
//!
//! Every failure the core can report is a variant of [`Error`]. Each variant
//! carries a stable [`ErrorCode`] so callers can branch on the kind of failure
//! (for example telling "no compatible version" apart from "compatible version
//! found but failed to construct") without matching on message text.

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::constants::{AVAILABLE_VERSIONS_SEPARATOR, DEPENDENCY_PATH_SEPARATOR};
use crate::value_objects::ValidationFault;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used for foreign error sources
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure modes when reading the running host version
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostVersionError {
    /// The host did not expose a version at all
    #[error("host version is not available")]
    Absent,

    /// The host exposed an empty version string
    #[error("host version string is empty")]
    Empty,

    /// The version string does not start with an integer major version
    #[error("host version '{raw}' is not parseable")]
    Unparseable {
        /// The raw version string as read from the host
        raw: String,
    },
}

/// Main error type for HostBridge
#[derive(Error, Debug)]
pub enum Error {
    /// Operation attempted after the container was torn down
    #[error("Container disposed: cannot {operation}")]
    Disposed {
        /// The operation that was rejected
        operation: String,
    },

    /// Resource (usually a token) not found
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// A token was registered twice
    #[error("Already registered: {token}")]
    AlreadyRegistered {
        /// The token that was registered twice
        token: String,
    },

    /// Registration attempted after a passing validation froze the graph
    #[error("Registration frozen: cannot register {token} after validation")]
    RegistrationFrozen {
        /// The token whose registration was rejected
        token: String,
    },

    /// Resolution attempted before a passing validation
    #[error("Container not validated: cannot resolve {token} before validate() passes")]
    NotValidated {
        /// The token whose resolution was rejected
        token: String,
    },

    /// Circular dependency detected at resolution time
    #[error("Circular dependency detected: {}", .path.join(DEPENDENCY_PATH_SEPARATOR))]
    CircularDependency {
        /// Tokens forming the cycle, first and last entries are equal
        path: Vec<String>,
    },

    /// A factory resolved a token it never declared as a dependency
    #[error("Undeclared dependency: {token} resolved {dependency} without declaring it")]
    UndeclaredDependency {
        /// The token being constructed
        token: String,
        /// The dependency requested
        dependency: String,
    },

    /// Synchronous resolution of a token registered with an async factory
    #[error("Async factory: {token} must be resolved with resolve_async")]
    AsyncFactory {
        /// The token registered with an async factory
        token: String,
    },

    /// A stored instance does not have the type its token promises
    #[error("Type mismatch for {token}: expected {expected}")]
    TypeMismatch {
        /// The token whose instance could not be downcast
        token: String,
        /// The expected contract type name
        expected: &'static str,
    },

    /// A factory returned an error or panicked
    #[error("Factory failed for {token}: {message}")]
    FactoryFailed {
        /// The token being constructed
        token: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Graph validation found one or more faults
    #[error("Container validation failed with {} fault(s)", .faults.len())]
    Validation {
        /// Every fault found in the graph
        faults: Vec<ValidationFault>,
    },

    /// One or more teardown hooks failed during disposal
    #[error("Disposal failed for {} instance(s): {}", .failures.len(), .failures.join("; "))]
    DisposalFailed {
        /// One message per failing teardown hook
        failures: Vec<String>,
    },

    /// The running host version could not be detected
    #[error("Host version unavailable: {source}")]
    HostVersion {
        /// The underlying detection failure
        #[from]
        source: HostVersionError,
    },

    /// No registered port version is compatible with the target host version
    #[error("Port selection failed: {message}")]
    PortSelectionFailed {
        /// Description of the failure
        message: String,
        /// Target host version, when one was known
        version: Option<u32>,
        /// Every registered version, sorted ascending
        available_versions: Vec<u32>,
        /// Underlying cause (for example a version detection failure)
        #[source]
        source: Option<Box<Error>>,
    },

    /// A compatible port was selected but could not be constructed
    #[error("Port resolution failed: {message}")]
    PortResolutionFailed {
        /// Description of the failure
        message: String,
        /// Capability whose port failed to construct
        capability: String,
        /// Selected port version
        version: u32,
        /// The container failure
        #[source]
        source: Box<Error>,
    },

    /// A retried operation failed
    #[error("Operation failed: {message}")]
    OperationFailed {
        /// Name of the operation, when supplied
        operation: Option<String>,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A retry policy is not usable
    #[error("Invalid retry policy: {message}")]
    InvalidRetryPolicy {
        /// Description of the policy problem
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Stable machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Disposed,
    NotFound,
    AlreadyRegistered,
    RegistrationFrozen,
    NotValidated,
    CircularDependency,
    UndeclaredDependency,
    AsyncFactory,
    TypeMismatch,
    FactoryFailed,
    ValidationFailed,
    DisposalFailed,
    HostVersionUnavailable,
    PortSelectionFailed,
    PortResolutionFailed,
    OperationFailed,
    InvalidRetryPolicy,
    InvalidConfiguration,
    InvalidArgument,
    Internal,
}

impl ErrorCode {
    /// Screaming-snake name of the code
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disposed => "DISPOSED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::RegistrationFrozen => "REGISTRATION_FROZEN",
            Self::NotValidated => "NOT_VALIDATED",
            Self::CircularDependency => "CIRCULAR_DEPENDENCY",
            Self::UndeclaredDependency => "UNDECLARED_DEPENDENCY",
            Self::AsyncFactory => "ASYNC_FACTORY",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::FactoryFailed => "FACTORY_FAILED",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::DisposalFailed => "DISPOSAL_FAILED",
            Self::HostVersionUnavailable => "HOST_VERSION_UNAVAILABLE",
            Self::PortSelectionFailed => "PORT_SELECTION_FAILED",
            Self::PortResolutionFailed => "PORT_RESOLUTION_FAILED",
            Self::OperationFailed => "OPERATION_FAILED",
            Self::InvalidRetryPolicy => "INVALID_RETRY_POLICY",
            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Classification
impl Error {
    /// Stable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Disposed { .. } => ErrorCode::Disposed,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::AlreadyRegistered { .. } => ErrorCode::AlreadyRegistered,
            Self::RegistrationFrozen { .. } => ErrorCode::RegistrationFrozen,
            Self::NotValidated { .. } => ErrorCode::NotValidated,
            Self::CircularDependency { .. } => ErrorCode::CircularDependency,
            Self::UndeclaredDependency { .. } => ErrorCode::UndeclaredDependency,
            Self::AsyncFactory { .. } => ErrorCode::AsyncFactory,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::FactoryFailed { .. } => ErrorCode::FactoryFailed,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::DisposalFailed { .. } => ErrorCode::DisposalFailed,
            Self::HostVersion { .. } => ErrorCode::HostVersionUnavailable,
            Self::PortSelectionFailed { .. } => ErrorCode::PortSelectionFailed,
            Self::PortResolutionFailed { .. } => ErrorCode::PortResolutionFailed,
            Self::OperationFailed { .. } => ErrorCode::OperationFailed,
            Self::InvalidRetryPolicy { .. } => ErrorCode::InvalidRetryPolicy,
            Self::Configuration { .. } => ErrorCode::InvalidConfiguration,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Structured diagnostics for errors that carry more than a message
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::PortSelectionFailed {
                version,
                available_versions,
                ..
            } => Some(json!({
                "version": version,
                "availableVersions": join_versions(available_versions),
            })),
            Self::PortResolutionFailed {
                capability,
                version,
                source,
                ..
            } => Some(json!({
                "capability": capability,
                "version": version,
                "cause": source.code().as_str(),
            })),
            Self::CircularDependency { path } => Some(json!({ "path": path })),
            Self::Validation { faults } => Some(json!({ "faults": faults })),
            _ => None,
        }
    }
}

/// Render versions as `"13, 14"`
pub fn join_versions(versions: &[u32]) -> String {
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(AVAILABLE_VERSIONS_SEPARATOR)
}

// Container error creation methods
impl Error {
    /// Create a disposed error for the given operation
    pub fn disposed<S: Into<String>>(operation: S) -> Self {
        Self::Disposed {
            operation: operation.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a factory failure without a source
    pub fn factory_failed<T: Into<String>, M: Into<String>>(token: T, message: M) -> Self {
        Self::FactoryFailed {
            token: token.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a factory failure wrapping the factory's own error
    pub fn factory_failed_with_source<
        T: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        token: T,
        source: E,
    ) -> Self {
        Self::FactoryFailed {
            token: token.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

// Port error creation methods
impl Error {
    /// Create a selection failure for a target version with no compatible port
    pub fn port_selection_failed(version: u32, available_versions: Vec<u32>) -> Self {
        let message = if available_versions.is_empty() {
            format!("no port versions registered (host version {version})")
        } else {
            format!(
                "no compatible port for host version {version} (available: {})",
                join_versions(&available_versions)
            )
        };
        Self::PortSelectionFailed {
            message,
            version: Some(version),
            available_versions,
            source: None,
        }
    }

    /// Create a selection failure caused by failed version detection
    pub fn port_selection_detection_failed(cause: Error, available_versions: Vec<u32>) -> Self {
        Self::PortSelectionFailed {
            message: format!("could not detect host version: {cause}"),
            version: None,
            available_versions,
            source: Some(Box::new(cause)),
        }
    }

    /// Create a resolution failure for a selected port
    pub fn port_resolution_failed<S: Into<String>>(
        capability: S,
        version: u32,
        cause: Error,
    ) -> Self {
        let capability = capability.into();
        Self::PortResolutionFailed {
            message: format!("{capability} port for version {version} could not be resolved: {cause}"),
            capability,
            version,
            source: Box::new(cause),
        }
    }
}

// Operation and configuration error creation methods
impl Error {
    /// Create an operation failure
    pub fn operation_failed<S: Into<String>>(message: S) -> Self {
        Self::OperationFailed {
            operation: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create an operation failure with source
    pub fn operation_failed_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::OperationFailed {
            operation: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid retry policy error
    pub fn invalid_retry_policy<S: Into<String>>(message: S) -> Self {
        Self::InvalidRetryPolicy {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
