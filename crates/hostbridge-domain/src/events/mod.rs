//! Domain events
//!
//! Events published for observability. Publishing never influences the
//! outcome of the operation that produced the event.

mod port_selection;

pub use port_selection::{PortSelectionEvent, SelectionOutcome};
