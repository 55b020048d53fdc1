//! Bootstrap Tests
//!
//! End-to-end wiring: configuration to capability services, with versioned
//! host adapters registered on the bridge's container.
