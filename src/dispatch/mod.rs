//! Phase dispatcher.
//!
//! Maps every `Phase` to the handler functions that implement its four
//! operations. A board never inspects its phase beyond its class; all
//! phase-specific behaviour is routed through a `PhaseRegistry`.
//!
//! ## Key Features
//!
//! - **Table-driven**: one `PhaseHandler` per phase, stored in an `FxHashMap`
//! - **Checked coverage**: `PhaseRegistry::verify` fails with the list of
//!   phases lacking handlers, so an incomplete table is caught at startup
//! - **Explicit faults**: dispatching an unregistered phase returns
//!   `BoardError::UnhandledPhase` naming the phase and the operation
//!
//! ## Usage
//!
//! ```
//! use ccg_search::board::Phase;
//! use ccg_search::dispatch::PhaseRegistry;
//!
//! let registry = PhaseRegistry::new();
//! assert!(registry.verify().is_err());
//! assert!(!registry.contains(Phase::PlayerTurnStart));
//! ```

mod registry;

pub use registry::{
    ApplyFn, DisplayNameFn, EnumerateFn, Operation, PhaseHandler, PhaseRegistry, ProposeFn,
};
