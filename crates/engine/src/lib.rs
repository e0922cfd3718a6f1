//! # Sensemaker Engine
//!
//! Turns individual assessments of shared resources into aggregate
//! judgments and ranked views.
//!
//! ## Architecture
//!
//! ```text
//! Sensemaker (one handle per calling agent)
//!     │
//!     ├──> registry      ranges, dimensions, resource defs, methods, contexts
//!     ├──> assessments   hand-entered values on subjective dimensions
//!     ├──> aggregation   run_method: Sum / Average into computed dimensions
//!     ├──> context       thresholds + order_by over latest values
//!     ├──> atomic        computed dimension + its method in one call
//!     ├──> widgets       widget registrations and per-resource-def trays
//!     └──> query         read-side filters
//!           │
//!           ▼
//!     AuthorizationGuard ──> Ledger (append-only, shared)
//! ```
//!
//! Configuration entries are written only by the community activator named
//! in [`EngineConfig`]. Assessments are open to every agent.
//!
//! The range catalog (`create_range` / `get_ranges`) is informational: it
//! lists named ranges for the UI to offer when a dimension is defined. A
//! [`Dimension`](sensemaker_protocol::Dimension) embeds its own `Range` by
//! value and never refers back to a catalog entry, so validation and
//! aggregation read only the embedded copy.

mod aggregation;
mod assessments;
mod atomic;
mod config;
mod context;
mod error;
mod guard;
mod query;
mod registry;
mod sensemaker;
mod widgets;

pub use aggregation::aggregate;
pub use config::{EngineConfig, COMMUNITY_ACTIVATOR_ENV, CONFIG_PATH_ENV};
pub use error::{EngineError, ErrorCategory, Result};
pub use guard::AuthorizationGuard;
pub use sensemaker::Sensemaker;
