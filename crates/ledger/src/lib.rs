//! # Sensemaker Ledger
//!
//! The contract the engine expects from its upstream ledger, plus an
//! in-memory implementation.
//!
//! ## Architecture
//!
//! ```text
//! Engine
//!     │
//!     ├──> put(author, entry) ──> Record { id, author, seq, timestamp }
//!     │
//!     ├──> get(id) / query(kind, author)
//!     │
//!     └──> delete(author, id)  (tombstone)
//! ```
//!
//! A real deployment backs this with a content-addressed, replicated ledger;
//! `MemoryLedger` keeps everything in one process and can snapshot to JSON.
//!
//! ## Example
//!
//! ```
//! use sensemaker_ledger::{Ledger, LedgerQuery, MemoryLedger};
//! use sensemaker_protocol::{AgentId, Entry, EntryKind, Range, RangeKind};
//!
//! let ledger = MemoryLedger::new();
//! let author = AgentId::new("activator");
//! let record = ledger.put(
//!     &author,
//!     Entry::Range(Range { name: "1-10".into(), kind: RangeKind::Integer { min: 1, max: 10 } }),
//! )?;
//!
//! assert_eq!(ledger.get(&record.id)?.author, author);
//! assert_eq!(ledger.query(&LedgerQuery::kind(EntryKind::Range))?.len(), 1);
//! # Ok::<(), sensemaker_ledger::LedgerError>(())
//! ```

mod error;
mod store;
mod types;

pub use error::{LedgerError, Result};
pub use store::{current_unix_ms, Ledger, MemoryLedger};
pub use types::{LedgerQuery, Record};
