use crate::error::{LedgerError, Result};
use crate::types::{LedgerQuery, Record};
use sensemaker_protocol::{AgentId, Entry, EntryId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

/// The upstream ledger as seen by the engine.
///
/// Each call is atomic on its own; nothing spans two calls. Replication,
/// signing and gossip are the implementor's business.
pub trait Ledger: Send + Sync {
    /// Append `entry` on behalf of `author`. Every call yields a new id, even
    /// for a payload identical to an earlier one.
    fn put(&self, author: &AgentId, entry: Entry) -> Result<Record>;

    fn get(&self, id: &EntryId) -> Result<Record>;

    fn query(&self, query: &LedgerQuery) -> Result<Vec<Record>>;

    /// Tombstone a record. Deleted records vanish from `get` and default queries.
    fn delete(&self, author: &AgentId, id: &EntryId) -> Result<()>;
}

#[derive(Debug, Default)]
struct LedgerState {
    records: Vec<Record>,
    index: HashMap<EntryId, usize>,
    deleted: HashSet<EntryId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerSnapshot {
    records: Vec<Record>,
    #[serde(default)]
    deleted: Vec<EntryId>,
}

/// In-process ledger behind an `RwLock`, shareable across agents via `Arc`.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<LedgerState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|state| state.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save all records, tombstones included, as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::info!("Saving ledger snapshot to {:?}", path);
        let snapshot = {
            let state = self.read()?;
            let mut deleted: Vec<EntryId> = state.deleted.iter().cloned().collect();
            deleted.sort();
            LedgerSnapshot {
                records: state.records.clone(),
                deleted,
            }
        };
        let data = serde_json::to_vec_pretty(&snapshot)?;
        std::fs::write(path, data)?;
        log::info!("Ledger snapshot saved ({} records)", snapshot.records.len());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading ledger snapshot from {:?}", path);
        let data = std::fs::read(path)?;
        let snapshot: LedgerSnapshot = serde_json::from_slice(&data)?;

        let mut state = LedgerState::default();
        for (position, record) in snapshot.records.into_iter().enumerate() {
            if record.seq != position as u64 {
                return Err(LedgerError::Other(format!(
                    "snapshot record {} has seq {} (expected {position})",
                    record.id, record.seq
                )));
            }
            state.index.insert(record.id.clone(), position);
            state.records.push(record);
        }
        for id in snapshot.deleted {
            if !state.index.contains_key(&id) {
                return Err(LedgerError::NotFound(id));
            }
            state.deleted.insert(id);
        }

        log::info!("Loaded {} ledger records", state.records.len());
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>> {
        self.state.read().map_err(|_| LedgerError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>> {
        self.state.write().map_err(|_| LedgerError::Poisoned)
    }
}

impl Ledger for MemoryLedger {
    fn put(&self, author: &AgentId, entry: Entry) -> Result<Record> {
        let mut state = self.write()?;
        let position = state.records.len();
        let seq = position as u64;
        let id = action_id(author, seq, &entry)?;
        let record = Record {
            id: id.clone(),
            author: author.clone(),
            seq,
            timestamp: entry.timestamp().unwrap_or_else(current_unix_ms),
            entry,
        };
        log::debug!(
            "ledger put {} #{seq} by {author} -> {id}",
            record.entry.kind()
        );
        state.index.insert(id, position);
        state.records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &EntryId) -> Result<Record> {
        let state = self.read()?;
        if state.deleted.contains(id) {
            return Err(LedgerError::NotFound(id.clone()));
        }
        state
            .index
            .get(id)
            .and_then(|&position| state.records.get(position))
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    fn query(&self, query: &LedgerQuery) -> Result<Vec<Record>> {
        let state = self.read()?;
        Ok(state
            .records
            .iter()
            .filter(|record| query.include_deleted || !state.deleted.contains(&record.id))
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn delete(&self, author: &AgentId, id: &EntryId) -> Result<()> {
        let mut state = self.write()?;
        if !state.index.contains_key(id) || state.deleted.contains(id) {
            return Err(LedgerError::NotFound(id.clone()));
        }
        log::debug!("ledger delete {id} by {author}");
        state.deleted.insert(id.clone());
        Ok(())
    }
}

fn action_id(author: &AgentId, seq: u64, entry: &Entry) -> Result<EntryId> {
    let payload = serde_json::to_vec(&(author, seq, entry))?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(EntryId::new(hex_encode_lower(&hasher.finalize())))
}

fn hex_encode_lower(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().saturating_mul(2));
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Wall-clock Unix milliseconds; 0 if the clock is before the epoch.
pub fn current_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|dur| u64::try_from(dur.as_millis()).ok())
        .unwrap_or(0)
}
