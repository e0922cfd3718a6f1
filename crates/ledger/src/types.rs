use sensemaker_protocol::{AgentId, Entry, EntryId, EntryKind};
use serde::{Deserialize, Serialize};

/// One write as the ledger stores it: the entry plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: EntryId,
    pub author: AgentId,
    /// Position in the ledger's append order, starting at 0.
    pub seq: u64,
    /// Unix milliseconds at which the ledger accepted the write.
    pub timestamp: u64,
    pub entry: Entry,
}

/// Selection over the ledger. Results always come back in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerQuery {
    pub kind: Option<EntryKind>,
    pub author: Option<AgentId>,
    pub include_deleted: bool,
}

impl LedgerQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn kind(kind: EntryKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_author(mut self, author: AgentId) -> Self {
        self.author = Some(author);
        self
    }

    #[must_use]
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        let kind_ok = self.kind.map_or(true, |kind| record.entry.kind() == kind);
        let author_ok = self
            .author
            .as_ref()
            .map_or(true, |author| &record.author == author);
        kind_ok && author_ok
    }
}
