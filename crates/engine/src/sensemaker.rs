use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::guard::AuthorizationGuard;
use sensemaker_ledger::{Ledger, LedgerError, LedgerQuery};
use sensemaker_protocol::{AgentId, EntryId, EntryType, Identified};
use std::sync::Arc;

/// Call surface of the engine, bound to one calling agent.
///
/// Handles are cheap to clone; several agents can share one ledger through
/// [`Sensemaker::as_agent`]. Operations live in per-concern modules as further
/// `impl Sensemaker` blocks.
#[derive(Clone)]
pub struct Sensemaker {
    ledger: Arc<dyn Ledger>,
    guard: AuthorizationGuard,
    config: EngineConfig,
    agent: AgentId,
}

impl Sensemaker {
    pub fn new(ledger: Arc<dyn Ledger>, config: EngineConfig, agent: AgentId) -> Self {
        let guard = AuthorizationGuard::new(config.community_activator.clone());
        log::debug!(
            "sensemaker handle for {agent} (community activator: {})",
            guard.community_activator()
        );
        Self {
            ledger,
            guard,
            config,
            agent,
        }
    }

    /// Same ledger and configuration, different caller.
    #[must_use]
    pub fn as_agent(&self, agent: AgentId) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            guard: self.guard.clone(),
            config: self.config.clone(),
            agent,
        }
    }

    pub fn agent(&self) -> &AgentId {
        &self.agent
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn guard(&self) -> &AuthorizationGuard {
        &self.guard
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    pub(crate) fn fetch<T: EntryType>(&self, id: &EntryId) -> Result<Identified<T>> {
        let record = self.ledger.get(id).map_err(|err| match err {
            LedgerError::NotFound(_) => EngineError::not_found(format!("{} {id}", T::KIND)),
            other => other.into(),
        })?;
        T::from_entry(record.entry)
            .map(|entry| Identified::new(record.id, entry))
            .ok_or_else(|| EngineError::not_found(format!("{id} is not a {} entry", T::KIND)))
    }

    /// Like [`Self::fetch`], but an unresolvable reference is a validation failure.
    pub(crate) fn resolve<T: EntryType>(&self, id: &EntryId) -> Result<Identified<T>> {
        self.fetch(id).map_err(|err| match err {
            EngineError::NotFound(what) => {
                EngineError::validation(format!("unresolvable reference: {what}"))
            }
            other => other,
        })
    }

    pub(crate) fn list<T: EntryType>(&self) -> Result<Vec<Identified<T>>> {
        let records = self.ledger.query(&LedgerQuery::kind(T::KIND))?;
        Ok(records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                T::from_entry(record.entry).map(|entry| Identified::new(id, entry))
            })
            .collect())
    }

    /// Guarded write of a single entry.
    pub(crate) fn commit<T: EntryType + Clone>(&self, entry: T) -> Result<Identified<T>> {
        self.guard.validate_write(T::KIND, &self.agent)?;
        self.append(entry)
    }

    /// Unguarded write; callers have already run the guard.
    pub(crate) fn append<T: EntryType + Clone>(&self, entry: T) -> Result<Identified<T>> {
        let record = self.ledger.put(&self.agent, entry.clone().into_entry())?;
        Ok(Identified::new(record.id, entry))
    }
}

pub(crate) fn require_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EngineError::validation(format!("{what} name must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_unique(what: &str, ids: &[EntryId]) -> Result<()> {
    for (position, id) in ids.iter().enumerate() {
        if ids[..position].contains(id) {
            return Err(EngineError::validation(format!(
                "{what} lists {id} more than once"
            )));
        }
    }
    Ok(())
}
