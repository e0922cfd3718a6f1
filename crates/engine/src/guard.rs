use crate::error::{EngineError, Result};
use sensemaker_protocol::{AgentId, EntryKind};

/// Single-writer policy for shared configuration entries.
///
/// Holds only the genesis community activator, so checks need no coordination
/// between concurrent writers.
#[derive(Debug, Clone)]
pub struct AuthorizationGuard {
    community_activator: AgentId,
}

impl AuthorizationGuard {
    pub fn new(community_activator: AgentId) -> Self {
        Self {
            community_activator,
        }
    }

    pub fn community_activator(&self) -> &AgentId {
        &self.community_activator
    }

    pub fn is_community_activator(&self, author: &AgentId) -> bool {
        author == &self.community_activator
    }

    pub fn requires_authority(kind: EntryKind) -> bool {
        match kind {
            EntryKind::Range
            | EntryKind::Dimension
            | EntryKind::ResourceDef
            | EntryKind::Method
            | EntryKind::CulturalContext
            | EntryKind::WidgetRegistration
            | EntryKind::WidgetBlock
            | EntryKind::WidgetTray => true,
            EntryKind::Assessment | EntryKind::ContextResult => false,
        }
    }

    pub fn validate_write(&self, kind: EntryKind, author: &AgentId) -> Result<()> {
        if !Self::requires_authority(kind) {
            return Ok(());
        }
        if self.is_community_activator(author) {
            log::debug!("authorized {kind} write by community activator");
            Ok(())
        } else {
            log::warn!("rejected {kind} write by {author}: not the community activator");
            Err(EngineError::NotCommunityActivator { kind })
        }
    }
}
