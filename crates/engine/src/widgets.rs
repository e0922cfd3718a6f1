//! Widget registrations and the per-resource-def widget tray.

use crate::error::{EngineError, Result};
use crate::sensemaker::{require_name, Sensemaker};
use sensemaker_protocol::{
    AssessmentWidgetRegistration, AssessmentWidgetTrayConfig, EntryId, EntryKind, Identified,
    ResourceDef, SetWidgetTrayConfigInput, WidgetBlockConfig, WidgetKind,
};

impl Sensemaker {
    pub fn register_widget(
        &self,
        registration: AssessmentWidgetRegistration,
    ) -> Result<Identified<AssessmentWidgetRegistration>> {
        self.guard()
            .validate_write(EntryKind::WidgetRegistration, self.agent())?;
        require_name("widget", &registration.name)?;
        if registration.applet_id.trim().is_empty() || registration.widget_key.trim().is_empty() {
            return Err(EngineError::validation(
                "widget registration needs an applet_id and a widget_key",
            ));
        }
        self.append(registration)
    }

    pub fn get_registered_widgets(&self) -> Result<Vec<Identified<AssessmentWidgetRegistration>>> {
        self.list()
    }

    pub fn delete_widget_registration(&self, id: &EntryId) -> Result<()> {
        self.guard()
            .validate_write(EntryKind::WidgetRegistration, self.agent())?;
        self.fetch::<AssessmentWidgetRegistration>(id)?;
        self.ledger().delete(self.agent(), id)?;
        log::debug!("deleted widget registration {id}");
        Ok(())
    }

    /// Replace the tray for a resource def with exactly `widget_configs`, in
    /// the given order. Nothing is merged with the previous tray.
    pub fn set_assessment_widget_tray_config(
        &self,
        input: SetWidgetTrayConfigInput,
    ) -> Result<Vec<EntryId>> {
        self.guard().validate_write(EntryKind::WidgetTray, self.agent())?;
        self.guard().validate_write(EntryKind::WidgetBlock, self.agent())?;
        self.fetch::<ResourceDef>(&input.resource_def_id)?;
        for block in &input.widget_configs {
            self.require_widget(&block.input_assessment_widget, WidgetKind::Input)?;
            self.require_widget(&block.output_assessment_widget, WidgetKind::Output)?;
        }

        let mut block_ids = Vec::with_capacity(input.widget_configs.len());
        for block in input.widget_configs {
            block_ids.push(self.append(block)?.id);
        }
        let tray = self.append(AssessmentWidgetTrayConfig {
            resource_def_id: input.resource_def_id,
            block_ids: block_ids.clone(),
        })?;
        log::debug!(
            "widget tray {} for {} now holds {} blocks",
            tray.id,
            tray.entry.resource_def_id,
            block_ids.len()
        );
        Ok(block_ids)
    }

    pub fn get_assessment_widget_tray_config(
        &self,
        resource_def_id: &EntryId,
    ) -> Result<Vec<WidgetBlockConfig>> {
        let tray = self
            .list::<AssessmentWidgetTrayConfig>()?
            .into_iter()
            .rev()
            .find(|tray| &tray.entry.resource_def_id == resource_def_id)
            .ok_or_else(|| EngineError::NotConfigured(resource_def_id.clone()))?;

        tray.entry
            .block_ids
            .iter()
            .map(|id| self.fetch::<WidgetBlockConfig>(id).map(|block| block.entry))
            .collect()
    }

    fn require_widget(&self, id: &EntryId, kind: WidgetKind) -> Result<()> {
        let registration = self.resolve::<AssessmentWidgetRegistration>(id)?;
        if registration.entry.kind != kind {
            return Err(EngineError::validation(format!(
                "widget {id} is registered as {:?}, expected {kind:?}",
                registration.entry.kind
            )));
        }
        Ok(())
    }
}
