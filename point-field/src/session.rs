use std::collections::HashMap;

use crate::controls::descriptor;
use crate::error::ParameterError;
use crate::params::{GalaxyParameters, ParameterField, ParameterValue};

/// What a settings input did to the committed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Held as an intermediate value; the committed parameters are untouched.
    Staged,
    /// Written to the committed parameters without a rebuild.
    Applied,
    /// Written to the committed parameters; the field must be rebuilt from
    /// these values.
    Regenerate(GalaxyParameters),
    /// The committed value already matched.
    Unchanged,
}

/// Commit gate between a settings panel and the sampler.
///
/// Drag-style input is staged per field and only reaches the committed
/// parameters on [`commit`](SettingsSession::commit). Controls without a
/// regeneration callback (rotation speed) apply straight away, since they are
/// read every frame.
#[derive(Debug, Clone, Default)]
pub struct SettingsSession {
    committed: GalaxyParameters,
    staged: HashMap<ParameterField, ParameterValue>,
}

impl SettingsSession {
    pub fn new(parameters: GalaxyParameters) -> Self {
        Self {
            committed: parameters,
            staged: HashMap::new(),
        }
    }

    pub fn parameters(&self) -> &GalaxyParameters {
        &self.committed
    }

    /// Value a panel should display: the staged value while dragging, else
    /// the committed one.
    pub fn displayed(&self, field: ParameterField) -> ParameterValue {
        self.staged
            .get(&field)
            .copied()
            .unwrap_or_else(|| self.committed.get(field))
    }

    pub fn is_staged(&self, field: ParameterField) -> bool {
        self.staged.contains_key(&field)
    }

    /// Record an intermediate value.
    pub fn stage(
        &mut self,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<SessionOutcome, ParameterError> {
        let value = descriptor(field).normalize(value)?;

        if !field.regenerates() {
            return self.write(field, value);
        }

        self.staged.insert(field, value);
        Ok(SessionOutcome::Staged)
    }

    /// Finalise a control at `value`, discarding anything staged for it.
    pub fn commit(
        &mut self,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<SessionOutcome, ParameterError> {
        let value = descriptor(field).normalize(value)?;
        self.staged.remove(&field);
        self.write(field, value)
    }

    /// Commit whatever is currently staged for `field`. Nothing staged means
    /// nothing changes.
    pub fn commit_staged(&mut self, field: ParameterField) -> Result<SessionOutcome, ParameterError> {
        match self.staged.remove(&field) {
            Some(value) => self.write(field, value),
            None => Ok(SessionOutcome::Unchanged),
        }
    }

    /// Drop a staged value without committing it.
    pub fn cancel(&mut self, field: ParameterField) {
        self.staged.remove(&field);
    }

    /// Replace every committed parameter at once, as loading a preset does.
    pub fn replace(&mut self, parameters: GalaxyParameters) -> SessionOutcome {
        self.staged.clear();
        if parameters == self.committed {
            return SessionOutcome::Unchanged;
        }
        self.committed = parameters;
        SessionOutcome::Regenerate(self.committed.clone())
    }

    fn write(
        &mut self,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<SessionOutcome, ParameterError> {
        if self.committed.get(field) == value {
            return Ok(SessionOutcome::Unchanged);
        }

        let mut next = self.committed.clone();
        next.set(field, value)?;
        // Re-reading catches integer fields whose rounding lands on the old value.
        if next == self.committed {
            return Ok(SessionOutcome::Unchanged);
        }
        self.committed = next;

        if field.regenerates() {
            Ok(SessionOutcome::Regenerate(self.committed.clone()))
        } else {
            Ok(SessionOutcome::Applied)
        }
    }
}
