//! Errors raised when a slot cannot run its callback.
//!
//! These stay inside the crate: dispatch checks every listener before
//! calling it and logs whatever still fails as `warn!` fields.

use thiserror::Error;

use crate::id::SlotId;

/// Why a slot could not be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum SlotError {
    /// No callback has been bound to the slot.
    #[error("{0} has no callback bound")]
    Unbound(SlotId),

    /// The object a method slot targets has been dropped.
    #[error("target of {0} has been dropped")]
    TargetDropped(SlotId),

    /// The object a method slot targets is already borrowed, usually
    /// because its own method re-entered dispatch.
    #[error("target of {0} is already borrowed")]
    TargetBusy(SlotId),
}

impl SlotError {
    /// The slot the error refers to.
    pub(crate) fn slot(&self) -> SlotId {
        match *self {
            SlotError::Unbound(id) | SlotError::TargetDropped(id) | SlotError::TargetBusy(id) => id,
        }
    }
}

pub(crate) type Result<T, E = SlotError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reports_its_slot() {
        let id = SlotId::new();
        assert_eq!(SlotError::Unbound(id).slot(), id);
        assert_eq!(SlotError::TargetDropped(id).slot(), id);
        assert_eq!(SlotError::TargetBusy(id).slot(), id);
    }

    #[test]
    fn error_messages_name_the_slot() {
        let id = SlotId::new();
        assert_eq!(SlotError::Unbound(id).to_string(), format!("{id} has no callback bound"));
        assert_eq!(SlotError::TargetBusy(id).to_string(), format!("target of {id} is already borrowed"));
    }
}
