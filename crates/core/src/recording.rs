//! Recording status lifecycle for the two-phase audio production pipeline.
//!
//! Each line moves `PendingRecording -> PendingMix -> Completed`. Every
//! edge is reversible by exactly one undo operation; there are no skips.
//! [`RecordingStatus::apply`] is the single source of truth for which
//! steps are legal from which state; the persistence layer consults it
//! before touching any row.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Audio-production progress of a translation line.
///
/// Maps to the `recording_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "recording_status", rename_all = "snake_case")]
pub enum RecordingStatus {
    PendingRecording,
    PendingMix,
    Completed,
}

/// A step in the recording pipeline: each phase has a submit and an undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStep {
    SubmitRaw,
    UndoRaw,
    SubmitMix,
    UndoMix,
}

impl RecordingStatus {
    /// The state after applying a pipeline step, or `Conflict` if the step
    /// is illegal from the current state.
    ///
    /// Undo steps whose work is already done return the state unchanged
    /// (double-click safe); they never fabricate a forward transition.
    /// Withdrawing the raw take out from under a delivered mix is refused:
    /// the mix must be undone first.
    pub fn apply(self, step: RecordingStep) -> Result<RecordingStatus, CoreError> {
        use RecordingStatus::*;
        use RecordingStep::*;

        match (self, step) {
            (PendingRecording, SubmitRaw) => Ok(PendingMix),
            (PendingMix | Completed, SubmitRaw) => Err(CoreError::Conflict(
                "A raw recording already exists for this line".into(),
            )),

            (PendingMix, UndoRaw) => Ok(PendingRecording),
            (PendingRecording, UndoRaw) => Ok(PendingRecording),
            (Completed, UndoRaw) => Err(CoreError::Conflict(
                "Cannot withdraw the raw recording while a mix is delivered; undo the mix first"
                    .into(),
            )),

            (PendingMix, SubmitMix) => Ok(Completed),
            (PendingRecording, SubmitMix) => Err(CoreError::Conflict(
                "Cannot deliver a mix before a raw recording exists".into(),
            )),
            (Completed, SubmitMix) => Err(CoreError::Conflict(
                "A mix is already delivered for this line; undo it first".into(),
            )),

            (Completed, UndoMix) => Ok(PendingMix),
            (PendingRecording, UndoMix) => Ok(PendingRecording),
            (PendingMix, UndoMix) => Ok(PendingMix),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::RecordingStatus::*;
    use super::RecordingStep::*;
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&PendingMix).unwrap(),
            "\"pending_mix\""
        );
        let parsed: RecordingStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, Completed);
    }

    #[test]
    fn forward_path_is_raw_then_mix() {
        assert_eq!(PendingRecording.apply(SubmitRaw).unwrap(), PendingMix);
        assert_eq!(PendingMix.apply(SubmitMix).unwrap(), Completed);
    }

    #[test]
    fn each_undo_reverses_exactly_one_step() {
        assert_eq!(Completed.apply(UndoMix).unwrap(), PendingMix);
        assert_eq!(PendingMix.apply(UndoRaw).unwrap(), PendingRecording);
    }

    #[test]
    fn undo_with_nothing_to_undo_is_a_no_op() {
        assert_eq!(PendingRecording.apply(UndoRaw).unwrap(), PendingRecording);
        assert_eq!(PendingRecording.apply(UndoMix).unwrap(), PendingRecording);
        assert_eq!(PendingMix.apply(UndoMix).unwrap(), PendingMix);
    }

    #[test]
    fn skips_and_double_submits_are_refused() {
        assert_matches!(PendingRecording.apply(SubmitMix), Err(CoreError::Conflict(_)));
        assert_matches!(PendingMix.apply(SubmitRaw), Err(CoreError::Conflict(_)));
        assert_matches!(Completed.apply(SubmitRaw), Err(CoreError::Conflict(_)));
        assert_matches!(Completed.apply(SubmitMix), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn raw_undo_under_a_delivered_mix_is_refused() {
        assert_matches!(Completed.apply(UndoRaw), Err(CoreError::Conflict(_)));
    }
}
