//! Single-trial execution with panic containment.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::input::ByteSequence;
use crate::target::{Invocation, TargetOperation};

/// Result of one trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrialOutcome {
    /// The target returned control. `accepted` mirrors [`Invocation`].
    Completed { accepted: bool },
    /// The target panicked on `input`.
    Aborted {
        input: ByteSequence,
        message: String,
    },
}

impl TrialOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

/// Run `target` once on `input`.
///
/// A panic inside the target is caught and reported as
/// [`TrialOutcome::Aborted`] carrying a copy of the input. The input itself
/// is only borrowed for the duration of the call.
pub fn run_trial(target: &dyn TargetOperation, input: &ByteSequence) -> TrialOutcome {
    match catch_unwind(AssertUnwindSafe(|| target.invoke(input.as_option()))) {
        Ok(Invocation::Accepted) => TrialOutcome::Completed { accepted: true },
        Ok(Invocation::Rejected(_)) => TrialOutcome::Completed { accepted: false },
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(input = %input, %message, "Target panicked");
            TrialOutcome::Aborted {
                input: input.clone(),
                message,
            }
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
