use radio_core::Transition;
use radio_model::{OperationState, Resolution};
use tracing::{debug, info, trace, warn};

#[inline]
pub fn message_for(state: OperationState) -> &'static str {
    match state {
        OperationState::Idle => "operation armed",
        OperationState::Started => "start call issued",
        OperationState::AwaitingResult => "start accepted; waiting for completion event",
        OperationState::RejectedStart => "start call rejected by radio",
        OperationState::AwaitingFallback => "deadline expired; probing hardware state",

        OperationState::Resolved(Resolution::Success) => "operation succeeded",
        OperationState::Resolved(Resolution::Failure) => "operation failed",
        OperationState::Resolved(Resolution::Timeout) => "operation timed out",
        OperationState::Resolved(Resolution::Canceled) => "operation canceled",
    }
}

#[inline]
pub fn log_transition(t: &Transition) {
    let msg = message_for(t.to);
    let reason = t.reason.as_deref().unwrap_or("unknown");

    match t.to {
        OperationState::Idle | OperationState::Started => {
            trace!(id = %t.id, op = %t.op, "{msg}")
        }
        OperationState::AwaitingResult => debug!(id = %t.id, op = %t.op, "{msg}"),
        OperationState::RejectedStart => warn!(id = %t.id, op = %t.op, "{msg}"),
        OperationState::AwaitingFallback => warn!(id = %t.id, op = %t.op, "{msg}"),

        OperationState::Resolved(Resolution::Success) => {
            if t.from == OperationState::AwaitingFallback {
                info!(id = %t.id, op = %t.op, "operation recovered by fallback probe");
            } else {
                debug!(id = %t.id, op = %t.op, "{msg}");
            }
        }
        OperationState::Resolved(Resolution::Failure) => {
            warn!(id = %t.id, op = %t.op, reason, "{msg}")
        }
        OperationState::Resolved(Resolution::Timeout) => {
            warn!(id = %t.id, op = %t.op, reason, "{msg}")
        }
        OperationState::Resolved(Resolution::Canceled) => {
            debug!(id = %t.id, op = %t.op, "{msg}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_terminal_state_has_a_message() {
        for r in [
            Resolution::Success,
            Resolution::Failure,
            Resolution::Timeout,
            Resolution::Canceled,
        ] {
            assert!(message_for(OperationState::Resolved(r)).starts_with("operation"));
        }
    }
}
