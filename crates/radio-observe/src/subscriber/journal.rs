use radio_core::{Subscribe, Transition};

use crate::subscriber::view::log_transition;

/// Writes every operation transition to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Journal;

impl Journal {
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for Journal {
    fn on_transition(&self, transition: &Transition) {
        log_transition(transition);
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}
