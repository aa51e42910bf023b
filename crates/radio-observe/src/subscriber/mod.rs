mod journal;
pub use journal::Journal;

mod view;
pub use view::{log_transition, message_for};
