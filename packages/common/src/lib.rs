pub mod event_state;
pub mod gender;

pub use event_state::{EventState, ScheduleError, derive_state, validate_schedule};
pub use gender::Gender;
