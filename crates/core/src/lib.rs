#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod prompt;
pub mod time;
pub mod week;

pub use error::Error;
pub use time::Clock;
pub use week::{WeekDay, WeekKey, WeekKeyError};
