#![forbid(unsafe_code)]

pub mod model;
pub mod time;

pub use time::Clock;

/// Number of questions in one batch.
pub const AMOUNT: usize = 10;

/// Seconds allotted to each question before it locks itself.
pub const TIMER_SECONDS: u32 = 30;

/// Number of answer options on every question.
pub const OPTION_COUNT: usize = 4;
