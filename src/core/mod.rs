pub mod services;
pub mod time;
pub mod utils;

pub use time::{Clock, FixedClock, SystemClock};
