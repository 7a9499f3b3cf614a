mod daily_digest;
mod welcome;

pub use daily_digest::*;
pub use welcome::*;
