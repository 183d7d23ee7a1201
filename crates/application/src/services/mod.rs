//! Application Services
//!
//! One service per screen. Each service reads from its catalog port, runs
//! the screen's query through the pipeline and returns owned rows.

mod community;
mod contests;
mod leaderboard;
mod problems;
mod submissions;

pub use community::*;
pub use contests::*;
pub use leaderboard::*;
pub use problems::*;
pub use submissions::*;
