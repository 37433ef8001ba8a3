pub mod config;
pub mod logging;

pub mod availability;
pub mod fetch;
pub mod jobs;
pub mod pacing;
pub mod session;
pub mod sink;
pub mod table;
