//! Pause between successive requests to the upstream server.

use std::time::Duration;

pub trait Pacer {
    fn pause(&self, delay: Duration);
}

/// Blocks the current thread for the delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
