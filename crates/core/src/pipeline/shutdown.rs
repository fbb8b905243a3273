use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative termination signal shared by the frame source, the stage
/// threads, and the display consumer.
///
/// Monotonic: set once, never cleared. Relaxed ordering is sufficient —
/// the flag is a hint, not a gate; no other memory is synchronized
/// through it.
#[derive(Clone, Debug, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
