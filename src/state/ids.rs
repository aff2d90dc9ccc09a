use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out millisecond-timestamp ids that strictly increase within the
/// process: `max(now_ms, last + 1)`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();

        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}
