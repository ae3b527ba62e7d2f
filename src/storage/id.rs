//! Task identifier generation
//!
//! Ids are 24 lowercase hex characters: creation time in seconds (8),
//! a per-process nonce (6) and a process-wide counter (10).

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);
static NONCE: OnceLock<u32> = OnceLock::new();

const NONCE_MASK: u32 = 0x00ff_ffff;
const COUNTER_MASK: u64 = 0x00ff_ffff_ffff;

fn nonce() -> u32 {
    *NONCE.get_or_init(|| {
        let nanos = chrono::Utc::now().timestamp_subsec_nanos();
        (std::process::id().rotate_left(8) ^ nanos) & NONCE_MASK
    })
}

/// Generate a fresh task id
#[must_use]
pub fn generate() -> String {
    let secs = u32::try_from(chrono::Utc::now().timestamp()).unwrap_or(u32::MAX);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;
    format!("{secs:08x}{:06x}{count:010x}", nonce())
}
