//! Timing and the machine state around a timed sort: cache invalidation and core pinning.

use std::env;
use std::hint::black_box;
use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;

/// Default size of the buffer written by [`flush_cache`], larger than common last level caches.
pub const DEFAULT_CACHE_FLUSH_BYTES: usize = 32 * 1024 * 1024;

/// Runs `test_fn` and measures how long it took on the monotonic clock.
#[inline(never)]
pub fn measure_duration<R>(test_fn: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = test_fn();
    let elapsed = start.elapsed();

    (result, elapsed)
}

/// Size of the cache flush buffer. Can be set with the `PIVOT_CACHE_FLUSH_BYTES` env var, which
/// is read once per process.
pub fn cache_flush_len() -> usize {
    static FLUSH_LEN: OnceCell<usize> = OnceCell::new();

    *FLUSH_LEN.get_or_init(|| match env::var("PIVOT_CACHE_FLUSH_BYTES") {
        Ok(val) => val.parse::<usize>().unwrap_or_else(|_| {
            log::warn!("Ignoring PIVOT_CACHE_FLUSH_BYTES={val}, not a byte count");
            DEFAULT_CACHE_FLUSH_BYTES
        }),
        Err(_) => DEFAULT_CACHE_FLUSH_BYTES,
    })
}

/// Evicts the data caches as far as possible by streaming through a large scratch buffer. Called
/// before every timed sort, so no trial profits from its input still being cache resident.
#[inline(never)]
pub fn flush_cache() {
    let len = cache_flush_len();
    let mut buffer = vec![0u8; len];

    for (i, byte) in buffer.iter_mut().enumerate() {
        *byte = black_box(i as u8);
    }

    black_box(&buffer);
}

/// Pins the calling thread to the core with id `core_id`. Returns false if there is no such core
/// or the OS refused.
pub fn pin_thread_to_core(core_id: usize) -> bool {
    let Some(core) = core_affinity::get_core_ids()
        .as_ref()
        .and_then(|ids| ids.get(core_id).copied())
    else {
        log::warn!("Unable to pin thread, no core with id {core_id}");
        return false;
    };

    let pinned = core_affinity::set_for_current(core);
    if !pinned {
        log::warn!("Unable to pin thread to core {core_id}");
    }

    pinned
}
