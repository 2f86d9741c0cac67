//! Lock-based emulation for targets without a native 128-bit CAS instruction.
//!
//! Every cell address hashes to one shard of a global spinlock table; the
//! compare-exchange runs under that shard's lock. The external contract is
//! unchanged, only lock-freedom is lost. The lock acquire/release pair is a
//! full synchronization bracket, so it covers every requested ordering.

use crate::atomic::DoubleWord;
use crossbeam_utils::{Backoff, CachePadded};
use once_cell::sync::Lazy;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

const NUM_SHARDS: usize = 64;

static SHARDS: Lazy<Vec<CachePadded<Shard>>> =
    Lazy::new(|| (0..NUM_SHARDS).map(|_| CachePadded::new(Shard::new())).collect());

struct Shard {
    locked: AtomicBool,
}

impl Shard {
    fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    fn lock(&self) {
        let backoff = Backoff::new();
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            backoff.snooze();
        }
    }

    fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

fn shard_for(addr: usize) -> &'static Shard {
    // cells are 16-byte aligned, the low bits carry no entropy
    &SHARDS[(addr >> 4) % NUM_SHARDS]
}

// safety: `dst` must be valid for reads and writes and 16-byte aligned, and
// all concurrent access to it must go through this primitive.
pub(crate) unsafe fn compare_exchange_128(
    dst: *mut DoubleWord,
    expected: DoubleWord,
    new: DoubleWord,
    _success: Ordering,
    _failure: Ordering,
) -> (DoubleWord, bool) {
    let shard = shard_for(dst as usize);
    shard.lock();
    let prev = ptr::read(dst);
    let exchanged = prev == expected;
    if exchanged {
        ptr::write(dst, new);
    }
    shard.unlock();
    (prev, exchanged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_locked_exchange() {
        let mut cell = DoubleWord::new(0, 0);
        let dst = &mut cell as *mut DoubleWord;

        let (prev, exchanged) = unsafe {
            compare_exchange_128(
                dst,
                DoubleWord::new(0, 0),
                DoubleWord::new(42, 7),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
        };
        assert!(exchanged);
        assert_eq!(prev, DoubleWord::new(0, 0));
        assert_eq!(cell, DoubleWord::new(42, 7));

        let (prev, exchanged) = unsafe {
            compare_exchange_128(
                dst,
                DoubleWord::new(0, 0),
                DoubleWord::new(1, 1),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
        };
        assert!(!exchanged);
        assert_eq!(prev, DoubleWord::new(42, 7));
        assert_eq!(cell, DoubleWord::new(42, 7));
    }

    #[test]
    fn test_locked_exchange_under_contention() {
        struct Slot(std::cell::UnsafeCell<DoubleWord>);
        unsafe impl Send for Slot {}
        unsafe impl Sync for Slot {}

        let max = 10_000u64;
        let cell = Arc::new(Slot(std::cell::UnsafeCell::new(DoubleWord::new(0, 0))));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let cell = cell.clone();
            let h = std::thread::spawn(move || loop {
                unsafe {
                    let zero = DoubleWord::default();
                    let (curr, _) = compare_exchange_128(
                        cell.0.get(),
                        zero,
                        zero,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                    if curr.low == max {
                        break;
                    }
                    assert_eq!(curr.low, curr.high);
                    let new = DoubleWord::new(curr.low + 1, curr.high + 1);
                    let _ = compare_exchange_128(
                        cell.0.get(),
                        curr,
                        new,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                }
            });
            handles.push(h);
        }
        for h in handles {
            h.join().unwrap();
        }
        let last = unsafe { ptr::read(cell.0.get()) };
        assert_eq!(last, DoubleWord::new(max, max));
    }
}
