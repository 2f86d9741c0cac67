use crate::atomic::DoubleWord;
use std::arch::asm;
use std::sync::atomic::Ordering;

fn is_acquire(order: Ordering) -> bool {
    match order {
        Ordering::Acquire | Ordering::AcqRel | Ordering::SeqCst => true,
        _ => false,
    }
}

fn is_release(order: Ordering) -> bool {
    match order {
        Ordering::Release | Ordering::AcqRel | Ordering::SeqCst => true,
        _ => false,
    }
}

// Exclusive-pair loop (ldxp/stxp). The acquire flavor of the load and the
// release flavor of the store are picked from the requested orderings; on
// AArch64 the ldaxp/stlxp pair is strong enough for seq-cst as well.
//
// safety: `dst` must be valid for reads and writes and 16-byte aligned, and
// all concurrent access to it must go through this primitive.
pub(crate) unsafe fn compare_exchange_128(
    dst: *mut DoubleWord,
    expected: DoubleWord,
    new: DoubleWord,
    success: Ordering,
    failure: Ordering,
) -> (DoubleWord, bool) {
    let acquire = is_acquire(success) || is_acquire(failure);
    let release = is_release(success);

    macro_rules! cmpxchg {
        ($ldxp:literal, $stxp:literal) => {{
            let prev_low: u64;
            let prev_high: u64;
            asm!(
                "2:",
                concat!($ldxp, " {prev_low}, {prev_high}, [{dst}]"),
                "cmp {prev_low}, {exp_low}",
                "ccmp {prev_high}, {exp_high}, #0, eq",
                "b.ne 3f",
                concat!($stxp, " {scratch:w}, {new_low}, {new_high}, [{dst}]"),
                "cbnz {scratch:w}, 2b",
                "b 4f",
                "3:",
                "clrex",
                "4:",
                dst = in(reg) dst,
                exp_low = in(reg) expected.low,
                exp_high = in(reg) expected.high,
                new_low = in(reg) new.low,
                new_high = in(reg) new.high,
                prev_low = out(reg) prev_low,
                prev_high = out(reg) prev_high,
                scratch = out(reg) _,
                options(nostack),
            );
            DoubleWord::new(prev_low, prev_high)
        }};
    }

    let prev = match (acquire, release) {
        (false, false) => cmpxchg!("ldxp", "stxp"),
        (true, false) => cmpxchg!("ldaxp", "stxp"),
        (false, true) => cmpxchg!("ldxp", "stlxp"),
        (true, true) => cmpxchg!("ldaxp", "stlxp"),
    };
    (prev, prev == expected)
}
