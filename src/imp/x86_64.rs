use crate::atomic::DoubleWord;
use std::arch::asm;
use std::sync::atomic::Ordering;

// `lock cmpxchg16b` is a full barrier on x86_64, so it satisfies every
// requested ordering; the asm block itself keeps the compiler from reordering
// surrounding accesses. The instruction is present on every 64-bit x86 CPU
// made since the mid-2000s.
//
// LLVM reserves rbx, so the low word of `new` goes through a scratch register
// that is swapped into rbx around the instruction.
//
// safety: `dst` must be valid for reads and writes and 16-byte aligned, and
// all concurrent access to it must go through this primitive.
pub(crate) unsafe fn compare_exchange_128(
    dst: *mut DoubleWord,
    expected: DoubleWord,
    new: DoubleWord,
    _success: Ordering,
    _failure: Ordering,
) -> (DoubleWord, bool) {
    let prev_low: u64;
    let prev_high: u64;
    asm!(
        "xchg {new_low}, rbx",
        "lock cmpxchg16b xmmword ptr [{dst}]",
        "mov rbx, {new_low}",
        dst = in(reg) dst,
        new_low = inout(reg) new.low => _,
        in("rcx") new.high,
        inout("rax") expected.low => prev_low,
        inout("rdx") expected.high => prev_high,
        options(nostack),
    );
    // cmpxchg16b leaves the original cell contents in rdx:rax; the exchange
    // happened exactly when they match the expected value
    let prev = DoubleWord::new(prev_low, prev_high);
    (prev, prev == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_exchange() {
        let mut cell = DoubleWord::new(1, 2);
        let dst = &mut cell as *mut DoubleWord;

        let (prev, exchanged) = unsafe {
            compare_exchange_128(
                dst,
                DoubleWord::new(1, 2),
                DoubleWord::new(3, 4),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
        };
        assert!(exchanged);
        assert_eq!(prev, DoubleWord::new(1, 2));
        assert_eq!(cell, DoubleWord::new(3, 4));

        let (prev, exchanged) = unsafe {
            compare_exchange_128(
                dst,
                DoubleWord::new(1, 2),
                DoubleWord::new(5, 6),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
        };
        assert!(!exchanged);
        assert_eq!(prev, DoubleWord::new(3, 4));
        assert_eq!(cell, DoubleWord::new(3, 4));
    }
}
