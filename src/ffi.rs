//! The C-callable surface.
//!
//! Values cross the boundary as two adjacent `u64` words, low word first, the
//! same layout as [`DoubleWord`]. Ordering codes are raw bytes (0 relaxed,
//! 1 acquire, 2 release, 3 acq-rel, 4 seq-cst); anything else decodes as
//! seq-cst.

use crate::atomic::DoubleWord;
use crate::imp;
use crate::order::MemOrder;
use std::sync::atomic::Ordering;

unsafe fn read_pair(words: *const u64) -> DoubleWord {
    DoubleWord::new(*words, *words.add(1))
}

/// Atomically compares the 16-byte cell at `dst` with the two words at
/// `expected` and, if they match, installs the two words at `desired`.
///
/// Returns `true` if the exchange happened. On failure the cell is left
/// untouched and `expected` is overwritten with the cell's actual contents.
///
/// # Safety
///
/// `dst` must be a valid, 16-byte-aligned cell that is only ever accessed
/// through these functions. `expected` must be valid for reading and writing
/// two `u64` words, `desired` for reading two.
#[no_mangle]
pub unsafe extern "C" fn dwcas_compare_exchange_128(
    dst: *mut DoubleWord,
    expected: *mut u64,
    desired: *const u64,
    success: u8,
    failure: u8,
) -> bool {
    let success = MemOrder::from_code(success);
    let failure = MemOrder::from_code(failure);
    let (prev, exchanged) = imp::compare_exchange_128(
        dst,
        read_pair(expected),
        read_pair(desired),
        success.success_ordering(),
        failure.failure_ordering(),
    );
    if !exchanged {
        *expected = prev.low;
        *expected.add(1) = prev.high;
    }
    exchanged
}

/// Atomically reads the 16-byte cell at `dst` into `out`.
///
/// # Safety
///
/// Same rules as [`dwcas_compare_exchange_128`]; `out` must be valid for
/// writing two `u64` words.
#[no_mangle]
pub unsafe extern "C" fn dwcas_load_128(dst: *mut DoubleWord, out: *mut u64, order: u8) {
    let order = MemOrder::from_code(order);
    let zero = DoubleWord::default();
    let (prev, _) = imp::compare_exchange_128(
        dst,
        zero,
        zero,
        order.success_ordering(),
        order.failure_ordering(),
    );
    *out = prev.low;
    *out.add(1) = prev.high;
}

/// Atomically replaces the 16-byte cell at `dst` with the two words at `val`.
///
/// # Safety
///
/// Same rules as [`dwcas_compare_exchange_128`]; `val` must be valid for
/// reading two `u64` words.
#[no_mangle]
pub unsafe extern "C" fn dwcas_store_128(dst: *mut DoubleWord, val: *const u64, order: u8) {
    let order = MemOrder::from_code(order);
    let val = read_pair(val);
    let zero = DoubleWord::default();
    let (mut curr, _) =
        imp::compare_exchange_128(dst, zero, zero, Ordering::Relaxed, Ordering::Relaxed);
    loop {
        let (prev, exchanged) = imp::compare_exchange_128(
            dst,
            curr,
            val,
            order.success_ordering(),
            Ordering::Relaxed,
        );
        if exchanged {
            return;
        }
        curr = prev;
    }
}
