use crate::imp;
use crate::order::MemOrder;
use std::cell::UnsafeCell;

/// Two adjacent 64-bit words forming one atomically addressable 128-bit slot.
///
/// The layout is fixed: `low` first, `high` second, 16-byte aligned. The C
/// surface relies on this being identical for cells, expected values and
/// desired values.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[repr(C, align(16))]
pub struct DoubleWord {
    pub low: u64,
    pub high: u64,
}

impl DoubleWord {
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }
}

impl From<u128> for DoubleWord {
    fn from(v: u128) -> Self {
        Self::new(v as u64, (v >> 64) as u64)
    }
}

impl From<DoubleWord> for u128 {
    fn from(w: DoubleWord) -> Self {
        (w.low as u128) | ((w.high as u128) << 64)
    }
}

/// A 128-bit memory location supporting indivisible compare-and-exchange.
///
/// Any number of threads may share one cell; every access goes through the
/// platform's double-width atomic path, so no observer can see a torn value.
/// Mixing these operations with plain reads or writes of the same memory is a
/// contract violation.
#[repr(transparent)]
pub struct AtomicDoubleWord {
    v: UnsafeCell<DoubleWord>,
}

unsafe impl Send for AtomicDoubleWord {}
unsafe impl Sync for AtomicDoubleWord {}

impl AtomicDoubleWord {
    pub const fn new(v: DoubleWord) -> Self {
        Self {
            v: UnsafeCell::new(v),
        }
    }

    pub fn into_inner(self) -> DoubleWord {
        self.v.into_inner()
    }

    /// Stores `new` if the cell currently holds `current`.
    ///
    /// Strong semantics: the comparison never spuriously fails. `Ok` carries
    /// the previous value (equal to `current`), `Err` carries the value
    /// actually found, which the caller feeds into its next attempt.
    pub fn compare_exchange(
        &self,
        current: DoubleWord,
        new: DoubleWord,
        success: MemOrder,
        failure: MemOrder,
    ) -> Result<DoubleWord, DoubleWord> {
        let (prev, exchanged) = unsafe {
            imp::compare_exchange_128(
                self.v.get(),
                current,
                new,
                success.success_ordering(),
                failure.failure_ordering(),
            )
        };
        if exchanged {
            Ok(prev)
        } else {
            Err(prev)
        }
    }

    /// Reads the whole 128-bit cell atomically.
    ///
    /// There is no native 16-byte load on the supported targets; a
    /// compare-exchange against an arbitrary expected value returns the
    /// current contents either way.
    pub fn load(&self, order: MemOrder) -> DoubleWord {
        let zero = DoubleWord::default();
        let (prev, _) = unsafe {
            imp::compare_exchange_128(
                self.v.get(),
                zero,
                zero,
                order.success_ordering(),
                order.failure_ordering(),
            )
        };
        prev
    }

    /// Writes the whole 128-bit cell atomically, regardless of its contents.
    pub fn store(&self, val: DoubleWord, order: MemOrder) {
        let mut curr = self.load(MemOrder::Relaxed);
        loop {
            match self.compare_exchange(curr, val, order, MemOrder::Relaxed) {
                Ok(_) => return,
                Err(prev) => curr = prev,
            }
        }
    }
}
