use std::sync::atomic::Ordering;

/// Synchronization strength for one side of a compare-exchange.
///
/// The discriminants are the wire encoding used by the C surface; any code
/// outside `0..=4` decodes to the strongest ordering instead of tripping
/// undefined behavior.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum MemOrder {
    Relaxed = 0,
    Acquire = 1,
    Release = 2,
    AcqRel = 3,
    SeqCst = 4,
}

impl MemOrder {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => MemOrder::Relaxed,
            1 => MemOrder::Acquire,
            2 => MemOrder::Release,
            3 => MemOrder::AcqRel,
            _ => MemOrder::SeqCst,
        }
    }

    pub fn as_code(self) -> u8 {
        self as u8
    }

    pub(crate) fn success_ordering(self) -> Ordering {
        match self {
            MemOrder::Relaxed => Ordering::Relaxed,
            MemOrder::Acquire => Ordering::Acquire,
            MemOrder::Release => Ordering::Release,
            MemOrder::AcqRel => Ordering::AcqRel,
            MemOrder::SeqCst => Ordering::SeqCst,
        }
    }

    // A failed exchange performs no store, so release semantics have nothing
    // to attach to. Clamp them away instead of passing them through.
    pub(crate) fn failure_ordering(self) -> Ordering {
        match self {
            MemOrder::Release => Ordering::Relaxed,
            MemOrder::AcqRel => Ordering::Acquire,
            other => other.success_ordering(),
        }
    }
}

impl Default for MemOrder {
    fn default() -> Self {
        MemOrder::SeqCst
    }
}
