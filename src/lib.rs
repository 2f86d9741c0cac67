//! Double-width (128-bit) atomic compare-and-exchange.
//!
//! A [`DoubleWord`] is one 16-byte-aligned slot made of two adjacent `u64`
//! words. [`AtomicDoubleWord`] compares and swaps the whole slot as a single
//! indivisible unit, with independently selectable memory orderings for the
//! success and failure paths. The same operation is exported to C callers as
//! [`dwcas_compare_exchange_128`].

#![cfg(target_pointer_width = "64")]

mod atomic;
mod ffi;
mod imp;
mod order;

pub use atomic::{AtomicDoubleWord, DoubleWord};
pub use ffi::{dwcas_compare_exchange_128, dwcas_load_128, dwcas_store_128};
pub use order::MemOrder;
