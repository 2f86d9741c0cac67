//! Platform selection for the double-width compare-exchange.
//!
//! Each supported architecture supplies one `compare_exchange_128` with the
//! same signature: it returns the value found in the cell plus whether the
//! exchange happened. Targets without a native 128-bit CAS instruction fall
//! back to an address-sharded lock table, which keeps the contract intact at
//! the cost of lock-freedom.

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg_attr(
    any(target_arch = "x86_64", target_arch = "aarch64"),
    allow(dead_code)
)]
mod fallback;

#[cfg(target_arch = "x86_64")]
pub(crate) use x86_64::compare_exchange_128;

#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::compare_exchange_128;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use fallback::compare_exchange_128;
