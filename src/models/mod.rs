//! Network value types.
//!
//! This module contains the data structures the collapse engine works on:
//! - [`U128`] - 128-bit unsigned integer holding an IPv6 address
//! - [`TypedNet`] and [`AddressBits`] - fixed-width network representation
//! - [`Network`] and [`AddressFamily`] - caller-facing network value

mod network;
mod typed_net;
mod uint128;

// Re-export public types
pub use network::{AddressFamily, Network};
pub use typed_net::{host_mask, net_mask, AddressBits, TypedNet};
pub use uint128::U128;
