//! Bit-level helpers for IPv4/IPv6 CIDR networks.
//!
//! The main entry point is [`collapse`], which merges sibling subnets into
//! the minimal set of supernets covering the same addresses. [`supernet`],
//! [`broadcast`], [`is_subnet`] and [`is_supernet`] cover the simpler
//! single-network calculations.

pub mod error;
pub mod models;
pub mod processing;

pub use error::NetError;
pub use models::{AddressFamily, Network};
pub use processing::{broadcast, collapse, is_subnet, is_supernet, supernet};
