//! Fixed-width 128-bit unsigned integer.
//!
//! Provides [`U128`], a two-word value holding an IPv6 address, with just the
//! bit operations the network helpers need.

use std::cmp::Ordering;
use std::net::Ipv6Addr;
use std::ops::{BitAnd, BitOr, Not, Shl, Sub};

/// Width of a [`U128`] in bits.
pub const BITS: u32 = 128;

/// 128-bit unsigned value stored as high and low 64-bit halves.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct U128 {
    /// Most significant 64 bits.
    pub hi: u64,
    /// Least significant 64 bits.
    pub lo: u64,
}

impl U128 {
    pub const ZERO: U128 = U128 { hi: 0, lo: 0 };
    pub const ONE: U128 = U128 { hi: 0, lo: 1 };
    pub const MAX: U128 = U128 {
        hi: u64::MAX,
        lo: u64::MAX,
    };

    pub const fn new(hi: u64, lo: u64) -> U128 {
        U128 { hi, lo }
    }

    /// Logical left shift by `k` bits, `0 <= k <= 128`.
    ///
    /// Bits shifted past the top are discarded. Shifting by 128 yields zero.
    ///
    /// # Examples
    /// ```
    /// use subnet_collapse::models::U128;
    /// assert_eq!(U128::ONE.shl_bits(64), U128::new(1, 0));
    /// assert_eq!(U128::new(0, 1 << 63).shl_bits(1), U128::new(1, 0));
    /// ```
    pub fn shl_bits(self, k: u32) -> U128 {
        debug_assert!(k <= BITS, "shift[{k}] > 128 should never happen.");
        match k {
            0 => self,
            1..=63 => U128 {
                hi: (self.hi << k) | (self.lo >> (64 - k)),
                lo: self.lo << k,
            },
            64..=127 => U128 {
                hi: self.lo << (k - 64),
                lo: 0,
            },
            _ => U128::ZERO,
        }
    }

    /// Subtraction modulo 2^128, borrowing from the high half when the low
    /// half underflows.
    pub fn wrapping_sub(self, rhs: U128) -> U128 {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        let hi = self
            .hi
            .wrapping_sub(rhs.hi)
            .wrapping_sub(u64::from(borrow));
        U128 { hi, lo }
    }

    /// Big-endian byte representation.
    pub fn to_be_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.hi.to_be_bytes());
        out[8..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }

    /// Build from a big-endian byte representation.
    pub fn from_be_bytes(bytes: [u8; 16]) -> U128 {
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&bytes[..8]);
        lo.copy_from_slice(&bytes[8..]);
        U128 {
            hi: u64::from_be_bytes(hi),
            lo: u64::from_be_bytes(lo),
        }
    }
}

impl BitAnd for U128 {
    type Output = U128;

    fn bitand(self, rhs: U128) -> U128 {
        U128 {
            hi: self.hi & rhs.hi,
            lo: self.lo & rhs.lo,
        }
    }
}

impl BitOr for U128 {
    type Output = U128;

    fn bitor(self, rhs: U128) -> U128 {
        U128 {
            hi: self.hi | rhs.hi,
            lo: self.lo | rhs.lo,
        }
    }
}

impl Not for U128 {
    type Output = U128;

    fn not(self) -> U128 {
        U128 {
            hi: !self.hi,
            lo: !self.lo,
        }
    }
}

impl Shl<u32> for U128 {
    type Output = U128;

    fn shl(self, k: u32) -> U128 {
        self.shl_bits(k)
    }
}

impl Sub for U128 {
    type Output = U128;

    fn sub(self, rhs: U128) -> U128 {
        self.wrapping_sub(rhs)
    }
}

impl Ord for U128 {
    fn cmp(&self, other: &U128) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialOrd for U128 {
    fn partial_cmp(&self, other: &U128) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Ipv6Addr> for U128 {
    fn from(addr: Ipv6Addr) -> U128 {
        U128::from_be_bytes(addr.octets())
    }
}

impl From<U128> for Ipv6Addr {
    fn from(value: U128) -> Ipv6Addr {
        Ipv6Addr::from(value.to_be_bytes())
    }
}

impl From<u128> for U128 {
    fn from(value: u128) -> U128 {
        U128 {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }
}

impl From<U128> for u128 {
    fn from(value: U128) -> u128 {
        (u128::from(value.hi) << 64) | u128::from(value.lo)
    }
}
