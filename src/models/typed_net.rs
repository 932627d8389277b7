//! Fixed-width network representation.
//!
//! [`TypedNet`] holds an address as a plain integer of the family's width so
//! the collapse engine can derive parents and masks with bit operations. The
//! width is abstracted by [`AddressBits`], implemented for `u32` (IPv4) and
//! [`U128`] (IPv6).

use super::{AddressFamily, Network, U128};
use crate::error::NetError;
use std::fmt::Debug;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ops::{BitAnd, BitOr, Not};

/// An unsigned integer wide enough to hold one address family.
pub trait AddressBits:
    Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
{
    /// Address width in bits, also the longest valid prefix length.
    const BITS: u8;
    const FAMILY: AddressFamily;
    const ONE: Self;

    /// Logical left shift, `0 <= k <= BITS`; shifting by `BITS` yields zero.
    fn shl_bits(self, k: u32) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Integer form of `addr`, or `None` if it belongs to the other family.
    fn from_ip(addr: IpAddr) -> Option<Self>;

    fn to_ip(self) -> IpAddr;
}

impl AddressBits for u32 {
    const BITS: u8 = 32;
    const FAMILY: AddressFamily = AddressFamily::V4;
    const ONE: u32 = 1;

    fn shl_bits(self, k: u32) -> u32 {
        self.checked_shl(k).unwrap_or(0)
    }

    fn wrapping_sub(self, rhs: u32) -> u32 {
        u32::wrapping_sub(self, rhs)
    }

    fn from_ip(addr: IpAddr) -> Option<u32> {
        match addr {
            IpAddr::V4(v4) => Some(u32::from(v4)),
            IpAddr::V6(_) => None,
        }
    }

    fn to_ip(self) -> IpAddr {
        IpAddr::V4(Ipv4Addr::from(self))
    }
}

impl AddressBits for U128 {
    const BITS: u8 = 128;
    const FAMILY: AddressFamily = AddressFamily::V6;
    const ONE: U128 = U128::ONE;

    fn shl_bits(self, k: u32) -> U128 {
        U128::shl_bits(self, k)
    }

    fn wrapping_sub(self, rhs: U128) -> U128 {
        U128::wrapping_sub(self, rhs)
    }

    fn from_ip(addr: IpAddr) -> Option<U128> {
        match addr {
            IpAddr::V6(v6) => Some(U128::from(v6)),
            IpAddr::V4(_) => None,
        }
    }

    fn to_ip(self) -> IpAddr {
        IpAddr::V6(Ipv6Addr::from(self))
    }
}

/// Host bits of a network with the given prefix length: `(1 << (BITS - len)) - 1`.
pub fn host_mask<A: AddressBits>(prefix_len: u8) -> A {
    debug_assert!(prefix_len <= A::BITS);
    A::ONE
        .shl_bits(u32::from(A::BITS - prefix_len))
        .wrapping_sub(A::ONE)
}

/// Network mask with the top `prefix_len` bits set.
pub fn net_mask<A: AddressBits>(prefix_len: u8) -> A {
    !host_mask::<A>(prefix_len)
}

/// A network as a fixed-width address plus prefix length.
///
/// The address never carries host bits and the prefix length never exceeds
/// `A::BITS`; [`TypedNet::new`] is the only public constructor.
///
/// Ordering is by address, then by prefix length, so a network sorts before
/// any longer network sharing its base address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypedNet<A> {
    addr: A,
    prefix_len: u8,
}

impl<A: AddressBits> TypedNet<A> {
    /// Create a network, clearing any host bits set in `addr`.
    ///
    /// # Errors
    /// [`NetError::PrefixTooLong`] if `prefix_len` exceeds the address width.
    pub fn new(addr: A, prefix_len: u8) -> Result<TypedNet<A>, NetError> {
        if prefix_len > A::BITS {
            return Err(NetError::PrefixTooLong {
                prefix_len,
                max: A::BITS,
            });
        }
        Ok(TypedNet::masked(addr, prefix_len))
    }

    /// Create a network from a prefix length already checked against `A::BITS`.
    pub(crate) fn masked(addr: A, prefix_len: u8) -> TypedNet<A> {
        debug_assert!(
            prefix_len <= A::BITS,
            "prefix_len[{prefix_len}] > {} should never happen.",
            A::BITS
        );
        TypedNet {
            addr: addr & net_mask::<A>(prefix_len),
            prefix_len,
        }
    }

    pub fn addr(&self) -> A {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Convert a caller-facing [`Network`], rejecting the wrong family.
    pub fn try_from_network(network: &Network) -> Result<TypedNet<A>, NetError> {
        let addr = A::from_ip(network.addr()).ok_or_else(|| NetError::MixedFamilies {
            expected: A::FAMILY,
            found: *network,
        })?;
        Ok(TypedNet::masked(addr, network.prefix_len()))
    }

    pub fn to_network(&self) -> Network {
        Network::from_parts(self.addr.to_ip(), self.prefix_len)
    }

    pub fn mask(&self) -> A {
        net_mask::<A>(self.prefix_len)
    }

    pub fn host_mask(&self) -> A {
        host_mask::<A>(self.prefix_len)
    }

    /// The immediate parent network, one bit shorter.
    ///
    /// Clears the lowest bit of the current mask. Returns `None` for a /0,
    /// which has no parent.
    pub fn parent(&self) -> Option<TypedNet<A>> {
        if self.prefix_len == 0 {
            return None;
        }
        let last_mask_bit = A::ONE.shl_bits(u32::from(A::BITS - self.prefix_len));
        Some(TypedNet::masked(
            self.addr & !last_mask_bit,
            self.prefix_len - 1,
        ))
    }

    /// Truncate to a shorter (or equal) prefix length.
    pub fn truncate(&self, prefix_len: u8) -> TypedNet<A> {
        debug_assert!(prefix_len <= self.prefix_len);
        TypedNet::masked(self.addr, prefix_len)
    }

    /// The address with every host bit set.
    pub fn broadcast(&self) -> A {
        self.addr | self.host_mask()
    }

    pub fn contains_addr(&self, addr: A) -> bool {
        addr & self.mask() == self.addr & self.mask()
    }

    /// True when `other` lies entirely inside this network.
    pub fn contains(&self, other: &TypedNet<A>) -> bool {
        self.prefix_len <= other.prefix_len && self.contains_addr(other.addr)
    }
}

impl<A: AddressBits> std::fmt::Display for TypedNet<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr.to_ip(), self.prefix_len)
    }
}
