//! Caller-facing network value.
//!
//! [`Network`] pairs an [`IpAddr`] with a prefix length. It is the type the
//! public operations take and return; the bit-level work happens on
//! [`TypedNet`](super::TypedNet) after conversion.

use super::{AddressBits, TypedNet, U128};
use crate::error::NetError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// IP address family.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Address width in bits (32 or 128).
    pub fn bits(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }

    pub fn of(addr: IpAddr) -> AddressFamily {
        match addr {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// An IPv4 or IPv6 network in CIDR form.
///
/// The address may carry host bits; operations that derive new networks
/// always clear them.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    addr: IpAddr,
    prefix_len: u8,
}

/// Unvalidated serde form of [`Network`].
#[derive(Deserialize)]
struct RawNetwork {
    addr: IpAddr,
    prefix_len: u8,
}

impl TryFrom<RawNetwork> for Network {
    type Error = NetError;

    fn try_from(raw: RawNetwork) -> Result<Network, NetError> {
        Network::new(raw.addr, raw.prefix_len)
    }
}

impl Network {
    /// Create a network, checking the prefix length against the family width.
    ///
    /// # Examples
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr};
    /// use subnet_collapse::Network;
    /// let net = Network::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)), 24).unwrap();
    /// assert_eq!(net.to_string(), "10.0.0.0/24");
    /// assert!(Network::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)), 33).is_err());
    /// ```
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Network, NetError> {
        let max = AddressFamily::of(addr).bits();
        if prefix_len > max {
            return Err(NetError::PrefixTooLong { prefix_len, max });
        }
        Ok(Network { addr, prefix_len })
    }

    pub fn v4(addr: Ipv4Addr, prefix_len: u8) -> Result<Network, NetError> {
        Network::new(IpAddr::V4(addr), prefix_len)
    }

    pub fn v6(addr: Ipv6Addr, prefix_len: u8) -> Result<Network, NetError> {
        Network::new(IpAddr::V6(addr), prefix_len)
    }

    /// Build from parts already known to be valid.
    pub(crate) fn from_parts(addr: IpAddr, prefix_len: u8) -> Network {
        debug_assert!(prefix_len <= AddressFamily::of(addr).bits());
        Network { addr, prefix_len }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(self.addr)
    }

    pub fn max_prefix_len(&self) -> u8 {
        self.family().bits()
    }

    /// Subnet mask as an address of the same family, e.g. `255.255.255.0` for a /24.
    pub fn netmask(&self) -> IpAddr {
        match self.addr {
            IpAddr::V4(v4) => self.typed(u32::from(v4)).mask().to_ip(),
            IpAddr::V6(v6) => self.typed(U128::from(v6)).mask().to_ip(),
        }
    }

    /// Lowest address in the network (host bits cleared).
    pub fn network_addr(&self) -> IpAddr {
        match self.addr {
            IpAddr::V4(v4) => self.typed(u32::from(v4)).addr().to_ip(),
            IpAddr::V6(v6) => self.typed(U128::from(v6)).addr().to_ip(),
        }
    }

    /// Highest address in the network (host bits set).
    pub fn broadcast(&self) -> IpAddr {
        match self.addr {
            IpAddr::V4(v4) => self.typed(u32::from(v4)).broadcast().to_ip(),
            IpAddr::V6(v6) => self.typed(U128::from(v6)).broadcast().to_ip(),
        }
    }

    /// True if `addr` is of the same family and inside this network.
    pub fn contains_addr(&self, addr: IpAddr) -> bool {
        match (self.addr, addr) {
            (IpAddr::V4(v4), IpAddr::V4(other)) => {
                self.typed(u32::from(v4)).contains_addr(u32::from(other))
            }
            (IpAddr::V6(v6), IpAddr::V6(other)) => {
                self.typed(U128::from(v6)).contains_addr(U128::from(other))
            }
            _ => false,
        }
    }

    // `bits` must be this network's own address in integer form.
    fn typed<A: AddressBits>(&self, bits: A) -> TypedNet<A> {
        TypedNet::masked(bits, self.prefix_len)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}
