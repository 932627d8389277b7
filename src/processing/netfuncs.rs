//! Supernet, broadcast and containment helpers.

use crate::error::NetError;
use crate::models::{Network, TypedNet, U128};
use std::net::IpAddr;

/// Truncate `network` to the shorter prefix `new_prefix_len`.
///
/// Address bits past the new prefix are cleared.
///
/// # Errors
/// [`NetError::InvalidSupernetPrefix`] if `new_prefix_len` is longer than the
/// current prefix length.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use subnet_collapse::{supernet, Network};
/// let net = Network::v4(Ipv4Addr::new(10, 0, 5, 0), 24).unwrap();
/// assert_eq!(supernet(&net, 22).unwrap().to_string(), "10.0.4.0/22");
/// ```
pub fn supernet(network: &Network, new_prefix_len: u8) -> Result<Network, NetError> {
    if new_prefix_len > network.prefix_len() {
        return Err(NetError::InvalidSupernetPrefix {
            network: *network,
            new_prefix_len,
        });
    }
    let truncated = match network.addr() {
        IpAddr::V4(v4) => TypedNet::masked(u32::from(v4), network.prefix_len())
            .truncate(new_prefix_len)
            .to_network(),
        IpAddr::V6(v6) => TypedNet::masked(U128::from(v6), network.prefix_len())
            .truncate(new_prefix_len)
            .to_network(),
    };
    Ok(truncated)
}

/// The address with every host bit of `network` set.
pub fn broadcast(network: &Network) -> IpAddr {
    network.broadcast()
}

/// Returns whether `b` is a subnet of `a`.
///
/// `a` must contain the base address of `b`, have an equal or shorter prefix
/// and be of the same family.
pub fn is_subnet(a: &Network, b: &Network) -> bool {
    match (a.addr(), b.addr()) {
        (IpAddr::V4(outer), IpAddr::V4(inner)) => {
            TypedNet::masked(u32::from(outer), a.prefix_len())
                .contains(&TypedNet::masked(u32::from(inner), b.prefix_len()))
        }
        (IpAddr::V6(outer), IpAddr::V6(inner)) => {
            TypedNet::masked(U128::from(outer), a.prefix_len())
                .contains(&TypedNet::masked(U128::from(inner), b.prefix_len()))
        }
        _ => false,
    }
}

/// Returns whether `b` is a supernet of `a`.
pub fn is_supernet(a: &Network, b: &Network) -> bool {
    is_subnet(b, a)
}
