//! Collapsing networks into their minimal covering set.
//!
//! Sibling networks (two halves of the same parent) are merged bottom-up
//! into the parent until no two remaining networks share a parent.

use crate::error::NetError;
use crate::models::{AddressBits, AddressFamily, Network, TypedNet, U128};
use itertools::Itertools;
use std::collections::HashMap;

/// Combine networks into the fewest networks covering exactly the same addresses.
///
/// All networks must be of the same family as the first one. Duplicates,
/// overlapping networks and host bits in the input are allowed. The result
/// is sorted by address and contains no overlapping entries.
///
/// Results are always canonical: host bits are cleared, so a lone
/// `10.0.0.7/24` comes back as `10.0.0.0/24`.
///
/// # Errors
/// [`NetError::MixedFamilies`] if IPv4 and IPv6 networks are mixed.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use subnet_collapse::{collapse, Network};
/// let nets = [
///     Network::v4(Ipv4Addr::new(10, 0, 0, 0), 24).unwrap(),
///     Network::v4(Ipv4Addr::new(10, 0, 1, 0), 24).unwrap(),
/// ];
/// let merged = collapse(&nets).unwrap();
/// assert_eq!(merged, vec![Network::v4(Ipv4Addr::new(10, 0, 0, 0), 23).unwrap()]);
/// ```
pub fn collapse(networks: &[Network]) -> Result<Vec<Network>, NetError> {
    let Some(first) = networks.first() else {
        return Ok(Vec::new());
    };
    let collapsed = match first.family() {
        AddressFamily::V4 => collapse_as::<u32>(networks)?,
        AddressFamily::V6 => collapse_as::<U128>(networks)?,
    };
    log::debug!(
        "collapse: {} {} networks into {}",
        networks.len(),
        first.family(),
        collapsed.len()
    );
    Ok(collapsed)
}

fn collapse_as<A: AddressBits>(networks: &[Network]) -> Result<Vec<Network>, NetError> {
    let nets = networks
        .iter()
        .map(TypedNet::<A>::try_from_network)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(collapse_typed(nets)
        .iter()
        .map(TypedNet::to_network)
        .collect())
}

/// Collapse networks already in fixed-width form.
///
/// Same result as [`collapse`], for callers holding [`TypedNet`] values.
/// [`TypedNet::new`] has already cleared host bits and bounded the prefix
/// length of every input.
pub fn collapse_typed<A: AddressBits>(nets: Vec<TypedNet<A>>) -> Vec<TypedNet<A>> {
    // parent -> the one child currently seen under it
    let mut supers: HashMap<TypedNet<A>, TypedNet<A>> = HashMap::with_capacity(nets.len());
    let mut roots: Vec<TypedNet<A>> = Vec::new();
    let mut stack = nets;

    while let Some(net) = stack.pop() {
        let Some(parent) = net.parent() else {
            roots.push(net);
            continue;
        };
        match supers.get(&parent) {
            None => {
                supers.insert(parent, net);
            }
            Some(other) if *other == net => {}
            Some(other) => {
                // both halves present: the parent is fully covered
                log::trace!("merge {} + {} -> {}", other, net, parent);
                supers.remove(&parent);
                stack.push(parent);
            }
        }
    }

    supers
        .into_values()
        .chain(roots)
        .sorted()
        .coalesce(|last, net| {
            if net.addr() & last.mask() == last.addr() {
                Ok(last)
            } else {
                Err((last, net))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    fn v4(a: u8, b: u8, c: u8, d: u8, len: u8) -> Network {
        Network::v4(Ipv4Addr::new(a, b, c, d), len).unwrap()
    }

    fn v6(addr: &str, len: u8) -> Network {
        Network::v6(addr.parse::<Ipv6Addr>().unwrap(), len).unwrap()
    }

    #[test]
    fn test_collapse_empty() {
        assert!(collapse(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_collapse_siblings() {
        let result = collapse(&[v4(10, 0, 0, 0, 24), v4(10, 0, 1, 0, 24)]).unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 23)]);
    }

    #[test]
    fn test_collapse_non_siblings() {
        let result = collapse(&[v4(10, 0, 2, 0, 24), v4(10, 0, 0, 0, 24)]).unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 24), v4(10, 0, 2, 0, 24)]);

        // adjacent but with different parents
        let result = collapse(&[v4(10, 0, 1, 0, 24), v4(10, 0, 2, 0, 24)]).unwrap();
        assert_eq!(result, vec![v4(10, 0, 1, 0, 24), v4(10, 0, 2, 0, 24)]);
    }

    #[test]
    fn test_collapse_two_levels() {
        let result = collapse(&[
            v4(10, 0, 0, 0, 24),
            v4(10, 0, 1, 0, 24),
            v4(10, 0, 2, 0, 24),
            v4(10, 0, 3, 0, 24),
        ])
        .unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 22)]);
    }

    #[test]
    fn test_collapse_duplicates() {
        let result = collapse(&[v4(10, 0, 0, 0, 24), v4(10, 0, 0, 0, 24)]).unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 24)]);

        let result = collapse(&[
            v4(10, 0, 0, 0, 24),
            v4(10, 0, 1, 0, 24),
            v4(10, 0, 0, 0, 24),
        ])
        .unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 23)]);
    }

    #[test]
    fn test_collapse_contained() {
        let result = collapse(&[
            v4(10, 0, 0, 0, 8),
            v4(10, 20, 0, 0, 16),
            v4(10, 0, 0, 0, 24),
            v4(11, 0, 0, 0, 24),
        ])
        .unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 8), v4(11, 0, 0, 0, 24)]);
    }

    #[test]
    fn test_collapse_mixed_sizes() {
        // /25 + /25 -> /24, which then pairs with the other /24
        let result = collapse(&[
            v4(10, 0, 1, 128, 25),
            v4(10, 0, 0, 0, 24),
            v4(10, 0, 1, 0, 25),
            v4(10, 0, 4, 0, 24),
        ])
        .unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 23), v4(10, 0, 4, 0, 24)]);
    }

    #[test]
    fn test_collapse_host_bits() {
        let result = collapse(&[v4(10, 0, 0, 7, 24), v4(10, 0, 1, 99, 24)]).unwrap();
        assert_eq!(result, vec![v4(10, 0, 0, 0, 23)]);
    }

    #[test]
    fn test_collapse_to_global() {
        let result = collapse(&[v4(0, 0, 0, 0, 1), v4(128, 0, 0, 0, 1)]).unwrap();
        assert_eq!(result, vec![v4(0, 0, 0, 0, 0)]);

        let result = collapse(&[v4(0, 0, 0, 0, 0), v4(10, 0, 0, 0, 8), v4(0, 0, 0, 0, 0)]).unwrap();
        assert_eq!(result, vec![v4(0, 0, 0, 0, 0)]);
    }

    #[test]
    fn test_collapse_host_routes() {
        let result = collapse(&[
            v4(192, 168, 0, 3, 32),
            v4(192, 168, 0, 2, 32),
            v4(192, 168, 0, 0, 32),
            v4(192, 168, 0, 1, 32),
            v4(192, 168, 0, 4, 32),
        ])
        .unwrap();
        assert_eq!(
            result,
            vec![v4(192, 168, 0, 0, 30), v4(192, 168, 0, 4, 32)]
        );
    }

    #[test]
    fn test_collapse_v6() {
        let result = collapse(&[
            v6("2001:db8::", 64),
            v6("2001:db8:0:1::", 64),
            v6("2001:db8:0:2::", 64),
            v6("2001:db8:0:3::", 64),
            v6("2001:db8:1::", 48),
        ])
        .unwrap();
        assert_eq!(result, vec![v6("2001:db8::", 62), v6("2001:db8:1::", 48)]);

        // merge across the 64-bit half boundary
        let result = collapse(&[v6("::", 64), v6("0:0:0:1::", 64)]).unwrap();
        assert_eq!(result, vec![v6("::", 63)]);
        let result = collapse(&[v6("::", 1), v6("8000::", 1)]).unwrap();
        assert_eq!(result, vec![v6("::", 0)]);
        let result = collapse(&[v6("::1", 128), v6("::", 128)]).unwrap();
        assert_eq!(result, vec![v6("::", 127)]);
    }

    #[test]
    fn test_collapse_mixed_families() {
        let err = collapse(&[v4(10, 0, 0, 0, 24), v6("2001:db8::", 64)]).unwrap_err();
        assert_eq!(
            err,
            NetError::MixedFamilies {
                expected: AddressFamily::V4,
                found: v6("2001:db8::", 64),
            }
        );
        let err = collapse(&[v6("2001:db8::", 64), v4(10, 0, 0, 0, 24)]).unwrap_err();
        assert!(matches!(
            err,
            NetError::MixedFamilies {
                expected: AddressFamily::V6,
                ..
            }
        ));
    }

    #[test]
    fn test_collapse_output_family() {
        let result = collapse(&[v4(10, 0, 0, 0, 24)]).unwrap();
        assert!(matches!(result[0].addr(), IpAddr::V4(_)));
        assert_eq!(
            result[0].netmask(),
            IpAddr::V4(Ipv4Addr::new(255, 255, 255, 0))
        );
    }

    #[test]
    fn test_collapse_typed_direct() {
        let nets = vec![
            TypedNet::new(0x0A00_0000u32, 24).unwrap(),
            TypedNet::new(0x0A00_0100u32, 24).unwrap(),
        ];
        assert_eq!(
            collapse_typed(nets),
            vec![TypedNet::new(0x0A00_0000u32, 23).unwrap()]
        );
    }

    #[test]
    fn test_collapse_typed_host_bits_same_network() {
        // 10.0.0.7/24 and 10.0.0.0/24 are the same network, not siblings
        let nets = vec![
            TypedNet::new(0x0A00_0007u32, 24).unwrap(),
            TypedNet::new(0x0A00_0000u32, 24).unwrap(),
        ];
        let result = collapse_typed(nets);
        assert_eq!(result, vec![TypedNet::new(0x0A00_0000u32, 24).unwrap()]);
        assert_eq!(result[0].to_network(), v4(10, 0, 0, 0, 24));

        assert_eq!(
            collapse(&[v4(10, 0, 0, 7, 24)]).unwrap(),
            vec![v4(10, 0, 0, 0, 24)]
        );
    }

    #[test]
    fn test_collapse_typed_rejects_long_prefix() {
        assert_eq!(
            TypedNet::new(0u32, 33).unwrap_err(),
            NetError::PrefixTooLong {
                prefix_len: 33,
                max: 32
            }
        );
        assert!(TypedNet::new(U128::ZERO, 129).is_err());
    }
}
