//! Error type shared by the network operations.

use crate::models::{AddressFamily, Network};
use thiserror::Error;

/// Precondition violations reported by the public API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    #[error("network length /{prefix_len} is too long, maximum is /{max}")]
    PrefixTooLong { prefix_len: u8, max: u8 },
    #[error("all networks must be {expected}, found {found}")]
    MixedFamilies {
        expected: AddressFamily,
        found: Network,
    },
    #[error("supernet prefix /{new_prefix_len} is longer than {network}")]
    InvalidSupernetPrefix { network: Network, new_prefix_len: u8 },
}
