//! Network processing logic.
//!
//! - [`collapse`] - Merging sibling subnets into their minimal covering set
//! - [`netfuncs`] - Supernet, broadcast and containment helpers

mod collapse;
mod netfuncs;

// Re-export public functions
pub use collapse::{collapse, collapse_typed};
pub use netfuncs::{broadcast, is_subnet, is_supernet, supernet};
