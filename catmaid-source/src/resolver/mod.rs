//! Resolution of CATMAID addresses.
//!
//! - [`split_address`] separates the server list from the path.
//! - [`complete_path`] works out which path level is being typed and
//!   offers completions for it.

mod address;
mod cascade;

pub use address::{hostnames_with_prefix, split_address, split_trailing, SplitAddress};
pub use cascade::{complete_path, Interpretation, PathCompletion};
