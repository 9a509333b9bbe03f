#[macro_use]
extern crate serde;

mod arith;
mod blind;
mod block;
mod error;
mod issuer;
mod keys;
mod ledger;
mod pipeline;
mod registry;
mod vote;

pub use arith::*;
pub use blind::*;
pub use block::*;
pub use error::*;
pub use issuer::*;
pub use keys::*;
pub use ledger::*;
pub use pipeline::*;
pub use registry::*;
pub use vote::*;

#[cfg(test)]
mod fixtures;
