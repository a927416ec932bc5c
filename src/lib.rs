//! Tagged sums: enums addressed by tag name, consumed through exhaustive handler records and
//! carried over the wire as `{ "tag": ..., "values": [...] }`.
//!
//! Derive [`TaggedSum`] on an enum, or use the ready-made [`Maybe`], [`Either`] and
//! [`AsyncData`].

mod codec;
mod dyn_cata;
mod error;
mod sum;

pub mod async_data;
pub mod either;
pub mod maybe;

pub use async_data::{AllData, AsyncData, AsyncDataCata, AsyncTag, Precedence, PrecedenceError};
pub use codec::*;
pub use dyn_cata::*;
pub use either::{Either, EitherCata};
pub use error::*;
pub use maybe::{Maybe, MaybeCata};
pub use sum::*;

pub use tagsum_macros::TaggedSum;

#[doc(hidden)]
pub mod __private {
    pub use crate::codec::{
        deserialize_record, end_values, invalid_index, next_value, serialize_record,
    };
    pub use serde;
}

#[cfg(doctest)]
mod tests_readme;
