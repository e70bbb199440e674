//! Cell identifiers and the packed cell-set wire format.
//!
//! This crate defines the 64-bit quad-tree cell identifiers used to describe land parcels, their
//! hex token form, and the compact bit-packed encoding handed to the registry contract. The
//! contract decodes the same format, so the encoding here is byte-exact and must not change
//! without changing the contract.
//!
//! Nothing in this crate requires the standard library, but it does require Rust's alloc crate.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

pub mod cell_id;
pub mod error;
pub mod pack;
pub mod prefix;
pub mod segment;
pub mod trim;

pub use cell_id::{CellId, ChildPosition};
pub use error::{FormatError, PackError};
pub use pack::{decode_set, decode_single, encode_set, encode_single};
