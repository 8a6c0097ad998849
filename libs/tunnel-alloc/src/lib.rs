#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod allocate;
mod digits;
mod error;
mod gateway;

pub use allocate::{allocate, host_offsets, AddressPair};
pub use digits::decimal_digits_as_hex;
pub use error::Error;
pub use gateway::{compute_gateway, compute_gateway_v4, compute_gateway_v6, ensure_has_host_bits};
