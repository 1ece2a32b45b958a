#![no_std]

#[cfg(feature = "async")]
pub mod asynch;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod common;
pub mod conversions;
pub mod engine;
pub mod error;
pub mod tables;
pub mod vane;

mod log;
mod math;
