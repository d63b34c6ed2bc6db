//! Shared balance constants.

#![allow(unused_imports)]

pub mod constants;

pub use constants::*;
