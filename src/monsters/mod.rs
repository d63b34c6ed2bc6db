//! Monster kinds, stats, and encounter generation.

#![allow(unused_imports)]

pub mod generator;
pub mod types;

pub use generator::*;
pub use types::*;
