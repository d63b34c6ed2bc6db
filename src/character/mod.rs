//! Character stats and prestige.

#![allow(unused_imports)]

pub mod prestige;
pub mod stats;

pub use prestige::*;
pub use stats::*;
