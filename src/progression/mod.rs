//! Rewards and leveling after a won battle.

#![allow(unused_imports)]

pub mod leveling;
pub mod rewards;

pub use leveling::*;
pub use rewards::*;
