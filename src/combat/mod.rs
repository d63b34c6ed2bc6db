//! Turn-based battle resolution.

#![allow(unused_imports)]

pub mod logic;
pub mod spells;
pub mod types;

pub use logic::*;
pub use spells::*;
pub use types::*;
