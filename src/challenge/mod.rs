//! Challenge configurations and the modifier layer.

#![allow(unused_imports)]

pub mod config;
pub mod modifiers;

pub use config::*;
pub use modifiers::*;
