//! Zargon - turn-based combat economy and balance simulator.
//!
//! This module exposes the combat rules, progression tables and the Monte
//! Carlo harness for the `simulate` binary and for testing.

pub mod build_info;
pub mod challenge;
pub mod character;
pub mod combat;
pub mod core;
pub mod equipment;
pub mod monsters;
pub mod progression;
pub mod simulator;
