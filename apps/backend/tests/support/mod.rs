#![allow(dead_code)]

pub mod moves;

pub use harness::{Harness, SeatOptions, DUCK, HUNTER, START_GOLD};
