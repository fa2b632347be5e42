//! Random history generation for stress testing.

pub mod generator;
