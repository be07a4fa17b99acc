//! The tools module provides several helper functions for huffpack.
//!
//! The tools are:
//! - cli: Command line interface.
//! - files: Reading input and writing output for the command line driver.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod files;
pub mod freq_count;
