#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod board_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils;
