//! Property-based tests for equation generation.
