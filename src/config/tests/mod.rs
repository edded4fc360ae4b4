//! Unit tests for configuration loading, fallbacks, and validation.

mod helpers;
