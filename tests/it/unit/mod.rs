//! Unit tests for the pad engine.

mod snapshot_tests;
