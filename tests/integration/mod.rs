//! Integration test modules.

mod file_persistence_test;
mod session_flow_test;
