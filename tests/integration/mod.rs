//! Integration tests for the folder map generator and drift checker

mod config_integration;
mod drift_check;
mod test_utils;
mod tree_determinism;
