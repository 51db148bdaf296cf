//! Integration tests for working-space reconciliation

mod discovery;
mod test_utils;
