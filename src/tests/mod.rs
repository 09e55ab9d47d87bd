//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the table controller end to end and check what the
//! shell renders from it.

mod view_snapshots;
