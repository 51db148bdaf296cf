//! Arclink: working-space to archive reconciliation
//!
//! Keeps a mutable working space lean by replacing dataset version
//! directories that are byte-identical to their archived counterpart with
//! symbolic links into the archive, deleting versions the archive has
//! superseded, and flagging versions the archive has not seen yet.

pub mod catalog;
pub mod cli;
pub mod compare;
pub mod engine;
pub mod error;
pub mod logging;
pub mod report;
