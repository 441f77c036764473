//! Cyclewalk: Cycle-Aware Filesystem Tree Walking
//!
//! Walks directory trees, follows symbolic links into directories, and
//! reports every link or directory that leads back to a directory the walk
//! has already entered.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;
