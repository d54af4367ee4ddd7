//! Lineage Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Lineage family-tree
//! charting tools. It includes:
//!
//! - **Identifiers**: String-interned node identifiers and a generator for fresh ones ([`identifier`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Tree**: The logical family tree and its persistent builder ([`tree`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod tree;
