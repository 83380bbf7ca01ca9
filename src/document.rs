//! Parsed fixture documents.
//!
//! A fixture document is parsed once into an immutable [`DocumentTree`]. The
//! tree is an arena: every node has a [`NodeId`], and aliases resolve to the
//! `NodeId` of the anchored node rather than to a copy, so node identity is
//! structural and survives back-references and cycles.
//!
//! Text-level YAML parsing is delegated to the `yaml-rust2` event parser;
//! this module only assembles events into nodes.

mod build;
mod tree;

pub use tree::{DocumentNode, DocumentTree, NodeId};
