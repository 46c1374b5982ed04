// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base and lexical retrieval for the deskbot support engine.
//!
//! This crate provides:
//! - [`KnowledgeBase`]: immutable question/answer documents with cached
//!   combined text, loaded once at startup
//! - [`RetrievalEngine`]: deterministic additive substring scoring, no
//!   embeddings and no network
//!
//! Scoring is lexical on purpose: substring hits on the whole query, on its
//! tokens, and on a fixed domain vocabulary, weighted toward question text.

pub mod engine;
pub mod knowledge;

pub use engine::{RetrievalEngine, ScoredCandidate};
pub use knowledge::{Document, DocumentRecord, KnowledgeBase};
