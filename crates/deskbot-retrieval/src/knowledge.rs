// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base: an immutable, ordered collection of question/answer
//! documents loaded once at process start.

use std::path::Path;

use deskbot_core::DeskbotError;
use serde::Deserialize;
use tracing::info;

/// The collaborator-provided load format: one question/answer record.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    /// Unique, stable identifier.
    pub id: u32,
    /// The customer question.
    pub question: String,
    /// The curated answer.
    pub answer: String,
}

/// One knowledge-base document with its cached combined form.
///
/// `combined_text` is derived once at load and never recomputed per query.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: u32,
    pub question: String,
    pub answer: String,
    pub combined_text: String,
}

impl Document {
    fn from_record(record: DocumentRecord) -> Self {
        let combined_text = format!(
            "Question: {}\nAnswer: {}",
            record.question, record.answer
        );
        Self {
            id: record.id,
            question: record.question,
            answer: record.answer,
            combined_text,
        }
    }
}

/// Immutable ordered document collection, fixed for the process lifetime.
#[derive(Debug)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
}

impl KnowledgeBase {
    /// Builds a knowledge base from pre-loaded records, preserving order.
    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        let documents = records.into_iter().map(Document::from_record).collect();
        Self { documents }
    }

    /// Loads records from a JSON array file of `{id, question, answer}` objects.
    pub fn load_json(path: &Path) -> Result<Self, DeskbotError> {
        let contents = std::fs::read_to_string(path).map_err(|e| DeskbotError::Knowledge {
            message: format!("failed to read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        let kb = Self::from_json_str(&contents)?;
        info!(path = %path.display(), documents = kb.len(), "knowledge base loaded");
        Ok(kb)
    }

    /// Parses records from a JSON array string.
    pub fn from_json_str(json: &str) -> Result<Self, DeskbotError> {
        let records: Vec<DocumentRecord> =
            serde_json::from_str(json).map_err(|e| DeskbotError::Knowledge {
                message: "malformed knowledge base JSON".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self::from_records(records))
    }

    /// All documents, in load order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the knowledge base holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_derived_at_load() {
        let kb = KnowledgeBase::from_records(vec![DocumentRecord {
            id: 0,
            question: "What is a funded account?".into(),
            answer: "An account where we provide the capital.".into(),
        }]);
        assert_eq!(
            kb.documents()[0].combined_text,
            "Question: What is a funded account?\nAnswer: An account where we provide the capital."
        );
    }

    #[test]
    fn load_order_is_preserved() {
        let kb = KnowledgeBase::from_records(vec![
            DocumentRecord {
                id: 7,
                question: "a".into(),
                answer: "b".into(),
            },
            DocumentRecord {
                id: 3,
                question: "c".into(),
                answer: "d".into(),
            },
        ]);
        let ids: Vec<u32> = kb.documents().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn from_json_str_parses_records() {
        let json = r#"[
            {"id": 1, "question": "How do I withdraw?", "answer": "Use the dashboard."},
            {"id": 2, "question": "What is KYC?", "answer": "Identity verification."}
        ]"#;
        let kb = KnowledgeBase::from_json_str(json).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.documents()[1].question, "What is KYC?");
    }

    #[test]
    fn from_json_str_rejects_malformed_input() {
        let err = KnowledgeBase::from_json_str("not json").unwrap_err();
        assert!(err.to_string().contains("knowledge base"), "got: {err}");
    }

    #[test]
    fn empty_knowledge_base() {
        let kb = KnowledgeBase::from_records(vec![]);
        assert!(kb.is_empty());
        assert_eq!(kb.len(), 0);
    }
}
