//! Knowledge file loading.
//!
//! A knowledge file is a JSON document holding the programme catalog and the FAQ set.
//! The KNS College dataset ships inside the binary and is used when no file is configured.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::models::{FaqEntry, ProgrammeEntry};
use super::KnowledgeBase;
use crate::error::AppError;

/// Bundled KNS College knowledge file.
const BUILTIN_KNOWLEDGE: &str = include_str!("../../data/kns_knowledge.json");

/// Knowledge file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeFile {
    /// Version for format compatibility
    #[serde(default)]
    pub version: Option<String>,
    /// Programme catalog, in resolution order
    #[serde(default)]
    pub programmes: Vec<ProgrammeEntry>,
    /// FAQ set, in scoring order
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
}

impl KnowledgeFile {
    pub fn from_json_str(content: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn into_knowledge_base(self) -> Result<KnowledgeBase, AppError> {
        Ok(KnowledgeBase::new(self.programmes, self.faqs)?)
    }
}

impl KnowledgeBase {
    /// Load and validate a knowledge base from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file = KnowledgeFile::from_json_str(&content)?;
        let version = file.version.clone();
        let kb = file.into_knowledge_base()?;

        info!(
            file = %path.display(),
            version = version.as_deref().unwrap_or("unversioned"),
            programmes = kb.programme_count(),
            faqs = kb.faq_count(),
            "Loaded knowledge file"
        );

        Ok(kb)
    }

    /// Parse a knowledge base from an in-memory JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, AppError> {
        KnowledgeFile::from_json_str(content)?.into_knowledge_base()
    }

    /// The bundled KNS College catalog and FAQ set.
    pub fn builtin() -> Result<Self, AppError> {
        let kb = Self::from_json_str(BUILTIN_KNOWLEDGE)?;
        info!(
            programmes = kb.programme_count(),
            faqs = kb.faq_count(),
            "Loaded built-in knowledge base"
        );
        Ok(kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{KnowledgeError, ProgrammeType};
    use std::io::Write;

    #[test]
    fn test_builtin_loads() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.programme_count(), 27);
        assert_eq!(kb.faq_count(), 53);

        let first = kb.programmes().next().unwrap();
        assert_eq!(first.name, "Diploma in Cybersecurity");
        assert_eq!(first.programme_type, ProgrammeType::Diploma);
        assert!(kb.faq_by_question("Greeting").is_some());
        assert!(kb.faq_by_question("Acknowledgment").is_some());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "version": "2",
                "programmes": [
                    {{"name": "Data Analyst", "type": "certificate", "duration": "12 Weeks",
                      "mode": "Online / Offline", "keywords": ["data analyst", "analytics"]}}
                ],
                "faqs": [
                    {{"question": "Greeting", "keywords": ["hello", "hi"], "answer": "Hello!"}}
                ]
            }}"#
        )
        .unwrap();

        let kb = KnowledgeBase::from_file(file.path()).unwrap();
        assert_eq!(kb.programme_count(), 1);
        assert_eq!(
            kb.programme_by_name("Data Analyst").unwrap().duration,
            "12 Weeks"
        );
        assert_eq!(kb.faq_count(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnowledgeBase::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        let err = KnowledgeBase::from_json_str(r#"{"programmes": [ {"name": 3} ]}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_invariant_violation_is_reported_at_load() {
        let err = KnowledgeBase::from_json_str(
            r#"{"faqs": [
                {"question": "Greeting", "keywords": ["hi"], "answer": "a"},
                {"question": "Greeting", "keywords": ["hello"], "answer": "b"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Knowledge(KnowledgeError::DuplicateQuestion(ref q)) if q == "Greeting"
        ));
    }
}
