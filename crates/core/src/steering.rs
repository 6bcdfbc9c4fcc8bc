//! Steering document management
//!
//! Steering documents (`product.md`, `tech.md`, `structure.md`) carry
//! persistent project context that the workflow commands load before
//! executing tasks.

use std::path::{Path, PathBuf};

use crate::types::SpecflowResult;

/// Contents of the three core steering documents
#[derive(Debug, Default, Clone)]
pub struct SteeringDocuments {
    pub product: Option<String>,
    pub tech: Option<String>,
    pub structure: Option<String>,
}

const STEERING_FILES: &[&str] = &["product.md", "tech.md", "structure.md"];

/// Manages steering documents under `.claude/steering/`
pub struct SteeringManager {
    steering_dir: PathBuf,
}

impl SteeringManager {
    pub fn new(project_root: &Path) -> Self {
        Self {
            steering_dir: project_root.join(".claude").join("steering"),
        }
    }

    /// Load whichever steering documents exist
    ///
    /// Missing or unreadable documents are simply absent.
    pub fn load_documents(&self) -> SteeringDocuments {
        let read = |name: &str| std::fs::read_to_string(self.steering_dir.join(name)).ok();

        SteeringDocuments {
            product: read("product.md"),
            tech: read("tech.md"),
            structure: read("structure.md"),
        }
    }

    /// Check if at least one steering document exists
    pub fn documents_exist(&self) -> bool {
        STEERING_FILES
            .iter()
            .any(|name| self.steering_dir.join(name).exists())
    }

    /// Format loaded documents into a single context string
    pub fn format_context(&self, docs: &SteeringDocuments) -> String {
        let mut sections: Vec<String> = Vec::new();

        if let Some(product) = &docs.product {
            sections.push(format!("## Product Context\n{}", product));
        }
        if let Some(tech) = &docs.tech {
            sections.push(format!("## Technology Context\n{}", tech));
        }
        if let Some(structure) = &docs.structure {
            sections.push(format!("## Structure Context\n{}", structure));
        }

        if sections.is_empty() {
            return String::new();
        }

        format!(
            "# Steering Documents Context\n\n{}",
            sections.join("\n\n---\n\n")
        )
    }

    /// Load and format in one step
    pub fn steering_context(&self) -> SpecflowResult<String> {
        let docs = self.load_documents();
        Ok(self.format_context(&docs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_yields_empty_docs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = SteeringManager::new(temp_dir.path());

        let docs = manager.load_documents();
        assert!(docs.product.is_none());
        assert!(!manager.documents_exist());
        assert_eq!(manager.format_context(&docs), "");
    }

    #[test]
    fn test_load_and_format_partial_docs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let steering_dir = temp_dir.path().join(".claude").join("steering");
        std::fs::create_dir_all(&steering_dir).unwrap();
        std::fs::write(steering_dir.join("tech.md"), "Use Rust.").unwrap();

        let manager = SteeringManager::new(temp_dir.path());
        assert!(manager.documents_exist());

        let docs = manager.load_documents();
        assert!(docs.product.is_none());
        assert_eq!(docs.tech.as_deref(), Some("Use Rust."));

        let context = manager.format_context(&docs);
        assert!(context.starts_with("# Steering Documents Context"));
        assert!(context.contains("## Technology Context\nUse Rust."));
        assert!(!context.contains("## Product Context"));
    }
}
