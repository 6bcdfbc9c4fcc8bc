//! Project type detection
//!
//! Inspects a project directory for well-known indicator files to report
//! which ecosystems the project belongs to. Glob indicators (`*.csproj`)
//! are matched against direct directory entries.

use std::path::Path;

use globset::Glob;

use crate::types::{SpecflowError, SpecflowResult};

/// Indicator files per project type, checked in a fixed order
const PROJECT_INDICATORS: &[(&str, &[&str])] = &[
    ("Node.js", &["package.json", "node_modules"]),
    (
        "Python",
        &["requirements.txt", "setup.py", "pyproject.toml", "__pycache__"],
    ),
    ("Java", &["pom.xml", "build.gradle"]),
    ("C#", &["*.csproj", "*.sln"]),
    ("Go", &["go.mod", "go.sum"]),
    ("Rust", &["Cargo.toml", "Cargo.lock"]),
    ("PHP", &["composer.json", "vendor"]),
    ("Ruby", &["Gemfile", "Gemfile.lock"]),
];

/// Detect the project types present in a directory
///
/// A type is reported at most once, in indicator-table order.
pub fn detect_project_types(project_path: &Path) -> SpecflowResult<Vec<String>> {
    if !project_path.is_dir() {
        return Err(SpecflowError::Setup(format!(
            "Project directory does not exist: {}",
            project_path.display()
        )));
    }

    let entries: Vec<String> = std::fs::read_dir(project_path)?
        .flatten()
        .filter_map(|entry| entry.file_name().to_str().map(|s| s.to_string()))
        .collect();

    let mut detected = Vec::new();

    for (project_type, indicators) in PROJECT_INDICATORS {
        for indicator in *indicators {
            let matched = if indicator.contains('*') {
                match Glob::new(indicator) {
                    Ok(glob) => {
                        let matcher = glob.compile_matcher();
                        entries.iter().any(|name| matcher.is_match(name))
                    }
                    Err(_) => false,
                }
            } else {
                project_path.join(indicator).exists()
            };

            if matched {
                detected.push(project_type.to_string());
                break;
            }
        }
    }

    Ok(detected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_rust_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("Cargo.toml"), "[package]").unwrap();

        let types = detect_project_types(temp_dir.path()).unwrap();
        assert_eq!(types, vec!["Rust"]);
    }

    #[test]
    fn test_detect_multiple_types() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(temp_dir.path().join("pyproject.toml"), "").unwrap();

        let types = detect_project_types(temp_dir.path()).unwrap();
        assert_eq!(types, vec!["Node.js", "Python"]);
    }

    #[test]
    fn test_detect_glob_indicator() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("App.csproj"), "<Project/>").unwrap();

        let types = detect_project_types(temp_dir.path()).unwrap();
        assert_eq!(types, vec!["C#"]);
    }

    #[test]
    fn test_each_type_reported_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("go.mod"), "module x").unwrap();
        std::fs::write(temp_dir.path().join("go.sum"), "").unwrap();

        let types = detect_project_types(temp_dir.path()).unwrap();
        assert_eq!(types, vec!["Go"]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let result = detect_project_types(Path::new("/nonexistent/specflow-test"));
        assert!(result.is_err());
    }
}
