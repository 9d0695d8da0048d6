//! Input validation for the wizard text prompts.
//!
//! Every validator returns the message to show under the input, or `None` when
//! the value is acceptable. Validation problems are never errors.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

fn java_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex"))
}

fn artifact_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9._-]*$").expect("artifact id regex"))
}

fn dotted_identifier_problem(value: &str, what: &str) -> Option<String> {
    if value.is_empty() {
        return Some(format!("Invalid {what}: {what} cannot be empty"));
    }

    for part in value.split('.') {
        if part.is_empty() {
            return Some(format!("Invalid {what}: empty segment in '{value}'"));
        }
        if !java_identifier_re().is_match(part) {
            return Some(format!("Invalid {what}: '{part}' is not a valid Java identifier"));
        }
        if JAVA_KEYWORDS.contains(&part) {
            return Some(format!("Invalid {what}: '{part}' is a reserved Java keyword"));
        }
    }

    None
}

pub fn validate_group_id(value: &str) -> Option<String> {
    dotted_identifier_problem(value, "groupId")
}

pub fn validate_package_name(value: &str) -> Option<String> {
    dotted_identifier_problem(value, "package name")
}

pub fn validate_artifact_id(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Invalid artifactId: artifactId cannot be empty".to_string());
    }
    if !artifact_id_re().is_match(value) {
        return Some(
            "Invalid artifactId: must start with a lowercase letter and contain only lowercase letters, digits, '.', '-' and '_'"
                .to_string(),
        );
    }
    None
}

pub fn validate_version(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Invalid version: version cannot be empty".to_string());
    }
    if value.chars().any(char::is_whitespace) {
        return Some("Invalid version: version cannot contain whitespace".to_string());
    }
    None
}

pub fn validate_resource_name(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Invalid resource name: resource name cannot be empty".to_string());
    }
    if !java_identifier_re().is_match(value) || JAVA_KEYWORDS.contains(&value) {
        return Some(format!(
            "Invalid resource name: '{value}' is not a valid Java class name"
        ));
    }
    None
}

/// The parent directory must exist and must not already hold a folder named after the artifact.
pub fn validate_target_dir(value: &str, artifact_id: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Target directory cannot be empty".to_string());
    }

    let dir = Path::new(value);
    if !dir.is_dir() {
        return Some(format!("'{value}' is not an existing directory"));
    }

    if dir.join(artifact_id).exists() {
        return Some(format!(
            "'{}' already exists in '{value}'",
            artifact_id
        ));
    }

    None
}
