use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const DEFAULT_GROUP_ID: &str = "io.quarkus";

/// Extension record as served by the `/extensions` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiExtension {
    /// `groupId:artifactId`
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A selectable extension from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QExtension {
    pub name: String,
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl QExtension {
    /// `groupId:artifactId`, the form the download endpoint expects.
    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

impl From<ApiExtension> for QExtension {
    fn from(api: ApiExtension) -> Self {
        let (group_id, artifact_id) = match api.id.split_once(':') {
            Some((group, artifact)) => (group.to_string(), artifact.to_string()),
            None => (DEFAULT_GROUP_ID.to_string(), api.id.clone()),
        };

        QExtension {
            name: api.name,
            group_id,
            artifact_id,
            short_name: api.short_name,
            description: api.description,
            category: api.category,
            labels: api.labels,
        }
    }
}

/// Parse the catalog JSON, drop repeated artifact ids and sort by display name.
pub fn parse_catalog(json: &str) -> serde_json::Result<Vec<QExtension>> {
    let api: Vec<ApiExtension> = serde_json::from_str(json)?;
    let extensions = api.into_iter().map(QExtension::from).collect();
    Ok(sort_by_name(remove_duplicate_artifact_ids(extensions)))
}

/// Keep the first extension for each artifact id, preserving input order.
pub fn remove_duplicate_artifact_ids(extensions: Vec<QExtension>) -> Vec<QExtension> {
    let mut seen = HashSet::new();
    extensions
        .into_iter()
        .filter(|e| seen.insert(e.artifact_id.clone()))
        .collect()
}

pub fn sort_by_name(mut extensions: Vec<QExtension>) -> Vec<QExtension> {
    extensions.sort_by(|a, b| locale_compare(&a.name, &b.name));
    extensions
}

/// Accent- and case-insensitive ordering.
///
/// "Ärger" and "Łódź" sort next to "Arc" and "Lambda" rather than after
/// "Zookeeper". Names equal apart from case put lowercase first, then accents
/// and anything else are decided by code point.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(base_letters)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Letters with a stroke or ligature have no canonical decomposition.
fn base_letters(c: char) -> Vec<char> {
    match c {
        'Ø' => vec!['O'],
        'ø' => vec!['o'],
        'Ł' => vec!['L'],
        'ł' => vec!['l'],
        'Đ' => vec!['D'],
        'đ' => vec!['d'],
        'Ħ' => vec!['H'],
        'ħ' => vec!['h'],
        'Ŧ' => vec!['T'],
        'ŧ' => vec!['t'],
        'Æ' => vec!['A', 'E'],
        'æ' => vec!['a', 'e'],
        'Œ' => vec!['O', 'E'],
        'œ' => vec!['o', 'e'],
        'ß' => vec!['s', 's'],
        other => vec![other],
    }
}

fn case_order(a: &str, b: &str) -> Ordering {
    let rank = |c: char| u8::from(c.is_uppercase());
    a.chars()
        .map(rank)
        .cmp(b.chars().map(rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ext(artifact_id: &str, name: &str) -> QExtension {
        QExtension {
            name: name.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            artifact_id: artifact_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_api_splits_coordinates() {
        let api = ApiExtension {
            id: "io.quarkus:quarkus-resteasy".to_string(),
            name: "RESTEasy JAX-RS".to_string(),
            short_name: Some("jax-rs".to_string()),
            description: None,
            category: Some("Web".to_string()),
            labels: vec!["rest".to_string()],
        };
        let ext = QExtension::from(api);
        assert_eq!(ext.group_id, "io.quarkus");
        assert_eq!(ext.artifact_id, "quarkus-resteasy");
        assert_eq!(ext.coordinates(), "io.quarkus:quarkus-resteasy");
    }

    #[test]
    fn test_from_api_without_group() {
        let api: ApiExtension =
            serde_json::from_str(r#"{"id": "quarkus-arc", "name": "ArC"}"#).unwrap();
        let ext = QExtension::from(api);
        assert_eq!(ext.group_id, "io.quarkus");
        assert_eq!(ext.artifact_id, "quarkus-arc");
    }

    #[test]
    fn test_duplicates_keep_first() {
        let deduped = remove_duplicate_artifact_ids(vec![
            ext("a", "First A"),
            ext("b", "B"),
            ext("a", "Second A"),
        ]);
        assert_eq!(deduped, vec![ext("a", "First A"), ext("b", "B")]);
    }

    #[test]
    fn test_locale_ordering() {
        let sorted = sort_by_name(vec![
            ext("z", "Zookeeper"),
            ext("u", "Ärger"),
            ext("a", "Arc"),
            ext("l", "agroal"),
        ]);
        let names: Vec<_> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["agroal", "Arc", "Ärger", "Zookeeper"]);

        let sorted = sort_by_name(vec![
            ext("z", "Zookeeper"),
            ext("o", "Øresund"),
            ext("l", "Łódź"),
            ext("r", "Oracle"),
            ext("m", "Lambda"),
        ]);
        let names: Vec<_> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Lambda", "Łódź", "Oracle", "Øresund", "Zookeeper"]);
    }

    #[test]
    fn test_lowercase_first_on_case_ties() {
        let sorted = sort_by_name(vec![ext("upper", "Arc"), ext("lower", "arc")]);
        let names: Vec<_> = sorted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["arc", "Arc"]);

        assert_eq!(locale_compare("Ærø", "aero"), Ordering::Greater);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn test_parse_catalog() {
        let json = r#"[
            {"id": "io.quarkus:a", "name": "Beta"},
            {"id": "io.quarkus:b", "name": "Alpha"},
            {"id": "io.quarkus:a", "name": "Gamma"}
        ]"#;
        let catalog = parse_catalog(json).unwrap();
        let ids: Vec<_> = catalog.iter().map(|e| e.artifact_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalog[1].name, "Beta");
    }
}
