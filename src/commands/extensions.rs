use crate::core::api::QuarkusApi;
use crate::core::config::Config;
use crate::core::extension::QExtension;
use crate::error::Result;

pub async fn list_extensions(config: &Config, json: bool) -> Result<()> {
    let api = QuarkusApi::new(config)?;
    let extensions = api.fetch_catalog().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&extensions)?);
        return Ok(());
    }

    if extensions.is_empty() {
        println!("The catalog at {} has no extensions.", api.api_url());
        return Ok(());
    }

    println!("Available Quarkus extensions ({}):", extensions.len());
    println!();
    for line in format_listing(&extensions) {
        println!("{line}");
    }

    Ok(())
}

/// One line per extension with the artifact ids lined up in a column.
pub fn format_listing(extensions: &[QExtension]) -> Vec<String> {
    let width = extensions
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    extensions
        .iter()
        .map(|e| {
            let padding = width - e.name.chars().count();
            format!("  {}{}  {}", e.name, " ".repeat(padding), e.coordinates())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_listing() {
        let extensions = vec![
            QExtension {
                name: "ArC".to_string(),
                group_id: "io.quarkus".to_string(),
                artifact_id: "quarkus-arc".to_string(),
                ..Default::default()
            },
            QExtension {
                name: "RESTEasy Classic".to_string(),
                group_id: "io.quarkus".to_string(),
                artifact_id: "quarkus-resteasy".to_string(),
                ..Default::default()
            },
        ];

        assert_eq!(
            format_listing(&extensions),
            vec![
                "  ArC               io.quarkus:quarkus-arc".to_string(),
                "  RESTEasy Classic  io.quarkus:quarkus-resteasy".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_empty_listing() {
        assert!(format_listing(&[]).is_empty());
    }
}
