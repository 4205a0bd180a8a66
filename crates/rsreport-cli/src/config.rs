use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the database when `--config` is not given
pub const DEFAULT_CONFIG_NAME: &str = "rsreport.toml";

/// Report definition: what goes into the document, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    /// Overrides the project name as the report title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Template replacing the built-in page layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Stylesheets added after the default one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<PathBuf>,

    /// Result columns rendered as identifiers in every table
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_columns: Vec<String>,

    /// Print project layers after the configured sections
    #[serde(default = "default_true")]
    pub layers: bool,

    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Untitled sections group content without a heading or navigation entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<SummaryConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatsConfig>,

    /// Nested one level deeper than this section
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionConfig>,
}

/// Query whose result columns become column headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub sql: String,

    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Replaces the report-wide identifier columns for this table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_columns: Option<Vec<String>>,
}

/// Single-row query rendered as a key/value table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SummaryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub sql: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Count, range, mean and NULL count for each listed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatsConfig {
    pub table: String,
    pub columns: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl ReportConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_definition());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report definition: {}", path.display()))?;
        let mut config: ReportConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid report definition: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Anchor relative stylesheet and template paths at `base`, the
    /// directory holding the definition file.
    fn resolve_paths(&mut self, base: &Path) {
        for path in self.css.iter_mut().chain(self.template.as_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Definition used when none is found: project header and layers only
    pub fn default_definition() -> Self {
        Self {
            layers: true,
            ..Default::default()
        }
    }

    /// Starting point written by `rsreport init`
    pub fn starter() -> Self {
        Self {
            footer: Some("Generated by rsreport".to_string()),
            id_columns: vec!["ReachID".to_string()],
            layers: true,
            sections: vec![
                SectionConfig {
                    id: Some("ReportIntro".to_string()),
                    title: Some("Introduction".to_string()),
                    paragraphs: vec!["Summary of the reaches in this project.".to_string()],
                    summaries: vec![SummaryConfig {
                        title: None,
                        sql: "SELECT Count(*) AS \"Number of reaches\", Sum(iGeo_Len) / 1000 AS \"Total reach length (km)\" FROM Reaches".to_string(),
                        class: None,
                    }],
                    ..Default::default()
                },
                SectionConfig {
                    id: Some("ReachAttributes".to_string()),
                    title: Some("Reach Attributes".to_string()),
                    stats: vec![StatsConfig {
                        table: "Reaches".to_string(),
                        columns: vec!["iGeo_Len".to_string(), "iGeo_Slope".to_string()],
                    }],
                    sections: vec![SectionConfig {
                        title: Some("Longest Reaches".to_string()),
                        tables: vec![TableConfig {
                            title: None,
                            sql: "SELECT ReachID, iGeo_Len FROM Reaches ORDER BY iGeo_Len DESC LIMIT 10"
                                .to_string(),
                            columns: vec!["Reach".to_string(), "Length (m)".to_string()],
                            class: None,
                            id_columns: None,
                        }],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_default_definition() {
        let temp_dir = TempDir::new().unwrap();
        let config = ReportConfig::load_from(&temp_dir.path().join("none.toml")).unwrap();

        assert!(config.sections.is_empty());
        assert!(config.layers);
    }

    #[test]
    fn test_starter_round_trips_through_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(DEFAULT_CONFIG_NAME);

        let starter = ReportConfig::starter();
        starter.save_to(&path).unwrap();

        assert_eq!(ReportConfig::load_from(&path).unwrap(), starter);
    }

    #[test]
    fn test_nested_sections_parse() {
        let toml = r#"
            title = "Capacity"
            layers = false

            [[sections]]
            title = "Dam Capacity"

            [[sections.tables]]
            sql = "SELECT 1"
            columns = ["One"]
            id_columns = []

            [[sections.sections]]
            title = "Detail"
            paragraphs = ["Inner text"]
        "#;
        let config: ReportConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.title.as_deref(), Some("Capacity"));
        assert!(!config.layers);
        assert_eq!(config.sections[0].tables[0].id_columns, Some(vec![]));
        assert_eq!(config.sections[0].sections[0].paragraphs, vec!["Inner text"]);
    }

    #[test]
    fn test_invalid_definition_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "sections = 3").unwrap();

        let err = ReportConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_relative_paths_resolve_against_definition_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("defs");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(DEFAULT_CONFIG_NAME);
        let absolute = temp_dir.path().join("shared.css");
        std::fs::write(
            &path,
            format!(
                "template = \"layout.html\"\ncss = [\"extra.css\", {:?}]\n",
                absolute.display().to_string()
            ),
        )
        .unwrap();

        let config = ReportConfig::load_from(&path).unwrap();

        assert_eq!(config.template, Some(dir.join("layout.html")));
        assert_eq!(config.css, vec![dir.join("extra.css"), absolute]);
    }
}
