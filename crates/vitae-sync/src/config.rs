//! Configuration for a sync run
//!
//! Everything the pipeline needs (researcher iD, endpoint, file paths)
//! flows through [`SyncConfig`]; there are no module-level path or URL
//! constants, so the pipeline is testable with synthetic inputs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Configuration for a sync run, loadable from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Researcher ORCID iD, e.g. `0000-0002-1825-0097`. Required.
    pub orcid: String,
    /// Works API endpoint
    pub endpoint: String,
    /// Maximum number of results to request
    pub per_page: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Manually curated files; entries here always win over fetched records
    pub manual_bibs: Vec<PathBuf>,
    /// Generated BibTeX file for publications
    pub out_publications: PathBuf,
    /// Generated BibTeX file for working papers
    pub out_working_papers: PathBuf,
    /// Generated JSON file for the website
    pub out_web_json: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            orcid: String::new(),
            endpoint: "https://api.openalex.org/works".to_string(),
            per_page: 200,
            timeout_secs: 30,
            manual_bibs: vec![
                PathBuf::from("bib/manual_publications.bib"),
                PathBuf::from("bib/manual_working_papers.bib"),
            ],
            out_publications: PathBuf::from("bib/auto_publications.bib"),
            out_working_papers: PathBuf::from("bib/auto_working_papers.bib"),
            out_web_json: PathBuf::from("site/publications.json"),
        }
    }
}

impl SyncConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SyncError::io(path.display().to_string(), e))?;
        Self::from_toml(&text)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, SyncError> {
        toml::from_str(toml_str).map_err(|e| SyncError::Config(e.to_string()))
    }

    /// Validate configuration before any work happens
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.orcid.trim().is_empty() {
            return Err(SyncError::Config(
                "no ORCID iD configured; set `orcid` in the config file or pass --orcid"
                    .to_string(),
            ));
        }
        if self.per_page == 0 {
            return Err(SyncError::Config("per_page must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.endpoint, "https://api.openalex.org/works");
        assert_eq!(config.per_page, 200);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_missing_orcid_is_fatal() {
        let config = SyncConfig::default();
        assert!(matches!(config.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SyncConfig::from_toml(
            r#"
            orcid = "0000-0002-1825-0097"
            per_page = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.orcid, "0000-0002-1825-0097");
        assert_eq!(config.per_page, 50);
        // Unset fields keep their defaults
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            SyncConfig::from_toml("orcid = ["),
            Err(SyncError::Config(_))
        ));
    }
}
