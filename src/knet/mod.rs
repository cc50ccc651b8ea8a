//! KNet service types
//!
//! Wire types for the pipeline listing endpoint and the option catalog the
//! settings panel renders from. The catalog is rebuilt on every panel
//! construction and never persisted.

mod client;

pub use client::KnetClient;

use serde::Deserialize;

/// Description shown for the automatic-pipeline entry
pub const AUTO_PIPELINE_DESCRIPTION: &str =
    "Automatically set the pipeline based on user query";

/// Response body of `GET /query_type`
#[derive(Debug, Deserialize)]
pub struct PipelineListing {
    pub pipelines: Vec<PipelineEntry>,
}

/// One pipeline record as the service reports it
#[derive(Debug, Deserialize)]
pub struct PipelineEntry {
    pub name: String,
    pub description: String,
}

/// A selectable pipeline in the settings panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOption {
    /// `None` is the automatic entry: let the service pick per query
    pub name: Option<String>,
    pub description: String,
}

impl PipelineOption {
    /// Dropdown label: the pipeline name, or the description text for the
    /// automatic entry (which has no name to show)
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.description)
    }
}

/// Ordered pipeline options fetched from the service, plus the automatic
/// entry appended last. Empty when the listing call failed.
#[derive(Debug, Clone, Default)]
pub struct PipelineCatalog {
    options: Vec<PipelineOption>,
}

impl PipelineCatalog {
    pub fn from_listing(listing: PipelineListing) -> Self {
        let mut options: Vec<PipelineOption> = listing
            .pipelines
            .into_iter()
            .map(|entry| PipelineOption {
                name: Some(entry.name),
                description: entry.description,
            })
            .collect();

        options.push(PipelineOption {
            name: None,
            description: AUTO_PIPELINE_DESCRIPTION.to_string(),
        });

        Self { options }
    }

    pub fn options(&self) -> &[PipelineOption] {
        &self.options
    }

    /// Description for a pipeline name; empty string if not listed
    pub fn description_for(&self, name: Option<&str>) -> &str {
        self.options
            .iter()
            .find(|option| option.name.as_deref() == name)
            .map(|option| option.description.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_appends_automatic_entry_last() {
        let listing = PipelineListing {
            pipelines: vec![
                PipelineEntry {
                    name: "vector".to_string(),
                    description: "Vector search".to_string(),
                },
                PipelineEntry {
                    name: "hybrid".to_string(),
                    description: "Hybrid search".to_string(),
                },
            ],
        };

        let catalog = PipelineCatalog::from_listing(listing);

        assert_eq!(catalog.len(), 3);
        let last = catalog.options().last().unwrap();
        assert_eq!(last.name, None);
        assert_eq!(last.description, AUTO_PIPELINE_DESCRIPTION);
        assert_eq!(last.label(), AUTO_PIPELINE_DESCRIPTION);
    }

    #[test]
    fn description_lookup_falls_back_to_empty() {
        let catalog = PipelineCatalog::from_listing(PipelineListing {
            pipelines: vec![PipelineEntry {
                name: "vector".to_string(),
                description: "Vector search".to_string(),
            }],
        });

        assert_eq!(catalog.description_for(Some("vector")), "Vector search");
        assert_eq!(catalog.description_for(None), AUTO_PIPELINE_DESCRIPTION);
        assert_eq!(catalog.description_for(Some("missing")), "");
    }
}
