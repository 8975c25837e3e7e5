use quick_xml::se::to_string;
use serde::Serialize;

use super::artifact::MavenArtifact;
use crate::core::error::DescriptorResult;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Minimal POM for a published mod jar. The mod has no transitive
/// dependencies at this layer, so only coordinates and metadata are written.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename = "project", rename_all = "camelCase")]
pub struct PomDocument {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    pub model_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PomDocument {
    /// POM describing `artifact`; `url` is typically the rendered changelog.
    pub fn for_publication(artifact: &MavenArtifact, name: &str, url: Option<String>) -> Self {
        Self {
            xmlns: POM_NAMESPACE.to_string(),
            model_version: "4.0.0".to_string(),
            group_id: artifact.group_id.clone(),
            artifact_id: artifact.artifact_id.clone(),
            version: artifact.version.clone(),
            packaging: "jar".to_string(),
            name: name.to_string(),
            url,
        }
    }

    /// Serialize to XML, including the declaration.
    pub fn to_xml(&self) -> DescriptorResult<String> {
        let body = to_string(self)?;
        Ok(format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}",
            body
        ))
    }
}
