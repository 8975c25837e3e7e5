// ─── Publication Plan ───
// Where each artifact of a validated descriptor lands, per repository.
// Nothing here talks to the network; transport belongs to the publisher.

use tracing::debug;

use crate::core::descriptor::{Descriptor, Validated};
use crate::core::error::DescriptorResult;
use crate::core::maven::{MavenArtifact, PomDocument, SOURCES_CLASSIFIER};

/// Everything a publisher needs for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub repo_name: String,
    pub repo_url: String,
    pub artifact: MavenArtifact,
    pub jar_url: String,
    pub sources_url: String,
    pub pom_url: String,
    pub metadata_url: String,
    pub changelog_url: Option<String>,
    pub pom: PomDocument,
}

impl Descriptor<Validated> {
    /// Publication plan, one entry per Maven repository in declaration
    /// order. Empty when the descriptor has no publish section.
    ///
    /// `version` falls back to the one given at load time; without either
    /// this fails with `MissingVersion`.
    pub fn publication(&self, version: Option<&str>) -> DescriptorResult<Vec<Publication>> {
        let publish = match self.publish() {
            Some(p) => p,
            None => return Ok(Vec::new()),
        };

        let version = self.resolve_version(version)?;
        let changelog_url = self.changelog_url(Some(version));

        publish
            .repositories()
            .iter()
            .map(|repo| -> DescriptorResult<Publication> {
                let group = repo.coordinate_group(self.group());
                let artifact = MavenArtifact::new(group, self.mod_id(), version)?;
                let repo_url = repo.repo_url();

                debug!("Planned {} -> {} ({})", artifact, repo.repo_name(), repo_url);

                Ok(Publication {
                    repo_name: repo.repo_name().to_string(),
                    repo_url: repo_url.to_string(),
                    jar_url: artifact.url(repo_url),
                    sources_url: artifact.with_classifier(SOURCES_CLASSIFIER).url(repo_url),
                    pom_url: artifact.with_packaging("pom").url(repo_url),
                    metadata_url: artifact.metadata_url(repo_url),
                    changelog_url: changelog_url.clone(),
                    pom: PomDocument::for_publication(
                        &artifact,
                        self.display_name(),
                        changelog_url.clone(),
                    ),
                    artifact,
                })
            })
            .collect()
    }
}
