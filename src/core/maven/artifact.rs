use std::fmt;

use crate::core::error::{DescriptorError, DescriptorResult};

/// A Maven coordinate as published by the build.
///
/// Displayed as `groupId:artifactId:version[:classifier]@packaging`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    /// File extension / packaging type. Defaults to `"jar"`.
    pub packaging: String,
}

impl MavenArtifact {
    /// Main jar coordinate for a published mod.
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> DescriptorResult<Self> {
        if [group_id, artifact_id, version]
            .iter()
            .any(|part| part.is_empty() || part.contains(&[':', '@', '/'][..]))
        {
            return Err(DescriptorError::InvalidMavenCoordinate(format!(
                "{}:{}:{}",
                group_id, artifact_id, version
            )));
        }

        Ok(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            classifier: None,
            packaging: "jar".to_string(),
        })
    }

    /// Construct the group path portion (`com/falsepattern`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// `artifactId-version[-classifier].packaging`
    pub fn filename(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, c, self.packaging
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.packaging),
        }
    }

    /// `<repo>/<group_path>/<artifact_id>/<version>/<filename>`
    pub fn url(&self, repo_base: &str) -> String {
        format!(
            "{}/{}",
            self.version_dir_url(repo_base),
            self.filename()
        )
    }

    /// `<repo>/<group_path>/<artifact_id>/maven-metadata.xml`
    pub fn metadata_url(&self, repo_base: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/maven-metadata.xml",
            base,
            self.group_path(),
            self.artifact_id
        )
    }

    /// Return a new artifact with packaging changed (e.g. to `"pom"`).
    pub fn with_packaging(&self, packaging: &str) -> Self {
        let mut clone = self.clone();
        clone.packaging = packaging.to_string();
        clone
    }

    /// Return a new artifact with a classifier (e.g. `"sources"`, `"dev"`).
    pub fn with_classifier(&self, classifier: &str) -> Self {
        let mut clone = self.clone();
        clone.classifier = Some(classifier.to_string());
        clone
    }

    fn version_dir_url(&self, repo_base: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/{}",
            base,
            self.group_path(),
            self.artifact_id,
            self.version
        )
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(c) => write!(
                f,
                "{}:{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, c, self.packaging
            ),
            None => write!(
                f,
                "{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, self.packaging
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_separator_characters() {
        assert!(MavenArtifact::new("mega", "inventorytweaks", "1.7.0").is_ok());
        assert!(MavenArtifact::new("mega", "inventory:tweaks", "1.7.0").is_err());
        assert!(MavenArtifact::new("mega", "inventorytweaks", "").is_err());
    }

    #[test]
    fn pom_packaging_and_display() {
        let a = MavenArtifact::new("mega", "inventorytweaks", "1.7.0").unwrap();
        assert_eq!(a.to_string(), "mega:inventorytweaks:1.7.0@jar");
        let pom = a.with_packaging("pom");
        assert_eq!(pom.filename(), "inventorytweaks-1.7.0.pom");
        assert_eq!(
            a.with_classifier("sources").to_string(),
            "mega:inventorytweaks:1.7.0:sources@jar"
        );
    }

    #[test]
    fn url_construction() {
        let a = MavenArtifact::new("com.falsepattern", "inventorytweaks", "1.7.0").unwrap();
        assert_eq!(
            a.url("https://mvn.falsepattern.com/gtmega_releases/"),
            "https://mvn.falsepattern.com/gtmega_releases/com/falsepattern/inventorytweaks/1.7.0/inventorytweaks-1.7.0.jar"
        );
        assert_eq!(
            a.with_classifier("sources").url("https://mvn.example"),
            "https://mvn.example/com/falsepattern/inventorytweaks/1.7.0/inventorytweaks-1.7.0-sources.jar"
        );
        assert_eq!(
            a.metadata_url("https://mvn.example/"),
            "https://mvn.example/com/falsepattern/inventorytweaks/maven-metadata.xml"
        );
    }
}
