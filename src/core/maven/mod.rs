mod artifact;
mod pom;

pub use artifact::MavenArtifact;
pub use pom::PomDocument;

/// Classifier of the sources jar published next to the main artifact.
pub const SOURCES_CLASSIFIER: &str = "sources";
