mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::descriptor::{
    load_file, load_str, parse_file, parse_str, validate, ApiSurface, CoreHook, Descriptor,
    LoadOptions, Loaded, MavenRepo, ProjectIdentity, PublishTarget, RootPackage, Rule,
    SoftWarning, TokenConfig, Unvalidated, Validated, ValidationError, ValidationReport,
};
pub use crate::core::error::{DescriptorError, DescriptorResult};
pub use crate::core::maven::{MavenArtifact, PomDocument};
pub use crate::core::publish::Publication;
pub use crate::core::source::{Properties, SourceFormat};
pub use crate::core::tokens::TokenSource;

/// Install the structured logger used by the descriptor tooling.
///
/// Honors `RUST_LOG`; defaults to `info,fpconfig_lib=debug`. Safe to call
/// more than once: later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fpconfig_lib=debug")),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_repeatable() {
        init_logging();
        init_logging();

        let json = r#"{ "group": "invtweaks", "mod": { "modid": "inventorytweaks", "name": "Inventory Tweaks" } }"#;
        let loaded = load_str(json, SourceFormat::Json, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.descriptor.root_package(), "invtweaks");
    }
}
