// ─── Descriptor Loader ───
// Source text → raw model → defaulted `Descriptor<Unvalidated>` →
// `Descriptor<Validated>`.

use std::marker::PhantomData;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::model::{
    CoreHook, Descriptor, MavenRepo, ProjectIdentity, PublishTarget, RootPackage, TokenConfig,
    Unvalidated, Validated,
};
use super::validate::{validate, SoftWarning};
use crate::core::error::{DescriptorError, DescriptorResult};
use crate::core::source::{RawDescriptor, SourceFormat};

/// Knobs for a single load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Build version; makes `$version` available to templates.
    #[serde(default)]
    pub version: Option<String>,
    /// Overrides extension-based format detection for files.
    #[serde(default)]
    pub format: Option<SourceFormat>,
}

impl LoadOptions {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// A validated descriptor together with the soft warnings found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub descriptor: Descriptor<Validated>,
    pub warnings: Vec<SoftWarning>,
}

/// Parse and default an in-memory source without validating it.
pub fn parse_str(
    text: &str,
    format: SourceFormat,
    options: &LoadOptions,
) -> DescriptorResult<Descriptor<Unvalidated>> {
    let raw = format.parse(text)?;
    from_raw(raw, options)
}

/// Read a descriptor file and parse it without validating.
pub fn parse_file(path: &Path, options: &LoadOptions) -> DescriptorResult<Descriptor<Unvalidated>> {
    let format = match options.format {
        Some(format) => format,
        None => SourceFormat::from_path(path)?,
    };

    let text = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Parsing {} descriptor {:?}", format, path);

    parse_str(&text, format, options).map_err(|e| match e {
        DescriptorError::MalformedSource { location, message } => {
            DescriptorError::MalformedSource {
                location: format!("{}:{}", path.display(), location),
                message,
            }
        }
        other => other,
    })
}

/// Parse, default and validate an in-memory source.
pub fn load_str(text: &str, format: SourceFormat, options: &LoadOptions) -> DescriptorResult<Loaded> {
    parse_str(text, format, options)?.into_validated()
}

/// Parse, default and validate a descriptor file.
pub fn load_file(path: &Path, options: &LoadOptions) -> DescriptorResult<Loaded> {
    parse_file(path, options)?.into_validated()
}

impl Descriptor<Unvalidated> {
    /// Replace the group. A derived or `$group`-templated root package
    /// follows automatically; the result must be validated again.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.identity.group = group.into();
        self
    }

    /// Run validation and promote to `Validated` if no errors were found.
    ///
    /// Soft warnings are logged and returned alongside the descriptor.
    pub fn into_validated(self) -> DescriptorResult<Loaded> {
        let report = validate(&self);

        for warning in &report.warnings {
            warn!("[{}] {}", self.mod_id(), warning);
        }

        if !report.is_valid() {
            warn!(
                "Descriptor for '{}' rejected with {} error(s)",
                self.mod_id(),
                report.errors.len()
            );
            return Err(DescriptorError::Invalid(report));
        }

        info!(
            "Loaded descriptor '{}' ({}) root package {}",
            self.display_name(),
            self.mod_id(),
            self.root_package()
        );

        Ok(Loaded {
            descriptor: self.retag(),
            warnings: report.warnings,
        })
    }
}

fn from_raw(raw: RawDescriptor, options: &LoadOptions) -> DescriptorResult<Descriptor<Unvalidated>> {
    let mod_info = raw.mod_info.unwrap_or_default();

    let (group, mod_id, display_name) = match (raw.group, mod_info.modid, mod_info.name) {
        (Some(group), Some(mod_id), Some(name)) => (group, mod_id, name),
        (group, mod_id, name) => {
            let mut missing = Vec::new();
            if group.is_none() {
                missing.push("group".to_string());
            }
            if mod_id.is_none() {
                missing.push("mod.modid".to_string());
            }
            if name.is_none() {
                missing.push("mod.name".to_string());
            }
            return Err(DescriptorError::MissingRequiredField(missing));
        }
    };

    let root_package = match mod_info.root_pkg {
        Some(template) => RootPackage::Template(template),
        None => {
            debug!("mod.rootPkg omitted, defaulting to group '{}'", group);
            RootPackage::Derived
        }
    };

    let api_packages = raw.api.map(|api| api.packages).unwrap_or_default();

    let core = raw.core.and_then(|core| {
        if core.core_mod_class.is_none() && core.access_transformer_file.is_none() {
            None
        } else {
            Some(CoreHook {
                core_mod_class: core.core_mod_class,
                access_transformer_file: core.access_transformer_file,
            })
        }
    });

    let tokens = raw
        .tokens
        .and_then(|t| t.token_class)
        .map(|token_class| TokenConfig { token_class });

    let publish = raw.publish.map(|publish| PublishTarget {
        changelog: publish.changelog,
        repositories: publish
            .maven
            .map(|m| m.into_vec())
            .unwrap_or_default()
            .into_iter()
            .map(|m| MavenRepo {
                repo_url: m.repo_url.unwrap_or_default(),
                repo_name: m.repo_name.unwrap_or_default(),
                group: m.group,
            })
            .collect(),
    });

    Ok(Descriptor {
        identity: ProjectIdentity {
            group,
            mod_id,
            display_name,
            root_package,
        },
        api_packages,
        core,
        tokens,
        publish,
        version: options.version.clone(),
        state: PhantomData,
    })
}
