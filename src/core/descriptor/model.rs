use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::core::error::{DescriptorError, DescriptorResult};
use crate::core::source::Properties;

/// Marker: parsed and defaulted, not yet checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unvalidated;

/// Marker: passed validation with zero errors. Only this state may be
/// handed to downstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validated;

/// How the root package is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootPackage {
    /// `rootPkg` omitted: always the current group.
    Derived,
    /// `rootPkg` given explicitly; may reference `$group` and friends.
    Template(String),
}

/// Mod identity: `group` + `mod { modid, name, rootPkg }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub(crate) group: String,
    pub(crate) mod_id: String,
    pub(crate) display_name: String,
    pub(crate) root_package: RootPackage,
}

impl ProjectIdentity {
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn mod_id(&self) -> &str {
        &self.mod_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn root_package_source(&self) -> &RootPackage {
        &self.root_package
    }

    /// Resolved root package. Recomputed from the current group on every
    /// call, so a derived root package can never go stale.
    pub fn root_package(&self) -> String {
        self.root_package_with(&self.properties())
    }

    pub(crate) fn root_package_with(&self, properties: &Properties) -> String {
        match &self.root_package {
            RootPackage::Derived => self.group.clone(),
            RootPackage::Template(template) => properties.render(template),
        }
    }

    /// Template properties contributed by the identity.
    pub fn properties(&self) -> Properties {
        Properties::new()
            .with("group", self.group.as_str())
            .with("modid", self.mod_id.as_str())
            .with("name", self.display_name.as_str())
    }
}

/// Packages (relative to the root package) that form the public API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiSurface {
    pub(crate) packages: BTreeSet<String>,
}

impl ApiSurface {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    /// Fully-qualified API packages, e.g. `invtweaks.api`.
    pub fn qualified(&self, root_package: &str) -> Vec<String> {
        self.iter().map(|p| qualify(root_package, p)).collect()
    }
}

/// Early-loading hook and its access transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreHook {
    pub(crate) core_mod_class: Option<String>,
    pub(crate) access_transformer_file: Option<String>,
}

impl CoreHook {
    pub fn core_mod_class(&self) -> Option<&str> {
        self.core_mod_class.as_deref()
    }

    pub fn access_transformer_file(&self) -> Option<&str> {
        self.access_transformer_file.as_deref()
    }

    /// `invtweaks` + `forge.asm.FMLPlugin` → `invtweaks.forge.asm.FMLPlugin`.
    pub fn qualified_class(&self, root_package: &str) -> Option<String> {
        self.core_mod_class()
            .map(|class| qualify(root_package, class))
    }

    /// Jar resource path of the access transformer (`META-INF/<file>`).
    pub fn access_transformer_resource(&self) -> Option<String> {
        self.access_transformer_file()
            .map(|file| format!("META-INF/{}", file.trim_start_matches('/')))
    }

    fn render(&self, properties: &Properties) -> Self {
        Self {
            core_mod_class: self.core_mod_class.as_deref().map(|c| properties.render(c)),
            access_transformer_file: self
                .access_transformer_file
                .as_deref()
                .map(|f| properties.render(f)),
        }
    }
}

/// Generated constants class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub(crate) token_class: String,
}

impl TokenConfig {
    pub fn token_class(&self) -> &str {
        &self.token_class
    }

    pub fn qualified_class(&self, root_package: &str) -> String {
        qualify(root_package, &self.token_class)
    }

    /// Source file path relative to the source root (`invtweaks/Tags.java`).
    pub fn source_path(&self, root_package: &str) -> PathBuf {
        let qualified = self.qualified_class(root_package);
        let mut path: PathBuf = qualified.split('.').collect();
        path.set_extension("java");
        path
    }
}

/// One Maven repository to publish to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenRepo {
    pub(crate) repo_url: String,
    pub(crate) repo_name: String,
    pub(crate) group: Option<String>,
}

impl MavenRepo {
    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Group override for published coordinates.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Group used in published coordinates: the override, else the project group.
    pub fn coordinate_group<'a>(&'a self, project_group: &'a str) -> &'a str {
        self.group.as_deref().unwrap_or(project_group)
    }

    fn render(&self, properties: &Properties) -> Self {
        Self {
            repo_url: properties.render(&self.repo_url),
            repo_name: properties.render(&self.repo_name),
            group: self.group.as_deref().map(|g| properties.render(g)),
        }
    }
}

/// Changelog template plus destination repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub(crate) changelog: Option<String>,
    pub(crate) repositories: Vec<MavenRepo>,
}

impl PublishTarget {
    /// Changelog URL template, still containing `$version`.
    pub fn changelog_template(&self) -> Option<&str> {
        self.changelog.as_deref()
    }

    pub fn repositories(&self) -> &[MavenRepo] {
        &self.repositories
    }

    /// Render the changelog URL against the given properties.
    pub fn changelog_for(&self, properties: &Properties) -> Option<String> {
        self.changelog.as_deref().map(|t| properties.render(t))
    }
}

/// The complete descriptor. `S` is [`Unvalidated`] or [`Validated`].
///
/// Sections are stored as written; the accessors render their `$name`
/// placeholders against [`Descriptor::properties`] on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor<S = Validated> {
    pub(crate) identity: ProjectIdentity,
    /// `api.packages` in source order, duplicates kept.
    pub(crate) api_packages: Vec<String>,
    pub(crate) core: Option<CoreHook>,
    pub(crate) tokens: Option<TokenConfig>,
    pub(crate) publish: Option<PublishTarget>,
    /// Build version known at load time, if any.
    pub(crate) version: Option<String>,
    pub(crate) state: PhantomData<S>,
}

impl<S> Descriptor<S> {
    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    pub fn group(&self) -> &str {
        self.identity.group()
    }

    pub fn mod_id(&self) -> &str {
        self.identity.mod_id()
    }

    pub fn display_name(&self) -> &str {
        self.identity.display_name()
    }

    pub fn root_package(&self) -> String {
        self.identity.root_package_with(&self.properties())
    }

    /// Rendered API packages with set semantics.
    pub fn api(&self) -> ApiSurface {
        let properties = self.properties();
        ApiSurface {
            packages: self
                .api_packages
                .iter()
                .map(|p| properties.render(p))
                .collect(),
        }
    }

    /// `api.packages` exactly as declared.
    pub fn declared_api_packages(&self) -> &[String] {
        &self.api_packages
    }

    pub fn core_hook(&self) -> Option<CoreHook> {
        let properties = self.properties();
        self.core.as_ref().map(|core| core.render(&properties))
    }

    pub fn tokens(&self) -> Option<TokenConfig> {
        let properties = self.properties();
        self.tokens.as_ref().map(|t| TokenConfig {
            token_class: properties.render(&t.token_class),
        })
    }

    /// Publish section with repositories rendered. The changelog stays a
    /// template until a version is supplied.
    pub fn publish(&self) -> Option<PublishTarget> {
        let properties = self.properties();
        self.publish.as_ref().map(|p| PublishTarget {
            changelog: p.changelog.clone(),
            repositories: p
                .repositories
                .iter()
                .map(|r| r.render(&properties))
                .collect(),
        })
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The explicit version, else the one given at load time.
    pub fn resolve_version<'a>(
        &'a self,
        explicit: Option<&'a str>,
    ) -> DescriptorResult<&'a str> {
        explicit
            .or(self.version.as_deref())
            .ok_or(DescriptorError::MissingVersion)
    }

    /// Template properties: identity plus `version` when known.
    pub fn properties(&self) -> Properties {
        let props = self.identity.properties();
        match &self.version {
            Some(v) => props.with("version", v.as_str()),
            None => props,
        }
    }

    /// Changelog URL rendered against `version`, or the load-time version
    /// when `None`. Without either, `$version` stays in place.
    pub fn changelog_url(&self, version: Option<&str>) -> Option<String> {
        let props = match version {
            Some(v) => self.properties().with("version", v),
            None => self.properties(),
        };
        self.publish.as_ref()?.changelog_for(&props)
    }

    pub(crate) fn retag<T>(self) -> Descriptor<T> {
        Descriptor {
            identity: self.identity,
            api_packages: self.api_packages,
            core: self.core,
            tokens: self.tokens,
            publish: self.publish,
            version: self.version,
            state: PhantomData,
        }
    }
}

fn qualify(root_package: &str, relative: &str) -> String {
    if root_package.is_empty() {
        relative.to_string()
    } else {
        format!("{}.{}", root_package, relative)
    }
}
