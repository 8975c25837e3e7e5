// ─── Validation ───
// Pure checks over a descriptor. Every violated rule is collected; nothing
// here short-circuits on the first failure.

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path};

use url::Url;

use super::model::{CoreHook, Descriptor, ProjectIdentity, PublishTarget, RootPackage};
use crate::core::source::{placeholders, Properties};

const MAX_MOD_ID_LEN: usize = 64;
const PUBLISH_SCHEMES: &[&str] = &["http", "https", "file"];

/// A violated validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Empty,
    SurroundingWhitespace,
    InvalidIdentifier,
    TooLong,
    NotLowercase,
    InvalidMavenGroup,
    InvalidPackagePath,
    InvalidClassName,
    UnresolvedPlaceholder,
    EscapesResourceRoot,
    NoRepositories,
    InvalidUrl,
    UnsupportedScheme,
    DuplicateRepoName,
    CoreModWithoutAccessTransformer,
    MissingVersionPlaceholder,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rule::Empty => "must not be empty",
            Rule::SurroundingWhitespace => "must not start or end with whitespace",
            Rule::InvalidIdentifier => {
                "must start with a letter and contain only letters, digits, '_' or '-'"
            }
            Rule::TooLong => "must be at most 64 characters",
            Rule::NotLowercase => "should be lowercase",
            Rule::InvalidMavenGroup => {
                "must be dot-separated segments of letters, digits, '_' or '-'"
            }
            Rule::InvalidPackagePath => "must be a dot-separated Java package path",
            Rule::InvalidClassName => "must be a dot-separated Java class name",
            Rule::UnresolvedPlaceholder => "references an unknown placeholder",
            Rule::EscapesResourceRoot => "must be a relative path inside the resource root",
            Rule::NoRepositories => "must declare at least one repository",
            Rule::InvalidUrl => "is not a valid URL",
            Rule::UnsupportedScheme => "must use http, https or file",
            Rule::DuplicateRepoName => "duplicates an earlier repository name",
            Rule::CoreModWithoutAccessTransformer => {
                "is set without core.accessTransformerFile"
            }
            Rule::MissingVersionPlaceholder => "does not reference $version",
        };
        f.write_str(text)
    }
}

/// A parsed but invalid value. Blocks promotion to `Validated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
}

/// Advisory finding. Surfaced, never blocking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftWarning {
    pub field: String,
    pub rule: Rule,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

impl fmt::Display for SoftWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

/// Everything one validation pass found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<SoftWarning>,
}

impl ValidationReport {
    /// No errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str, rule: Rule) -> bool {
        self.errors.iter().any(|e| e.field == field && e.rule == rule)
    }

    pub fn has_warning(&self, field: &str, rule: Rule) -> bool {
        self.warnings
            .iter()
            .any(|w| w.field == field && w.rule == rule)
    }

    fn error(&mut self, field: impl Into<String>, rule: Rule) {
        self.errors.push(ValidationError {
            field: field.into(),
            rule,
        });
    }

    fn warn(&mut self, field: impl Into<String>, rule: Rule) {
        self.warnings.push(SoftWarning {
            field: field.into(),
            rule,
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.errors {
            writeln!(f, "  error: {}", e)?;
        }
        for w in &self.warnings {
            writeln!(f, "  warning: {}", w)?;
        }
        Ok(())
    }
}
/// Check every rule against `descriptor`.
///
/// Pure and idempotent: the same descriptor always yields the same report.
/// Templated values are checked after rendering.
pub fn validate<S>(descriptor: &Descriptor<S>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let properties = descriptor.properties();

    check_identity(&descriptor.identity, &properties, &mut report);

    // Source indices, so each error points at the entry as written.
    for (i, package) in descriptor.declared_api_packages().iter().enumerate() {
        check_path(
            &mut report,
            &format!("api.packages[{}]", i),
            &properties.render(package),
            Rule::InvalidPackagePath,
        );
    }

    if let Some(core) = descriptor.core_hook() {
        check_core(&core, &mut report);
    }

    if let Some(tokens) = descriptor.tokens() {
        check_path(
            &mut report,
            "tokens.tokenClass",
            tokens.token_class(),
            Rule::InvalidClassName,
        );
    }

    if let Some(publish) = descriptor.publish() {
        check_publish(&publish, &mut report);
    }

    report
}

/// Reports blank or padded values. Returns whether further checks apply.
fn check_text(report: &mut ValidationReport, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        report.error(field, Rule::Empty);
        false
    } else if value.trim() != value {
        report.error(field, Rule::SurroundingWhitespace);
        false
    } else {
        true
    }
}

/// Reports a placeholder that survived rendering.
fn check_resolved(report: &mut ValidationReport, field: &str, value: &str) -> bool {
    if placeholders(value).is_empty() {
        true
    } else {
        report.error(field, Rule::UnresolvedPlaceholder);
        false
    }
}

fn check_path(report: &mut ValidationReport, field: &str, value: &str, rule: Rule) {
    if check_resolved(report, field, value) && !is_package_path(value) {
        report.error(field, rule);
    }
}

fn check_identity(
    identity: &ProjectIdentity,
    properties: &Properties,
    report: &mut ValidationReport,
) {
    let group_ok = check_text(report, "group", &identity.group);
    if group_ok && !is_maven_group(&identity.group) {
        report.error("group", Rule::InvalidMavenGroup);
    }

    check_mod_id(&identity.mod_id, report);

    if identity.display_name.trim().is_empty() {
        report.error("mod.name", Rule::Empty);
    }

    match &identity.root_package {
        // A bad group is already reported above.
        RootPackage::Derived if !group_ok => {}
        RootPackage::Derived => {
            if !is_package_path(&identity.group) {
                report.error("mod.rootPkg", Rule::InvalidPackagePath);
            }
        }
        RootPackage::Template(_) => check_path(
            report,
            "mod.rootPkg",
            &identity.root_package_with(properties),
            Rule::InvalidPackagePath,
        ),
    }
}

fn check_mod_id(mod_id: &str, report: &mut ValidationReport) {
    if !check_text(report, "mod.modid", mod_id) {
        return;
    }
    if mod_id.chars().count() > MAX_MOD_ID_LEN {
        report.error("mod.modid", Rule::TooLong);
    }
    if !is_mod_id(mod_id) {
        report.error("mod.modid", Rule::InvalidIdentifier);
    } else if mod_id.chars().any(|c| c.is_ascii_uppercase()) {
        report.warn("mod.modid", Rule::NotLowercase);
    }
}

fn check_core(core: &CoreHook, report: &mut ValidationReport) {
    if let Some(class) = core.core_mod_class() {
        check_path(report, "core.coreModClass", class, Rule::InvalidClassName);
        if core.access_transformer_file().is_none() {
            report.warn("core.coreModClass", Rule::CoreModWithoutAccessTransformer);
        }
    }

    if let Some(file) = core.access_transformer_file() {
        let field = "core.accessTransformerFile";
        if check_text(report, field, file) && check_resolved(report, field, file) && escapes_root(file)
        {
            report.error(field, Rule::EscapesResourceRoot);
        }
    }
}

fn check_publish(publish: &PublishTarget, report: &mut ValidationReport) {
    if let Some(changelog) = publish.changelog_template() {
        if !placeholders(changelog).contains(&"version") {
            report.warn("publish.changelog", Rule::MissingVersionPlaceholder);
        }
        // Check the shape with a stand-in version; other placeholders stay literal.
        let sample = changelog.replace("${version}", "0").replace("$version", "0");
        if Url::parse(&sample).is_err() {
            report.warn("publish.changelog", Rule::InvalidUrl);
        }
    }

    if publish.repositories().is_empty() {
        report.error("publish.maven", Rule::NoRepositories);
    }

    let mut seen_names = HashSet::new();
    for (i, repo) in publish.repositories().iter().enumerate() {
        let url_field = format!("publish.maven[{}].repoUrl", i);
        let url = repo.repo_url();
        if check_text(report, &url_field, url) && check_resolved(report, &url_field, url) {
            match Url::parse(url) {
                Ok(parsed) if !PUBLISH_SCHEMES.contains(&parsed.scheme()) => {
                    report.error(url_field, Rule::UnsupportedScheme);
                }
                Ok(_) => {}
                Err(_) => report.error(url_field, Rule::InvalidUrl),
            }
        }

        let name_field = format!("publish.maven[{}].repoName", i);
        let name = repo.repo_name();
        if check_text(report, &name_field, name) && check_resolved(report, &name_field, name) {
            if !is_repo_name(name) {
                report.error(name_field, Rule::InvalidIdentifier);
            } else if !seen_names.insert(name.to_string()) {
                report.error(name_field, Rule::DuplicateRepoName);
            }
        }

        if let Some(group) = repo.group() {
            let group_field = format!("publish.maven[{}].group", i);
            if check_text(report, &group_field, group)
                && check_resolved(report, &group_field, group)
                && !is_maven_group(group)
            {
                report.error(group_field, Rule::InvalidMavenGroup);
            }
        }
    }
}

// ─── Character-set rules ───

fn is_java_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Dot-separated Java identifiers. Also used for class names relative to
/// the root package.
pub(crate) fn is_package_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_java_identifier)
}

pub(crate) fn is_maven_group(group: &str) -> bool {
    !group.is_empty()
        && group.split('.').all(|seg| {
            !seg.is_empty()
                && seg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

fn is_mod_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_repo_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn escapes_root(file: &str) -> bool {
    if file.starts_with('/') || file.starts_with('\\') {
        return true;
    }
    Path::new(file).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::model::{MavenRepo, TokenConfig, Unvalidated};
    use std::marker::PhantomData;

    fn base() -> Descriptor<Unvalidated> {
        Descriptor {
            identity: ProjectIdentity {
                group: "invtweaks".into(),
                mod_id: "inventorytweaks".into(),
                display_name: "Inventory Tweaks".into(),
                root_package: RootPackage::Derived,
            },
            api_packages: vec![],
            core: None,
            tokens: None,
            publish: None,
            version: None,
            state: PhantomData,
        }
    }

    fn repo(url: &str, name: &str) -> MavenRepo {
        MavenRepo {
            repo_url: url.into(),
            repo_name: name.into(),
            group: None,
        }
    }

    #[test]
    fn minimal_descriptor_is_valid() {
        let report = validate(&base());
        assert!(report.is_valid(), "{report}");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn validate_is_idempotent() {
        let mut d = base();
        d.identity.mod_id = "9bad id".into();
        assert_eq!(validate(&d), validate(&d));
    }

    #[test]
    fn mod_id_rules() {
        let mut d = base();
        d.identity.mod_id = "  ".into();
        assert!(validate(&d).has_error("mod.modid", Rule::Empty));

        d.identity.mod_id = "inventory tweaks".into();
        assert!(validate(&d).has_error("mod.modid", Rule::InvalidIdentifier));

        d.identity.mod_id = "a".repeat(65);
        let report = validate(&d);
        assert!(report.has_error("mod.modid", Rule::TooLong));
        assert!(!report.has_error("mod.modid", Rule::InvalidIdentifier));

        d.identity.mod_id = "InvTweaks".into();
        let report = validate(&d);
        assert!(report.is_valid());
        assert!(report.has_warning("mod.modid", Rule::NotLowercase));
    }

    #[test]
    fn derived_root_package_checked_against_group() {
        let mut d = base();
        d.identity.group = "gtmega-mods".into();
        let report = validate(&d);
        assert!(!report.has_error("group", Rule::InvalidMavenGroup));
        assert!(report.has_error("mod.rootPkg", Rule::InvalidPackagePath));
    }

    #[test]
    fn unresolved_root_package_placeholder() {
        let mut d = base();
        d.identity.root_package = RootPackage::Template("$namespace.mod".into());
        assert!(validate(&d).has_error("mod.rootPkg", Rule::UnresolvedPlaceholder));
    }

    #[test]
    fn empty_group_reported_once() {
        let mut d = base();
        d.identity.group = String::new();
        let report = validate(&d);
        assert_eq!(report.errors.len(), 1);
        assert!(report.has_error("group", Rule::Empty));
    }

    #[test]
    fn core_mod_without_access_transformer_is_soft() {
        let mut d = base();
        d.core = Some(CoreHook {
            core_mod_class: Some("forge.asm.FMLPlugin".into()),
            access_transformer_file: None,
        });
        let report = validate(&d);
        assert!(report.is_valid());
        assert!(report.has_warning("core.coreModClass", Rule::CoreModWithoutAccessTransformer));
    }

    #[test]
    fn access_transformer_must_stay_inside_resources() {
        let mut d = base();
        d.core = Some(CoreHook {
            core_mod_class: None,
            access_transformer_file: Some("../secret_at.cfg".into()),
        });
        assert!(validate(&d).has_error("core.accessTransformerFile", Rule::EscapesResourceRoot));
    }

    #[test]
    fn invalid_token_class() {
        let mut d = base();
        d.tokens = Some(TokenConfig {
            token_class: "gen.1Tags".into(),
        });
        assert!(validate(&d).has_error("tokens.tokenClass", Rule::InvalidClassName));
    }

    #[test]
    fn every_empty_repo_url_is_reported() {
        let mut d = base();
        d.publish = Some(PublishTarget {
            changelog: None,
            repositories: vec![repo("", "a"), repo("  ", "b")],
        });
        let report = validate(&d);
        assert_eq!(report.errors.len(), 2);
        assert!(report.has_error("publish.maven[0].repoUrl", Rule::Empty));
        assert!(report.has_error("publish.maven[1].repoUrl", Rule::Empty));
    }

    #[test]
    fn repo_url_shape_and_scheme() {
        let mut d = base();
        d.publish = Some(PublishTarget {
            changelog: None,
            repositories: vec![
                repo("not a url", "a"),
                repo("ftp://mvn.example/", "b"),
                repo("file:///tmp/repo", "c"),
            ],
        });
        let report = validate(&d);
        assert!(report.has_error("publish.maven[0].repoUrl", Rule::InvalidUrl));
        assert!(report.has_error("publish.maven[1].repoUrl", Rule::UnsupportedScheme));
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn duplicate_repo_names() {
        let mut d = base();
        d.publish = Some(PublishTarget {
            changelog: None,
            repositories: vec![
                repo("https://a.example/", "mega"),
                repo("https://b.example/", "mega"),
            ],
        });
        assert!(validate(&d).has_error("publish.maven[1].repoName", Rule::DuplicateRepoName));
    }

    #[test]
    fn publish_without_repositories() {
        let mut d = base();
        d.publish = Some(PublishTarget {
            changelog: Some("https://example.com/tag/$version".into()),
            repositories: vec![],
        });
        assert!(validate(&d).has_error("publish.maven", Rule::NoRepositories));
    }

    #[test]
    fn changelog_warnings() {
        let mut d = base();
        d.publish = Some(PublishTarget {
            changelog: Some("releases page".into()),
            repositories: vec![repo("https://a.example/", "main")],
        });
        let report = validate(&d);
        assert!(report.is_valid());
        assert!(report.has_warning("publish.changelog", Rule::MissingVersionPlaceholder));
        assert!(report.has_warning("publish.changelog", Rule::InvalidUrl));
    }

    #[test]
    fn api_errors_use_source_index() {
        let mut d = base();
        d.api_packages = vec!["zeta".into(), "1bad".into()];
        let report = validate(&d);
        assert_eq!(report.errors.len(), 1);
        assert!(report.has_error("api.packages[1]", Rule::InvalidPackagePath));

        // Duplicates keep their own index.
        d.api_packages = vec!["api".into(), "api".into(), "".into()];
        assert!(validate(&d).has_error("api.packages[2]", Rule::InvalidPackagePath));
    }

    #[test]
    fn templated_sections_are_checked_after_rendering() {
        let mut d = base();
        d.api_packages = vec!["${modid}.api".into()];
        d.core = Some(CoreHook {
            core_mod_class: Some("$modid.asm.Plugin".into()),
            access_transformer_file: Some("${modid}_at.cfg".into()),
        });
        d.tokens = Some(TokenConfig {
            token_class: "gen.${modid}Tags".into(),
        });
        let report = validate(&d);
        assert!(report.is_valid(), "{report}");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn leftover_placeholders_are_reported() {
        let mut d = base();
        d.api_packages = vec!["$unknown".into()];
        d.core = Some(CoreHook {
            core_mod_class: Some("$foo.Plugin".into()),
            access_transformer_file: Some("${nope}_at.cfg".into()),
        });
        d.tokens = Some(TokenConfig {
            token_class: "${missing}.Tags".into(),
        });
        d.publish = Some(PublishTarget {
            changelog: None,
            repositories: vec![MavenRepo {
                repo_url: "https://mvn.example/$channel/".into(),
                repo_name: "$repo".into(),
                group: Some("${org}".into()),
            }],
        });

        let report = validate(&d);
        for field in [
            "api.packages[0]",
            "core.coreModClass",
            "core.accessTransformerFile",
            "tokens.tokenClass",
            "publish.maven[0].repoUrl",
            "publish.maven[0].repoName",
            "publish.maven[0].group",
        ] {
            assert!(report.has_error(field, Rule::UnresolvedPlaceholder), "{field}: {report}");
        }
        assert_eq!(report.errors.len(), 7);
    }

    #[test]
    fn version_placeholder_resolves_only_with_a_version() {
        let mut d = base();
        d.api_packages = vec!["v$version".into()];
        assert!(validate(&d).has_error("api.packages[0]", Rule::UnresolvedPlaceholder));

        d.version = Some("1_7".into());
        assert!(validate(&d).is_valid());
    }

    #[test]
    fn padded_values_are_rejected() {
        let mut d = base();
        d.identity.group = "invtweaks ".into();
        d.identity.root_package = RootPackage::Template("invtweaks".into());
        d.identity.mod_id = " inventorytweaks".into();
        d.publish = Some(PublishTarget {
            changelog: None,
            repositories: vec![MavenRepo {
                repo_url: " https://mvn.example/".into(),
                repo_name: "main\t".into(),
                group: Some("mega ".into()),
            }],
        });

        let report = validate(&d);
        assert!(report.has_error("group", Rule::SurroundingWhitespace));
        assert!(report.has_error("mod.modid", Rule::SurroundingWhitespace));
        assert!(report.has_error("publish.maven[0].repoUrl", Rule::SurroundingWhitespace));
        assert!(report.has_error("publish.maven[0].repoName", Rule::SurroundingWhitespace));
        assert!(report.has_error("publish.maven[0].group", Rule::SurroundingWhitespace));
        assert_eq!(report.errors.len(), 5);
    }

    #[test]
    fn character_set_helpers() {
        assert!(is_package_path("forge.asm.FMLPlugin"));
        assert!(!is_package_path("forge..asm"));
        assert!(!is_package_path("$group"));
        assert!(is_maven_group("com.falsepattern"));
        assert!(is_maven_group("gt-mega"));
        assert!(!is_maven_group("com..x"));
        assert!(escapes_root("/etc/at.cfg"));
        assert!(!escapes_root("invtweaks_at.cfg"));
    }
}
