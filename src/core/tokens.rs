// ─── Token Class ───
// Java source for the build-time constants class named by `tokens.tokenClass`.

use std::path::PathBuf;

use crate::core::descriptor::{Descriptor, Validated};
use crate::core::error::DescriptorResult;

/// A rendered token class, ready to be written under the generated source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSource {
    /// e.g. `invtweaks.Tags`
    pub qualified_class: String,
    /// e.g. `invtweaks/Tags.java`
    pub path: PathBuf,
    pub source: String,
}

impl Descriptor<Validated> {
    /// Render the token class, or `None` without a `tokens` section.
    ///
    /// `version` falls back to the one given at load time.
    pub fn token_class_source(
        &self,
        version: Option<&str>,
    ) -> DescriptorResult<Option<TokenSource>> {
        let tokens = match self.tokens() {
            Some(tokens) => tokens,
            None => return Ok(None),
        };
        let version = self.resolve_version(version)?;
        let root = self.root_package();
        let qualified_class = tokens.qualified_class(&root);

        let (package, simple_name) = match qualified_class.rsplit_once('.') {
            Some((package, name)) => (Some(package), name),
            None => (None, qualified_class.as_str()),
        };

        let constants = [
            ("MOD_ID", self.mod_id()),
            ("MOD_NAME", self.display_name()),
            ("VERSION", version),
            ("GROUP_NAME", self.group()),
            ("ROOT_PKG", root.as_str()),
        ];

        let mut source = String::new();
        source.push_str("// Generated at build time. Do not edit.\n");
        if let Some(package) = package {
            source.push_str(&format!("package {};\n\n", package));
        }
        source.push_str(&format!("public class {} {{\n", simple_name));
        for (name, value) in constants {
            source.push_str(&format!(
                "    public static final String {} = \"{}\";\n",
                name,
                escape_java(value)
            ));
        }
        source.push_str("}\n");

        Ok(Some(TokenSource {
            path: tokens.source_path(&root),
            qualified_class: qualified_class.clone(),
            source,
        }))
    }
}

fn escape_java(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
