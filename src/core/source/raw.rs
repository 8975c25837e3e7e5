// ─── Raw Source Model ───
// Mirrors the declarative key layout one-to-one. Key names are part of the
// compatibility surface, so every rename below is pinned explicitly.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{value, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// The descriptor exactly as written in the source, before defaulting.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDescriptor {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default, rename = "mod")]
    pub mod_info: Option<RawMod>,
    #[serde(default)]
    pub api: Option<RawApi>,
    #[serde(default)]
    pub core: Option<RawCore>,
    #[serde(default)]
    pub tokens: Option<RawTokens>,
    #[serde(default)]
    pub publish: Option<RawPublish>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMod {
    #[serde(default)]
    pub modid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "rootPkg")]
    pub root_pkg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawApi {
    #[serde(default)]
    pub packages: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawCore {
    #[serde(default)]
    pub core_mod_class: Option<String>,
    #[serde(default)]
    pub access_transformer_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawTokens {
    #[serde(default)]
    pub token_class: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPublish {
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub maven: Option<OneOrMany<RawMaven>>,
}

/// A Maven repository entry. Every field is optional here so that an
/// incomplete entry surfaces as a validation error instead of a parse error.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawMaven {
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// `maven { ... }` may appear once or as a list.
///
/// Errors inside an entry, such as an unknown key, pass through unchanged.
#[derive(Debug, Clone)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<'de, T> Deserialize<'de> for OneOrMany<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OneOrManyVisitor(PhantomData))
    }
}

struct OneOrManyVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for OneOrManyVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = OneOrMany<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a table or a list of tables")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(value::MapAccessDeserializer::new(map)).map(OneOrMany::One)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Vec::<T>::deserialize(value::SeqAccessDeserializer::new(seq)).map(OneOrMany::Many)
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}
