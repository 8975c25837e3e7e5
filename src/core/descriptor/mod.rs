mod loader;
mod model;
mod validate;

pub use loader::{load_file, load_str, parse_file, parse_str, LoadOptions, Loaded};
pub use model::{
    ApiSurface, CoreHook, Descriptor, MavenRepo, ProjectIdentity, PublishTarget, RootPackage,
    TokenConfig, Unvalidated, Validated,
};
pub use validate::{validate, Rule, SoftWarning, ValidationError, ValidationReport};
