mod format;
mod raw;
mod template;

pub use format::SourceFormat;
pub use raw::RawDescriptor;
pub use template::{placeholders, Properties};
