// ─── fpconfig Core ───
// Typed descriptor for a Minecraft mod build.
//
// Architecture:
//   core/
//     source/     — JSON/TOML parsing, raw key model, `$name` templates
//     descriptor/ — Typed model, defaulting, validation, state machine
//     maven/      — Publication coordinates + POM rendering
//     publish.rs  — Per-repository publication plan
//     tokens.rs   — Generated constants class

pub mod descriptor;
pub mod error;
pub mod maven;
pub mod publish;
pub mod source;
pub mod tokens;
