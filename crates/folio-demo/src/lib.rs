//! Demo block support for Folio.
//!
//! A demo registry maps a demo source path to its percent-encoded payload:
//! rendered markup, source code, and a nested block of per-language content.
//! [`SiteDemo`] decodes those payloads on first access and caches them.
//!
//! In playground mode, `<style lang="sass">` and `<style lang="scss">`
//! regions of the demo code are compiled to plain CSS with
//! [`compile_styles`] so they can be previewed directly.

mod decode;
mod error;
mod playground;
mod registry;
mod site_demo;

pub use decode::{DecodeError, decode_block, decode_component, encode_component};
pub use error::DemoError;
pub use playground::{GrassCompiler, StyleCompiler, StyleSyntax, compile_styles};
pub use registry::{DemoEntry, DemoPayload, DemoRegistry};
pub use site_demo::SiteDemo;
