//! Lazily decoded view of one registry entry.

use std::cell::OnceCell;

use serde_json::{Map, Value};

use crate::{
    DecodeError, DemoEntry, DemoPayload, DemoRegistry, StyleCompiler, compile_styles,
    decode_block, decode_component,
};

type Cached<T> = OnceCell<Result<Option<T>, DecodeError>>;

fn cached<T>(
    cell: &Cached<T>,
    init: impl FnOnce() -> Result<Option<T>, DecodeError>,
) -> Result<Option<&T>, DecodeError> {
    match cell.get_or_init(init) {
        Ok(value) => Ok(value.as_ref()),
        Err(e) => Err(e.clone()),
    }
}

/// Decoded accessors for the demo registered under a source path.
///
/// Each accessor decodes on first call and returns the cached value after.
/// A source missing from the registry yields `None` everywhere.
pub struct SiteDemo<'a> {
    entry: Option<&'a DemoEntry>,
    lang: String,
    render: Cached<String>,
    code: Cached<String>,
    block: Cached<Map<String, Value>>,
}

impl<'a> SiteDemo<'a> {
    pub fn new(registry: &'a DemoRegistry, src: &str, lang: impl Into<String>) -> Self {
        Self {
            entry: registry.get(src),
            lang: lang.into(),
            render: OnceCell::new(),
            code: OnceCell::new(),
            block: OnceCell::new(),
        }
    }

    /// Raw payload, still encoded.
    #[must_use]
    pub fn data(&self) -> Option<&'a DemoPayload> {
        self.entry.map(|entry| &entry.data)
    }

    /// Module identifier of the demo component, if it has one.
    #[must_use]
    pub fn component(&self) -> Option<&'a str> {
        self.entry.and_then(|entry| entry.component.as_deref())
    }

    /// Decoded rendered markup.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the payload is malformed.
    pub fn render(&self) -> Result<Option<&str>, DecodeError> {
        let raw = self.data().and_then(|data| data.render.as_deref());
        cached(&self.render, || raw.map(decode_component).transpose())
            .map(|value| value.map(String::as_str))
    }

    /// Decoded source code.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the payload is malformed.
    pub fn code(&self) -> Result<Option<&str>, DecodeError> {
        let raw = self.data().and_then(|data| data.code.as_deref());
        cached(&self.code, || raw.map(decode_component).transpose())
            .map(|value| value.map(String::as_str))
    }

    /// Decoded content block.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if any leaf is malformed.
    pub fn block(&self) -> Result<Option<&Map<String, Value>>, DecodeError> {
        let raw = self.data().and_then(|data| data.block.as_ref());
        cached(&self.block, || raw.map(decode_block).transpose())
    }

    /// Block content for the current language, else the first entry.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the block is malformed.
    pub fn content(&self) -> Result<Option<&Value>, DecodeError> {
        Ok(self.block()?.and_then(|block| {
            block
                .get(&self.lang)
                .or_else(|| block.values().next())
        }))
    }

    /// Source code with Sass and SCSS style regions compiled to CSS.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the code payload is malformed. Style
    /// compilation failures keep the original region instead.
    pub fn playground_code(
        &self,
        compiler: &dyn StyleCompiler,
    ) -> Result<Option<String>, DecodeError> {
        Ok(self.code()?.map(|code| compile_styles(code, compiler)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::GrassCompiler;

    fn registry() -> DemoRegistry {
        DemoRegistry::from_json(
            r#"{
                "button.demo.vue": {
                    "data": {
                        "render": "%3Cbutton%3EOK%3C%2Fbutton%3E",
                        "code": "%3Cstyle%20lang%3D%22scss%22%3E.a%20%7B%20.b%20%7B%20color%3A%20red%3B%20%7D%20%7D%3C%2Fstyle%3E",
                        "block": { "zh-CN": "%E4%BD%A0%E5%A5%BD", "en-US": "Hello" }
                    },
                    "comp": "./button.demo.vue"
                },
                "broken.demo.vue": { "data": { "render": "%E0%A4%A" } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_decoded_accessors() {
        let registry = registry();
        let demo = SiteDemo::new(&registry, "button.demo.vue", "en-US");

        assert_eq!(demo.render().unwrap(), Some("<button>OK</button>"));
        assert_eq!(
            demo.code().unwrap(),
            Some(r#"<style lang="scss">.a { .b { color: red; } }</style>"#)
        );
        assert_eq!(demo.component(), Some("./button.demo.vue"));
        assert_eq!(demo.content().unwrap(), Some(&json!("Hello")));
    }

    #[test]
    fn test_content_falls_back_to_first_entry() {
        let registry = registry();
        let demo = SiteDemo::new(&registry, "button.demo.vue", "fr-FR");
        assert_eq!(demo.content().unwrap(), Some(&json!("你好")));
    }

    #[test]
    fn test_unknown_source() {
        let registry = registry();
        let demo = SiteDemo::new(&registry, "missing.demo.vue", "en-US");

        assert_eq!(demo.render().unwrap(), None);
        assert_eq!(demo.code().unwrap(), None);
        assert_eq!(demo.block().unwrap(), None);
        assert_eq!(demo.content().unwrap(), None);
        assert_eq!(demo.component(), None);
    }

    #[test]
    fn test_malformed_payload_is_an_error_every_time() {
        let registry = registry();
        let demo = SiteDemo::new(&registry, "broken.demo.vue", "en-US");

        assert!(demo.render().is_err());
        assert!(demo.render().is_err());
        assert_eq!(demo.code().unwrap(), None);
    }

    #[test]
    fn test_accessors_are_cached() {
        let registry = registry();
        let demo = SiteDemo::new(&registry, "button.demo.vue", "en-US");

        let first = demo.render().unwrap().unwrap();
        let second = demo.render().unwrap().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_playground_code() {
        let registry = registry();
        let demo = SiteDemo::new(&registry, "button.demo.vue", "en-US");

        let code = demo.playground_code(&GrassCompiler).unwrap().unwrap();

        assert!(code.starts_with("<style>"));
        assert!(code.contains(".a .b {"));
        assert!(code.ends_with("</style>"));
    }
}
