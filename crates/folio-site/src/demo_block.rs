//! The `DemoBlock` component.

use std::fmt::Write;
use std::sync::Arc;

use folio_demo::{DemoRegistry, GrassCompiler, SiteDemo, StyleCompiler};
use serde_json::Value;

use crate::component::escape;
use crate::{Component, Props, SiteError};

/// Rendering options for [`DemoBlock`].
#[derive(Clone, Debug)]
pub struct DemoBlockOptions {
    /// Language used to pick block content.
    pub lang: String,
    /// Show line numbers next to the demo code.
    pub line_numbers: bool,
    /// Show code with Sass and SCSS styles compiled to CSS.
    pub playground: bool,
}

impl Default for DemoBlockOptions {
    fn default() -> Self {
        Self {
            lang: "en-US".to_owned(),
            line_numbers: true,
            playground: false,
        }
    }
}

/// Renders a registered demo: its markup, localized content and code.
///
/// Takes a single `src` prop naming the demo in the registry.
pub struct DemoBlock {
    registry: Arc<DemoRegistry>,
    options: DemoBlockOptions,
    compiler: Box<dyn StyleCompiler + Send + Sync>,
}

impl DemoBlock {
    pub fn new(registry: Arc<DemoRegistry>, options: DemoBlockOptions) -> Self {
        Self {
            registry,
            options,
            compiler: Box::new(GrassCompiler),
        }
    }

    /// Use a different style compiler in playground mode.
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl StyleCompiler + Send + Sync + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// Render the demo registered under `src`.
    ///
    /// A source missing from the registry renders an empty block.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Decode`] if the demo payload is malformed.
    pub fn render_src(&self, src: &str) -> Result<String, SiteError> {
        let demo = SiteDemo::new(&self.registry, src, self.options.lang.as_str());
        if demo.data().is_none() {
            tracing::warn!(src, "Demo not found in registry");
        }

        let code = if self.options.playground {
            demo.playground_code(self.compiler.as_ref())?
        } else {
            demo.code()?.map(str::to_owned)
        };

        let mut html = String::with_capacity(1024);
        html.push_str("<div class=\"demo-block\">\n");

        if let Some(render) = demo.render()? {
            let _ = writeln!(html, "<div class=\"demo-block-render\">{render}</div>");
        }
        if let Some(Value::String(content)) = demo.content()? {
            let _ = writeln!(html, "<div class=\"demo-block-content\">{content}</div>");
        }
        if let Some(code) = code {
            render_code(&mut html, &code, language(src), self.options.line_numbers);
        }

        html.push_str("</div>\n");
        Ok(html)
    }
}

impl Component for DemoBlock {
    fn render(&self, props: &Props) -> Result<String, SiteError> {
        let src = props
            .get("src")
            .and_then(Value::as_str)
            .ok_or_else(|| SiteError::Props {
                component: "DemoBlock",
                message: "missing `src` prop".to_owned(),
            })?;
        self.render_src(src)
    }
}

/// Code language from the demo source extension.
fn language(src: &str) -> &str {
    src.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
        .unwrap_or("text")
}

fn render_code(html: &mut String, code: &str, lang: &str, line_numbers: bool) {
    let mode = if line_numbers { " line-numbers-mode" } else { "" };
    let _ = write!(
        html,
        "<div class=\"language-{lang}{mode}\">\
         <button title=\"Copy Code\" class=\"copy\"></button>\
         <span class=\"lang\">{lang}</span>\
         <pre><code>{}</code></pre>",
        escape(code)
    );

    if line_numbers {
        html.push_str("<div class=\"line-numbers-wrapper\" aria-hidden=\"true\">");
        for n in 1..=code.lines().count().max(1) {
            let _ = write!(html, "<span class=\"line-number\">{n}</span><br>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>\n");
}
