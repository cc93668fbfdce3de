//! Site theme: component registration.

use std::sync::Arc;

use folio_config::Config;
use folio_demo::DemoRegistry;

use crate::{ComponentRegistry, DemoBlock, DemoBlockOptions};

/// Extends the default theme with the site's components.
pub struct Theme {
    demos: Arc<DemoRegistry>,
    demo_options: DemoBlockOptions,
}

impl Theme {
    pub fn new(demos: Arc<DemoRegistry>, demo_options: DemoBlockOptions) -> Self {
        Self {
            demos,
            demo_options,
        }
    }

    /// Theme for a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config, demos: Arc<DemoRegistry>) -> Self {
        Self::new(
            demos,
            DemoBlockOptions {
                lang: config.site.lang.clone(),
                line_numbers: config.markdown.line_numbers,
                playground: config.demos.playground,
            },
        )
    }

    /// Register the theme's components.
    pub fn enhance_app(&self, app: &mut ComponentRegistry) {
        app.register(
            "DemoBlock",
            DemoBlock::new(Arc::clone(&self.demos), self.demo_options.clone()),
        );
    }
}

#[cfg(test)]
mod tests {
    use folio_demo::DemoEntry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_enhance_app_registers_demo_block() {
        let mut demos = DemoRegistry::new();
        demos.insert("x.demo.vue", DemoEntry::from_source("./x.demo.vue", "<p>x</p>"));
        let theme = Theme::new(Arc::new(demos), DemoBlockOptions::default());
        let mut app = ComponentRegistry::new();

        theme.enhance_app(&mut app);

        assert_eq!(app.names().collect::<Vec<_>>(), vec!["DemoBlock"]);
        let props = json!({ "src": "x.demo.vue" }).as_object().cloned().unwrap();
        let html = app.render("DemoBlock", &props).unwrap();
        assert!(html.contains("&lt;p&gt;x&lt;/p&gt;"));
    }
}
