//! Component registration and rendering.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::SiteError;

/// Props passed to a component, as given in page markup.
pub type Props = Map<String, Value>;

/// A named HTML component usable from pages.
pub trait Component: Send + Sync {
    /// Render the component to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the props are invalid or the component data
    /// cannot be decoded.
    fn render(&self, props: &Props) -> Result<String, SiteError>;
}

/// Components by registration name.
///
/// Registering a name twice replaces the earlier component.
#[derive(Default)]
pub struct ComponentRegistry {
    components: IndexMap<String, Box<dyn Component>>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, component: impl Component + 'static) {
        let name = name.into();
        tracing::debug!(%name, "Registering component");
        self.components.insert(name, Box::new(component));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Render a registered component.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownComponent`] for unregistered names, or the
    /// component's own error.
    pub fn render(&self, name: &str, props: &Props) -> Result<String, SiteError> {
        self.get(name)
            .ok_or_else(|| SiteError::UnknownComponent(name.to_owned()))?
            .render(props)
    }
}

/// Escape text for HTML content and attribute values.
pub(crate) fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
