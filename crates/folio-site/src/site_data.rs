//! Theme-facing site data.

use folio_config::{Config, NavLink, SearchProvider, SidebarGroup, SocialLink};
use serde::Serialize;
use serde_json::{Map, Value};

/// Search provider and its options, forwarded to the theme.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchOptions {
    pub provider: SearchProvider,
    pub options: Map<String, Value>,
}

/// Site-wide data exposed to templates as `site.json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub lang: String,
    pub title: String,
    pub title_template: String,
    pub description: String,
    pub nav: Vec<NavLink>,
    pub sidebar: Vec<SidebarGroup>,
    pub social_links: Vec<SocialLink>,
    pub search: SearchOptions,
    pub last_updated: bool,
    pub line_numbers: bool,
}

impl SiteData {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            lang: config.site.lang.clone(),
            title: config.site.title.clone(),
            title_template: config.site.title_template.clone(),
            description: config.site.description.clone(),
            nav: config.nav.clone(),
            sidebar: config.sidebar.clone(),
            social_links: config.social_links.clone(),
            search: SearchOptions {
                provider: config.search.provider,
                options: config.search.options.clone(),
            },
            last_updated: config.site.last_updated,
            line_numbers: config.markdown.line_numbers,
        }
    }
}
