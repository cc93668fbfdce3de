//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello.html</loc>
//!     <lastmod>2024-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::io::Cursor;

use folio_config::SitemapConfig;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::SiteError;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// One page entry before hostname resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SitemapItem {
    /// Site URL (e.g., "/posts/hello.html").
    pub url: String,
    /// Last modification date, `YYYY-MM-DD`.
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
}

impl SitemapItem {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Per-item hook applied before an item is written.
///
/// Returning `None` drops the item.
pub trait SitemapTransform {
    fn transform(&self, item: SitemapItem) -> Option<SitemapItem>;
}

impl<F> SitemapTransform for F
where
    F: Fn(SitemapItem) -> Option<SitemapItem>,
{
    fn transform(&self, item: SitemapItem) -> Option<SitemapItem> {
        self(item)
    }
}

/// Transform driven by `[sitemap]` configuration.
///
/// Drops items under any `exclude` prefix and fills `changefreq` when the
/// item has none.
#[derive(Clone, Debug, Default)]
pub struct ConfigTransform {
    exclude: Vec<String>,
    changefreq: Option<String>,
}

impl ConfigTransform {
    #[must_use]
    pub fn new(config: &SitemapConfig) -> Self {
        Self {
            exclude: config.exclude.clone(),
            changefreq: config.changefreq.clone(),
        }
    }
}

impl SitemapTransform for ConfigTransform {
    fn transform(&self, mut item: SitemapItem) -> Option<SitemapItem> {
        if self
            .exclude
            .iter()
            .any(|prefix| item.url.starts_with(prefix.as_str()))
        {
            return None;
        }
        if item.changefreq.is_none() {
            item.changefreq.clone_from(&self.changefreq);
        }
        Some(item)
    }
}

fn xml_error(e: impl std::fmt::Display) -> SiteError {
    SiteError::Xml(e.to_string())
}

fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), SiteError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_error)?;
    Ok(())
}

/// Join a hostname and a site URL with exactly one slash.
fn absolute_url(hostname: &str, url: &str) -> String {
    format!(
        "{}/{}",
        hostname.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Render `sitemap.xml` for `items` under `hostname`.
///
/// Items pass through `transform` first; dropped items are not written.
///
/// # Errors
///
/// Returns [`SiteError::Xml`] if the document cannot be written.
pub fn build_sitemap(
    hostname: &str,
    items: impl IntoIterator<Item = SitemapItem>,
    transform: &dyn SitemapTransform,
) -> Result<String, SiteError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::with_capacity(4096)), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
        ))
        .map_err(xml_error)?;

    for item in items.into_iter().filter_map(|item| transform.transform(item)) {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_error)?;
        write_text_element(&mut writer, "loc", &absolute_url(hostname, &item.url))?;
        if let Some(lastmod) = &item.lastmod {
            write_text_element(&mut writer, "lastmod", lastmod)?;
        }
        if let Some(changefreq) = &item.changefreq {
            write_text_element(&mut writer, "changefreq", changefreq)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner().into_inner()).map_err(xml_error)?;
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn keep_all(item: SitemapItem) -> Option<SitemapItem> {
        Some(item)
    }

    #[test]
    fn test_build_sitemap() {
        let items = vec![
            SitemapItem::new("/"),
            SitemapItem {
                url: "/posts/a&b.html".to_owned(),
                lastmod: Some("2024-01-01".to_owned()),
                changefreq: None,
            },
        ];

        let xml = build_sitemap("https://pdanpdan.github.io/", items, &keep_all).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.ends_with("</urlset>\n"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://pdanpdan.github.io/</loc>"));
        assert!(xml.contains("<loc>https://pdanpdan.github.io/posts/a&amp;b.html</loc>"));
        assert!(xml.contains("<lastmod>2024-01-01</lastmod>"));
        assert!(!xml.contains("<changefreq>"));
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = build_sitemap("https://example.com", Vec::new(), &keep_all).unwrap();
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_config_transform() {
        let transform = ConfigTransform::new(&SitemapConfig {
            hostname: None,
            exclude: vec!["/drafts/".to_owned()],
            changefreq: Some("weekly".to_owned()),
        });

        assert_eq!(transform.transform(SitemapItem::new("/drafts/x.html")), None);
        assert_eq!(
            transform.transform(SitemapItem::new("/posts/x.html")),
            Some(SitemapItem {
                url: "/posts/x.html".to_owned(),
                lastmod: None,
                changefreq: Some("weekly".to_owned()),
            })
        );
    }

    #[test]
    fn test_closure_transform_rewrites_items() {
        let strip_html = |mut item: SitemapItem| {
            item.url = item.url.trim_end_matches(".html").to_owned();
            Some(item)
        };

        let xml = build_sitemap(
            "https://example.com",
            vec![SitemapItem::new("/posts/a.html")],
            &strip_html,
        )
        .unwrap();

        assert!(xml.contains("<loc>https://example.com/posts/a</loc>"));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url("https://x.io/", "/a.html"), "https://x.io/a.html");
        assert_eq!(absolute_url("https://x.io", "a.html"), "https://x.io/a.html");
        assert_eq!(absolute_url("https://x.io", "/"), "https://x.io/");
    }
}
