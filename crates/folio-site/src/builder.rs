//! Static artifact builder.
//!
//! Writes the data files a theme reads at render time:
//!
//! - `posts.json`: post listing, tag statistics and featured posts
//! - `site.json`: [`SiteData`]
//! - `search.json`: local search documents (local provider only)
//! - `demos.json`: registry of demo sources found by the demo globs
//! - `sitemap.xml`: only when a sitemap hostname is configured

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use folio_config::{Config, PostsConfig, SearchProvider};
use folio_content::{ContentSource, PageRef, file_path_to_url};
use folio_demo::{DemoEntry, DemoRegistry};
use folio_posts::{PostsData, PostsOptions, load_posts};
use glob::Pattern;
use serde::Serialize;

use crate::{ConfigTransform, SiteData, SiteError, SitemapItem, build_sitemap};

/// Listing options from `[posts]` configuration.
#[must_use]
pub fn posts_options(config: &PostsConfig) -> PostsOptions {
    PostsOptions {
        index_url: config.index_url.clone(),
        excerpt_length: config.excerpt_length,
        default_author: config.default_author.clone(),
        featured_min: config.featured_min,
        featured_max: config.featured_max,
        untagged_label: config.untagged_label.clone(),
        image_extension: config.image_extension.clone(),
    }
}

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Written files, in write order.
    pub artifacts: Vec<PathBuf>,
    pub posts: usize,
    pub tags: usize,
    pub demos: usize,
    /// URLs written to the sitemap, if one was built.
    pub sitemap_urls: Option<usize>,
}

/// One local search document.
#[derive(Debug, Serialize)]
struct SearchDocument<'a> {
    url: &'a str,
    title: Option<&'a str>,
    excerpt: &'a str,
    tags: &'a [String],
}

/// Builds static artifacts for a configured site.
pub struct SiteBuilder<'a> {
    config: &'a Config,
    output_dir: PathBuf,
}

impl<'a> SiteBuilder<'a> {
    /// Create a builder writing to the configured output directory.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            output_dir: config.paths_resolved.output_dir.clone(),
        }
    }

    /// Write to a different output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Build all artifacts.
    ///
    /// `source` provides the posts collection. Site pages and demo sources
    /// are discovered under the configured source directory.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the posts cannot be listed, a demo glob is
    /// invalid, or an artifact cannot be written.
    pub fn build(&self, source: &dyn ContentSource) -> Result<BuildReport, SiteError> {
        let source_dir = &self.config.paths_resolved.source_dir;
        fs::create_dir_all(&self.output_dir).map_err(|e| SiteError::io(&self.output_dir, e))?;

        let mut report = BuildReport {
            output_dir: self.output_dir.clone(),
            ..BuildReport::default()
        };

        let posts = load_posts(source, &posts_options(&self.config.posts))?;
        report.posts = posts.posts.len();
        report.tags = posts.tags.names.len();
        self.write_json(&mut report, "posts.json", &posts)?;

        self.write_json(&mut report, "site.json", &SiteData::from_config(self.config))?;

        if self.config.search.provider == SearchProvider::Local {
            let documents: Vec<SearchDocument<'_>> = posts
                .posts
                .iter()
                .map(|post| SearchDocument {
                    url: &post.href,
                    title: post.title.as_deref(),
                    excerpt: &post.excerpt,
                    tags: &post.tags,
                })
                .collect();
            self.write_json(&mut report, "search.json", &documents)?;
        }

        let demos = discover_demos(source_dir, &self.config.demos.glob)?;
        report.demos = demos.len();
        self.write_json(&mut report, "demos.json", &demos)?;

        if let Some(hostname) = &self.config.sitemap.hostname {
            let items = self.sitemap_items(source_dir, &posts)?;
            let transform = ConfigTransform::new(&self.config.sitemap);
            let xml = build_sitemap(hostname, items, &transform)?;
            report.sitemap_urls = Some(xml.matches("<url>").count());
            self.write(&mut report, "sitemap.xml", xml.as_bytes())?;
        } else {
            tracing::debug!("No sitemap hostname configured, skipping sitemap");
        }

        Ok(report)
    }

    /// Sitemap items for every page; posts carry their date as `lastmod`.
    fn sitemap_items(
        &self,
        source_dir: &Path,
        posts: &PostsData,
    ) -> Result<Vec<SitemapItem>, SiteError> {
        let post_dates: HashMap<&str, Option<&str>> = posts
            .posts
            .iter()
            .map(|post| (post.href.as_str(), post.date.iso.as_deref()))
            .collect();

        let pages = discover_pages(source_dir).map_err(|e| SiteError::io(source_dir, e))?;
        Ok(pages
            .into_iter()
            .map(|page| {
                let lastmod = match post_dates.get(page.url.as_str()) {
                    Some(date) => date.map(str::to_owned),
                    None if self.config.site.last_updated => modified_date(&page.path),
                    None => None,
                };
                SitemapItem {
                    url: page.url,
                    lastmod,
                    changefreq: None,
                }
            })
            .collect())
    }

    fn write_json(
        &self,
        report: &mut BuildReport,
        name: &str,
        value: &impl Serialize,
    ) -> Result<(), SiteError> {
        let json = serde_json::to_vec_pretty(value)?;
        self.write(report, name, &json)
    }

    fn write(&self, report: &mut BuildReport, name: &str, content: &[u8]) -> Result<(), SiteError> {
        let path = self.output_dir.join(name);
        fs::write(&path, content).map_err(|e| SiteError::io(&path, e))?;
        tracing::info!(path = %path.display(), "Wrote artifact");
        report.artifacts.push(path);
        Ok(())
    }
}

/// File modification date as `YYYY-MM-DD`.
fn modified_date(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified).format("%Y-%m-%d").to_string())
}

/// Every file below `dir`, skipping hidden entries, as paths relative to `dir`.
fn walk_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }

    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let file_type = entry.file_type()?;
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file()
                && let Ok(rel) = path.strip_prefix(dir)
            {
                files.push(rel.to_path_buf());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Every Markdown page below `source_dir`, sorted by path.
///
/// # Errors
///
/// Returns an I/O error if a directory cannot be read.
pub fn discover_pages(source_dir: &Path) -> std::io::Result<Vec<PageRef>> {
    Ok(walk_files(source_dir)?
        .into_iter()
        .filter(|rel| rel.extension().is_some_and(|e| e == "md"))
        .map(|rel| PageRef {
            url: file_path_to_url(&rel),
            path: source_dir.join(rel),
        })
        .collect())
}

/// Build a demo registry from the files matching `patterns`.
///
/// Keys are source-relative paths with `/` separators. Each entry holds the
/// encoded source code and a `./`-prefixed component path.
///
/// # Errors
///
/// Returns [`SiteError::Glob`] for an invalid pattern and [`SiteError::Io`]
/// if a file cannot be read.
pub fn discover_demos(source_dir: &Path, patterns: &[String]) -> Result<DemoRegistry, SiteError> {
    let patterns = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| SiteError::Glob {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut registry = DemoRegistry::new();
    for rel in walk_files(source_dir).map_err(|e| SiteError::io(source_dir, e))? {
        let key = rel.to_string_lossy().replace('\\', "/");
        if !patterns.iter().any(|p| p.matches(&key)) {
            continue;
        }
        let path = source_dir.join(&rel);
        let code = fs::read_to_string(&path).map_err(|e| SiteError::io(&path, e))?;
        tracing::debug!(demo = %key, "Found demo");
        registry.insert(key.clone(), DemoEntry::from_source(format!("./{key}"), &code));
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use folio_content::{FsContentSource, MockContentSource};
    use folio_demo::SiteDemo;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn load_config(dir: &Path, toml: &str) -> Config {
        let path = dir.join("folio.toml");
        fs::write(&path, toml).unwrap();
        Config::load(Some(path.as_path()), None).unwrap()
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_build_writes_artifacts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "pages/index.md", "# Home\n");
        write(root, "pages/posts/index.md", "---\ntitle: Posts\n---\n");
        write(
            root,
            "pages/posts/hello.md",
            "---\ntitle: Hello\ndate: 2024-01-01\ntags: [rust]\n---\nHi\n",
        );
        write(root, "pages/posts/hello.png", "png");
        write(root, "pages/demos/button.demo.vue", "<template><button/></template>\n");
        let config = load_config(
            root,
            "[sitemap]\nhostname = \"https://pdanpdan.github.io/\"\n",
        );
        let source = FsContentSource::new(
            config.paths_resolved.source_dir.clone(),
            config.posts.dir.clone(),
        );

        let report = SiteBuilder::new(&config).build(&source).unwrap();

        let out = &config.paths_resolved.output_dir;
        let names: Vec<String> = report
            .artifacts
            .iter()
            .map(|p| p.strip_prefix(out).unwrap().display().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["posts.json", "site.json", "search.json", "demos.json", "sitemap.xml"]
        );
        assert_eq!(report.posts, 1);
        assert_eq!(report.tags, 1);
        assert_eq!(report.demos, 1);
        assert_eq!(report.sitemap_urls, Some(3));

        let posts = read_json(&out.join("posts.json"));
        assert_eq!(posts["posts"][0]["href"], "/posts/hello.html");
        assert_eq!(posts["posts"][0]["image"], "/posts/hello.png");
        assert_eq!(posts["featured"][0]["title"], "Hello");

        let search = read_json(&out.join("search.json"));
        assert_eq!(search[0]["url"], "/posts/hello.html");

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://pdanpdan.github.io/posts/hello.html</loc>"));
        assert!(sitemap.contains("<lastmod>2024-01-01</lastmod>"));
        assert!(sitemap.contains("<loc>https://pdanpdan.github.io/posts/</loc>"));

        let demos = DemoRegistry::load(&out.join("demos.json")).unwrap();
        let demo = SiteDemo::new(&demos, "demos/button.demo.vue", "en-US");
        assert_eq!(demo.code().unwrap(), Some("<template><button/></template>\n"));
        assert_eq!(demo.component(), Some("./demos/button.demo.vue"));
    }

    #[test]
    fn test_build_without_hostname_or_search() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), "[search]\nprovider = \"none\"\n");
        let source = MockContentSource::new().with_page("/posts/a.html", "title: A");

        let report = SiteBuilder::new(&config)
            .with_output_dir(temp.path().join("out"))
            .build(&source)
            .unwrap();

        assert_eq!(report.sitemap_urls, None);
        assert!(!temp.path().join("out/sitemap.xml").exists());
        assert!(!temp.path().join("out/search.json").exists());
        assert!(temp.path().join("out/posts.json").exists());
    }

    #[test]
    fn test_sitemap_exclude_and_changefreq() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "pages/index.md", "");
        write(root, "pages/drafts/wip.md", "");
        let config = load_config(
            root,
            "[site]\nlast_updated = false\n\n[sitemap]\nhostname = \"https://example.com\"\nexclude = [\"/drafts/\"]\nchangefreq = \"monthly\"\n",
        );

        SiteBuilder::new(&config)
            .build(&MockContentSource::new())
            .unwrap();

        let sitemap =
            fs::read_to_string(config.paths_resolved.output_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/</loc>"));
        assert!(sitemap.contains("<changefreq>monthly</changefreq>"));
        assert!(!sitemap.contains("drafts"));
        assert!(!sitemap.contains("<lastmod>"));
    }

    #[test]
    fn test_discover_pages_skips_hidden() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.md", "");
        write(temp.path(), "guide/setup.md", "");
        write(temp.path(), ".hidden/x.md", "");
        write(temp.path(), "notes.txt", "");

        let urls: Vec<String> = discover_pages(temp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.url)
            .collect();

        assert_eq!(urls, vec!["/guide/setup.html", "/"]);
    }

    #[test]
    fn test_discover_demos_with_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.demo.vue", "a");
        write(temp.path(), "nested/b.demo.vue", "b");
        write(temp.path(), "nested/c.vue", "c");

        let registry = discover_demos(temp.path(), &["**/*.demo.vue".to_owned()]).unwrap();
        let keys: Vec<&str> = registry.iter().map(|(src, _)| src).collect();
        assert_eq!(keys, vec!["a.demo.vue", "nested/b.demo.vue"]);

        let err = discover_demos(temp.path(), &["[".to_owned()]).unwrap_err();
        assert!(matches!(err, SiteError::Glob { .. }));
    }

    #[test]
    fn test_posts_options_from_config() {
        let config = PostsConfig {
            default_author: "Ana".to_owned(),
            featured_max: 5,
            ..PostsConfig::default()
        };
        let options = posts_options(&config);
        assert_eq!(options.default_author, "Ana");
        assert_eq!(options.featured_max, 5);
        assert_eq!(options.index_url, "/posts/");
    }
}
