//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `sitemap.hostname`
//!
//! ## Path Aliases
//!
//! The `[aliases]` table maps short names to directories relative to the
//! config file. Lookups such as `components/CodeBlock/index.vue` resolve
//! through [`Config::resolve_alias`].

mod expand;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override sitemap hostname.
    pub hostname: Option<String>,
    /// Override demo playground mode.
    pub playground: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General site settings.
    pub site: SiteConfig,
    /// Top navigation entries.
    pub nav: Vec<NavLink>,
    /// Sidebar groups.
    pub sidebar: Vec<SidebarGroup>,
    /// Social links shown in the header.
    pub social_links: Vec<SocialLink>,
    /// Search provider configuration.
    pub search: SearchConfig,
    /// Sitemap configuration.
    pub sitemap: SitemapConfig,
    /// Markdown rendering options.
    pub markdown: MarkdownConfig,
    /// Post listing configuration.
    pub posts: PostsConfig,
    /// Demo block configuration.
    pub demos: DemosConfig,
    /// Clipboard configuration.
    pub clipboard: ClipboardConfig,
    /// Path aliases (name -> directory relative to the config file).
    aliases: HashMap<String, String>,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Resolved aliases with absolute paths (set after loading).
    #[serde(skip)]
    pub aliases_resolved: BTreeMap<String, PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// General site settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site language tag.
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Page title template; `:title` is replaced with the page title.
    pub title_template: String,
    /// Site description.
    pub description: String,
    /// Content source directory (relative to the config file).
    src_dir: Option<String>,
    /// Build output directory (relative to the config file).
    out_dir: Option<String>,
    /// Whether pages expose a last-updated timestamp.
    pub last_updated: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_owned(),
            title: "Folio".to_owned(),
            title_template: ":title | Folio".to_owned(),
            description: String::new(),
            src_dir: None,
            out_dir: None,
            last_updated: true,
        }
    }
}

/// A navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavLink {
    /// Link label.
    pub text: String,
    /// Link target path.
    pub link: String,
}

/// A sidebar group of navigation entries.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SidebarGroup {
    /// Group label.
    pub text: String,
    /// Entries in the group.
    #[serde(default)]
    pub items: Vec<NavLink>,
}

/// A social link in the site header.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocialLink {
    /// Icon name (e.g., "github").
    pub icon: String,
    /// Link target URL.
    pub link: String,
}

/// Search provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Client-side local search.
    #[default]
    Local,
    /// Search disabled.
    None,
}

/// Search configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search provider.
    pub provider: SearchProvider,
    /// Provider options, forwarded verbatim to the theme.
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Sitemap configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Public hostname; the sitemap is only written when set.
    pub hostname: Option<String>,
    /// URL prefixes excluded from the sitemap.
    pub exclude: Vec<String>,
    /// Change frequency applied to every sitemap item.
    pub changefreq: Option<String>,
}

/// Markdown rendering options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Show line numbers in code blocks.
    pub line_numbers: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { line_numbers: true }
    }
}

/// Post listing configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Posts directory, relative to the content source directory.
    pub dir: String,
    /// URL of the posts index page, excluded from listings.
    pub index_url: String,
    /// Maximum excerpt length in characters.
    pub excerpt_length: usize,
    /// Author used when a post declares none.
    pub default_author: String,
    /// Minimum size of the featured set when enough posts exist.
    pub featured_min: usize,
    /// Maximum size of the featured set.
    pub featured_max: usize,
    /// Tag used for posts without tags.
    pub untagged_label: String,
    /// Extension of post cover images.
    pub image_extension: String,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            dir: "posts".to_owned(),
            index_url: "/posts/".to_owned(),
            excerpt_length: 150,
            default_author: "PDan".to_owned(),
            featured_min: 3,
            featured_max: 10,
            untagged_label: "-/-".to_owned(),
            image_extension: "png".to_owned(),
        }
    }
}

/// Demo block configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemosConfig {
    /// Glob patterns for demo component sources.
    pub glob: Vec<String>,
    /// Compile embedded Sass/SCSS styles for live previews.
    pub playground: bool,
}

impl Default for DemosConfig {
    fn default() -> Self {
        Self {
            glob: vec!["**/*.demo.vue".to_owned()],
            playground: false,
        }
    }
}

/// Clipboard configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Delay before the "copied" flag resets, in milliseconds.
    pub reset_delay_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 3000,
        }
    }
}

/// Resolved directories with absolute paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Content source directory (pages).
    pub source_dir: PathBuf,
    /// Build output directory.
    pub output_dir: PathBuf,
    /// Project data directory (.folio/).
    pub project_dir: PathBuf,
}

impl PathsConfig {
    /// Posts directory inside the source directory.
    #[must_use]
    pub fn posts_dir(&self, posts: &PostsConfig) -> PathBuf {
        self.source_dir.join(&posts.dir)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sitemap.hostname`").
        field: String,
        /// Error message (e.g., "${`SITE_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.paths_resolved.source_dir.clone_from(source_dir);
            self.aliases_resolved
                .insert("pages".to_owned(), source_dir.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(hostname) = &settings.hostname {
            self.sitemap.hostname = Some(hostname.clone());
        }
        if let Some(playground) = settings.playground {
            self.demos.playground = playground;
        }
    }

    /// Resolve an aliased path such as `components/CodeBlock/index.vue`.
    ///
    /// The first path segment names the alias; the remainder is joined onto
    /// the alias directory. Returns `None` for unknown aliases.
    #[must_use]
    pub fn resolve_alias(&self, path: &str) -> Option<PathBuf> {
        let (name, rest) = path.split_once('/').unwrap_or((path, ""));
        let base = self.aliases_resolved.get(name)?;
        if rest.is_empty() {
            Some(base.clone())
        } else {
            Some(base.join(rest))
        }
    }

    /// Apply the title template to a page title.
    ///
    /// An empty page title yields the bare site title.
    #[must_use]
    pub fn page_title(&self, title: &str) -> String {
        if title.is_empty() {
            return self.site.title.clone();
        }
        self.site.title_template.replace(":title", title)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfig::default(),
            nav: Vec::new(),
            sidebar: Vec::new(),
            social_links: Vec::new(),
            search: SearchConfig::default(),
            sitemap: SitemapConfig::default(),
            markdown: MarkdownConfig::default(),
            posts: PostsConfig::default(),
            demos: DemosConfig::default(),
            clipboard: ClipboardConfig::default(),
            aliases: HashMap::new(),
            paths_resolved: PathsConfig::default(),
            aliases_resolved: BTreeMap::new(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.lang, "site.lang")?;
        if let Some(ref hostname) = self.sitemap.hostname {
            require_non_empty(hostname, "sitemap.hostname")?;
            require_http_url(hostname, "sitemap.hostname")?;
        }
        self.validate_posts()?;
        if self.clipboard.reset_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "clipboard.reset_delay_ms must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate post listing configuration.
    fn validate_posts(&self) -> Result<(), ConfigError> {
        const MIN_EXCERPT: usize = 3;

        // The ellipsis alone takes three characters
        if self.posts.excerpt_length < MIN_EXCERPT {
            return Err(ConfigError::Validation(format!(
                "posts.excerpt_length must be at least {MIN_EXCERPT}"
            )));
        }
        if self.posts.featured_max == 0 {
            return Err(ConfigError::Validation(
                "posts.featured_max must be greater than 0".to_owned(),
            ));
        }
        if self.posts.featured_min > self.posts.featured_max {
            return Err(ConfigError::Validation(
                "posts.featured_min cannot exceed posts.featured_max".to_owned(),
            ));
        }
        require_non_empty(&self.posts.untagged_label, "posts.untagged_label")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        if let Some(ref hostname) = self.sitemap.hostname {
            self.sitemap.hostname = Some(expand::expand_env(hostname, "sitemap.hostname")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let source_dir = resolve(self.site.src_dir.as_deref(), "pages");
        self.paths_resolved = PathsConfig {
            output_dir: resolve(self.site.out_dir.as_deref(), ".folio/dist"),
            project_dir: config_dir.join(".folio"),
            source_dir: source_dir.clone(),
        };

        let mut aliases = BTreeMap::from([
            ("theme".to_owned(), config_dir.join(".folio/theme")),
            ("assets".to_owned(), config_dir.join("assets")),
            ("pages".to_owned(), source_dir),
            ("components".to_owned(), config_dir.join("components")),
        ]);
        for (name, dir) in &self.aliases {
            aliases.insert(name.clone(), config_dir.join(dir));
        }
        self.aliases_resolved = aliases;
    }
}
