//! `folio demo` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_demo::{DemoRegistry, GrassCompiler, SiteDemo};
use folio_site::{ComponentRegistry, DemoBlockOptions, Props, Theme};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the demo command.
#[derive(Args)]
pub(crate) struct DemoArgs {
    /// Demo registry JSON file (e.g., .folio/dist/demos.json).
    registry: PathBuf,

    /// Demo source path as registered (e.g., demos/button.demo.vue).
    src: String,

    /// Language used to pick block content.
    #[arg(long, default_value = "en-US")]
    lang: String,

    /// Compile Sass/SCSS styles in the demo code.
    #[arg(long)]
    playground: bool,

    /// Render the demo block as HTML instead.
    #[arg(long)]
    html: bool,

    /// Hide line numbers in HTML output.
    #[arg(long, requires = "html")]
    no_line_numbers: bool,
}

impl DemoArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let registry = DemoRegistry::load(&self.registry)?;

        if registry.get(&self.src).is_none() {
            return Err(CliError::Validation(format!(
                "Demo not found in {}: {}",
                self.registry.display(),
                self.src
            )));
        }

        if self.html {
            let theme = Theme::new(
                Arc::new(registry),
                DemoBlockOptions {
                    lang: self.lang,
                    line_numbers: !self.no_line_numbers,
                    playground: self.playground,
                },
            );
            let mut app = ComponentRegistry::new();
            theme.enhance_app(&mut app);

            let mut props = Props::new();
            props.insert("src".to_owned(), self.src.into());
            output.line(&app.render("DemoBlock", &props)?);
            return Ok(());
        }

        let demo = SiteDemo::new(&registry, &self.src, self.lang.as_str());
        if let Some(component) = demo.component() {
            output.highlight(&format!("Component: {component}"));
        }
        if let Some(render) = demo.render()? {
            output.highlight("Render");
            output.line(render);
        }
        if let Some(content) = demo.content()? {
            output.highlight("Content");
            match content.as_str() {
                Some(text) => output.line(text),
                None => output.line(&content.to_string()),
            }
        }

        let code = if self.playground {
            demo.playground_code(&GrassCompiler)?
        } else {
            demo.code()?.map(str::to_owned)
        };
        if let Some(code) = code {
            output.highlight("Code");
            output.line(&code);
        }
        Ok(())
    }
}
