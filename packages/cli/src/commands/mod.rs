pub mod catalog;
pub mod check;
pub mod replay;
pub mod serve;
pub mod stream;

pub use catalog::{catalog, CatalogArgs};
pub use check::{check, CheckArgs};
pub use replay::{replay, ReplayArgs};
pub use serve::{serve, ServeArgs};
pub use stream::{stream, StreamArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use streamui_catalog::{space_mission, Catalog};
use streamui_renderer::{
    html::to_html, ActionDispatcher, HtmlOptions, Registry, RenderContext, RenderedTree,
};
use streamui_server::demo::ACTION_MESSAGES;
use streamui_tree::Diagnostic;

/// Everything a command needs besides its own arguments
#[derive(Debug)]
pub struct Workspace {
    pub cwd: PathBuf,
    pub config: Config,
    pub catalog: Arc<Catalog>,
    /// Whether the catalog came from a file instead of the built-in one
    pub custom_catalog: bool,
}

impl Workspace {
    pub fn load(cwd: &Path, catalog_override: Option<&Path>) -> Result<Self> {
        let config = Config::load(cwd)?;
        let catalog_path = catalog_override
            .map(|path| cwd.join(path))
            .or_else(|| config.catalog_path(cwd));

        let (catalog, custom_catalog) = match catalog_path {
            Some(path) => {
                let catalog = Catalog::load(&path)
                    .with_context(|| format!("Cannot load catalog {}", path.display()))?;
                tracing::info!(catalog = %catalog.name, path = %path.display(), "Loaded catalog");
                (catalog, true)
            }
            None => (space_mission(), false),
        };

        Ok(Self {
            cwd: cwd.to_path_buf(),
            config,
            catalog: Arc::new(catalog),
            custom_catalog,
        })
    }

    /// Resolve a path argument against the working directory
    pub fn path(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    /// Component registry, warning about catalog types it cannot render
    pub fn registry(&self) -> Registry {
        let registry = Registry::space_mission();
        let missing = registry.missing_from(&self.catalog);
        if !missing.is_empty() {
            tracing::warn!(
                missing = ?missing,
                "Catalog types without a renderer; they render as fallbacks"
            );
        }
        registry
    }

    /// Render context with the demo action handlers and the configured depth
    pub fn context(&self, data: Option<Value>) -> RenderContext {
        let mut context = RenderContext::new()
            .with_actions(demo_actions())
            .with_max_depth(self.config.render.max_depth);
        if let Some(data) = data {
            context = context.with_data(data);
        }
        context
    }

    pub fn html_options(&self) -> HtmlOptions {
        if self.config.render.pretty {
            HtmlOptions::default()
        } else {
            HtmlOptions::compact()
        }
    }
}

/// Handlers printing what the demo application would do
pub fn demo_actions() -> ActionDispatcher {
    ACTION_MESSAGES
        .iter()
        .fold(ActionDispatcher::new(), |actions, (name, message)| {
            actions.with_handler(*name, move |_| {
                println!("{} {} {}", "▶".bright_blue(), name.bold(), message);
            })
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Outline,
    Html,
    Json,
}

pub fn format_tree(tree: &RenderedTree, format: OutputFormat, options: &HtmlOptions) -> Result<String> {
    Ok(match format {
        OutputFormat::Outline => tree.outline(),
        OutputFormat::Html => to_html(tree, options),
        OutputFormat::Json => serde_json::to_string_pretty(tree)?,
    })
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("  {} {}", "✗".red(), diagnostic.to_string().red());
    }
}

/// Parse `--data`: inline JSON, or `@path` to read it from a file
pub fn parse_data(cwd: &Path, raw: &str) -> Result<Value> {
    let source = match raw.strip_prefix('@') {
        Some(path) => {
            let path = cwd.join(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read data file {}", path.display()))?
        }
        None => raw.to_string(),
    };
    serde_json::from_str(&source).context("Data model is not valid JSON")
}
