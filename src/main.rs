//! ldmeta - build-time JSON-LD structured metadata for static pages.

mod cli;
mod config;
mod jsonld;
mod logger;
mod page;
mod utils;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use jsonld::{Resolver, serialize, wrap};
use page::{Page, inject_metadata, resolve_page_metadata};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use utils::url::SiteUrls;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let resolver = config.resolver();
    let urls = SiteUrls::from_config(&config);

    match &cli.command {
        Commands::Resolve { page } => resolve_one(page, &config, &resolver, &urls),
        Commands::Inject { page, html, output } => {
            inject_one(page, html, output.as_deref(), &config, &resolver, &urls)
        }
        Commands::Check { pages } => check_all(pages, &config, &resolver, &urls),
        Commands::Filters => {
            list_filters(&resolver);
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        log!("config"; "{} not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config
        .validate()
        .with_context(|| format!("invalid config `{}`", config_path.display()))?;

    Ok(config)
}

/// Load a page (relative to the project root) and resolve its declared
/// structured data.
fn load_page(path: &Path, config: &SiteConfig, resolver: &Resolver, urls: &SiteUrls) -> Result<Page> {
    let path = config.root_join(path);
    let mut page = Page::from_path(&path, config)?;
    resolve_page_metadata(&mut page, resolver, urls)
        .with_context(|| format!("in `{}`", path.display()))?;
    Ok(page)
}

fn resolve_one(path: &Path, config: &SiteConfig, resolver: &Resolver, urls: &SiteUrls) -> Result<()> {
    let page = load_page(path, config, resolver, urls)?;

    let Some(tree) = page.resolved() else {
        log!("resolve"; "{} declares no `{}`", path.display(), config.jsonld.key);
        return Ok(());
    };

    let wrapped = wrap(tree.clone(), &config.jsonld.context);
    let text = if config.jsonld.pretty {
        serde_json::to_string_pretty(&wrapped)?
    } else {
        serialize(&wrapped)?
    };
    println!("{text}");
    Ok(())
}

fn inject_one(
    path: &Path,
    html: &Path,
    output: Option<&Path>,
    config: &SiteConfig,
    resolver: &Resolver,
    urls: &SiteUrls,
) -> Result<()> {
    let page = load_page(path, config, resolver, urls)?;
    let html = config.root_join(html);
    let target = output.map_or_else(|| html.clone(), |output| config.root_join(output));

    let content =
        fs::read(&html).with_context(|| format!("failed to read document `{}`", html.display()))?;
    let injected = inject_metadata(&page, &content, &config.jsonld.context)
        .with_context(|| format!("in `{}`", html.display()))?;

    fs::write(&target, injected)
        .with_context(|| format!("failed to write document `{}`", target.display()))?;

    log!("inject"; "{} -> {}", page.url, target.display());
    Ok(())
}

/// Resolve every page in parallel, reporting all failures.
fn check_all(pages: &[PathBuf], config: &SiteConfig, resolver: &Resolver, urls: &SiteUrls) -> Result<()> {
    let failed = pages
        .par_iter()
        .filter_map(|path| load_page(path, config, resolver, urls).err())
        .inspect(|err| log!("error"; "{err:#}"))
        .count();

    if failed > 0 {
        bail!("{failed} of {} pages failed to resolve", pages.len());
    }

    log!("check"; "{} pages resolved", pages.len());
    Ok(())
}

fn list_filters(resolver: &Resolver) {
    let filters = resolver.filters();
    for name in filters.names() {
        if let Some(filter) = filters.get(name) {
            log!("filters"; "{name:<16} accepts {}", filter.accepts);
        }
    }
}
