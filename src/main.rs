use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};

use bundle_preload::config::PreloadConfig;
use bundle_preload::logging::{LogLevel, init_logging};
use bundle_preload::manifest::{ManifestFormat, load_manifest};
use bundle_preload::PreloadTransform;

/// Inject modulepreload and stylesheet links for hashed build output into HTML entries.
#[derive(Debug, Parser)]
#[command(name = "bundle-preload", version)]
struct Cli {
    /// HTML entry documents to rewrite in place. Defaults to the configured list.
    html: Vec<PathBuf>,

    /// Project directory used to resolve configured paths.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file. Defaults to `preload.config.json` in the project directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Manifest written by the build.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Shape of the manifest file.
    #[arg(long, value_enum)]
    format: Option<ManifestFormat>,

    /// Public base path prepended to output file names.
    #[arg(long)]
    base: Option<String>,

    /// Do not inject modulepreload links.
    #[arg(long)]
    no_js: bool,

    /// Do not inject stylesheet links.
    #[arg(long)]
    no_css: bool,

    /// Do not expand chunks by their static imports.
    #[arg(long)]
    no_static_imports: bool,

    /// Only preload output files matching this glob (repeatable).
    #[arg(long)]
    include: Vec<String>,

    /// Never preload output files matching this glob (repeatable).
    #[arg(long)]
    exclude: Vec<String>,

    /// Print the links that would be injected without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Log verbosity; `RUST_LOG` overrides it.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PreloadConfig::from_path(path)?
            .ok_or_else(|| anyhow!("config file {} does not exist", path.display()))?,
        None => PreloadConfig::discover(&cli.root)?,
    };
    apply_overrides(&mut config, &cli);

    let manifest_path = cli
        .manifest
        .clone()
        .unwrap_or_else(|| config.manifest_path(&cli.root));
    let manifest = load_manifest(&manifest_path, config.manifest_format)?;
    if manifest.is_none() {
        warn!(path = %manifest_path.display(), "manifest not found; documents are left unchanged");
    }

    let transform = PreloadTransform::new(config.to_options()?, config.resolver());
    let documents = if cli.html.is_empty() {
        config.html_paths(&cli.root)
    } else {
        cli.html.clone()
    };

    for path in documents {
        let html = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        if cli.dry_run {
            let Some(manifest) = manifest.as_ref() else {
                continue;
            };
            let links = transform
                .plan(&html, manifest)
                .with_context(|| format!("failed to plan links for {}", path.display()))?;
            println!("{}", path.display());
            for module in &links.modules {
                println!("  modulepreload {module}");
            }
            for stylesheet in &links.stylesheets {
                println!("  stylesheet {stylesheet}");
            }
            continue;
        }

        let output = transform
            .transform(&html, manifest.as_ref())
            .with_context(|| format!("failed to rewrite {}", path.display()))?;
        if output == html {
            info!(path = %path.display(), "unchanged");
            continue;
        }
        fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "rewrote entry document");
    }

    Ok(())
}

fn apply_overrides(config: &mut PreloadConfig, cli: &Cli) {
    if let Some(format) = cli.format {
        config.manifest_format = format;
    }
    if let Some(base) = &cli.base {
        config.base = base.clone();
    }
    if cli.no_js {
        config.include_js = false;
    }
    if cli.no_css {
        config.include_css = false;
    }
    if cli.no_static_imports {
        config.preload_static_import_for_chunks = false;
    }
    config.include.extend(cli.include.iter().cloned());
    config.exclude.extend(cli.exclude.iter().cloned());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configuration() {
        let cli = Cli::parse_from([
            "bundle-preload",
            "--no-css",
            "--base",
            "/app",
            "--format",
            "bundle",
            "--exclude",
            "**/legacy-*.js",
            "dist/index.html",
        ]);
        let mut config = PreloadConfig::default();
        apply_overrides(&mut config, &cli);

        assert!(config.include_js);
        assert!(!config.include_css);
        assert_eq!(config.base, "/app");
        assert_eq!(config.manifest_format, ManifestFormat::Bundle);
        assert_eq!(config.exclude, vec!["**/legacy-*.js".to_string()]);
        assert_eq!(cli.html, vec![PathBuf::from("dist/index.html")]);
    }
}
