use clap::{Parser, Subcommand};
use sitepub::config::{self, ConfigOverrides};
use sitepub::output;
use sitepub::publish::Publisher;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitepub")]
#[command(about = "Publish a local static website")]
#[command(long_about = "\
Publish a local static website

Copies every .html and .css file from the source directory to the same
relative path under the output directory, creating directories as needed
and overwriting existing files. Other files are ignored.

Local links of the form

  <a href=\"file:///any/path/website/about/index.html\">

are rewritten to the public site:

  <a href=\"https://www.chriskimmel.com/about/index.html\">

Settings live in an optional config.toml at the source root.
Run 'sitepub gen-config' to print a documented one.

With no subcommand, sitepub runs 'publish'.")]
#[command(version)]
struct Cli {
    /// Website source directory
    #[arg(long, default_value = "website", global = true)]
    source: PathBuf,

    /// Output directory (mirrors the source layout)
    #[arg(long, default_value = "publish", global = true)]
    output: PathBuf,

    /// Public base URL, overriding `site_url` from config.toml
    #[arg(long, global = true)]
    site_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Copy publishable files and rewrite local links (default)
    Publish,
    /// List the files that would be published, without writing anything
    Check,
    /// Print the manifest as JSON
    Scan,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.as_ref().unwrap_or(&Command::Publish) {
        Command::Publish => {
            let publisher = load_publisher(cli)?;
            println!(
                "==> Publishing {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = publisher.run()?;
            output::print_publish_output(&report, &cli.output);
        }
        Command::Check => {
            let publisher = load_publisher(cli)?;
            println!("==> Checking {}", cli.source.display());
            output::print_scan_output(&publisher.manifest(), &cli.source);
        }
        Command::Scan => {
            let manifest = load_publisher(cli)?.manifest();
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve config for the source root (file + CLI overrides) and build the publisher.
fn load_publisher(cli: &Cli) -> Result<Publisher, Box<dyn std::error::Error>> {
    let overrides = ConfigOverrides {
        site_url: cli.site_url.clone(),
    };
    let site_config = config::load_config(&cli.source, &overrides)?;
    Ok(Publisher::new(&cli.source, &cli.output, &site_config)?)
}
