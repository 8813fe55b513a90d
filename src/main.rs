use brewhash::config::Config;
use brewhash::core::BrewResult;
use brewhash::report;
use brewhash::resolver::PackageResolver;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brewhash")]
#[command(about = "Look up a Homebrew formula and checksum the binary in its bottles")]
#[command(version)]
struct Cli {
    /// Formula identifier, e.g. `wget` or `python@3.9`
    package: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Bottle platform tag to hash (repeatable; overrides the config file)
    #[arg(short, long = "platform", value_name = "TAG")]
    platforms: Vec<String>,
}

async fn run(cli: Cli) -> BrewResult<()> {
    let mut config = Config::load()?;
    if !cli.platforms.is_empty() {
        config.platforms = cli.platforms;
    }

    let resolver = PackageResolver::new(&config)?;
    let result = resolver.resolve(&cli.package).await?;

    if cli.json {
        println!("{}", report::render_json(&result)?);
    } else {
        print!("{}", report::render_text(&result));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout only carries the result. Degraded bottles
    // are reported at WARN, so that is the floor when RUST_LOG is unset.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let package = cli.package.clone();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(package = %package, error = %e, "error fetching package");
            ExitCode::FAILURE
        }
    }
}
