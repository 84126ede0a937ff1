use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rustdorker::config::{self, config_locations, find_config, load_api_config, pick_credentials};
use rustdorker::output::OutputManager;
use rustdorker::session::Session;
use rustdorker::{logging, Args, DorkEngine, GoogleSearchClient, VERSION};
use std::process;
use std::sync::Arc;
use std::time::Instant;

const BANNER: &str = r#"
    ____             __  ____             __
   / __ \__  _______/ /_/ __ \____  _____/ /_____  _____
  / /_/ / / / / ___/ __/ / / / __ \/ ___/ //_/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/ /_/ / /_/ / /  / ,< /  __/ /
/_/ |_|\__,_/____/\__/_____/\____/_/  /_/|_|\___/_/

        Scoped Google Dorking & Subdomain Harvesting
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    dotenv::dotenv().ok();
    logging::init(args.verbosity, args.silent, args.no_color);

    if !args.silent {
        eprintln!("{}    v{}\n", BANNER, VERSION);
        info!("Starting RustDorker v{}", VERSION);
    }

    let domains = args.domains().context("Failed to read domain list")?;
    if domains.is_empty() {
        error!("No target domain. Use -d <domain>, -l <file>, or pipe domains to stdin");
        process::exit(1);
    }

    let run_config = args.to_config();
    config::validate_config(&run_config)?;

    let config_path = match &args.config_path {
        Some(path) => path.clone(),
        None => find_config(&config_locations())?,
    };
    let api_config = load_api_config(&config_path)?;
    info!("Configuration loaded from {}", config_path.display());

    let credentials = pick_credentials(&api_config, &mut rand::thread_rng())?;
    let session = Session::new(&run_config)?;
    let client = Arc::new(GoogleSearchClient::new(session, credentials));

    let mut engine = DorkEngine::new(&run_config, client);
    if !args.silent && atty::is(atty::Stream::Stderr) {
        engine = engine.with_progress(progress_bar(domains.len()));
    }

    let results = engine.run(&domains).await;

    if run_config.extract_subdomains {
        let output = OutputManager::new(run_config.output.clone());
        if let Err(e) = output.write_results(&results) {
            error!("Failed to output results: {}", e);
        }
    }

    if !args.silent && !args.subdomains {
        info!("Execution time: {:?}", start_time.elapsed());
    }

    Ok(())
}

fn progress_bar(domains: usize) -> ProgressBar {
    let bar = ProgressBar::new(domains as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} domains")
    {
        bar.set_style(style);
    }
    bar
}
