use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;

use crate::cli::{Cli, Commands};
use handle_hunter::aggregate::normalize;
use handle_hunter::catalog::Catalog;
use handle_hunter::config::ProbeConfig;
use handle_hunter::output::{console, write_reports};
use handle_hunter::probe::{HttpProber, ProgressProbe};
use handle_hunter::search::probe_all;
use handle_hunter::utils::validate_username;

fn init_logging(cli: &Cli) {
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    // Keep reqwest/hyper quiet even in debug mode
    let filter_str = format!("handle_hunter={crate},reqwest=info,hyper=info", crate = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    match cli.command {
        Commands::Sites { catalog } => list_sites(Path::new(&catalog)),
        Commands::Search { username, catalog, out, concurrency, timeout, user_agent, only_found, no_report, no_progress } => {
            let config = ProbeConfig::default()
                .with_concurrency(concurrency)
                .with_timeout(Duration::from_secs(timeout))
                .with_user_agent(user_agent);
            let report_dir = if no_report { None } else { Some(PathBuf::from(out)) };
            run_search(username, Path::new(&catalog), config, report_dir, only_found, !no_progress).await
        }
    }
}

fn prompt_username() -> anyhow::Result<String> {
    print!("\x1b[1;93mEnter the username to search for: \x1b[0m");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).context("failed to read username")?;
    Ok(line)
}

async fn run_search(
    username: Option<String>,
    catalog_path: &Path,
    config: ProbeConfig,
    report_dir: Option<PathBuf>,
    only_found: bool,
    progress: bool,
) -> anyhow::Result<()> {
    console::print_ascii_logo();

    let catalog = Catalog::load(catalog_path)?;
    let raw = match username {
        Some(u) => u,
        None => prompt_username()?,
    };
    let username = validate_username(&raw)?;

    tracing::info!(username = %username, sites = catalog.len(), concurrency = config.concurrency(), timeout_ms = config.timeout_ms, "Starting search");
    println!("[>] Username: {}", username);
    println!("[~] Sites: {} (concurrency: {})", catalog.len(), config.concurrency());

    let http = HttpProber::new(&config)?;
    let prober = Arc::new(if progress {
        ProgressProbe::new(http, catalog.len() as u64)
    } else {
        ProgressProbe::hidden(http)
    });

    let start = Instant::now();
    let batch = probe_all(prober.clone(), &catalog, username, config.concurrency()).await;
    prober.finish();
    let results = normalize(batch);

    console::print_results(&results, only_found);
    console::print_summary(&results, start.elapsed().as_secs_f64());

    if let Some(dir) = report_dir {
        let paths = write_reports(&dir, username, &results)?;
        println!("\n[+] Report: {}", paths.html.display());
        println!("[+] CSV:    {}", paths.csv.display());
        println!("[+] JSONL:  {}", paths.jsonl.display());
    }
    Ok(())
}

fn list_sites(catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    for svc in catalog.iter() {
        println!("{:<30} {:<12} {}", svc.name, svc.strategy.name(), svc.url_template);
    }
    println!("\n{} sites", catalog.len());
    Ok(())
}
