//! Resolve device model codes to human-readable device names.
//!
//! Batch mode reads a newline-separated list of codes and writes a CSV;
//! single mode resolves one code from the command line. Either way each
//! code goes through the same pipeline: cache, DeviceSpecifications lookup,
//! shortened-code retries, optional web-search fallback.

mod cli;
mod error;
mod pipeline;
mod report;

use crate::cli::Invocation;
use crate::error::{ErrorKind, Result};
use crate::pipeline::{Options, Session};
use devinfo_brands::BrandRegistry;
use devinfo_cache::Cache;
use devinfo_config::Config;
use devinfo_lookup::{CustomSearchClient, DeviceSource, DeviceSpecsClient};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let Some(invocation) = cli::parse() else {
        return ExitCode::SUCCESS;
    };
    match run(invocation).await {
        Ok(exit) => exit,
        Err(error) => {
            eprintln!("devinfo: {error}");
            if error.is_retryable() {
                eprintln!("devinfo: this may succeed if run again");
            }
            ExitCode::FAILURE
        },
    }
}

async fn run(invocation: Invocation) -> Result<ExitCode> {
    let config = Config::load().map_err(|error| error.raise(ErrorKind::Config))?;
    init_tracing(config.debug);
    config.validate().map_err(|error| error.raise(ErrorKind::Config))?;

    let (codes, output) = match invocation {
        Invocation::Single { code } => {
            let output = config.output.single_query_to_file.then(|| config.files.output.clone());
            (vec![code.trim().to_string()], output)
        },
        Invocation::Batch { input, output } => {
            let input = input.unwrap_or_else(|| config.files.input.clone());
            let output = output.unwrap_or_else(|| config.files.output.clone());
            println!("Input file: {}", input.display());
            println!("Output file: {}", output.display());
            let codes = report::read_codes(&input)?;
            if codes.is_empty() {
                exn::bail!(ErrorKind::NoCodes);
            }
            println!("{} codes to process!\n", codes.len());
            (codes, Some(output))
        },
    };

    // A cache that fails to load is only worth a warning; an empty one still
    // collects this run's results for the next one.
    let cache = if config.cache.read || config.cache.write {
        println!("Loading cache...");
        match Cache::load(&config.cache.file) {
            Ok(cache) => {
                println!("Cache loaded: {} items!", cache.len());
                Some(cache)
            },
            Err(error) => {
                tracing::warn!(error = ?error, "cache unavailable, starting empty");
                println!("Not able to read cache file ({}).", config.cache.file.display());
                Some(Cache::empty(&config.cache.file))
            },
        }
    } else {
        None
    };

    let primary = if config.primary.enabled {
        Some(
            DeviceSpecsClient::new(config.primary.url.as_str())
                .map_err(|error| error.raise(ErrorKind::Client))?,
        )
    } else {
        None
    };

    let secondary = if config.search.enabled {
        let brands = match &config.brands.file {
            Some(path) => {
                BrandRegistry::from_path(path).map_err(|error| error.raise(ErrorKind::Brands))?
            },
            None => BrandRegistry::embedded(),
        };
        Some(
            CustomSearchClient::new(
                config.search.url.as_str(),
                config.search.api_key.as_str(),
                config.search.engine_id.as_str(),
                Arc::new(brands),
            )
            .map_err(|error| error.raise(ErrorKind::Client))?,
        )
    } else {
        None
    };

    let options = Options {
        read_cache: config.cache.read,
        write_cache: config.cache.write,
        search_enabled: config.search.enabled,
        not_found_file: config.output.not_found_file,
        not_found_in_main: config.output.not_found_in_main,
        stats: config.output.stats,
    };
    let mut session = Session::new(
        codes,
        primary.as_ref().map(|client| client as &dyn DeviceSource),
        secondary.as_ref().map(|client| client as &dyn DeviceSource),
        cache,
        output,
        options,
    );

    // Ctrl-C stops the loop between lookups; whatever resolved so far is
    // still persisted by finalize.
    let interrupted = tokio::select! {
        _ = session.run() => false,
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted! Saving partial results...");
            true
        },
    };
    session.finalize();

    Ok(if interrupted { ExitCode::from(130) } else { ExitCode::SUCCESS })
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(
            "devinfo=debug,devinfo_brands=debug,devinfo_cache=debug,\
             devinfo_config=debug,devinfo_lookup=debug",
        )
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
