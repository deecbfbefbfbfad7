//! The per-code resolution pipeline.
//!
//! Codes flow one at a time, in input order, through a short-circuiting
//! chain: cache hit, primary lookup, primary lookup with shortened codes,
//! secondary search, not found. Every input code produces exactly one
//! [`Resolution`], "not found" included.
//!
//! The session owns all run state (results, the not-found list, the cache)
//! so that [`Session::finalize`] can persist whatever has accumulated at any
//! point - after a clean run, after an error, or after Ctrl-C cancels the
//! loop between network calls.

use crate::report;
use devinfo_cache::{Cache, CacheEntry};
use devinfo_lookup::{DeviceSource, retry_candidates};
use std::path::PathBuf;

/// The outcome for one input code. `device` and `comment` are empty rather
/// than optional because that is exactly how they land in the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: String,
    pub device: String,
    pub comment: String,
}

/// Behavior switches for a run, lifted straight from the configuration.
#[derive(Debug, Clone)]
pub struct Options {
    pub read_cache: bool,
    pub write_cache: bool,
    pub search_enabled: bool,
    pub not_found_file: bool,
    pub not_found_in_main: bool,
    pub stats: bool,
}

/// One processing run over a list of codes.
pub struct Session<'a> {
    codes: Vec<String>,
    primary: Option<&'a dyn DeviceSource>,
    secondary: Option<&'a dyn DeviceSource>,
    cache: Option<Cache>,
    output: Option<PathBuf>,
    options: Options,
    results: Vec<Resolution>,
    not_found: Vec<String>,
    cached_hits: usize,
    trimmed_hits: usize,
    search_hits: usize,
    finalized: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        codes: Vec<String>,
        primary: Option<&'a dyn DeviceSource>,
        secondary: Option<&'a dyn DeviceSource>,
        cache: Option<Cache>,
        output: Option<PathBuf>,
        options: Options,
    ) -> Self {
        Self {
            codes,
            primary,
            secondary,
            cache,
            output,
            options,
            results: Vec::new(),
            not_found: Vec::new(),
            cached_hits: 0,
            trimmed_hits: 0,
            search_hits: 0,
            finalized: false,
        }
    }

    /// Process every code in order. Cancel-safe between codes and between
    /// network calls: dropping the future loses at most the in-flight code.
    pub async fn run(&mut self) {
        let total = self.codes.len();
        for index in 0..total {
            let code = self.codes[index].trim().to_string();
            println!("({}/{}) {}", index + 1, total, code);
            let resolution = self.resolve(&code).await;
            if resolution.device.is_empty() {
                self.not_found.push(code);
            } else if self.options.write_cache
                && let Some(cache) = &mut self.cache
            {
                // First-write-wins; re-resolved codes don't disturb the cache.
                cache.upsert(CacheEntry {
                    code: resolution.code.clone(),
                    device: resolution.device.clone(),
                    comment: resolution.comment.clone(),
                });
            }
            self.results.push(resolution);
            println!();
        }
    }

    async fn resolve(&mut self, code: &str) -> Resolution {
        if self.options.read_cache
            && let Some(cache) = &self.cache
        {
            if let Some(entry) = cache.lookup(code) {
                println!("Cached: {}", entry.device);
                self.cached_hits += 1;
                return Resolution {
                    code: code.to_string(),
                    device: entry.device.clone(),
                    comment: "Cached".to_string(),
                };
            }
            println!("Not in cache!");
        }

        if let Some(primary) = self.primary {
            if let Some(device) = self.try_source(primary, code).await {
                return Resolution {
                    code: code.to_string(),
                    device,
                    comment: format!("Found via {}", primary.name()),
                };
            }
            for candidate in retry_candidates(code) {
                if let Some(device) = self.try_source(primary, &candidate).await {
                    self.trimmed_hits += 1;
                    return Resolution {
                        code: code.to_string(),
                        device,
                        comment: format!("Found via {} (trimmed '{}')", primary.name(), candidate),
                    };
                }
            }
        }

        if let Some(secondary) = self.secondary
            && let Some(device) = self.try_source(secondary, code).await
        {
            self.search_hits += 1;
            return Resolution {
                code: code.to_string(),
                device,
                comment: format!("Found via {}", secondary.name()),
            };
        }

        println!("Not found!");
        Resolution { code: code.to_string(), device: String::new(), comment: "Not found!".to_string() }
    }

    /// Ask one source about one code. Transport failures flow like "not
    /// found" so the pipeline moves on to the next fallback stage, but are
    /// logged distinctly for diagnosability.
    async fn try_source(&self, source: &dyn DeviceSource, code: &str) -> Option<String> {
        println!("Retrieving '{}' via {}...", code, source.name());
        match source.resolve(code).await {
            Ok(Some(device)) => {
                println!("Found: {device}");
                Some(device)
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(
                    source = source.name(),
                    code,
                    error = ?error,
                    retryable = error.is_retryable(),
                    "lookup transport error"
                );
                None
            },
        }
    }

    /// Persist the run: summary, cache, result CSV, not-found list. Runs at
    /// most once no matter how the run ended; a failed output write must not
    /// stop the remaining channels (results are echoed to the console as a
    /// last resort).
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;

        if self.options.stats {
            let stats = self.stats_row();
            println!("{}\n", "-".repeat(50));
            println!("{}\n{}\n{}\n", stats.code, stats.device, stats.comment);
        }

        if self.options.write_cache
            && let Some(cache) = &self.cache
        {
            if cache.added() > 0 {
                match cache.flush() {
                    Ok(()) => println!("Cached {} new result(s)!", cache.added()),
                    Err(error) => {
                        tracing::warn!(error = ?error, "cache flush failed");
                        eprintln!("Not able to write cache file ({}).", cache.path().display());
                    },
                }
            } else {
                println!("Cache: no new devices found to store.");
            }
        }

        let Some(output) = self.output.clone() else {
            return;
        };

        let mut rows: Vec<Resolution> = self
            .results
            .iter()
            .filter(|row| self.options.not_found_in_main || !row.device.is_empty())
            .cloned()
            .collect();
        if self.options.stats {
            rows.push(self.stats_row());
        }
        if !self.results.is_empty() {
            match report::write_csv(&output, &rows) {
                Ok(()) => println!("Results written to {}", output.display()),
                Err(error) => {
                    tracing::warn!(error = ?error, "result write failed");
                    eprintln!("Not able to write results to {}; dumping here:", output.display());
                    for row in &rows {
                        eprintln!("{}, {}, {}", row.code, row.device, row.comment);
                    }
                },
            }
        }
        if self.options.not_found_file && !self.not_found.is_empty() {
            let path = report::not_found_path(&output);
            match report::write_lines(&path, &self.not_found) {
                Ok(()) => println!("Not found codes written to {}", path.display()),
                Err(error) => {
                    tracing::warn!(error = ?error, "not-found write failed");
                    eprintln!("Not able to write not-found codes to {}.", path.display());
                },
            }
        }
    }

    fn stats_row(&self) -> Resolution {
        let search_note = if self.options.search_enabled { "" } else { " (Not enabled)" };
        Resolution {
            code: format!("Total: {}   Processed: {}", self.codes.len(), self.results.len()),
            device: format!("Found with Custom Search: {}{}", self.search_hits, search_note),
            comment: format!(
                "Already cached: {}   Not found: {}",
                self.cached_hits,
                self.not_found.len()
            ),
        }
    }

    pub fn results(&self) -> &[Resolution] {
        &self.results
    }

    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }
}
