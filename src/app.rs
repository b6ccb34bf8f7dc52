use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc;
use std::thread;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::{Species, SpeciesId, SpeciesRef};
use crate::error::DexError;
use crate::output::{CardView, CatalogSink, FetchFailure};
use crate::pokeapi::PokeApiClient;
use crate::stats::{self, StatSummary};

/// Outcome of one bulk catalog load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub attempted: u32,
    pub loaded: u32,
    pub failed: u32,
    pub started_at: String,
    pub finished_at: String,
}

#[derive(Clone)]
pub struct App<C: PokeApiClient> {
    catalog: Catalog,
    client: C,
    workers: usize,
}

impl<C: PokeApiClient> App<C> {
    pub fn new(client: C, workers: usize) -> Self {
        Self {
            catalog: Catalog::new(),
            client,
            workers: workers.max(1),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch dex numbers `1..=count`, each attempted exactly once, and
    /// append every success to the catalog.
    ///
    /// Fetches run on a bounded worker pool; results funnel through a
    /// channel to this thread, the only writer of the catalog. A
    /// failure for one id is reported to the sink and never suppresses
    /// the attempts for any other id. There is no retry and no overall
    /// timeout.
    pub fn load_catalog(&mut self, count: u32, sink: &dyn CatalogSink) -> LoadReport {
        let started_at = chrono::Utc::now().to_rfc3339();
        let workers = self.workers.min(count.max(1) as usize);
        tracing::info!(count, workers, "loading catalog");

        let mut loaded = 0u32;
        let mut failed = 0u32;

        let client = &self.client;
        let catalog = &mut self.catalog;
        let next = AtomicU32::new(1);
        let (tx, rx) = mpsc::channel::<(u32, Result<Species, DexError>)>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || {
                    loop {
                        let id = next.fetch_add(1, Ordering::Relaxed);
                        if id > count {
                            break;
                        }
                        let re = SpeciesRef::from(SpeciesId::new(id));
                        let outcome = client.fetch(&re);
                        if tx.send((id, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            for (id, outcome) in rx {
                match outcome {
                    Ok(species) => {
                        sink.card(&CardView::from(&species));
                        if catalog.insert(species) {
                            loaded += 1;
                        } else {
                            tracing::warn!(id, "remote returned an id already in the catalog");
                        }
                    }
                    Err(err) => {
                        tracing::warn!(id, %err, "species fetch failed");
                        sink.fetch_failed(&FetchFailure {
                            identifier: id.to_string(),
                            message: err.to_string(),
                        });
                        failed += 1;
                    }
                }
            }
        });

        let report = LoadReport {
            attempted: count,
            loaded,
            failed,
            started_at,
            finished_at: chrono::Utc::now().to_rfc3339(),
        };
        tracing::info!(loaded = report.loaded, failed = report.failed, "catalog load finished");
        report
    }

    /// Species visible under a query, in catalog order.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a Species> {
        self.catalog.filter(query)
    }

    /// Detail fetch plus stat summary for one species.
    ///
    /// Always re-fetches: a record from the bulk phase may be
    /// summary-only, so its stat list cannot be trusted to be present.
    pub fn fetch_stats(&self, re: &SpeciesRef) -> Result<(Species, StatSummary), DexError> {
        let species = self.client.fetch(re)?;
        let summary = stats::summarize(&species.stats)?;
        Ok((species, summary))
    }

    /// Selection handler: re-fetch the selected species in detail and
    /// deliver its stat summary to the sink. Every failure is recovered
    /// here into a stats-unavailable notice; the previous display state
    /// is the sink's to keep.
    pub fn select(&self, species: &Species, sink: &dyn CatalogSink) {
        self.show_stats(&SpeciesRef::from(species.id), sink);
    }

    /// True when a summary was delivered, false when the sink got a
    /// stats-unavailable notice instead.
    pub fn show_stats(&self, re: &SpeciesRef, sink: &dyn CatalogSink) -> bool {
        match self.fetch_stats(re) {
            Ok((species, summary)) => {
                sink.stats(&species.display_name(), &summary);
                true
            }
            Err(err) => {
                tracing::warn!(identifier = %re, %err, "stat summary unavailable");
                sink.stats_unavailable(re.as_str(), &err.to_string());
                false
            }
        }
    }
}
