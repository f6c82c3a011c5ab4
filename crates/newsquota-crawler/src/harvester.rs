use std::mem;

use newsquota_store::{CsvStore, Dataset, Record};

use crate::checkpoint::Checkpointer;
use crate::config::ScrapeConfig;
use crate::extract::{fetch_and_extract, PageOutcome};
use crate::fetch::PageFetcher;
use crate::filter::{screen, NormalizedSet, Verdict};
use crate::normalize::normalize;
use crate::policy::{Flow, PageEvent, StopReason, StoppingPolicy};
use crate::quota::{compute_need, NeedMap};
use crate::source::Source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub label: String,
    /// Pages fetched with at least one extracted item
    pub pages_visited: usize,
    pub added: usize,
    pub stop: StopReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelReport {
    pub label: String,
    pub need: usize,
    pub added: usize,
    pub sources: Vec<SourceReport>,
}

impl LabelReport {
    pub fn missing(&self) -> usize {
        self.need.saturating_sub(self.added)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub labels: Vec<LabelReport>,
    /// Rows dropped by the final de-duplication pass
    pub duplicates_removed: usize,
    pub unmet: NeedMap,
}

/// Grows a dataset toward the per-label target, one label, one source and one
/// page at a time.
///
/// The harvester owns the dataset and the set of normalized texts it already
/// holds; every row it admits is checkpointed to the output store.
pub struct Harvester<F> {
    config: ScrapeConfig,
    sources: Vec<Source>,
    fetcher: F,
    checkpointer: Checkpointer,
    dataset: Dataset,
    seen: NormalizedSet,
}

impl<F> Harvester<F>
where
    F: PageFetcher,
{
    pub fn new(
        config: ScrapeConfig,
        sources: Vec<Source>,
        fetcher: F,
        dataset: Dataset,
        store: CsvStore,
    ) -> Self {
        let seen = dataset.records().iter().map(|r| r.text.as_str()).collect();
        let checkpointer = Checkpointer::new(store, config.checkpoint_every);
        Self {
            config,
            sources,
            fetcher,
            checkpointer,
            dataset,
            seen,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn seen(&self) -> &NormalizedSet {
        &self.seen
    }

    pub fn checkpoints(&self) -> usize {
        self.checkpointer.saves()
    }

    pub fn need(&self, labels: &[String]) -> NeedMap {
        compute_need(&self.dataset, self.config.target_per_label, labels)
    }

    pub async fn run(&mut self, labels: &[String]) -> anyhow::Result<RunReport> {
        let mut reports = vec![];

        for label in labels {
            let need = self.need(std::slice::from_ref(label)).get(label);
            if need == 0 {
                log::info!(
                    "'{label}' already has {} rows (target {})",
                    self.dataset.count(label),
                    self.config.target_per_label
                );
                continue;
            }
            reports.push(self.collect_label(label, need).await?);
        }

        let duplicates_removed = self.dataset.dedup_by_text_key(normalize);
        if duplicates_removed > 0 {
            log::warn!("Removed {duplicates_removed} duplicate rows in final pass");
        }
        let rows = self.checkpointer.persist(&self.dataset, &[])?;
        log::info!(
            "Saved {} ({rows} rows)",
            self.checkpointer.store().path().display()
        );

        Ok(RunReport {
            labels: reports,
            duplicates_removed,
            unmet: self.need(labels),
        })
    }

    async fn collect_label(&mut self, label: &str, need: usize) -> anyhow::Result<LabelReport> {
        let sources = self
            .sources
            .iter()
            .filter(|s| s.label == label)
            .cloned()
            .collect::<Vec<_>>();

        let mut report = LabelReport {
            label: label.to_string(),
            need,
            added: 0,
            sources: vec![],
        };

        if sources.is_empty() {
            log::warn!("No sources defined for label '{label}'");
            return Ok(report);
        }

        log::info!("=== Collecting '{label}' (need {need}) ===");

        let mut pending = vec![];
        for (i, source) in sources.iter().enumerate() {
            let remaining = need - pending.len();
            if remaining == 0 {
                break;
            }

            let source_report = self.collect_from_source(source, remaining, &mut pending).await?;
            // the label commit below covers the last source crawled
            let more = i + 1 < sources.len() && pending.len() < need;
            if source_report.added > 0 && more {
                self.checkpointer.persist(&self.dataset, &pending)?;
            }
            report.sources.push(source_report);
        }

        report.added = pending.len();
        if !pending.is_empty() {
            let dataset = mem::take(&mut self.dataset);
            self.dataset = self.checkpointer.commit(dataset, pending)?;
            log::info!(
                "Checkpoint after '{label}' saved: {}",
                self.checkpointer.store().path().display()
            );
        }

        if report.missing() > 0 {
            log::warn!(
                "Label '{label}' still missing {}. Add more sources or increase maxPages/selectors.",
                report.missing()
            );
        }

        Ok(report)
    }

    /// Crawls `source` until `need` rows are admitted or the source is exhausted.
    /// Admitted rows are appended to `pending`.
    async fn collect_from_source(
        &mut self,
        source: &Source,
        need: usize,
        pending: &mut Vec<Record>,
    ) -> anyhow::Result<SourceReport> {
        let tag = format!("[{} - {}]", source.name, source.label);
        let mut policy = StoppingPolicy::new(self.config.stop_after_zero_streak);
        let mut pages = source.pages();
        let mut pages_visited = 0;
        let mut added = 0;

        let stop = loop {
            if added >= need {
                break policy.stop(StopReason::NeedMet);
            }
            let Some(page) = pages.next() else {
                break policy.stop(StopReason::PageLimit);
            };

            let url = source.page_url(page);
            let outcome = fetch_and_extract(
                &self.fetcher,
                &url,
                &source.selector,
                self.config.min_title_len,
            )
            .await;

            let event = match outcome {
                PageOutcome::TransportFailure(e) => {
                    log::warn!("{tag} Page {page}: request error ({e}) -> continue");
                    PageEvent::TransportFailure
                }
                PageOutcome::NonSuccess(status) => {
                    log::info!("{tag} Page {page}: HTTP {status} -> STOP ({url})");
                    PageEvent::NonSuccess(status)
                }
                PageOutcome::Extracted(items) if items.is_empty() => {
                    log::info!("{tag} Page {page}: 0 items -> STOP ({url})");
                    PageEvent::Empty
                }
                PageOutcome::Extracted(items) => {
                    pages_visited += 1;
                    let mut admitted = 0;
                    let mut off_topic = 0;
                    for item in items {
                        if added >= need {
                            break;
                        }
                        match screen(&item, &mut self.seen, source) {
                            Verdict::Admitted => (),
                            Verdict::OffTopic => {
                                off_topic += 1;
                                continue;
                            }
                            Verdict::Duplicate => continue,
                        }

                        pending.push(Record::new(
                            item.title,
                            &source.label,
                            &source.name,
                            item.link,
                        ));
                        admitted += 1;
                        added += 1;

                        if self.checkpointer.record_admitted() {
                            let rows = self.checkpointer.persist(&self.dataset, pending)?;
                            log::info!(
                                ">> CHECKPOINT SAVED: {} (rows={rows})",
                                self.checkpointer.store().path().display()
                            );
                        }
                    }
                    log::info!(
                        "{tag} Page {page}: +{admitted} (total +{added}/{need}, {off_topic} off-topic)"
                    );
                    PageEvent::Processed { admitted }
                }
            };

            if let Flow::Stop(reason) = policy.observe(event) {
                if let StopReason::ZeroYieldStreak(_) = reason {
                    log::info!("{tag} {reason} -> STOP");
                }
                break reason;
            }

            if matches!(event, PageEvent::Processed { .. }) && added < need {
                tokio::time::sleep(self.config.politeness_delay()).await;
            }
        };

        log::info!("{tag} done: +{added} in {pages_visited} pages ({stop})");

        Ok(SourceReport {
            name: source.name.clone(),
            label: source.label.clone(),
            pages_visited,
            added,
            stop,
        })
    }
}
