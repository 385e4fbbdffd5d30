// Reference data loader
// Appends a catalog to the FAQ table, then rebuilds the search projection from it


use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::LoaderConfig;
use crate::database::sqlite::models::FaqSummary;
use crate::database::sqlite::{Database, FaqQueries, SearchIndexQueries};
use crate::{LoaderError, Result};

/// A single record that the store refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRejection {
    /// Position of the record within its catalog
    pub index: usize,
    pub question_preview: String,
    pub reason: String,
}

/// Outcome of inserting one catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub catalog: String,
    pub attempted: usize,
    pub inserted_ids: Vec<i64>,
    pub rejections: Vec<RecordRejection>,
}

impl LoadReport {
    #[inline]
    pub fn inserted(&self) -> usize {
        self.inserted_ids.len()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Everything a load run produced: inserts, projection size, final counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub load: LoadReport,
    pub indexed: u64,
    pub summary: FaqSummary,
}

pub struct Loader<'a> {
    database: &'a Database,
    config: LoaderConfig,
}

impl<'a> Loader<'a> {
    #[inline]
    pub fn new(database: &'a Database, config: LoaderConfig) -> Self {
        Self { database, config }
    }

    /// Insert every record of `catalog`, continuing past rejected ones
    ///
    /// All inserts share one transaction that is committed at the end. A
    /// rejected record only rolls back its own statement. Failing to open or
    /// commit the transaction is a store failure.
    #[inline]
    pub async fn load_all(&self, catalog: &Catalog) -> Result<LoadReport> {
        info!(
            "Loading {} FAQ records from catalog '{}'",
            catalog.len(),
            catalog.name
        );

        let mut report = LoadReport {
            catalog: catalog.name.clone(),
            attempted: catalog.len(),
            inserted_ids: Vec::with_capacity(catalog.len()),
            rejections: Vec::new(),
        };

        let bar = progress_bar(catalog.len() as u64);

        let mut tx = self.database.pool().begin().await.map_err(|e| {
            LoaderError::StoreUnavailable(format!("Failed to begin load transaction: {e}"))
        })?;

        for (index, record) in catalog.records.iter().enumerate() {
            let preview = record.question_preview(self.config.preview_chars);
            bar.set_message(preview.clone());

            let faq = record.resolve(&catalog.default_source_origin);
            match FaqQueries::create(&mut *tx, &faq).await {
                Ok(id) => {
                    debug!("Inserted FAQ {} as id {}", index, id);
                    report.inserted_ids.push(id);
                }
                Err(e) => {
                    let rejection = RecordRejection {
                        index,
                        question_preview: preview,
                        reason: format!("{e:#}"),
                    };
                    warn!("{}", LoaderError::from(rejection.clone()));
                    report.rejections.push(rejection);
                }
            }

            bar.inc(1);
        }

        tx.commit().await.map_err(|e| {
            LoaderError::StoreUnavailable(format!("Failed to commit load transaction: {e}"))
        })?;
        bar.finish_and_clear();

        info!(
            "Inserted {} of {} FAQ records from '{}'",
            report.inserted(),
            report.attempted,
            report.catalog
        );

        Ok(report)
    }

    /// Replace the search projection with a fresh copy of the FAQ table
    #[inline]
    pub async fn rebuild_search_index(&self) -> Result<u64> {
        let rows = SearchIndexQueries::rebuild(self.database.pool())
            .await
            .map_err(|e| LoaderError::store_unavailable(&e))?;

        info!("Search index rebuilt with {} entries", rows);
        Ok(rows)
    }

    /// Current totals, overall and per category and origin
    #[inline]
    pub async fn report_summary(&self) -> Result<FaqSummary> {
        FaqQueries::summary(self.database.pool())
            .await
            .map_err(|e| LoaderError::store_unavailable(&e))
    }

    /// Load a catalog, rebuild the projection, and collect the summary
    #[inline]
    pub async fn run(&self, catalog: &Catalog) -> Result<RunReport> {
        let load = self.load_all(catalog).await?;
        let indexed = self.rebuild_search_index().await?;
        let summary = self.report_summary().await?;

        Ok(RunReport {
            load,
            indexed,
            summary,
        })
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    if console::user_attended_stderr() {
        ProgressBar::new(len).with_style(
            ProgressStyle::with_template("{bar:30} [{pos}/{len}] {wide_msg}")
                .expect("style template is valid"),
        )
    } else {
        ProgressBar::hidden()
    }
}
