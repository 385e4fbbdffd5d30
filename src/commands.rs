use console::style;
use std::fs;
use tracing::info;

use crate::catalog::{BuiltinCatalog, Catalog};
use crate::config::Config;
use crate::database::sqlite::models::{FaqSummary, UNCATEGORIZED};
use crate::database::sqlite::Database;
use crate::loader::{LoadReport, Loader};
use crate::{LoaderError, Result};

/// Which built-in catalogs a `load` invocation covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalogSelection {
    CodeStudy,
    #[value(name = "studies-5-8")]
    Studies5To8,
    EiffelOrg,
    All,
}

impl CatalogSelection {
    #[inline]
    pub fn catalogs(self) -> Vec<BuiltinCatalog> {
        match self {
            CatalogSelection::CodeStudy => vec![BuiltinCatalog::CodeStudy],
            CatalogSelection::Studies5To8 => vec![BuiltinCatalog::Studies5To8],
            CatalogSelection::EiffelOrg => vec![BuiltinCatalog::EiffelOrg],
            CatalogSelection::All => BuiltinCatalog::ALL.to_vec(),
        }
    }
}

/// Open the configured knowledge base
///
/// The default location lives in the config directory, which is created on
/// first use. An explicit database path must point into an existing directory.
#[inline]
pub async fn open_database(config: &Config) -> Result<Database> {
    if config.database.path.is_none() {
        let config_dir = config.get_base_dir();
        fs::create_dir_all(config_dir).map_err(|e| {
            LoaderError::StoreUnavailable(format!(
                "Failed to create config directory {}: {e}",
                config_dir.display()
            ))
        })?;
    }

    let db_path = config.database_path();
    info!("Opening knowledge base at {}", db_path.display());
    Database::open(&db_path).await
}

/// Load the selected catalogs, rebuild the search index, and print the summary
///
/// Rejected records are reported but never change the outcome; only a store
/// failure does.
#[inline]
pub async fn load_catalogs(config: &Config, selection: CatalogSelection) -> Result<Vec<LoadReport>> {
    let catalogs = selection
        .catalogs()
        .into_iter()
        .map(BuiltinCatalog::load)
        .collect::<Result<Vec<Catalog>>>()?;

    let database = open_database(config).await?;
    let loader = Loader::new(&database, config.loader);

    let mut reports = Vec::with_capacity(catalogs.len());
    for catalog in &catalogs {
        let report = loader.load_all(catalog).await?;
        print_load_report(&report);
        reports.push(report);
    }

    let indexed = loader.rebuild_search_index().await?;
    println!("Search index rebuilt: {} entries", indexed);

    let summary = loader.report_summary().await?;
    print_summary(&summary);

    database.close().await;
    Ok(reports)
}

/// Rebuild the search projection without loading anything
#[inline]
pub async fn rebuild_index(config: &Config) -> Result<u64> {
    let database = open_database(config).await?;
    let indexed = Loader::new(&database, config.loader)
        .rebuild_search_index()
        .await?;

    println!(
        "{}",
        style(format!("✓ Search index rebuilt: {} entries", indexed)).green()
    );

    database.close().await;
    Ok(indexed)
}

/// Print the current totals of the knowledge base, as text or JSON
#[inline]
pub async fn show_status(config: &Config, json: bool) -> Result<FaqSummary> {
    let database = open_database(config).await?;
    let summary = Loader::new(&database, config.loader)
        .report_summary()
        .await?;

    if json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| LoaderError::Other(e.into()))?;
        println!("{}", rendered);
    } else {
        print_summary(&summary);
    }

    database.close().await;
    Ok(summary)
}

/// Query the search projection and print the best matches
#[inline]
pub async fn search_faqs(config: &Config, query: &str, limit: i64) -> Result<usize> {
    let database = open_database(config).await?;
    let hits = database
        .search(query, limit)
        .await
        .map_err(|e| LoaderError::store_unavailable(&e))?;

    if hits.is_empty() {
        println!("No FAQs match '{}'.", query);
        println!("If the knowledge base was just modified, run 'faq-loader rebuild-index'.");
    } else {
        println!("{}", style(format!("Results for '{}':", query)).bold());
        for hit in &hits {
            let category = if hit.category.is_empty() {
                UNCATEGORIZED
            } else {
                hit.category.as_str()
            };
            println!();
            println!(
                "{} {} [{}]",
                style(format!("#{}", hit.faq_id)).cyan(),
                style(&hit.question).bold(),
                category
            );
            let first_line = hit.answer.lines().next().unwrap_or_default();
            println!("   {}", first_line.chars().take(100).collect::<String>());
        }
    }

    database.close().await;
    Ok(hits.len())
}

/// List the catalogs compiled into the binary
#[inline]
pub fn list_catalogs() -> Result<()> {
    println!("{}", style("Built-in catalogs").bold().cyan());
    for catalog in Catalog::builtin_all()? {
        println!(
            "  {:<12} {:>3} records  (origin: {})",
            catalog.name,
            catalog.len(),
            catalog.default_source_origin
        );
        if !catalog.description.is_empty() {
            println!("  {:<12} {}", "", style(&catalog.description).dim());
        }
    }
    Ok(())
}

/// Print the effective configuration, or write it out when `show` is false
#[inline]
pub fn show_config(config: &Config, show: bool) -> Result<()> {
    if !show {
        config.save()?;
        println!(
            "{}",
            style(format!(
                "✓ Configuration written to {}",
                config.config_file_path().display()
            ))
            .green()
        );
    }

    println!("{}", style("📋 Current Configuration").bold().cyan());
    println!();
    println!("Config file:    {}", config.config_file_path().display());
    println!("Database:       {}", config.database_path().display());
    println!("Preview width:  {} chars", config.loader.preview_chars);
    Ok(())
}

fn print_load_report(report: &LoadReport) {
    for rejection in &report.rejections {
        println!(
            "{}",
            style(format!(
                "Error inserting FAQ: {}... - {}",
                rejection.question_preview, rejection.reason
            ))
            .red()
        );
    }

    println!(
        "Inserted {} of {} FAQ pairs from '{}'",
        report.inserted(),
        report.attempted,
        report.catalog
    );
}

fn print_summary(summary: &FaqSummary) {
    println!("Total FAQs: {}", style(summary.total).bold());

    println!();
    println!("By category:");
    for group in &summary.by_category {
        println!("  {}: {}", group.display_label(), group.count);
    }

    println!();
    println!("By source:");
    for group in &summary.by_source_origin {
        println!("  {}: {}", group.display_label(), group.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            base_dir: temp_dir.path().join(".faq-loader"),
            ..Config::default()
        }
    }

    #[test]
    fn selection_expands_to_catalogs() {
        assert_eq!(
            CatalogSelection::EiffelOrg.catalogs(),
            vec![BuiltinCatalog::EiffelOrg]
        );
        assert_eq!(CatalogSelection::All.catalogs().len(), 3);
    }

    #[tokio::test]
    async fn load_then_status_and_search() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = test_config(&temp_dir);

        let reports = load_catalogs(&config, CatalogSelection::Studies5To8)
            .await
            .expect("load succeeds");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].inserted(), 25);
        assert!(config.database_path().exists());

        let summary = show_status(&config, false).await.expect("status succeeds");
        assert_eq!(summary.total, 25);

        let hits = search_faqs(&config, "SCOOP", 3).await.expect("search succeeds");
        assert!(hits > 0);
        assert!(hits <= 3);

        let indexed = rebuild_index(&config).await.expect("rebuild succeeds");
        assert_eq!(indexed, 25);
    }

    #[tokio::test]
    async fn load_twice_appends() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = test_config(&temp_dir);

        load_catalogs(&config, CatalogSelection::EiffelOrg)
            .await
            .expect("first load succeeds");
        load_catalogs(&config, CatalogSelection::EiffelOrg)
            .await
            .expect("second load succeeds");

        let summary = show_status(&config, true).await.expect("status succeeds");
        assert_eq!(summary.total, 24);
        assert_eq!(summary.source_origin_count("eiffel.org"), 24);
    }

    #[tokio::test]
    async fn missing_database_directory_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config {
            database: DatabaseConfig {
                path: Some(PathBuf::from("missing/dir/kb.db")),
            },
            ..test_config(&temp_dir)
        };

        let result = load_catalogs(&config, CatalogSelection::CodeStudy).await;
        assert!(matches!(result, Err(LoaderError::StoreUnavailable(_))));
    }

    #[test]
    fn show_config_writes_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = test_config(&temp_dir);

        show_config(&config, true).expect("show succeeds");
        assert!(!config.config_file_path().exists());

        show_config(&config, false).expect("write succeeds");
        assert!(config.config_file_path().exists());
    }
}
