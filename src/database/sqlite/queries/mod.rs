
use super::models::*;
use anyhow::{Context, Result};
use itertools::Itertools;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

pub struct FaqQueries;

impl FaqQueries {
    /// Insert one record and return its generated id
    ///
    /// Generic over the executor so a whole batch can share one transaction.
    #[inline]
    pub async fn create<'e, E>(executor: E, faq: &NewFaq) -> Result<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id = sqlx::query(
            r#"
            INSERT INTO faqs (
                question, keywords, answer, sources, tags,
                category, difficulty, code_example, related_classes,
                related_errors, source_origin
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&faq.question)
        .bind(&faq.keywords)
        .bind(&faq.answer)
        .bind(&faq.sources)
        .bind(&faq.tags)
        .bind(&faq.category)
        .bind(faq.difficulty)
        .bind(&faq.code_example)
        .bind(&faq.related_classes)
        .bind(&faq.related_errors)
        .bind(&faq.source_origin)
        .execute(executor)
        .await
        .context("Failed to insert FAQ")?
        .last_insert_rowid();

        Ok(id)
    }

    #[inline]
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Faq>> {
        let result = sqlx::query_as::<_, Faq>(
            r#"
            SELECT id, question, keywords, answer, sources, tags,
                   category, difficulty, code_example, related_classes,
                   related_errors, source_origin, created_date
            FROM faqs WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get FAQ by id")?;

        Ok(result)
    }

    #[inline]
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Faq>> {
        let faqs = sqlx::query_as::<_, Faq>(
            r#"
            SELECT id, question, keywords, answer, sources, tags,
                   category, difficulty, code_example, related_classes,
                   related_errors, source_origin, created_date
            FROM faqs ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list FAQs")?;

        Ok(faqs)
    }

    #[inline]
    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faqs")
            .fetch_one(pool)
            .await
            .context("Failed to count FAQs")?;

        Ok(count)
    }

    #[inline]
    pub async fn count_by_category(pool: &SqlitePool) -> Result<Vec<GroupCount>> {
        let groups = sqlx::query_as::<_, GroupCount>(
            r#"
            SELECT category AS label, COUNT(*) AS count
            FROM faqs
            GROUP BY category
            ORDER BY count DESC, label ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to count FAQs by category")?;

        Ok(groups)
    }

    #[inline]
    pub async fn count_by_source_origin(pool: &SqlitePool) -> Result<Vec<GroupCount>> {
        let groups = sqlx::query_as::<_, GroupCount>(
            r#"
            SELECT source_origin AS label, COUNT(*) AS count
            FROM faqs
            GROUP BY source_origin
            ORDER BY count DESC, label ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to count FAQs by source origin")?;

        Ok(groups)
    }

    #[inline]
    pub async fn summary(pool: &SqlitePool) -> Result<FaqSummary> {
        let total = Self::count(pool).await?;
        let by_category = Self::count_by_category(pool).await?;
        let by_source_origin = Self::count_by_source_origin(pool).await?;

        Ok(FaqSummary {
            total,
            by_category,
            by_source_origin,
        })
    }

    /// Full-text search over the projection, best matches first
    #[inline]
    pub async fn search(pool: &SqlitePool, query: &str, limit: i64) -> Result<Vec<SearchHit>> {
        let Some(expression) = build_match_expression(query) else {
            return Ok(Vec::new());
        };
        debug!("FTS expression: {}", expression);

        let hits = sqlx::query_as::<_, SearchHit>(
            r#"
            SELECT f.id AS faq_id,
                   f.question,
                   f.answer,
                   f.category,
                   bm25(faq_search) AS score
            FROM faq_search
            JOIN faqs f ON f.id = faq_search.faq_id
            WHERE faq_search MATCH ?
            ORDER BY score
            LIMIT ?
            "#,
        )
        .bind(expression)
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("Failed to search FAQs")?;

        Ok(hits)
    }
}

pub struct SearchIndexQueries;

impl SearchIndexQueries {
    /// Drop every projection row and copy the searchable columns of every FAQ
    /// back in, inside a single transaction
    #[inline]
    pub async fn rebuild(pool: &SqlitePool) -> Result<u64> {
        let mut tx = pool
            .begin()
            .await
            .context("Failed to begin search index transaction")?;

        sqlx::query("DELETE FROM faq_search")
            .execute(&mut *tx)
            .await
            .context("Failed to clear search index")?;

        sqlx::query(
            r#"
            INSERT INTO faq_search (faq_id, question, answer, keywords, tags)
            SELECT id, question, answer, keywords, tags FROM faqs ORDER BY id
            "#,
        )
        .execute(&mut *tx)
        .await
        .context("Failed to populate search index")?;

        let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faq_search")
            .fetch_one(&mut *tx)
            .await
            .context("Failed to count search index rows")?;

        tx.commit()
            .await
            .context("Failed to commit search index rebuild")?;

        Ok(u64::try_from(rows).unwrap_or_default())
    }

    #[inline]
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<SearchEntry>> {
        let entries = sqlx::query_as::<_, SearchEntry>(
            r#"
            SELECT CAST(faq_id AS INTEGER) AS faq_id, question, answer, keywords, tags
            FROM faq_search
            ORDER BY faq_id
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list search index entries")?;

        Ok(entries)
    }

    #[inline]
    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faq_search")
            .fetch_one(pool)
            .await
            .context("Failed to count search index rows")?;

        Ok(count)
    }
}

/// Turn free text into an FTS5 expression: every whitespace-separated token
/// becomes a quoted phrase and all of them must match
pub fn build_match_expression(query: &str) -> Option<String> {
    let expression = query
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
        .join(" ");

    (!expression.is_empty()).then_some(expression)
}
