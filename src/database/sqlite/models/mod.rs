
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_DIFFICULTY: i64 = 1;
pub const UNCATEGORIZED: &str = "uncategorized";

/// A knowledge-base entry as written in a catalog
///
/// Only `question` and `answer` are required. Everything else is filled in by
/// [`FaqRecord::resolve`] before the record reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub sources: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<i64>,
    #[serde(default)]
    pub code_example: Option<String>,
    #[serde(default)]
    pub related_classes: Option<String>,
    #[serde(default)]
    pub related_errors: Option<String>,
    #[serde(default)]
    pub source_origin: Option<String>,
}

/// Fully defaulted record, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub keywords: String,
    pub answer: String,
    pub sources: String,
    pub tags: String,
    pub category: String,
    pub difficulty: i64,
    pub code_example: String,
    pub related_classes: String,
    pub related_errors: String,
    pub source_origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub keywords: String,
    pub answer: String,
    pub sources: String,
    pub tags: String,
    pub category: String,
    pub difficulty: i64,
    pub code_example: String,
    pub related_classes: String,
    pub related_errors: String,
    pub source_origin: String,
    pub created_date: NaiveDateTime,
}

/// One row of the `faq_search` projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SearchEntry {
    pub faq_id: i64,
    pub question: String,
    pub answer: String,
    pub keywords: String,
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SearchHit {
    pub faq_id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSummary {
    pub total: i64,
    pub by_category: Vec<GroupCount>,
    pub by_source_origin: Vec<GroupCount>,
}

impl FaqRecord {
    #[inline]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Self::default()
        }
    }

    /// Apply the storage defaults: empty strings, difficulty 1, and the
    /// catalog's origin tag when the record carries none
    #[inline]
    pub fn resolve(&self, default_origin: &str) -> NewFaq {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();

        NewFaq {
            question: self.question.clone(),
            keywords: text(&self.keywords),
            answer: self.answer.clone(),
            sources: text(&self.sources),
            tags: text(&self.tags),
            category: text(&self.category),
            difficulty: self.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
            code_example: text(&self.code_example),
            related_classes: text(&self.related_classes),
            related_errors: text(&self.related_errors),
            source_origin: self
                .source_origin
                .clone()
                .unwrap_or_else(|| default_origin.to_string()),
        }
    }

    /// Leading characters of the question, used to identify the record in logs
    #[inline]
    pub fn question_preview(&self, width: usize) -> String {
        self.question.chars().take(width).collect()
    }
}

impl GroupCount {
    /// Label as shown to operators, with empty labels grouped as uncategorized
    #[inline]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            UNCATEGORIZED
        } else {
            &self.label
        }
    }
}

impl FaqSummary {
    #[inline]
    pub fn category_count(&self, category: &str) -> i64 {
        self.by_category
            .iter()
            .find(|group| group.label == category)
            .map_or(0, |group| group.count)
    }

    #[inline]
    pub fn source_origin_count(&self, source_origin: &str) -> i64 {
        self.by_source_origin
            .iter()
            .find(|group| group.label == source_origin)
            .map_or(0, |group| group.count)
    }
}
