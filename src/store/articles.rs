//! Articles store.
//!
//! Articles are submitted as multipart forms: scalar fields as text, locale
//! maps as JSON strings, and the PDF under `pdfFile`.

use super::{InsertAt, Payload, Resource, ResourceStore};
use crate::api::{Body, FilePart, Form, endpoints};
use crate::error::{AppError, Result};
use crate::models::{Article, ArticleDraft, Journal, RecordId};

impl Resource for Article {
    const COLLECTION: &'static str = endpoints::ARTICLES;
    const NAME: &'static str = "article";
    const INSERT_AT: InsertAt = InsertAt::Back;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// An article form ready to send.
#[derive(Debug, Clone)]
pub struct ArticleForm {
    pub draft: ArticleDraft,
    /// Display name of the journal, resolved from its abbreviation
    pub journal_name: String,
    pub pdf: Option<FilePart>,
}

impl ArticleForm {
    /// Resolve the journal name from the loaded journals.
    pub fn new(draft: ArticleDraft, pdf: Option<FilePart>, journals: &[Journal]) -> Self {
        let journal_name = journals
            .iter()
            .find(|j| j.matches_abbreviation(&draft.journal_abbr))
            .map(|j| j.name.clone())
            .unwrap_or_default();
        Self {
            draft,
            journal_name,
            pdf,
        }
    }
}

fn field<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl Payload for ArticleForm {
    fn validate(&self) -> Result<()> {
        if self.draft.journal_abbr.trim().is_empty() {
            return Err(AppError::validation("select a journal for the article"));
        }
        if let (Some(start), Some(end)) = (self.draft.page_start, self.draft.page_end) {
            if start > end {
                return Err(AppError::validation(format!(
                    "first page {start} is after last page {end}"
                )));
            }
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        let d = self.draft;
        let form = Form::new()
            .text("journalAbbr", d.journal_abbr.trim())
            .text("journalName", self.journal_name)
            .text("category", field(&d.category))
            .text("year", field(&d.year))
            .text("issueNumber", field(&d.issue_number))
            .text("subIssueNumber", field(&d.sub_issue_number))
            .text("doi", field(&d.doi))
            .json("titles", &d.titles)?
            .json("authors", &d.authors)?
            .json("abstracts", &d.abstracts)?
            .json("keywords", &d.keywords)?
            .json("authorsInfo", &d.authors_info)?
            .json("udc", &d.udc)?
            .text("pageStart", field(&d.page_start))
            .text("pageEnd", field(&d.page_end))
            .file_opt("pdfFile", self.pdf);
        Ok(Body::Multipart(form))
    }
}

impl ResourceStore<Article> {
    pub async fn create_article(
        &self,
        draft: ArticleDraft,
        pdf: Option<FilePart>,
        journals: &[Journal],
    ) -> Result<Article> {
        self.create(ArticleForm::new(draft, pdf, journals)).await
    }

    pub async fn update_article(
        &self,
        id: &RecordId,
        draft: ArticleDraft,
        pdf: Option<FilePart>,
        journals: &[Journal],
    ) -> Result<Article> {
        self.update(id, ArticleForm::new(draft, pdf, journals)).await
    }

    /// All articles of one journal, as served to its micro-site.
    pub async fn fetch_by_journal(&self, abbr: &str) -> Result<Vec<Article>> {
        self.fetch_list(&endpoints::articles_by_journal(abbr)).await
    }

    /// Articles of a single issue.
    pub async fn fetch_issue(&self, abbr: &str, year: i32, issue: u32) -> Result<Vec<Article>> {
        self.fetch_list(&endpoints::articles_by_issue(abbr, year, issue))
            .await
    }

    /// Held articles filtered by journal; `None` keeps all of them.
    pub fn for_journal(&self, abbr: Option<&str>) -> Vec<Article> {
        let items = self.items();
        match abbr {
            Some(abbr) => items
                .into_iter()
                .filter(|a| a.journal_abbr.eq_ignore_ascii_case(abbr))
                .collect(),
            None => items,
        }
    }
}
