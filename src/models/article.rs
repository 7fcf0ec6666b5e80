//! Article records and the article form.

use serde::{Deserialize, Serialize};

use super::record::lenient;
use super::{LocalizedText, RecordId};

/// A published article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: RecordId,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub journal_abbr: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub journal_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub year: Option<i32>,

    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub issue_number: Option<u32>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sub_issue_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub doi: Option<String>,

    #[serde(default)]
    pub titles: LocalizedText,

    #[serde(default)]
    pub authors: LocalizedText,

    #[serde(default)]
    pub abstracts: LocalizedText,

    #[serde(default)]
    pub keywords: LocalizedText,

    #[serde(default)]
    pub authors_info: LocalizedText,

    #[serde(default)]
    pub udc: LocalizedText,

    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub page_start: Option<u32>,

    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub page_end: Option<u32>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub pdf_file_name: Option<String>,
}

impl Article {
    /// Page range as shown in listings, e.g. `12-19`.
    pub fn pages(&self) -> Option<String> {
        match (self.page_start, self.page_end) {
            (Some(start), Some(end)) => Some(format!("{start}-{end}")),
            (Some(start), None) => Some(start.to_string()),
            _ => None,
        }
    }
}

/// Fields of the article form. Locale maps go over the wire as JSON strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDraft {
    pub journal_abbr: String,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub issue_number: Option<u32>,
    pub sub_issue_number: Option<String>,
    pub doi: Option<String>,
    pub titles: LocalizedText,
    pub authors: LocalizedText,
    pub abstracts: LocalizedText,
    pub keywords: LocalizedText,
    pub authors_info: LocalizedText,
    pub udc: LocalizedText,
    pub page_start: Option<u32>,
    pub page_end: Option<u32>,
}

impl From<&Article> for ArticleDraft {
    fn from(a: &Article) -> Self {
        Self {
            journal_abbr: a.journal_abbr.clone(),
            category: a.category.clone(),
            year: a.year,
            issue_number: a.issue_number,
            sub_issue_number: a.sub_issue_number.clone(),
            doi: a.doi.clone(),
            titles: a.titles.clone(),
            authors: a.authors.clone(),
            abstracts: a.abstracts.clone(),
            keywords: a.keywords.clone(),
            authors_info: a.authors_info.clone(),
            udc: a.udc.clone(),
            page_start: a.page_start,
            page_end: a.page_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_form_encoded_numbers() {
        let article: Article = serde_json::from_str(
            r#"{
                "id": 12,
                "journalAbbr": "nntiik",
                "year": "2024",
                "issueNumber": 2,
                "pageStart": "10",
                "pageEnd": 18,
                "titles": {"ru": "Заголовок"},
                "pdfFileName": "a.pdf"
            }"#,
        )
        .unwrap();
        assert_eq!(article.year, Some(2024));
        assert_eq!(article.issue_number, Some(2));
        assert_eq!(article.pages().as_deref(), Some("10-18"));
        assert_eq!(article.pdf_file_name.as_deref(), Some("a.pdf"));
        assert!(article.udc.is_blank());
    }

    #[test]
    fn test_draft_from_article() {
        let article: Article =
            serde_json::from_str(r#"{"id":1,"journalAbbr":"ivk","issueNumber":"4"}"#).unwrap();
        let draft = ArticleDraft::from(&article);
        assert_eq!(draft.journal_abbr, "ivk");
        assert_eq!(draft.issue_number, Some(4));
    }
}
