//! REST paths consumed by the stores.

use crate::models::RecordId;
use crate::utils::encode_segment;

pub const JOURNALS: &str = "/api/journals";
pub const ARTICLES: &str = "/api/articles";
pub const CATEGORIES: &str = "/api/categories";
pub const NEWS: &str = "/api/news";
pub const BOOKS: &str = "/api/books";
pub const ASSOCIATIONS: &str = "/api/associations";
pub const AUTHOR_FILES: &str = "/api/author-files";
pub const PUBLICATIONS: &str = "/api/publishingslider";
pub const CONTACT: &str = "/api/contact";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_ME: &str = "/api/auth/me";

/// `{collection}/{id}`
pub fn item(collection: &str, id: &RecordId) -> String {
    format!("{collection}/{}", encode_segment(&id.to_string()))
}

pub fn journal_by_abbreviation(abbr: &str) -> String {
    format!("{JOURNALS}/by-abbreviation/{}", encode_segment(abbr.trim()))
}

pub fn articles_by_journal(abbr: &str) -> String {
    format!("{ARTICLES}/by-journal/{}", encode_segment(abbr.trim()))
}

pub fn articles_by_issue(abbr: &str, year: i32, issue: u32) -> String {
    format!("{}/{year}/{issue}", articles_by_journal(abbr))
}

pub fn contact_image(name: &str) -> String {
    format!("{CONTACT}/image/{}", encode_segment(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(item(BOOKS, &RecordId::Num(7)), "/api/books/7");
        assert_eq!(
            journal_by_abbreviation("nntiik"),
            "/api/journals/by-abbreviation/nntiik"
        );
        assert_eq!(
            articles_by_issue("ivk", 2024, 2),
            "/api/articles/by-journal/ivk/2024/2"
        );
        assert_eq!(contact_image("a b.jpg"), "/api/contact/image/a%20b.jpg");
    }
}
