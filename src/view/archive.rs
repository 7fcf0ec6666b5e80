//! Year and issue index of a journal archive.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::Article;

/// One year of the archive with its issue numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveYear {
    pub year: i32,
    pub issues: Vec<u32>,
}

/// Years and issues that have published articles, both ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveIndex {
    pub years: Vec<ArchiveYear>,
}

impl ArchiveIndex {
    /// Articles without a year are skipped; a year whose articles carry no
    /// issue number is listed with no issues.
    pub fn build<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Self {
        let mut by_year: BTreeMap<i32, BTreeSet<u32>> = BTreeMap::new();
        for article in articles {
            let Some(year) = article.year else { continue };
            let issues = by_year.entry(year).or_default();
            if let Some(issue) = article.issue_number {
                issues.insert(issue);
            }
        }
        Self {
            years: by_year
                .into_iter()
                .map(|(year, issues)| ArchiveYear {
                    year,
                    issues: issues.into_iter().collect(),
                })
                .collect(),
        }
    }

    pub fn issues(&self, year: i32) -> &[u32] {
        self.years
            .iter()
            .find(|y| y.year == year)
            .map(|y| y.issues.as_slice())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build() {
        let articles: Vec<Article> = serde_json::from_str(
            r#"[
                {"id": 1, "year": 2024, "issueNumber": 2},
                {"id": 2, "year": "2023", "issueNumber": "1"},
                {"id": 3, "year": 2024, "issueNumber": 1},
                {"id": 4, "year": 2024, "issueNumber": 2},
                {"id": 5, "issueNumber": 3}
            ]"#,
        )
        .unwrap();

        let index = ArchiveIndex::build(&articles);
        let years: Vec<i32> = index.years.iter().map(|y| y.year).collect();
        assert_eq!(years, [2023, 2024]);
        assert_eq!(index.issues(2024), &[1, 2]);
        assert_eq!(index.issues(2023), &[1]);
        assert!(index.issues(1999).is_empty());
    }
}
