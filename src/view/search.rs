//! Client-side article search for a journal micro-site.

use crate::models::Article;

/// Articles whose Russian title and author list contain the queries,
/// ignoring case. An empty query matches everything, but two empty
/// queries return nothing.
pub fn search_articles<'a>(articles: &'a [Article], title: &str, author: &str) -> Vec<&'a Article> {
    let title = title.trim().to_lowercase();
    let author = author.trim().to_lowercase();
    if title.is_empty() && author.is_empty() {
        return Vec::new();
    }
    articles
        .iter()
        .filter(|a| a.titles.ru().to_lowercase().contains(&title))
        .filter(|a| a.authors.ru().to_lowercase().contains(&author))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocalizedText;

    fn article(id: i64, title: &str, authors: &str) -> Article {
        let mut a: Article = serde_json::from_value(serde_json::json!({"id": id})).unwrap();
        a.titles = LocalizedText::new().with("ru", title).with("en", "English title");
        a.authors = LocalizedText::new().with("ru", authors);
        a
    }

    #[test]
    fn test_search() {
        let articles = vec![
            article(1, "Водные ресурсы Кыргызстана", "Иванов И."),
            article(2, "Цифровая экономика", "Петров П., Иванова А."),
            article(3, "Экономика воды", "Сидоров С."),
        ];

        let ids = |found: Vec<&Article>| found.iter().map(|a| a.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(search_articles(&articles, "ЭКОНОМИКА", "")), ["2", "3"]);
        assert_eq!(ids(search_articles(&articles, "", "иванов")), ["1", "2"]);
        assert_eq!(ids(search_articles(&articles, "экономика", "иванов")), ["2"]);
        assert!(search_articles(&articles, "english", "").is_empty());
        assert!(search_articles(&articles, " ", "").is_empty());
    }
}
