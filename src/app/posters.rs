use std::collections::HashSet;

use crate::catalog::ScoredItem;

/// Items whose poster failed to load for the current dataset. A failed item
/// is drawn with its placeholder until the dataset is replaced.
#[derive(Debug, Default)]
pub(super) struct PosterFailures {
    failed: HashSet<String>,
}

impl PosterFailures {
    pub(super) fn source<'a>(&self, item: &'a ScoredItem) -> Option<&'a str> {
        item.poster
            .uri()
            .filter(|_| !self.failed.contains(&item.id))
    }

    /// Returns `true` only the first time an item fails.
    pub(super) fn record(&mut self, item_id: &str) -> bool {
        self.failed.insert(item_id.to_owned())
    }

    pub(super) fn contains(&self, item_id: &str) -> bool {
        self.failed.contains(item_id)
    }

    pub(super) fn clear(&mut self) {
        self.failed.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::PosterRef;

    use super::*;

    fn item(id: &str, poster: PosterRef) -> ScoredItem {
        ScoredItem {
            id: id.to_owned(),
            title: id.to_owned(),
            year: None,
            poster,
            cast: Vec::new(),
            director: None,
            description: None,
            user_score: 3.0,
            community_score: 3.0,
        }
    }

    #[test]
    fn failed_poster_falls_back_until_cleared() {
        let remote = item("a", PosterRef::Remote("https://img/a.jpg".to_owned()));
        let other = item("b", PosterRef::Remote("https://img/b.jpg".to_owned()));
        let mut failures = PosterFailures::default();
        assert_eq!(failures.source(&remote), Some("https://img/a.jpg"));

        assert!(failures.record("a"));
        assert!(!failures.record("a"));
        assert!(failures.contains("a"));
        assert_eq!(failures.source(&remote), None);
        assert_eq!(failures.source(&other), Some("https://img/b.jpg"));

        failures.clear();
        assert_eq!(failures.source(&remote), Some("https://img/a.jpg"));
    }

    #[test]
    fn items_without_a_poster_never_request_one() {
        let failures = PosterFailures::default();
        assert_eq!(failures.source(&item("c", PosterRef::Placeholder)), None);
    }
}
