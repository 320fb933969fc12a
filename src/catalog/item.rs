use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PosterRef {
    Remote(String),
    Placeholder,
}

impl PosterRef {
    pub fn from_url(url: Option<&str>) -> Self {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => Self::Remote(url.to_owned()),
            _ => Self::Placeholder,
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Remote(url) => Some(url.as_str()),
            Self::Placeholder => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredItem {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub poster: PosterRef,
    pub cast: Vec<String>,
    pub director: Option<String>,
    pub description: Option<String>,
    pub user_score: f32,
    pub community_score: f32,
}

/// An immutable dataset snapshot. Iteration order is the dataset order and is
/// what every layout pass consumes.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<ScoredItem>,
    index_by_id: HashMap<String, usize>,
    skipped: usize,
}

impl Catalog {
    #[cfg(test)]
    pub fn from_items(items: impl IntoIterator<Item = ScoredItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.push(item);
        }
        catalog
    }

    /// Appends `item` unless its id is already present. Returns whether it
    /// was kept.
    pub(super) fn push(&mut self, item: ScoredItem) -> bool {
        if self.index_by_id.contains_key(&item.id) {
            return false;
        }

        self.index_by_id.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub(super) fn set_skipped(&mut self, skipped: usize) {
        self.skipped = skipped;
    }

    pub fn items(&self) -> &[ScoredItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ScoredItem> {
        self.index_by_id.get(id).map(|&index| &self.items[index])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Items ranked for list presentation: user score descending, then title.
    pub fn ranked_by_user_score(&self) -> Vec<&ScoredItem> {
        let mut ranked = self.items.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.user_score
                .total_cmp(&a.user_score)
                .then_with(|| a.title.cmp(&b.title))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, user_score: f32) -> ScoredItem {
        ScoredItem {
            id: id.to_owned(),
            title: title.to_owned(),
            year: None,
            poster: PosterRef::Placeholder,
            cast: Vec::new(),
            director: None,
            description: None,
            user_score,
            community_score: 3.0,
        }
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let catalog = Catalog::from_items([item("a", "First", 1.0), item("a", "Second", 2.0)]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").map(|item| item.title.as_str()), Some("First"));
    }

    #[test]
    fn ranking_orders_by_score_then_title() {
        let catalog = Catalog::from_items([
            item("a", "Bravo", 3.0),
            item("b", "Alpha", 3.0),
            item("c", "Charlie", 4.5),
        ]);

        let ranked = catalog
            .ranked_by_user_score()
            .into_iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ranked, ["c", "b", "a"]);
    }

    #[test]
    fn blank_poster_url_falls_back_to_placeholder() {
        assert_eq!(PosterRef::from_url(Some("   ")), PosterRef::Placeholder);
        assert_eq!(PosterRef::from_url(None), PosterRef::Placeholder);
        assert_eq!(
            PosterRef::from_url(Some("https://img/x.jpg")).uri(),
            Some("https://img/x.jpg")
        );
    }
}
