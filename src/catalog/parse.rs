use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::item::{Catalog, PosterRef, ScoredItem};

// Every key is its own field so records carrying both spellings of a key
// still deserialize. Metadata stays untyped and is coerced afterwards.
#[derive(Clone, Debug, Default, Deserialize)]
struct RawItem {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "movieId")]
    movie_id_camel: Option<Value>,
    #[serde(default)]
    movie_id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    year: Option<Value>,
    #[serde(default, rename = "posterUrl")]
    poster_url_camel: Option<Value>,
    #[serde(default)]
    poster_url: Option<Value>,
    #[serde(default)]
    poster: Option<Value>,
    #[serde(default)]
    cast: Option<Value>,
    #[serde(default)]
    director: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default, rename = "userScore")]
    user_score_camel: Option<Value>,
    #[serde(default)]
    user_score: Option<Value>,
    #[serde(default, rename = "communityScore")]
    community_score_camel: Option<Value>,
    #[serde(default)]
    community_score: Option<Value>,
}

fn first_present<'a>(candidates: [&'a Option<Value>; 3]) -> Option<&'a Value> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_null())
}

/// Parses a dataset document: either an object keyed by item id or an array
/// of records carrying their own id. Malformed records are dropped and
/// counted in [`Catalog::skipped`].
pub(super) fn parse_catalog(raw: &str) -> Result<Catalog> {
    let parsed: Value = serde_json::from_str(raw).context("dataset is not valid JSON")?;

    let mut catalog = Catalog::default();
    let mut skipped = 0usize;

    match parsed {
        Value::Object(object) => {
            let mut entries = object.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in entries {
                let kept =
                    scored_item(Some(key.as_str()), &value).is_some_and(|item| catalog.push(item));
                if !kept {
                    skipped += 1;
                }
            }
        }
        Value::Array(records) => {
            for value in records {
                if !scored_item(None, &value).is_some_and(|item| catalog.push(item)) {
                    skipped += 1;
                }
            }
        }
        _ => {
            return Err(anyhow!(
                "unexpected dataset JSON type; expected an object keyed by id or an array"
            ));
        }
    }

    catalog.set_skipped(skipped);
    Ok(catalog)
}

fn scored_item(key: Option<&str>, value: &Value) -> Option<ScoredItem> {
    if !value.is_object() {
        return None;
    }

    let raw = RawItem::deserialize(value).ok()?;

    let id = key.map(str::to_owned).or_else(|| {
        first_present([&raw.id, &raw.movie_id_camel, &raw.movie_id]).and_then(text_value)
    })?;
    let id = id.trim().to_owned();
    if id.is_empty() {
        return None;
    }

    let user_score =
        first_present([&raw.user_score_camel, &raw.user_score, &None]).and_then(score_value)?;
    let community_score = first_present([&raw.community_score_camel, &raw.community_score, &None])
        .and_then(score_value)?;

    let title = raw
        .title
        .as_ref()
        .and_then(metadata_text)
        .unwrap_or_else(|| id.clone());
    let poster_url = first_present([&raw.poster_url_camel, &raw.poster_url, &raw.poster])
        .and_then(Value::as_str);

    Some(ScoredItem {
        title,
        year: raw.year.as_ref().and_then(year_value),
        poster: PosterRef::from_url(poster_url),
        cast: raw.cast.as_ref().map(cast_value).unwrap_or_default(),
        director: raw.director.as_ref().and_then(metadata_text),
        description: raw.description.as_ref().and_then(metadata_text),
        user_score,
        community_score,
        id,
    })
}

/// Free-form metadata as display text. Lists are joined and anything that
/// is not text-like is dropped rather than rejecting the record.
fn metadata_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(text_value)
            .map(|entry| entry.trim().to_owned())
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => text_value(other)?,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn score_value(value: &Value) -> Option<f32> {
    let score = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    let score = score as f32;
    score.is_finite().then_some(score)
}

fn year_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|year| i32::try_from(year).ok()),
        Value::String(text) => text.trim().get(..4).and_then(|year| year.parse().ok()),
        _ => None,
    }
}

fn cast_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect(),
        Value::String(text) => text
            .split(',')
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_form_orders_items_by_key() {
        let catalog = parse_catalog(
            r#"{
                "m2": {"title": "Second", "userScore": 4, "communityScore": 3.5},
                "m1": {"title": "First", "userScore": "2.5", "communityScore": 1}
            }"#,
        )
        .unwrap();

        let ids = catalog
            .items()
            .iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["m1", "m2"]);
        assert_eq!(catalog.get("m1").unwrap().user_score, 2.5);
        assert_eq!(catalog.skipped(), 0);
    }

    #[test]
    fn array_form_reads_ids_and_keeps_input_order() {
        let catalog = parse_catalog(
            r#"[
                {"movie_id": 20, "title": "B", "user_score": 1, "community_score": 2},
                {"id": "10", "title": "A", "userScore": 5, "communityScore": 5}
            ]"#,
        )
        .unwrap();

        let ids = catalog
            .items()
            .iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["20", "10"]);
    }

    #[test]
    fn malformed_records_are_skipped_without_aborting() {
        let catalog = parse_catalog(
            r#"[
                {"id": "ok", "title": "Fine", "userScore": 3, "communityScore": 3},
                {"id": "no-community", "userScore": 3},
                {"title": "No id", "userScore": 3, "communityScore": 3},
                {"id": "bad", "userScore": "high", "communityScore": 3},
                {"id": "", "userScore": 1, "communityScore": 1},
                "not an object",
                {"id": "ok", "title": "Duplicate", "userScore": 1, "communityScore": 1}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.skipped(), 6);
        assert_eq!(catalog.get("ok").unwrap().title, "Fine");
    }

    #[test]
    fn metadata_fields_are_normalized() {
        let catalog = parse_catalog(
            r#"{"x": {
                "userScore": 4, "communityScore": 2,
                "year": "1999-03-31",
                "cast": "Keanu Reeves, Carrie-Anne Moss",
                "posterUrl": "",
                "director": "  "
            }}"#,
        )
        .unwrap();

        let item = catalog.get("x").unwrap();
        assert_eq!(item.title, "x");
        assert_eq!(item.year, Some(1999));
        assert_eq!(item.cast, ["Keanu Reeves", "Carrie-Anne Moss"]);
        assert_eq!(item.poster, PosterRef::Placeholder);
        assert_eq!(item.director, None);
    }

    #[test]
    fn mistyped_metadata_keeps_the_record() {
        let catalog = parse_catalog(
            r#"[
                {"id": "a", "director": ["X", "Y"], "userScore": 4, "communityScore": 3},
                {"id": "b", "title": 1984, "userScore": 2, "communityScore": 2},
                {"id": "c", "posterUrl": "https://img/c.jpg", "poster": "https://img/other.jpg",
                 "description": {"long": true}, "userScore": 5, "communityScore": 1},
                {"id": "d", "poster": 7, "userScore": 1, "user_score": 2, "communityScore": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.skipped(), 0);
        assert_eq!(catalog.get("a").unwrap().director.as_deref(), Some("X, Y"));
        assert_eq!(catalog.get("b").unwrap().title, "1984");
        let c = catalog.get("c").unwrap();
        assert_eq!(c.poster.uri(), Some("https://img/c.jpg"));
        assert_eq!(c.description, None);
        let d = catalog.get("d").unwrap();
        assert_eq!(d.poster, PosterRef::Placeholder);
        assert_eq!(d.user_score, 1.0);
    }

    #[test]
    fn rejects_scalar_documents() {
        assert!(parse_catalog("42").is_err());
        assert!(parse_catalog("{not json").is_err());
    }
}
