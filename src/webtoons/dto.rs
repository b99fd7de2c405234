use serde::Deserialize;

/// Raw add/edit form input. Statuses arrive as free text and are parsed
/// against the closed status sets during validation; a missing chapter
/// defaults to 0.
#[derive(Debug, Deserialize)]
pub struct WebtoonForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub chapter: Option<i64>,
    #[serde(default)]
    pub read_status: String,
    #[serde(default)]
    pub webtoon_status: String,
}

/// Query string for `GET /webtoons/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
