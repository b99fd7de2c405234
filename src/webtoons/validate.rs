use crate::error::ListError;
use crate::webtoons::dto::WebtoonForm;
use crate::webtoons::model::{ReadStatus, WebtoonStatus};

pub const TITLE_MAX_CHARS: usize = 80;

/// A fully validated set of writable fields, shared by add and edit on
/// both backends so the rules cannot drift between paths.
#[derive(Debug, Clone)]
pub struct WebtoonFields {
    pub title: String,
    pub chapter: i64,
    pub read_status: ReadStatus,
    pub webtoon_status: WebtoonStatus,
}

/// Validates raw form input. Title length is checked before the
/// required-field checks; a blank chapter defaults to 0.
pub fn validate(form: WebtoonForm) -> Result<WebtoonFields, ListError> {
    if form.title.chars().count() > TITLE_MAX_CHARS {
        return Err(ListError::TitleTooLong);
    }
    if form.title.is_empty() {
        return Err(ListError::MissingField("title"));
    }

    let read_status = parse_status(&form.read_status, "read_status", ReadStatus::parse)?;
    let webtoon_status = parse_status(&form.webtoon_status, "webtoon_status", WebtoonStatus::parse)?;

    Ok(WebtoonFields {
        title: form.title,
        chapter: form.chapter.unwrap_or(0),
        read_status,
        webtoon_status,
    })
}

fn parse_status<T>(
    value: &str,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ListError> {
    if value.trim().is_empty() {
        return Err(ListError::MissingField(field));
    }
    parse(value).ok_or_else(|| ListError::UnknownCategory {
        field,
        value: value.to_string(),
    })
}
