use url::form_urlencoded;

use crate::error::{AppError, Result};
use crate::sources::SourceList;

/// Display data for the index page.
#[derive(Clone, Debug, Default)]
pub struct Page {
    pub title: String,
    pub body: String,
}

/// Validated `/smush` form.
#[derive(Debug)]
pub struct SmushRequest {
    pub name: String,
    pub sources: SourceList,
}

impl SmushRequest {
    /// Parses url-encoded pairs from the body followed by the query string.
    /// `name` and `source` must each carry at least one non-blank value.
    pub fn parse(body: &[u8], query: Option<&str>) -> Result<Self> {
        let mut name = None;
        let mut raw_sources = Vec::new();

        let pairs = form_urlencoded::parse(body)
            .chain(query.map(|q| form_urlencoded::parse(q.as_bytes())).into_iter().flatten());

        for (key, value) in pairs {
            match &*key {
                "name" if name.is_none() && !value.trim().is_empty() => {
                    name = Some(value.trim().to_string());
                }
                "source" => raw_sources.push(value.into_owned()),
                _ => {}
            }
        }

        let name = name.ok_or_else(|| AppError::ValidationError("Missing required param: name".to_string()))?;
        let sources = SourceList::from_raw(raw_sources);
        if sources.is_empty() {
            return Err(AppError::ValidationError("Missing required param: source".to_string()));
        }

        Ok(SmushRequest { name, sources })
    }
}
