use std::path::Path;

use crate::api::models::Page;
use crate::error::{AppError, Result};

/// Header, index and footer fragments, read once at startup.
#[derive(Clone, Debug)]
pub struct Templates {
    header: String,
    index: String,
    footer: String,
}

impl Templates {
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|e| AppError::TemplateError(format!("Couldn't read {}: {}", path.display(), e)))
        };

        Ok(Templates {
            header: read("header.html")?,
            index: read("index.html")?,
            footer: read("footer.html")?,
        })
    }

    pub fn from_parts(header: impl Into<String>, index: impl Into<String>, footer: impl Into<String>) -> Self {
        Templates {
            header: header.into(),
            index: index.into(),
            footer: footer.into(),
        }
    }

    pub fn render_index(&self, page: &Page) -> String {
        let mut html = String::with_capacity(self.header.len() + self.index.len() + self.footer.len());
        for part in [&self.header, &self.index, &self.footer] {
            html.push_str(&fill(part, page));
        }
        html
    }
}

fn fill(fragment: &str, page: &Page) -> String {
    fragment
        .replace("{{title}}", &escape_html(&page.title))
        .replace("{{body}}", &escape_html(&page.body))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
