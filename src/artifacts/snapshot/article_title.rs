use std::borrow::Borrow;

/// Canonical article identity.
///
/// Titles join records across independently produced archives, so they are validated
/// once at ingestion: surrounding whitespace is trimmed, the result must be non-empty
/// and must fit on a single front-matter line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn try_parse(title: impl AsRef<str>) -> anyhow::Result<Self> {
        let title = title.as_ref().trim();

        if title.is_empty() {
            anyhow::bail!("article title cannot be empty");
        }

        if title.contains(['\n', '\r']) {
            anyhow::bail!("article title cannot span multiple lines: {:?}", title);
        }

        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArticleTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArticleTitle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
