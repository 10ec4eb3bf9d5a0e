// URI fields: validated with `url`, carried as the exact wire text.
use crate::core::error::{Error, ErrorKind};
use std::fmt;
use url::Url;

/// An absolute URI that re-encodes exactly as it arrived.
///
/// `Url` normalizes (adds a trailing `/` to bare hosts, lowercases scheme and
/// host, percent-encodes spaces), so the parsed form is kept for callers and
/// the original text is what goes back on the wire.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Uri {
    text: String,
    url: Url,
}

impl Uri {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let url = Url::parse(text).map_err(|err| {
            Error::new(ErrorKind::ValueFormat)
                .with_message(format!("`{text}` is not an absolute uri"))
                .with_source(err)
        })?;
        Ok(Self {
            text: text.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The normalized form, for host/path access.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl From<Url> for Uri {
    fn from(url: Url) -> Self {
        Self {
            text: url.as_str().to_string(),
            url,
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The upstream API sends `""` for unset URL fields, which maps to `None`.
pub fn parse(text: &str) -> Result<Option<Uri>, Error> {
    if text.is_empty() {
        return Ok(None);
    }
    Uri::parse(text).map(Some)
}
