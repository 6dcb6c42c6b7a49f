//! Quote storage and source loading.
//!
//! Quotes are loaded once at startup, either from a local file or from an
//! `http`/`https` URL, and kept in memory for the lifetime of the process.
//! The store is read-only after construction, so concurrent request handlers
//! share it without any locking.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ServerError;

/// Separator between quotes in source data: a line holding only `%`.
pub const QUOTE_DELIMITER: &str = "\n%\n";

/// Immutable, ordered collection of quote texts.
#[derive(Debug)]
pub struct QuoteStore {
    quotes: Vec<String>,
}

impl QuoteStore {
    /// Load quotes from `source`.
    ///
    /// A source starting with `http://` or `https://` is fetched with a
    /// single GET request; anything else is treated as a filesystem path.
    /// Read failures and sources yielding no quotes are fatal.
    pub async fn load(source: &str) -> Result<Self, ServerError> {
        let text = if source.starts_with("http://") || source.starts_with("https://") {
            fetch_remote(source).await?
        } else {
            let path = PathBuf::from(source);
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ServerError::SourceRead { path, source: e })?
        };

        Self::parse(source, &text)
    }

    /// Split source text on the quote delimiter, preserving order.
    fn parse(source: &str, text: &str) -> Result<Self, ServerError> {
        if text.trim().is_empty() {
            return Err(ServerError::EmptySource(source.to_string()));
        }

        let quotes: Vec<String> = text.split(QUOTE_DELIMITER).map(str::to_string).collect();
        if quotes.is_empty() {
            return Err(ServerError::EmptySource(source.to_string()));
        }

        debug!(quotes = quotes.len(), source, "Parsed quote source");
        Ok(QuoteStore { quotes })
    }

    /// Build a store from already-separated quotes. Used by tests and by
    /// anything embedding the engine without a loader.
    pub fn from_quotes(quotes: Vec<String>) -> Result<Self, ServerError> {
        if quotes.is_empty() {
            return Err(ServerError::EmptyStore);
        }
        Ok(QuoteStore { quotes })
    }

    /// Number of quotes in the store.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quote at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.quotes.get(index).map(String::as_str)
    }
}

/// Fetch a remote quote source with one GET request.
async fn fetch_remote(url: &str) -> Result<String, ServerError> {
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ServerError::SourceFetch {
            url: url.to_string(),
            source: e,
        })?;

    response.text().await.map_err(|e| ServerError::SourceFetch {
        url: url.to_string(),
        source: e,
    })
}
