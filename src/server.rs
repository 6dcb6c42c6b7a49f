//! Shared server state.
//!
//! One [`ServerContext`] is built at startup and handed to both listeners
//! behind an `Arc`. Everything in it is read-only after construction (the
//! selector's RNG manages its own interior locking), so request handlers
//! share it freely.

use bytes::Bytes;

use crate::error::ServerError;
use crate::protocol::format_response;
use crate::quotes::QuoteStore;
use crate::select::Selector;

/// Read-only state shared by every request handler.
#[derive(Debug)]
pub struct ServerContext {
    store: QuoteStore,
    selector: Selector,
    strict_mode: bool,
}

impl ServerContext {
    pub fn new(store: QuoteStore, selector: Selector, strict_mode: bool) -> Self {
        ServerContext {
            store,
            selector,
            strict_mode,
        }
    }

    /// Select a random quote and render it for delivery.
    ///
    /// Returns the selected index alongside the wire bytes; the handlers log
    /// the index so operators can trace which quote a client received.
    pub fn random_response(&self) -> Result<(usize, Bytes), ServerError> {
        let (index, quote) = self.selector.select(&self.store)?;
        Ok((index, format_response(quote, self.strict_mode)))
    }

    /// Number of quotes available for selection.
    pub fn quote_count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(quotes: &[&str], strict: bool) -> ServerContext {
        let store =
            QuoteStore::from_quotes(quotes.iter().map(|q| q.to_string()).collect()).unwrap();
        ServerContext::new(store, Selector::with_seed(99), strict)
    }

    #[test]
    fn test_random_response_is_terminated() {
        let ctx = context(&["alpha", "beta"], false);

        for _ in 0..50 {
            let (index, bytes) = ctx.random_response().unwrap();
            assert!(index < 2);
            assert!(bytes.ends_with(b"\r\n"));
            let body = &bytes[..bytes.len() - 2];
            assert!(body == b"alpha" || body == b"beta");
        }
    }

    #[test]
    fn test_strict_context_truncates() {
        let long = "q".repeat(600);
        let ctx = context(&[&long], true);

        let (index, bytes) = ctx.random_response().unwrap();
        assert_eq!(index, 0);
        assert!(bytes.len() < 512);
        assert!(bytes.ends_with(b"...\r\n"));
    }
}
