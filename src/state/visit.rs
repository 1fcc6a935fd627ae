/// Visit outcome definitions
///
/// Every admitted URL is fetched exactly once and ends in exactly one of
/// these outcomes. All of them count as a completed visit.
use std::fmt;

/// Represents how the single fetch of an admitted URL ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// 2xx response; the body was scanned for links
    Fetched {
        /// HTTP status code
        status: u16,
        /// Number of hrefs extracted from the body
        links: usize,
    },

    /// Non-2xx response; the page contributes no links
    HttpError {
        /// HTTP status code
        status: u16,
    },

    /// Timeout, connection failure or unreadable body; not retried
    TransportError {
        /// Error description
        message: String,
    },
}

impl fmt::Display for VisitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched { status, links } => write!(f, "fetched ({status}, {links} links)"),
            Self::HttpError { status } => write!(f, "http error ({status})"),
            Self::TransportError { message } => write!(f, "transport error ({message})"),
        }
    }
}
