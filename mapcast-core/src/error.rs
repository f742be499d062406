use reqwest::StatusCode;

/// Failure of a single upstream HTTP call.
///
/// The controller does not tell these apart for the user; they are kept
/// distinct for logs and tests.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "天".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
