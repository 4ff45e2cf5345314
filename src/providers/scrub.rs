use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Prefixes of Google credentials; the prefix itself is redacted too.
const PREFIX_PATTERNS: [&str; 2] = ["AIza", "ya29."];

/// Markers followed by a credential value.
const MARKER_PATTERNS: [&str; 6] = [
    "key=",
    "x-goog-api-key: ",
    "X-Goog-Api-Key: ",
    "Authorization: Bearer ",
    "\"key\":\"",
    "\"access_token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Redact every `marker` occurrence followed by a token. With
/// `keep_marker` the marker text survives and only the value is replaced.
fn scrub_after_marker(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Skip bare markers without a token value.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        let replace_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

/// Scrub Google API keys and OAuth tokens from text headed for the logs.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        scrub_after_marker(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        scrub_after_marker(&mut scrubbed, prefix, false);
    }
    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    let sanitized = sanitize_api_error(&body);
    anyhow::anyhow!("{provider} API error ({status}): {sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_clean_text_borrowed() {
        let input = "model not found";
        assert!(matches!(scrub_secret_patterns(input), Cow::Borrowed(_)));
    }

    #[test]
    fn redacts_query_key_but_keeps_marker() {
        let out = scrub_secret_patterns("GET /v1beta/models?key=abc123XYZ failed");
        assert_eq!(out, "GET /v1beta/models?key=[REDACTED] failed");
    }

    #[test]
    fn redacts_bare_google_api_key() {
        let out = scrub_secret_patterns("invalid key AIzaSyD-1234_abcd supplied");
        assert_eq!(out, "invalid key [REDACTED] supplied");
    }

    #[test]
    fn redacts_header_value() {
        let out = scrub_secret_patterns("x-goog-api-key: secret-value");
        assert_eq!(out, "x-goog-api-key: [REDACTED]");
    }

    #[test]
    fn sanitize_truncates_long_bodies() {
        let long = "x".repeat(500);
        let out = sanitize_api_error(&long);
        assert_eq!(out.chars().count(), MAX_API_ERROR_CHARS + 3);
        assert!(out.ends_with("..."));
    }
}
