/// Remove empty headers and trim whitespace from the provided values.
pub(super) fn sanitize_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .map(|header| header.trim().to_string())
        .filter(|header| !header.is_empty())
        .collect()
}

/// Normalize a URL base so joins can always use `{base}/path`.
pub(super) fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_trimmed_and_filtered() {
        let headers = sanitize_headers(vec![" Title ".into(), "".into(), "Year".into()]);
        assert_eq!(headers, vec!["Title", "Year"]);
    }

    #[test]
    fn base_urls_lose_trailing_slashes() {
        assert_eq!(
            trim_base_url("https://api.example.test/3/ "),
            "https://api.example.test/3"
        );
        assert_eq!(trim_base_url("https://api.example.test"), "https://api.example.test");
    }
}
