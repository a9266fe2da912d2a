use reqwest::Url;

/// Path component of a URL, e.g. "http://www.pa.org.za/person/jane-doe/" ->
/// "/person/jane-doe/". Relative URLs come back without query or fragment.
pub fn path_of_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Person slug from a profile URL. Profile URLs end in a slash, so the slug
/// is the second-to-last path segment.
pub fn profile_slug(pa_url: &str) -> Option<String> {
    let path = path_of_url(pa_url);
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return None;
    }
    let slug = segments[segments.len() - 2];
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}
