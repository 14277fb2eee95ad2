use url::Url;

/// Normalizes a candidate address against the page that referenced it
///
/// # Normalization Steps
///
/// 1. Resolve the token against the page address using standard relative
///    merge rules (absolute tokens replace the base, relative tokens are
///    joined onto it)
/// 2. Remove the fragment (everything after `#`)
/// 3. Remove the query string
///
/// What remains is scheme/authority/path only, which is the identity the
/// visit ledger deduplicates on. Normalization is a pure function of
/// `(page, token)`: the same inputs always produce the same output.
///
/// A token that does not parse as a URI yields `None`; callers drop such
/// references silently rather than treating them as errors.
///
/// # Examples
///
/// ```
/// use skein::url::normalize_uri;
/// use url::Url;
///
/// let page = Url::parse("http://example.com/dir/page.html").unwrap();
/// let uri = normalize_uri(&page, "other.html?tab=1#top").unwrap();
/// assert_eq!(uri.as_str(), "http://example.com/dir/other.html");
/// ```
pub fn normalize_uri(page: &Url, token: &str) -> Option<Url> {
    let mut resolved = page.join(token).ok()?;
    resolved.set_fragment(None);
    resolved.set_query(None);
    Some(resolved)
}

/// Returns true when the candidate address has the same host as the page
///
/// Candidates are compared after normalization, so a token that was relative
/// has already inherited the page's host and passes by construction. A
/// resolved address with no host at all (such as a `mailto:` target) never
/// matches a page that has one.
pub fn same_host(page: &Url, candidate: &Url) -> bool {
    candidate.host_str() == page.host_str()
}
