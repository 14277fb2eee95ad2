//! HTML parser for extracting assets and same-host links
//!
//! This module turns one fetched page body into the crawler's view of it:
//! - Asset references (images, scripts, stylesheets), reported but never
//!   fetched
//! - Hyperlinks restricted to the page's own host, which seed recursion

use crate::url::{normalize_uri, same_host};
use crate::SkeinError;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from one HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page's own normalized address
    pub address: Url,

    /// Asset references in document order; duplicates within a page are kept
    pub assets: Vec<Url>,

    /// Same-host links in document order
    pub links: Vec<Url>,
}

/// Parses a page body and extracts assets and same-host links
///
/// # Extraction Rules
///
/// **Assets** come from `<img>`, `<script>` and `<link rel="stylesheet">`
/// elements, reading `href` or `src` (whichever is present). Empty
/// references and pure in-page anchors (leading `#`) are discarded, as is
/// anything that fails to parse as a URI. Assets are not deduplicated here:
/// dedup is the visit ledger's job and applies only to links.
///
/// **Links** come from `<a>` elements. Each `href` is normalized against the
/// page address (silently dropping unparseable ones) and retained only when
/// the resolved host equals the page's host. Relative hrefs inherit the
/// page's host during resolution, so they are always retained.
///
/// # Arguments
///
/// * `html` - The page body
/// * `address` - The page's own normalized address
///
/// # Returns
///
/// * `Ok(ParsedPage)` - Successfully analyzed page
/// * `Err(SkeinError)` - The body could not be processed
pub fn analyze_page(html: &str, address: &Url) -> Result<ParsedPage, SkeinError> {
    let document = Html::parse_document(html);

    let assets = extract_assets(&document, address)?;
    let links = extract_links(&document, address)?;

    Ok(ParsedPage {
        address: address.clone(),
        assets,
        links,
    })
}

fn selector(address: &Url, css: &str) -> Result<Selector, SkeinError> {
    Selector::parse(css).map_err(|e| SkeinError::HtmlParse {
        url: address.to_string(),
        message: e.to_string(),
    })
}

/// Extracts asset references in document order
fn extract_assets(document: &Html, address: &Url) -> Result<Vec<Url>, SkeinError> {
    let asset_selector = selector(address, "img, script, link[rel='stylesheet']")?;

    let assets = document
        .select(&asset_selector)
        .filter_map(|el| el.value().attr("href").or_else(|| el.value().attr("src")))
        .filter(|reference| !reference.is_empty() && !reference.starts_with('#'))
        .filter_map(|reference| normalize_uri(address, reference))
        .collect();

    Ok(assets)
}

/// Extracts same-host links in document order
fn extract_links(document: &Html, address: &Url) -> Result<Vec<Url>, SkeinError> {
    let anchor_selector = selector(address, "a")?;

    let links = document
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| normalize_uri(address, href))
        .filter(|link| same_host(address, link))
        .collect();

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_address() -> Url {
        Url::parse("http://example.com/section/page.html").unwrap()
    }

    fn absolute(path: &str) -> Url {
        Url::parse(&format!("http://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_extracts_image_script_and_stylesheet_assets() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/style.css">
            <script src="/app.js"></script>
            </head><body><img src="/logo.png"></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(
            parsed.assets,
            vec![
                absolute("/style.css"),
                absolute("/app.js"),
                absolute("/logo.png")
            ]
        );
    }

    #[test]
    fn test_non_stylesheet_link_elements_are_not_assets() {
        let html = r#"<html><head><link rel="icon" href="/favicon.ico"></head></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert!(parsed.assets.is_empty());
    }

    #[test]
    fn test_asset_duplicates_within_a_page_are_kept() {
        let html = r#"<html><body><img src="/a.png"><img src="/a.png"></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(parsed.assets.len(), 2);
    }

    #[test]
    fn test_empty_and_anchor_asset_references_are_dropped() {
        let html = r##"<html><body><img src=""><script src="#top"></script></body></html>"##;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert!(parsed.assets.is_empty());
    }

    #[test]
    fn test_relative_asset_resolves_against_page() {
        let html = r#"<html><body><img src="pic.png"></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(parsed.assets, vec![absolute("/section/pic.png")]);
    }

    #[test]
    fn test_relative_link_is_same_origin_by_construction() {
        let html = r#"<html><body><a href="next.html">next</a></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(parsed.links, vec![absolute("/section/next.html")]);
    }

    #[test]
    fn test_cross_host_link_is_filtered_out() {
        let html = r#"<html><body>
            <a href="http://other.com/away.html">away</a>
            <a href="/here.html">here</a>
            </body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(parsed.links, vec![absolute("/here.html")]);
    }

    #[test]
    fn test_mailto_link_is_filtered_out() {
        let html = r#"<html><body><a href="mailto:hi@example.com">mail</a></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_link_fragment_and_query_are_stripped() {
        let html = r#"<html><body><a href="/a.html?tab=2#frag">a</a></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(parsed.links, vec![absolute("/a.html")]);
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let html = r#"<html><body><a name="target">no href</a></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_links_keep_document_order() {
        let html = r#"<html><body>
            <a href="/one.html">1</a>
            <a href="/two.html">2</a>
            <a href="/three.html">3</a>
            </body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(
            parsed.links,
            vec![
                absolute("/one.html"),
                absolute("/two.html"),
                absolute("/three.html")
            ]
        );
    }

    #[test]
    fn test_links_are_not_part_of_assets() {
        let html = r#"<html><body><a href="/a.html">a</a><img src="/a.png"></body></html>"#;
        let parsed = analyze_page(html, &page_address()).unwrap();
        assert_eq!(parsed.assets, vec![absolute("/a.png")]);
        assert_eq!(parsed.links, vec![absolute("/a.html")]);
    }
}
