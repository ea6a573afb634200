//! Page envelope construction with absolute `next`/`previous` links.

use axum::http::{HeaderMap, Uri, header::HOST};
use url::Url;

use foodgram_domain::pagination::{Page, PageRequest};

fn request_url(uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("http");
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Url::parse(&format!("{scheme}://{host}{path}")).ok()
}

/// `base` with its `page` parameter replaced, other parameters kept in order.
fn with_page(base: &Url, page: u32) -> String {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());
    url.to_string()
}

pub fn page_of<T>(
    uri: &Uri,
    headers: &HeaderMap,
    page: PageRequest,
    count: u64,
    results: Vec<T>,
) -> Page<T> {
    let base = request_url(uri, headers);
    let link = |number: Option<u32>| {
        number.and_then(|n| base.as_ref().map(|base| with_page(base, n)))
    };
    Page {
        count,
        next: link(page.next_page(count)),
        previous: link(page.previous_page()),
        results,
    }
}
