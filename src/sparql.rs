//! Request constructors for SPARQL-over-HTTP endpoints.
//!
//! These build the request shapes the [SPARQL 1.1 Protocol](https://www.w3.org/TR/sparql11-protocol/)
//! defines, as `http::Request<Bytes>` values ready for
//! [`SigningHttpClient`][crate::SigningHttpClient]. No SPARQL parsing or RDF
//! handling happens here; the query text is treated as opaque.

use crate::Result;
use bytes::Bytes;
use http::{header, Method};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Build a GET query request: `GET <endpoint>?query=<encoded>`.
///
/// Suits short queries; endpoints commonly cap URL length, so prefer
/// [`query_post`] for anything sizable.
pub fn query_get(endpoint: &str, query: &str) -> Result<http::Request<Bytes>> {
    let qs = form_urlencoded::Serializer::new(String::new())
        .append_pair("query", query)
        .finish();

    Ok(http::Request::builder()
        .method(Method::GET)
        .uri(format!("{endpoint}?{qs}"))
        .body(Bytes::new())?)
}

/// Build a POST query request with a form-urlencoded `query=` body.
pub fn query_post(endpoint: &str, query: &str) -> Result<http::Request<Bytes>> {
    form_post(endpoint, "query", query)
}

/// Build a POST update request with a form-urlencoded `update=` body.
///
/// Updates have no GET form: they are not idempotent.
pub fn update_post(endpoint: &str, update: &str) -> Result<http::Request<Bytes>> {
    form_post(endpoint, "update", update)
}

fn form_post(endpoint: &str, key: &str, value: &str) -> Result<http::Request<Bytes>> {
    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();

    Ok(http::Request::builder()
        .method(Method::POST)
        .uri(endpoint)
        .header(header::CONTENT_TYPE, FORM_URLENCODED)
        .body(Bytes::from(body))?)
}
