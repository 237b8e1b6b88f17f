use crate::client_addr;

use std::net::SocketAddr;

use axum::http::{HeaderMap, HeaderValue};

fn peer() -> Option<SocketAddr> {
    Some("10.0.0.7:51234".parse().unwrap())
}

#[test]
fn given_forwarded_header_when_resolved_then_first_entry_wins() {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-forwarded-for",
        HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
    );

    assert_eq!(client_addr(&headers, peer()), "203.0.113.9");
}

#[test]
fn given_no_forwarded_header_when_resolved_then_peer_ip_used() {
    assert_eq!(client_addr(&HeaderMap::new(), peer()), "10.0.0.7");
}

#[test]
fn given_empty_forwarded_header_when_resolved_then_peer_ip_used() {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static(""));

    assert_eq!(client_addr(&headers, peer()), "10.0.0.7");
}

#[test]
fn given_nothing_known_when_resolved_then_unknown() {
    assert_eq!(client_addr(&HeaderMap::new(), None), "unknown");
}
