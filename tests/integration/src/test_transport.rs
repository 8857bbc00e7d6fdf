//! Transport and retry integration tests.

#[cfg(test)]
mod tests {
    use rustyaws_core::HttpRequest;
    use rustyaws_http::{ErrorKind, HttpTransport, RetryingTransport, Transport, TransportError};

    use crate::{Behavior, MockPeer, unreachable_host};

    fn post(body: &'static str) -> HttpRequest {
        HttpRequest::new("POST", "/")
            .with_header("Content-Type", "application/x-www-form-urlencoded; charset=utf-8")
            .with_body(body)
    }

    #[tokio::test]
    async fn test_should_return_error_status_as_response() {
        let peer = MockPeer::start(vec![Behavior::Respond(404, "<Error>NoSuchDomain</Error>")])
            .await
            .unwrap();
        let transport = HttpTransport::new("http", peer.host()).unwrap();

        let resp = transport.send_request(&post("Action=DomainMetadata")).await.unwrap();

        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body, "<Error>NoSuchDomain</Error>");
        assert_eq!(resp.headers.get("content-type").map(String::as_str), Some("text/xml"));
    }

    #[tokio::test]
    async fn test_should_deliver_verb_path_headers_and_body() {
        let peer = MockPeer::start(vec![Behavior::Respond(200, "ok")]).await.unwrap();
        let transport = HttpTransport::new("http", peer.host()).unwrap();

        transport.send_request(&post("Action=ListDomains")).await.unwrap();

        let requests = peer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_line(), "POST / HTTP/1.1");
        assert_eq!(
            requests[0].header("content-type"),
            Some("application/x-www-form-urlencoded; charset=utf-8")
        );
        assert_eq!(requests[0].body, b"Action=ListDomains");
    }

    #[tokio::test]
    async fn test_should_name_unreachable_host_and_not_retry() {
        let host = unreachable_host().await.unwrap();
        let transport = RetryingTransport::new(HttpTransport::new("http", host.as_str()).unwrap());

        let err = transport.send_request(&post("")).await.unwrap_err();

        assert!(matches!(err, TransportError::Io { .. }));
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(err.to_string().contains(&host), "{err}");
    }

    #[tokio::test]
    async fn test_should_classify_hang_up_as_unexpected_eof() {
        let peer = MockPeer::start(vec![Behavior::HangUp]).await.unwrap();
        let transport = HttpTransport::new("http", peer.host()).unwrap();

        let err = transport.send_request(&post("Action=ListDomains")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedEof, "{err}");
        assert_eq!(peer.connections(), 1);
    }

    #[tokio::test]
    async fn test_should_retry_hang_ups_until_success() {
        let peer = MockPeer::start(vec![
            Behavior::HangUp,
            Behavior::HangUp,
            Behavior::Respond(200, "<ListDomainsResponse/>"),
        ])
        .await
        .unwrap();
        let transport = RetryingTransport::new(HttpTransport::new("http", peer.host()).unwrap());

        let resp = transport.send_request(&post("Action=ListDomains")).await.unwrap();

        assert_eq!(resp.status_code, 200);
        assert_eq!(peer.requests().len(), 3);
        assert!(peer.requests().iter().all(|r| r.body == b"Action=ListDomains"));
    }

    #[tokio::test]
    async fn test_should_give_up_after_three_hang_ups() {
        let peer = MockPeer::start(vec![Behavior::HangUp]).await.unwrap();
        let transport = RetryingTransport::new(HttpTransport::new("http", peer.host()).unwrap());

        let err = transport.send_request(&post("Action=ListDomains")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedEof, "{err}");
        assert_eq!(peer.requests().len(), 3);
    }
}
