use scrobblecli::{
    Error,
    lastfm::{HttpTransport, Params, Transport},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

/// Serves one canned HTTP response on a local port.
///
/// Returns the endpoint URL and a handle yielding the raw request text.
async fn serve_once(status: &str, content_type: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request_complete(&request) {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8(request).unwrap()
    });

    (format!("http://{addr}/2.0/"), handle)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(end) = text.find("\r\n\r\n") else {
        return false;
    };
    let length = text[..end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    request.len() >= end + 4 + length
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_get_sends_query_and_decodes_error_status_body() {
    let (url, server) = serve_once(
        "400 Bad Request",
        "application/json",
        r#"{"error":6,"message":"The artist you supplied could not be found"}"#,
    )
    .await;
    let transport = HttpTransport::new(&url).unwrap();

    let body = transport
        .get(&params(&[("method", "artist.getTopTracks"), ("artist", "Nobody")]))
        .await
        .unwrap();

    assert_eq!(body["error"], 6);
    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /2.0/?"));
    assert!(request_line.contains("method=artist.getTopTracks"));
    assert!(request_line.contains("artist=Nobody"));
    assert!(request.to_lowercase().contains("user-agent: scrobblecli/"));
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let (url, server) = serve_once("200 OK", "text/html", "<html>maintenance</html>").await;
    let transport = HttpTransport::new(&url).unwrap();

    let err = transport
        .get(&params(&[("method", "auth.getToken")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_post_sends_form_body() {
    let (url, server) = serve_once(
        "200 OK",
        "application/json",
        r#"{"scrobbles":{"@attr":{"accepted":1,"ignored":0}}}"#,
    )
    .await;
    let transport = HttpTransport::new(&url).unwrap();

    let body = transport
        .post(&params(&[
            ("method", "track.scrobble"),
            ("artist", "Portishead"),
            ("track", "Glory Box"),
        ]))
        .await
        .unwrap();

    assert_eq!(body["scrobbles"]["@attr"]["accepted"], 1);
    let request = server.await.unwrap();
    let (head, form) = request.split_once("\r\n\r\n").unwrap();
    assert!(head.starts_with("POST /2.0/ "));
    assert!(
        head.to_lowercase()
            .contains("content-type: application/x-www-form-urlencoded")
    );

    let mut fields: Vec<&str> = form.split('&').collect();
    fields.sort_unstable();
    assert_eq!(
        fields,
        vec!["artist=Portishead", "method=track.scrobble", "track=Glory+Box"]
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport = HttpTransport::new(&format!("http://{addr}/2.0/")).unwrap();

    let err = transport
        .post(&params(&[("method", "track.scrobble")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
