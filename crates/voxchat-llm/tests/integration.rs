use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use voxchat_core::{LlmConfig, LlmError};
use voxchat_llm::{LanguageModel, OllamaClient};

fn config(endpoint: String) -> LlmConfig {
    LlmConfig {
        endpoint,
        model: "llama2".to_string(),
        system_prompt: None,
    }
}

/// Serve one HTTP connection with the given status line and body,
/// writing the body in several flushes so the client sees it arrive
/// incrementally.
async fn serve_once(status: &'static str, body_parts: Vec<&'static [u8]>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the full request (headers plus content-length body)
        // before answering, so the client never sees a reset mid-write.
        let mut buf = vec![0u8; 4096];
        let mut request = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(header_end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
                let content_length: usize = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let body_len: usize = body_parts.iter().map(|p| p.len()).sum();
        let header = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status, body_len
        );
        if socket.write_all(header.as_bytes()).await.is_err() {
            return;
        }
        for part in body_parts {
            // The client may hang up early on error statuses.
            if socket.write_all(part).await.is_err() {
                return;
            }
            let _ = socket.flush().await;
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        socket.shutdown().await.ok();
    });

    format!("http://{}/api/generate", addr)
}

#[tokio::test]
async fn test_generate_reassembles_streamed_reply() {
    let endpoint = serve_once(
        "200 OK",
        vec![
            b"{\"response\":\"Hel\"}\n",
            b"{\"response\":\"lo\"}\n",
            b"{\"response\":\" world\"}\n",
            b"{\"done\":true}\n",
        ],
    )
    .await;

    let client = OllamaClient::new(&config(endpoint));
    let reply = client.generate("greet me").await.unwrap();
    assert_eq!(reply, "Hello world");
}

#[tokio::test]
async fn test_generate_tolerates_malformed_lines() {
    let endpoint = serve_once(
        "200 OK",
        vec![
            b"{\"response\":\"Hel\"}\n",
            b"not json at all\n",
            b"{\"response\":\"lo\"}\n",
            b"{\"response\":\" world\"}\n",
            b"{\"done\":true}\n",
        ],
    )
    .await;

    let client = OllamaClient::new(&config(endpoint));
    let reply = client.generate("greet me").await.unwrap();
    assert_eq!(reply, "Hello world");
}

#[tokio::test]
async fn test_generate_non_success_status_is_unreachable() {
    let endpoint = serve_once("500 Internal Server Error", vec![b"{}\n"]).await;

    let client = OllamaClient::new(&config(endpoint));
    match client.generate("hello").await {
        Err(LlmError::Unreachable(_)) => {}
        other => panic!("expected Unreachable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_connection_refused_is_unreachable() {
    // Bind a port, then drop the listener so connecting is refused.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OllamaClient::new(&config(format!("http://{}/api/generate", addr)));
    match client.generate("hello").await {
        Err(LlmError::Unreachable(_)) => {}
        other => panic!("expected Unreachable, got {:?}", other),
    }
}
