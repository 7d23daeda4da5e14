//! The server binary exits cleanly when sent SIGTERM
#![cfg(unix)]

use serde_json::Value;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

fn server(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hello-mcp-server"));
    command
        .args(["--config", "/nonexistent/hello.json"])
        .args(args)
        .env_remove("HELLO_MCP_PORT")
        .env_remove("HELLO_MCP_TRANSPORT")
        .env_remove("HELLO_MCP_DEBUG")
        .env_remove("HELLO_MCP_HOST")
        .stderr(Stdio::null())
        .kill_on_drop(true);
    command
}

async fn terminate(mut child: Child) -> ExitStatus {
    // Signal handlers are installed once the transport is polled
    tokio::time::sleep(Duration::from_millis(200)).await;

    let pid = child.id().expect("server already exited");
    let kill = std::process::Command::new("kill")
        .args(["-TERM", &pid.to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("server did not exit after SIGTERM")
        .unwrap()
}

#[tokio::test]
async fn test_stdio_exits_zero_on_sigterm() {
    let mut child = server(&["--transport", "stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    // Keep stdin open so only the signal can end the session
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    stdin
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
        .await
        .unwrap();
    stdin.flush().await.unwrap();

    let mut line = String::new();
    stdout.read_line(&mut line).await.unwrap();
    let reply: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(reply["id"], 1);

    let status = terminate(child).await;
    assert_eq!(status.code(), Some(0));
    drop(stdin);
}

#[tokio::test]
async fn test_sse_exits_zero_on_sigterm() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let port_arg = port.to_string();
    let child = server(&["--transport", "sse", "--host", "127.0.0.1", "--port", &port_arg])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .spawn()
        .unwrap();

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    let mut healthy = false;
    for _ in 0..50 {
        if let Ok(response) = client.get(&url).send().await {
            assert_eq!(response.text().await.unwrap(), "OK");
            healthy = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(healthy, "server never became healthy");
    drop(client);

    let status = terminate(child).await;
    assert_eq!(status.code(), Some(0));
}
