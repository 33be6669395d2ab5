use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

use super::client::{FetchError, FetchResult, StatusFetcher, StatusReply, validate_status_code};
use super::outcome::RequestSpec;
use super::settings::ProbeSettings;

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

pub(crate) fn test_settings(base_url: &str, timeout: Duration) -> Result<ProbeSettings, String> {
    let mut settings = ProbeSettings::new(base_url).map_err(|err| err.to_string())?;
    settings.request_timeout = timeout;
    settings.connect_timeout = timeout;
    settings.grace_period = Duration::ZERO;
    Ok(settings)
}

pub(crate) fn output_lines(out: &[u8]) -> Result<Vec<String>, String> {
    let text = std::str::from_utf8(out).map_err(|err| format!("output not utf-8: {}", err))?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Aborts the accept loop when dropped.
pub(crate) struct ServerHandle {
    task: JoinHandle<()>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Local server answering `GET /{code}` with that status.
pub(crate) async fn spawn_status_server() -> Result<(String, ServerHandle), String> {
    spawn_status_server_hanging_on(&[]).await
}

/// Local server that accepts connections but never answers.
pub(crate) async fn spawn_hanging_server() -> Result<(String, ServerHandle), String> {
    spawn_server(|_| true).await
}

/// Like [`spawn_status_server`], but never answers requests for `hang_codes`.
pub(crate) async fn spawn_status_server_hanging_on(
    hang_codes: &[u16],
) -> Result<(String, ServerHandle), String> {
    let hang_codes = hang_codes.to_vec();
    spawn_server(move |code| code.is_some_and(|code| hang_codes.contains(&code))).await
}

async fn spawn_server<H>(should_hang: H) -> Result<(String, ServerHandle), String>
where
    H: Fn(Option<u16>) -> bool + Send + Sync + Clone + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle_client(stream, should_hang.clone()));
        }
    });

    Ok((format!("http://{}/", addr), ServerHandle { task }))
}

async fn handle_client<H>(mut stream: TcpStream, should_hang: H)
where
    H: Fn(Option<u16>) -> bool,
{
    let mut buffer = [0u8; 1024];
    let read = match stream.read(&mut buffer).await {
        Ok(read) => read,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default()).into_owned();
    let code = requested_code(&request);

    if should_hang(code) {
        tokio::time::sleep(Duration::from_secs(60)).await;
        return;
    }

    let status = code
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::BAD_REQUEST);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    if stream.write_all(response.as_bytes()).await.is_err() {
        return;
    }
    drop(stream.shutdown().await);
}

fn requested_code(request: &str) -> Option<u16> {
    let path = request.lines().next()?.split_whitespace().nth(1)?;
    path.trim_start_matches('/').parse().ok()
}

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Reply,
    StatusError,
    Timeout,
    Transport(&'static str),
}

/// In-memory [`StatusFetcher`] with per-code behaviour and delays.
#[derive(Debug)]
pub(crate) struct ScriptedFetcher {
    base_url: Url,
    script: HashMap<i64, (Duration, Scripted)>,
    started: AtomicUsize,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Result<Self, String> {
        let base_url = Url::parse("https://status.test/").map_err(|err| err.to_string())?;
        Ok(Self {
            base_url,
            script: HashMap::new(),
            started: AtomicUsize::new(0),
        })
    }

    pub(crate) fn with(mut self, code: i64, delay: Duration, behaviour: Scripted) -> Self {
        self.script.insert(code, (delay, behaviour));
        self
    }

    pub(crate) fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusFetcher for ScriptedFetcher {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch(&self, spec: RequestSpec) -> FetchResult {
        self.started.fetch_add(1, Ordering::SeqCst);
        let code = spec.code();
        let status = validate_status_code(code).map_err(FetchError::InvalidInput)?;
        let (delay, behaviour) = self
            .script
            .get(&code)
            .cloned()
            .unwrap_or((Duration::ZERO, Scripted::Reply));
        tokio::time::sleep(delay).await;
        match behaviour {
            Scripted::Reply => Ok(StatusReply { status }),
            Scripted::StatusError => Err(FetchError::Status {
                status,
                message: format!("HTTP status error ({})", status),
            }),
            Scripted::Timeout => Err(FetchError::Timeout { timeout: delay }),
            Scripted::Transport(message) => Err(FetchError::Transport {
                message: message.to_owned(),
            }),
        }
    }
}
