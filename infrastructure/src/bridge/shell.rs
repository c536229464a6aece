//! Shell bridge process and request correlation.
//!
//! The hosting shell (the desktop app owning the provider pages) runs a
//! bridge process. [`ShellBridge`] talks JSON-RPC to it over stdio: one
//! background task owns the read half and hands each response to the
//! request waiting for it, while writes are serialized through a mutex.

use super::error::{BridgeError, Result};
use super::protocol::{
    ExecuteParams, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, LogParams, METHOD_EXECUTE,
    METHOD_OPEN, NOTIFY_LOG, NOTIFY_PAGE_CLOSED, OpenParams,
};
use super::transport::{MessageKind, classify_message, encode_frame, read_frame};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, RwLock, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type PendingResponses = Arc<RwLock<HashMap<u64, oneshot::Sender<JsonRpcResponse>>>>;
type Writer = Mutex<BufWriter<Box<dyn AsyncWrite + Send + Unpin>>>;

pub struct ShellBridge {
    /// Background reader task handle.
    reader_handle: JoinHandle<()>,

    /// Request-response correlation (request_id -> oneshot sender).
    pending_responses: PendingResponses,

    writer: Writer,

    /// Bridge process (killed on Drop to prevent orphans).
    child: Option<Child>,

    request_timeout: Duration,
}

impl ShellBridge {
    /// Start the bridge process and connect to its stdio.
    pub fn spawn(command: &str, args: &[String], request_timeout: Duration) -> Result<Arc<Self>> {
        debug!("Spawning shell bridge: {} {}", command, args.join(" "));

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;
        let stdout = child.stdout.take().ok_or_else(|| {
            BridgeError::Io(std::io::Error::other("Failed to capture stdout"))
        })?;
        let stdin = child.stdin.take().ok_or_else(|| {
            BridgeError::Io(std::io::Error::other("Failed to capture stdin"))
        })?;

        info!("Shell bridge started (pid {:?})", child.id());
        Ok(Self::build(stdout, stdin, Some(child), request_timeout))
    }

    /// Connect over already open streams.
    pub fn from_streams<R, W>(reader: R, writer: W, request_timeout: Duration) -> Arc<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self::build(reader, writer, None, request_timeout)
    }

    fn build<R, W>(
        reader: R,
        writer: W,
        child: Option<Child>,
        request_timeout: Duration,
    ) -> Arc<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let pending_responses: PendingResponses = Arc::new(RwLock::new(HashMap::new()));
        let pending_bg = Arc::clone(&pending_responses);
        let reader_handle = tokio::spawn(async move {
            Self::reader_loop(BufReader::new(reader), pending_bg).await;
        });

        let writer: Box<dyn AsyncWrite + Send + Unpin> = Box::new(writer);
        Arc::new(Self {
            reader_handle,
            pending_responses,
            writer: Mutex::new(BufWriter::new(writer)),
            child,
            request_timeout,
        })
    }

    /// Background reader loop, single owner of the read half.
    ///
    /// When it exits every pending sender is dropped, so waiting requests
    /// observe [`BridgeError::TransportClosed`].
    async fn reader_loop<R>(mut reader: BufReader<R>, pending_responses: PendingResponses)
    where
        R: AsyncRead + Unpin,
    {
        let mut line = String::new();

        loop {
            let body = match read_frame(&mut reader, &mut line).await {
                Ok(body) => body,
                Err(BridgeError::TransportClosed) => {
                    debug!("Bridge: stream closed");
                    break;
                }
                Err(e) => {
                    warn!("Bridge: failed to read frame: {}", e);
                    break;
                }
            };
            trace!("Bridge received: {}", String::from_utf8_lossy(&body));

            let json_value: serde_json::Value = match serde_json::from_slice(&body) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Bridge: failed to parse JSON: {}", e);
                    continue;
                }
            };

            match classify_message(&json_value) {
                MessageKind::Response => {
                    let response: JsonRpcResponse = match serde_json::from_value(json_value) {
                        Ok(r) => r,
                        Err(e) => {
                            warn!("Bridge: failed to parse response: {}", e);
                            continue;
                        }
                    };
                    let Some(id) = response.id else { continue };
                    let sender = pending_responses.write().await.remove(&id);
                    match sender {
                        Some(tx) => {
                            let _ = tx.send(response);
                        }
                        None => debug!("Bridge: no pending receiver for response id={}", id),
                    }
                }

                MessageKind::IncomingRequest { id } => {
                    debug!("Bridge: ignoring incoming request id={}", id);
                }

                MessageKind::Notification => {
                    match serde_json::from_value::<JsonRpcNotification>(json_value) {
                        Ok(notification) => Self::handle_notification(notification),
                        Err(e) => warn!("Bridge: failed to parse notification: {}", e),
                    }
                }
            }
        }

        info!("Bridge: reader loop ended, failing pending requests");
        pending_responses.write().await.clear();
    }

    fn handle_notification(notification: JsonRpcNotification) {
        match notification.method.as_str() {
            NOTIFY_LOG => {
                let Some(params) = notification
                    .params
                    .and_then(|p| serde_json::from_value::<LogParams>(p).ok())
                else {
                    return;
                };
                match params.level.as_str() {
                    "error" | "warn" => warn!("[shell] {}", params.message),
                    "info" => info!("[shell] {}", params.message),
                    _ => debug!("[shell] {}", params.message),
                }
            }
            NOTIFY_PAGE_CLOSED => {
                let provider = notification
                    .params
                    .as_ref()
                    .and_then(|p| p.get("provider"))
                    .and_then(|p| p.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                warn!("[{}] page closed by the shell", provider);
            }
            other => trace!("Bridge: ignoring notification method={}", other),
        }
    }

    /// Send a request and wait for its response, up to the request timeout.
    pub async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = JsonRpcRequest::new(method, Some(params));
        let request_id = request.id;
        let (tx, rx) = oneshot::channel();
        self.pending_responses.write().await.insert(request_id, tx);

        if let Err(e) = self.send_request(&request).await {
            self.pending_responses.write().await.remove(&request_id);
            return Err(e);
        }

        let response = match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => return Err(BridgeError::TransportClosed),
            Err(_) => {
                self.pending_responses.write().await.remove(&request_id);
                warn!("Bridge: {} (id={}) timed out", method, request_id);
                return Err(BridgeError::Timeout(self.request_timeout));
            }
        };

        if let Some(error) = response.error {
            return Err(BridgeError::RpcError {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(serde_json::Value::Null))
    }

    async fn send_request(&self, request: &JsonRpcRequest) -> Result<()> {
        let frame = encode_frame(request)?;
        trace!("Bridge sending: {} (id={})", request.method, request.id);

        let mut writer = self.writer.lock().await;
        writer.write_all(&frame).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Run `script` in the page of `provider` opened under `partition`
    pub async fn execute(
        &self,
        provider: &str,
        partition: &str,
        script: &str,
    ) -> Result<serde_json::Value> {
        let params = serde_json::to_value(ExecuteParams {
            provider,
            partition,
            script,
        })?;
        self.request(METHOD_EXECUTE, params).await
    }

    /// Ask the shell to open (or reuse) the page for `provider`
    pub async fn open(&self, provider: &str, partition: &str, url: &str) -> Result<()> {
        let params = serde_json::to_value(OpenParams {
            provider,
            partition,
            url,
        })?;
        let result = self.request(METHOD_OPEN, params).await?;
        if result.as_bool() == Some(false) {
            return Err(BridgeError::UnexpectedResponse(format!(
                "shell refused to open {}",
                url
            )));
        }
        Ok(())
    }
}

impl Drop for ShellBridge {
    fn drop(&mut self) {
        self.reader_handle.abort();
        if let Some(child) = self.child.as_mut() {
            debug!("ShellBridge dropping, killing bridge process");
            let _ = child.start_kill();
        }
    }
}
