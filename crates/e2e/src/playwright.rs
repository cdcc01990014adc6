//! Playwright browser automation
//!
//! The driver keeps one `node` process alive per page. A small bridge script
//! launches the browser, then serves JSON-line requests from stdin and writes
//! replies and `dialog` events to stdout. Replies are matched to callers by
//! request id, so requests may overlap (a dialog can be accepted while the
//! click that raised it is still pending).

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command as TokioCommand};
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use tracing::{debug, info, trace, warn};

use crate::config::Viewport;
use crate::dialog::{DialogAck, DialogKind, DialogListeners, DialogSender, DialogSource, ListenerId, PendingDialog};
use crate::driver::{OptionBy, PageDriver, WaitState};
use crate::error::{E2eError, E2eResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub browser: Browser,

    /// Branded browser channel (`chrome`, `msedge`)
    pub channel: Option<String>,

    pub headless: bool,

    /// Fixed viewport; None launches maximized
    pub viewport: Option<Viewport>,

    /// Timeout passed to element actions
    pub action_timeout: Duration,

    /// Upper bound on any single bridge round trip
    pub request_timeout: Duration,

    pub node_binary: PathBuf,

    /// Directory holding the `playwright` package (NODE_PATH)
    pub node_path: Option<PathBuf>,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            browser: Browser::Chromium,
            channel: None,
            headless: true,
            viewport: Some(Viewport { width: 1280, height: 720 }),
            action_timeout: Duration::from_millis(5000),
            request_timeout: Duration::from_secs(60),
            node_binary: PathBuf::from("node"),
            node_path: None,
        }
    }
}

const BRIDGE_SCRIPT: &str = r#"
const playwright = require('playwright');
const readline = require('readline');

const send = (msg) => process.stdout.write(JSON.stringify(msg) + '\n');
const done = (promise) => promise.then(() => null);

(async () => {
  const browser = await playwright[__BROWSER__].launch(__LAUNCH__);
  const context = await browser.newContext(__CONTEXT__);
  const page = await context.newPage();
  const dialogs = new Map();
  let nextDialog = 1;

  page.on('dialog', (dialog) => {
    const dialogId = nextDialog++;
    dialogs.set(dialogId, dialog);
    send({ type: 'dialog', dialog_id: dialogId, kind: dialog.type(), message: dialog.message() });
  });

  const settle = (dialogId, respond) => {
    const dialog = dialogs.get(dialogId);
    if (!dialog) throw new Error(`dialog ${dialogId} already handled`);
    dialogs.delete(dialogId);
    return done(respond(dialog));
  };

  const ops = {
    goto: (m) => done(page.goto(m.url)),
    click: (m) => done(page.locator(m.selector).click({ timeout: m.timeout_ms })),
    fill: (m) => done(page.locator(m.selector).fill(m.value)),
    select_option: (m) => done(page.locator(m.selector).selectOption(
      m.value !== undefined ? { value: m.value } : { label: m.label })),
    check: (m) => done(page.locator(m.selector).check()),
    text_content: (m) => page.locator(m.selector).textContent(),
    wait_for: (m) => done(page.locator(m.selector).waitFor({ state: m.state, timeout: m.timeout_ms })),
    title: () => page.title(),
    url: async () => page.url(),
    wait_timeout: (m) => done(page.waitForTimeout(m.ms)),
    dialog_accept: (m) => settle(m.dialog_id, (d) => d.accept()),
    dialog_dismiss: (m) => settle(m.dialog_id, (d) => d.dismiss()),
    close: () => done(browser.close()),
  };

  const rl = readline.createInterface({ input: process.stdin });
  rl.on('line', async (line) => {
    let m;
    try { m = JSON.parse(line); } catch (e) { return; }
    try {
      const op = ops[m.op];
      if (!op) throw new Error(`unknown op ${m.op}`);
      const value = await op(m);
      send({ type: 'reply', id: m.id, ok: true, value: value === undefined ? null : value });
    } catch (e) {
      send({ type: 'reply', id: m.id, ok: false, error: String((e && e.message) || e) });
    }
    if (m.op === 'close') process.exit(0);
  });
  rl.on('close', () => browser.close().finally(() => process.exit(0)));
})().catch((e) => {
  console.error((e && e.stack) || e);
  process.exit(1);
});
"#;

/// Render the bridge script for a configuration
pub fn build_script(config: &PlaywrightConfig) -> E2eResult<String> {
    let mut launch = json!({ "headless": config.headless });
    if let Some(channel) = &config.channel {
        launch["channel"] = json!(channel);
    }
    if config.viewport.is_none() {
        launch["args"] = json!(["--start-maximized"]);
    }
    let context = json!({
        "baseURL": config.base_url,
        "viewport": config.viewport,
    });

    Ok(BRIDGE_SCRIPT
        .replace("__BROWSER__", &serde_json::to_string(config.browser.as_str())?)
        .replace("__LAUNCH__", &serde_json::to_string(&launch)?)
        .replace("__CONTEXT__", &serde_json::to_string(&context)?))
}

/// Check if Playwright is installed
pub fn check_playwright_installed() -> E2eResult<()> {
    let output = Command::new("npx")
        .args(["playwright", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match output {
        Ok(status) if status.success() => Ok(()),
        _ => Err(E2eError::PlaywrightNotFound),
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum BridgeOp {
    Goto {
        url: String,
    },
    Click {
        selector: String,
        timeout_ms: u64,
    },
    Fill {
        selector: String,
        value: String,
    },
    SelectOption {
        selector: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Check {
        selector: String,
    },
    TextContent {
        selector: String,
    },
    WaitFor {
        selector: String,
        state: WaitState,
        timeout_ms: u64,
    },
    Title,
    Url,
    WaitTimeout {
        ms: u64,
    },
    DialogAccept {
        dialog_id: u64,
    },
    DialogDismiss {
        dialog_id: u64,
    },
    Close,
}

impl BridgeOp {
    fn name(&self) -> &'static str {
        match self {
            BridgeOp::Goto { .. } => "goto",
            BridgeOp::Click { .. } => "click",
            BridgeOp::Fill { .. } => "fill",
            BridgeOp::SelectOption { .. } => "select_option",
            BridgeOp::Check { .. } => "check",
            BridgeOp::TextContent { .. } => "text_content",
            BridgeOp::WaitFor { .. } => "wait_for",
            BridgeOp::Title => "title",
            BridgeOp::Url => "url",
            BridgeOp::WaitTimeout { .. } => "wait_timeout",
            BridgeOp::DialogAccept { .. } => "dialog_accept",
            BridgeOp::DialogDismiss { .. } => "dialog_dismiss",
            BridgeOp::Close => "close",
        }
    }
}

#[derive(Serialize)]
struct BridgeRequest<'a> {
    id: u64,
    #[serde(flatten)]
    op: &'a BridgeOp,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BridgeMessage {
    Reply {
        id: u64,
        ok: bool,
        #[serde(default)]
        value: Value,
        #[serde(default)]
        error: Option<String>,
    },
    Dialog {
        dialog_id: u64,
        kind: DialogKind,
        message: String,
    },
}

type Reply = Result<Value, String>;
type BridgeWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Request side of the bridge protocol
struct Bridge {
    writer: AsyncMutex<BridgeWriter>,
    pending: parking_lot::Mutex<HashMap<u64, oneshot::Sender<Reply>>>,
    next_id: AtomicU64,
    request_timeout: Duration,
}

impl Bridge {
    async fn call(&self, op: BridgeOp) -> E2eResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let mut line = serde_json::to_vec(&BridgeRequest { id, op: &op })?;
        line.push(b'\n');
        trace!(id, op = op.name(), "bridge request");

        {
            let mut writer = self.writer.lock().await;
            let written = match writer.write_all(&line).await {
                Ok(()) => writer.flush().await,
                Err(e) => Err(e),
            };
            if let Err(e) = written {
                self.pending.lock().remove(&id);
                return Err(E2eError::BridgeClosed(e.to_string()));
            }
        }

        match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(reason))) => Err(E2eError::driver(op.name(), reason)),
            Ok(Err(_)) => Err(E2eError::BridgeClosed("browser process exited".to_string())),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(E2eError::Timeout(format!("bridge reply to {}", op.name())))
            }
        }
    }

    fn resolve(&self, id: u64, reply: Reply) {
        match self.pending.lock().remove(&id) {
            Some(tx) => {
                let _ = tx.send(reply);
            }
            None => debug!(id, "Reply for unknown or expired request"),
        }
    }

    /// Drops every waiting caller; they observe a closed bridge
    fn fail_pending(&self) {
        self.pending.lock().clear();
    }
}

struct BridgeDialogAck {
    bridge: Arc<Bridge>,
    dialog_id: u64,
}

#[async_trait]
impl DialogAck for BridgeDialogAck {
    async fn accept(&self) -> E2eResult<()> {
        self.bridge
            .call(BridgeOp::DialogAccept { dialog_id: self.dialog_id })
            .await
            .map(|_| ())
            .map_err(|e| E2eError::DialogAcknowledge(e.to_string()))
    }

    async fn dismiss(&self) -> E2eResult<()> {
        self.bridge
            .call(BridgeOp::DialogDismiss { dialog_id: self.dialog_id })
            .await
            .map(|_| ())
            .map_err(|e| E2eError::DialogAcknowledge(e.to_string()))
    }
}

async fn read_loop<R>(reader: R, bridge: Arc<Bridge>, listeners: Arc<DialogListeners>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => handle_line(&line, &bridge, &listeners),
            Ok(None) => break,
            Err(e) => {
                warn!("Bridge read error: {}", e);
                break;
            }
        }
    }
    debug!("Bridge output closed");
    bridge.fail_pending();
}

fn handle_line(line: &str, bridge: &Arc<Bridge>, listeners: &DialogListeners) {
    let message: BridgeMessage = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(_) => {
            debug!("[browser] {}", line);
            return;
        }
    };

    match message {
        BridgeMessage::Reply { id, ok, value, error } => {
            let reply = if ok {
                Ok(value)
            } else {
                Err(error.unwrap_or_else(|| "unknown error".to_string()))
            };
            bridge.resolve(id, reply);
        }
        BridgeMessage::Dialog { dialog_id, kind, message } => {
            let ack = Arc::new(BridgeDialogAck {
                bridge: bridge.clone(),
                dialog_id,
            });
            let dialog = PendingDialog::new(kind, message, ack.clone());
            if !listeners.dispatch(dialog) {
                // Unwatched dialogs are dismissed. The reply arrives on this
                // same loop, so the dismissal cannot be awaited here.
                debug!(dialog_id, %kind, "No dialog listener; dismissing");
                tokio::spawn(async move {
                    if let Err(e) = ack.dismiss().await {
                        warn!("Failed to dismiss dialog: {}", e);
                    }
                });
            }
        }
    }
}

/// Browser page driven through Playwright
pub struct PlaywrightDriver {
    bridge: Arc<Bridge>,
    listeners: Arc<DialogListeners>,
    child: parking_lot::Mutex<Option<Child>>,
    action_timeout: Duration,
    _script_dir: Option<tempfile::TempDir>,
}

impl PlaywrightDriver {
    /// Launch the browser and open a page
    pub async fn launch(config: PlaywrightConfig) -> E2eResult<Self> {
        check_playwright_installed()?;

        let script_dir = tempfile::tempdir()?;
        let script_path = script_dir.path().join("bridge.js");
        std::fs::write(&script_path, build_script(&config)?)?;

        let node_path = match &config.node_path {
            Some(path) => path.clone(),
            None => std::env::current_dir()?.join("node_modules"),
        };

        info!(
            browser = config.browser.as_str(),
            channel = config.channel.as_deref().unwrap_or("default"),
            headless = config.headless,
            "Launching browser"
        );

        let mut child = TokioCommand::new(&config.node_binary)
            .arg(&script_path)
            .env("NODE_PATH", &node_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                E2eError::Playwright(format!(
                    "Failed to spawn {}: {}",
                    config.node_binary.display(),
                    e
                ))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| E2eError::Playwright("bridge stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| E2eError::Playwright("bridge stdout unavailable".to_string()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!("[browser stderr] {}", line);
                }
            });
        }

        let mut driver = Self::from_streams(stdin, stdout, &config);
        driver.child = parking_lot::Mutex::new(Some(child));
        driver._script_dir = Some(script_dir);
        Ok(driver)
    }

    /// Wire the driver to an already running bridge
    fn from_streams<W, R>(writer: W, reader: R, config: &PlaywrightConfig) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
        R: AsyncRead + Send + Unpin + 'static,
    {
        let bridge = Arc::new(Bridge {
            writer: AsyncMutex::new(Box::new(writer)),
            pending: parking_lot::Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            request_timeout: config.request_timeout,
        });
        let listeners = Arc::new(DialogListeners::new());
        tokio::spawn(read_loop(reader, bridge.clone(), listeners.clone()));

        Self {
            bridge,
            listeners,
            child: parking_lot::Mutex::new(None),
            action_timeout: config.action_timeout,
            _script_dir: None,
        }
    }

    async fn call_unit(&self, op: BridgeOp) -> E2eResult<()> {
        self.bridge.call(op).await.map(|_| ())
    }

    async fn call_string(&self, op: BridgeOp) -> E2eResult<String> {
        let name = op.name();
        match self.bridge.call(op).await? {
            Value::String(s) => Ok(s),
            other => Err(E2eError::driver(name, format!("expected a string, got {}", other))),
        }
    }

    /// Ask the process to stop, then make sure it does
    fn terminate(&self) {
        let Some(mut child) = self.child.lock().take() else {
            return;
        };

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = child.id() {
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
            }
        }

        let _ = child.start_kill();
    }
}

#[async_trait]
impl PageDriver for PlaywrightDriver {
    async fn goto(&self, url: &str) -> E2eResult<()> {
        self.call_unit(BridgeOp::Goto { url: url.to_string() }).await
    }

    async fn click(&self, selector: &str) -> E2eResult<()> {
        self.call_unit(BridgeOp::Click {
            selector: selector.to_string(),
            timeout_ms: self.action_timeout.as_millis() as u64,
        })
        .await
    }

    async fn fill(&self, selector: &str, value: &str) -> E2eResult<()> {
        self.call_unit(BridgeOp::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
        })
        .await
    }

    async fn select_option(&self, selector: &str, option: &OptionBy) -> E2eResult<()> {
        let (value, label) = match option {
            OptionBy::Value(v) => (Some(v.clone()), None),
            OptionBy::Label(l) => (None, Some(l.clone())),
        };
        self.call_unit(BridgeOp::SelectOption {
            selector: selector.to_string(),
            value,
            label,
        })
        .await
    }

    async fn check(&self, selector: &str) -> E2eResult<()> {
        self.call_unit(BridgeOp::Check { selector: selector.to_string() }).await
    }

    async fn text_content(&self, selector: &str) -> E2eResult<Option<String>> {
        match self
            .bridge
            .call(BridgeOp::TextContent { selector: selector.to_string() })
            .await?
        {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(E2eError::driver("text_content", format!("unexpected value {}", other))),
        }
    }

    async fn wait_for(&self, selector: &str, state: WaitState, timeout: Duration) -> E2eResult<()> {
        self.call_unit(BridgeOp::WaitFor {
            selector: selector.to_string(),
            state,
            timeout_ms: timeout.as_millis() as u64,
        })
        .await
    }

    async fn title(&self) -> E2eResult<String> {
        self.call_string(BridgeOp::Title).await
    }

    async fn current_url(&self) -> E2eResult<String> {
        self.call_string(BridgeOp::Url).await
    }

    async fn wait_timeout(&self, duration: Duration) -> E2eResult<()> {
        self.call_unit(BridgeOp::WaitTimeout { ms: duration.as_millis() as u64 }).await
    }

    async fn close(&self) -> E2eResult<()> {
        match self.call_unit(BridgeOp::Close).await {
            Ok(()) | Err(E2eError::BridgeClosed(_)) => {}
            Err(e) => warn!("Browser close failed: {}", e),
        }

        let child = self.child.lock().take();
        if let Some(mut child) = child {
            if tokio::time::timeout(Duration::from_secs(5), child.wait()).await.is_err() {
                warn!("Browser process did not exit; killing");
                let _ = child.start_kill();
            }
        }
        Ok(())
    }
}

impl DialogSource for PlaywrightDriver {
    fn add_dialog_listener(&self, listener: DialogSender) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_dialog_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl Drop for PlaywrightDriver {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::run_with_dialog_watch;
    use tokio::io::{duplex, split, DuplexStream, ReadHalf, WriteHalf};

    /// Plays the node side of the protocol over an in-memory pipe
    struct FakeBridge {
        lines: tokio::io::Lines<BufReader<ReadHalf<DuplexStream>>>,
        writer: WriteHalf<DuplexStream>,
    }

    impl FakeBridge {
        async fn next_request(&mut self) -> Value {
            let line = self.lines.next_line().await.unwrap().unwrap();
            serde_json::from_str(&line).unwrap()
        }

        async fn send(&mut self, message: Value) {
            let mut line = serde_json::to_vec(&message).unwrap();
            line.push(b'\n');
            self.writer.write_all(&line).await.unwrap();
        }
    }

    fn connect() -> (PlaywrightDriver, FakeBridge) {
        let (driver_side, bridge_side) = duplex(64 * 1024);
        let (driver_read, driver_write) = split(driver_side);
        let (bridge_read, bridge_write) = split(bridge_side);
        let config = PlaywrightConfig {
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let driver = PlaywrightDriver::from_streams(driver_write, driver_read, &config);
        let fake = FakeBridge {
            lines: BufReader::new(bridge_read).lines(),
            writer: bridge_write,
        };
        (driver, fake)
    }

    #[test]
    fn test_build_script_embeds_options() {
        let config = PlaywrightConfig {
            browser: Browser::Firefox,
            channel: Some("msedge".to_string()),
            viewport: None,
            ..Default::default()
        };
        let script = build_script(&config).unwrap();
        assert!(script.contains(r#"playwright["firefox"]"#));
        assert!(script.contains(r#""channel":"msedge""#));
        assert!(script.contains("--start-maximized"));
        assert!(script.contains(r#""viewport":null"#));
        assert!(!script.contains("__LAUNCH__"));
    }

    #[test]
    fn test_request_wire_format() {
        let op = BridgeOp::Fill {
            selector: "#firstName".to_string(),
            value: "Ada".to_string(),
        };
        let json = serde_json::to_value(BridgeRequest { id: 7, op: &op }).unwrap();
        assert_eq!(json, json!({ "id": 7, "op": "fill", "selector": "#firstName", "value": "Ada" }));

        let json = serde_json::to_value(BridgeRequest { id: 8, op: &BridgeOp::Title }).unwrap();
        assert_eq!(json, json!({ "id": 8, "op": "title" }));
    }

    #[tokio::test]
    async fn test_replies_are_matched_by_id() {
        let (driver, mut fake) = connect();

        let bridge = tokio::spawn(async move {
            let request = fake.next_request().await;
            assert_eq!(request["op"], "url");
            fake.send(json!({ "type": "reply", "id": request["id"], "ok": true, "value": "https://qa-assessment.pages.dev/?firstName=Ada" }))
                .await;
            let request = fake.next_request().await;
            assert_eq!(request["op"], "click");
            fake.send(json!({ "type": "reply", "id": request["id"], "ok": false, "error": "Timeout 5000ms exceeded." }))
                .await;
            fake
        });

        let url = driver.current_url().await.unwrap();
        assert!(url.ends_with("firstName=Ada"));
        let err = driver.click("text=Submit").await.unwrap_err();
        assert!(matches!(err, E2eError::Driver { .. }));
        assert!(err.to_string().contains("Timeout 5000ms"));
        bridge.await.unwrap();
    }

    #[tokio::test]
    async fn test_dialog_during_click_is_accepted_through_bridge() {
        let (driver, mut fake) = connect();

        let bridge = tokio::spawn(async move {
            let click = fake.next_request().await;
            assert_eq!(click["op"], "click");
            fake.send(json!({ "type": "dialog", "dialog_id": 1, "kind": "alert", "message": "Please fill in all required fields" }))
                .await;

            let accept = fake.next_request().await;
            assert_eq!(accept["op"], "dialog_accept");
            assert_eq!(accept["dialog_id"], 1);
            fake.send(json!({ "type": "reply", "id": accept["id"], "ok": true, "value": null })).await;
            fake.send(json!({ "type": "reply", "id": click["id"], "ok": true, "value": null })).await;
            fake
        });

        let result = run_with_dialog_watch(&driver, || driver.click("text=Submit"), None).await;
        assert!(result.was_visible);
        assert_eq!(result.dialog_type, Some(DialogKind::Alert));
        assert!(result.dialog_accepted);
        assert!(result.action_error.is_none());
        assert!(driver.listeners.is_empty());
        bridge.await.unwrap();
    }

    #[tokio::test]
    async fn test_unwatched_dialog_is_dismissed() {
        let (_driver, mut fake) = connect();

        fake.send(json!({ "type": "dialog", "dialog_id": 3, "kind": "confirm", "message": "Leave?" }))
            .await;
        let dismiss = fake.next_request().await;
        assert_eq!(dismiss["op"], "dialog_dismiss");
        assert_eq!(dismiss["dialog_id"], 3);
    }

    #[tokio::test]
    async fn test_closed_bridge_fails_pending_calls() {
        let (driver, fake) = connect();
        drop(fake);
        let err = driver.title().await.unwrap_err();
        assert!(matches!(err, E2eError::BridgeClosed(_)));
    }
}
