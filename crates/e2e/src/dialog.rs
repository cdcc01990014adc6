//! Dialog interception
//!
//! Browsers surface `alert`/`confirm`/`prompt`/`beforeunload` as modal
//! dialogs that block the page until acknowledged. [`run_with_dialog_watch`]
//! runs an action with a temporary listener attached, accepts whatever
//! dialogs appear while it runs and reports what it saw.
//!
//! The listener is owned by a [`DialogWatch`] guard. It is registered before
//! the action starts and removed when the guard drops, including when an
//! outer test timeout cancels the whole future.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::error::{E2eError, E2eResult};

/// Kind of modal dialog raised by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
    BeforeUnload,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
            DialogKind::BeforeUnload => "beforeunload",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement capability attached to a raised dialog
#[async_trait]
pub trait DialogAck: Send + Sync {
    async fn accept(&self) -> E2eResult<()>;
    async fn dismiss(&self) -> E2eResult<()>;
}

/// A dialog currently blocking the page
#[derive(Clone)]
pub struct PendingDialog {
    kind: DialogKind,
    message: String,
    ack: Arc<dyn DialogAck>,
}

impl PendingDialog {
    pub fn new(kind: DialogKind, message: impl Into<String>, ack: Arc<dyn DialogAck>) -> Self {
        Self {
            kind,
            message: message.into(),
            ack,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub async fn accept(&self) -> E2eResult<()> {
        self.ack.accept().await
    }

    pub async fn dismiss(&self) -> E2eResult<()> {
        self.ack.dismiss().await
    }
}

impl fmt::Debug for PendingDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDialog")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

pub type DialogSender = mpsc::UnboundedSender<PendingDialog>;

/// Identifies a registered dialog listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Anything that raises dialog events: a browser page or a stand-in
pub trait DialogSource: Send + Sync {
    fn add_dialog_listener(&self, listener: DialogSender) -> ListenerId;
    fn remove_dialog_listener(&self, id: ListenerId);
}

/// Listener registry embedded by drivers
#[derive(Default)]
pub struct DialogListeners {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<ListenerId, DialogSender>>,
}

impl DialogListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: DialogSender) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().insert(id, listener);
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        self.listeners.lock().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hands the dialog to every live listener. Returns false when nobody
    /// received it; the caller is then responsible for dismissing it.
    pub fn dispatch(&self, dialog: PendingDialog) -> bool {
        let listeners = self.listeners.lock();
        let mut delivered = false;
        for sender in listeners.values() {
            if sender.send(dialog.clone()).is_ok() {
                delivered = true;
            }
        }
        delivered
    }
}

/// Scoped listener registration; deregisters on drop
pub struct DialogWatch<'a, S: DialogSource + ?Sized> {
    source: &'a S,
    id: ListenerId,
}

impl<'a, S: DialogSource + ?Sized> DialogWatch<'a, S> {
    pub fn register(source: &'a S, listener: DialogSender) -> Self {
        let id = source.add_dialog_listener(listener);
        debug!(?id, "Registered temporary dialog listener");
        Self { source, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<S: DialogSource + ?Sized> Drop for DialogWatch<'_, S> {
    fn drop(&mut self) {
        debug!(id = ?self.id, "Removing temporary dialog listener");
        self.source.remove_dialog_listener(self.id);
    }
}

/// What happened while an action ran under dialog surveillance
#[derive(Debug, Default)]
pub struct DialogInterception {
    pub was_visible: bool,

    /// Kind of the first dialog seen
    pub dialog_type: Option<DialogKind>,

    /// Message of the first dialog seen
    pub dialog_message: Option<String>,

    /// Whether an acknowledgement succeeded
    pub dialog_accepted: bool,

    /// Dialogs seen in total
    pub dialog_count: usize,

    /// The action's own error, or the acknowledgement error if the action
    /// succeeded
    pub action_error: Option<E2eError>,
}

impl fmt::Display for DialogInterception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{wasVisible: {}, dialogType: {}, dialogMessage: {}, dialogAccepted: {}, dialogCount: {}, actionError: {}}}",
            self.was_visible,
            self.dialog_type.map(|k| k.as_str()).unwrap_or("null"),
            self.dialog_message.as_deref().map(|m| format!("{:?}", m)).unwrap_or_else(|| "null".to_string()),
            self.dialog_accepted,
            self.dialog_count,
            self.action_error.as_ref().map(|e| e.to_string()).unwrap_or_else(|| "null".to_string()),
        )
    }
}

#[derive(Default)]
struct Recorder {
    outcome: DialogInterception,
    acknowledge_error: Option<E2eError>,
}

impl Recorder {
    async fn observe(&mut self, dialog: PendingDialog) {
        info!(kind = %dialog.kind(), dialog_message = %dialog.message(), "Dialog intercepted");

        self.outcome.dialog_count += 1;
        if !self.outcome.was_visible {
            self.outcome.was_visible = true;
            self.outcome.dialog_type = Some(dialog.kind());
            self.outcome.dialog_message = Some(dialog.message().to_string());
        }

        match dialog.accept().await {
            Ok(()) => {
                self.outcome.dialog_accepted = true;
                debug!("Dialog accepted");
            }
            Err(e) => {
                error!("Error accepting dialog: {}", e);
                if self.acknowledge_error.is_none() {
                    self.acknowledge_error = Some(e);
                }
            }
        }
    }

    fn finish(mut self, action_result: E2eResult<()>) -> DialogInterception {
        self.outcome.action_error = match action_result {
            Ok(()) => self.acknowledge_error,
            Err(e) => Some(e),
        };
        self.outcome
    }
}

/// Runs `action` with a dialog listener attached and reports what appeared.
///
/// Never fails: action and acknowledgement errors land in
/// [`DialogInterception::action_error`]. `timeout_hint` is only logged; a
/// bounded wait has to come from the action itself or the caller.
#[instrument(level = "debug", skip_all)]
pub async fn run_with_dialog_watch<S, F, Fut>(
    source: &S,
    action: F,
    timeout_hint: Option<Duration>,
) -> DialogInterception
where
    S: DialogSource + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = E2eResult<()>>,
{
    if let Some(hint) = timeout_hint {
        debug!(timeout_ms = hint.as_millis() as u64, "Timeout hint is advisory and not enforced");
    }

    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut recorder = Recorder::default();

    let watch = DialogWatch::register(source, sender);

    debug!("Executing provided action");
    let action = action();
    tokio::pin!(action);

    let action_result = loop {
        tokio::select! {
            biased;
            Some(dialog) = receiver.recv() => recorder.observe(dialog).await,
            result = &mut action => break result,
        }
    };

    match &action_result {
        Ok(()) => debug!("Action completed successfully"),
        Err(e) => error!("Error occurred during provided action: {}", e),
    }

    drop(watch);

    // Dialogs raised just before deregistration are still queued.
    while let Ok(dialog) = receiver.try_recv() {
        recorder.observe(dialog).await;
    }

    recorder.finish(action_result)
}
