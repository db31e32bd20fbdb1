//! Toast lifecycle management.
//!
//! The store keeps the ordered list of visible toasts (insertion order is
//! display order) and one cancellable expiry task per expiring toast.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::toast::{Toast, ToastId, ToastKind};

/// Lifetime of a toast when the caller does not pick one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

/// What a zero duration means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroDuration {
    /// Schedule removal like any other duration; the toast goes on the next
    /// timer turn.
    #[default]
    ExpireImmediately,
    /// Never auto-expire; the toast stays until dismissed.
    Sticky,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    pub default_duration: Duration,
    pub zero_duration: ZeroDuration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            zero_duration: ZeroDuration::default(),
        }
    }
}

/// Handle to the application's toast list. Clones share the same list.
///
/// Every mutation is visible to readers as soon as the call returns.
#[derive(Debug, Clone)]
pub struct ToastStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: ToastConfig,
    next_id: AtomicU64,
    toasts: watch::Sender<Vec<Toast>>,
    timers: Mutex<HashMap<ToastId, JoinHandle<()>>>,
}

impl ToastStore {
    pub fn new(config: ToastConfig) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                config,
                next_id: AtomicU64::new(1),
                toasts,
                timers: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &ToastConfig {
        &self.inner.config
    }

    /// Show a success toast for the default duration.
    pub fn notify(&self, message: impl Into<String>) -> ToastId {
        self.notify_with(message, ToastKind::default(), self.inner.config.default_duration)
    }

    /// Show a toast and schedule its removal after `duration`.
    ///
    /// Returns without waiting. Must be called within a Tokio runtime unless
    /// the zero-duration policy makes the toast sticky.
    pub fn notify_with(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> ToastId {
        let lifetime = match (duration.is_zero(), self.inner.config.zero_duration) {
            (true, ZeroDuration::Sticky) => None,
            _ => Some(duration),
        };
        self.push(message.into(), kind, lifetime)
    }

    /// Show a toast that stays until dismissed.
    pub fn notify_sticky(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.push(message.into(), kind, None)
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.notify_with(message, ToastKind::Success, self.inner.config.default_duration)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.notify_with(message, ToastKind::Error, self.inner.config.default_duration)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.notify_with(message, ToastKind::Warning, self.inner.config.default_duration)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.notify_with(message, ToastKind::Info, self.inner.config.default_duration)
    }

    /// Remove a toast and cancel its expiry.
    ///
    /// Returns `true` if the toast was still visible. Unknown, expired and
    /// already dismissed ids are a no-op.
    pub fn dismiss(&self, id: ToastId) -> bool {
        if let Some(timer) = self.inner.lock_timers().remove(&id) {
            timer.abort();
        }
        let removed = self.inner.remove(id);
        if removed {
            tracing::debug!(%id, "toast dismissed");
        }
        removed
    }

    /// Remove every toast and cancel every pending expiry.
    pub fn clear(&self) {
        for (_, timer) in self.inner.lock_timers().drain() {
            timer.abort();
        }
        self.inner.toasts.send_if_modified(|toasts| {
            let had_any = !toasts.is_empty();
            toasts.clear();
            had_any
        });
    }

    /// Snapshot of the visible toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    /// Receive every change to the visible list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.toasts.subscribe()
    }

    pub fn get(&self, id: ToastId) -> Option<Toast> {
        self.inner.toasts.borrow().iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.toasts.borrow().is_empty()
    }

    /// Number of expiry tasks still pending.
    pub fn pending_timers(&self) -> usize {
        self.inner.lock_timers().len()
    }

    fn push(&self, message: String, kind: ToastKind, duration: Option<Duration>) -> ToastId {
        let id = ToastId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.toasts.send_modify(|toasts| {
            toasts.push(Toast {
                id,
                message,
                kind,
                duration,
            })
        });

        if let Some(duration) = duration {
            // Hold the lock across spawn so a zero-length timer cannot run
            // before its handle is registered.
            let mut timers = self.inner.lock_timers();
            let weak = Arc::downgrade(&self.inner);
            timers.insert(id, tokio::spawn(expire_after(weak, id, duration)));
            tracing::debug!(%id, %kind, ?duration, "toast scheduled");
        } else {
            tracing::debug!(%id, %kind, "sticky toast shown");
        }

        id
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

async fn expire_after(store: Weak<Inner>, id: ToastId, duration: Duration) {
    tokio::time::sleep(duration).await;

    let Some(inner) = store.upgrade() else {
        return;
    };
    inner.lock_timers().remove(&id);
    if inner.remove(id) {
        tracing::debug!(%id, "toast expired");
    }
}

impl Inner {
    fn lock_timers(&self) -> MutexGuard<'_, HashMap<ToastId, JoinHandle<()>>> {
        // The map stays consistent even if a holder panicked.
        self.timers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn remove(&self, id: ToastId) -> bool {
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        })
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let timers = self.timers.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        for (_, timer) in timers.drain() {
            timer.abort();
        }
    }
}
