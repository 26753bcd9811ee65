//! Single alert banner with auto-dismiss.
//!
//! At most one banner is visible. Showing a new one removes the old one,
//! and both the close button and the expiry timer go through
//! [`NotificationCenter::dismiss`], which only removes the banner it was
//! issued for.

use crate::ui::render::escape_html;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Loaded once into the page head by `App::setup`.
pub const ALERT_STYLESHEET: &str = r#"
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

.custom-alert {
    position: fixed;
    top: 20px;
    right: 20px;
    z-index: 9999;
    padding: 15px 20px;
    border-radius: 5px;
    color: white;
    font-family: 'Poppins', sans-serif;
    font-weight: 500;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1);
    animation: slideIn 0.3s ease;
}

.custom-alert.alert-success { background: #28a745; }
.custom-alert.alert-error { background: #dc3545; }

.alert-content {
    display: flex;
    align-items: center;
    gap: 10px;
}

.alert-close {
    background: none;
    border: none;
    color: white;
    font-size: 18px;
    cursor: pointer;
    margin-left: 10px;
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Success => "✓",
            AlertKind::Error => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

impl Banner {
    pub fn html(&self) -> String {
        format!(
            r#"<div class="custom-alert alert-{kind}" data-alert-id="{id}">
    <div class="alert-content">
        <span class="alert-icon">{icon}</span>
        <span class="alert-message">{message}</span>
        <button class="alert-close">×</button>
    </div>
</div>"#,
            kind = self.kind.as_str(),
            id = self.id,
            icon = self.kind.icon(),
            message = escape_html(&self.message),
        )
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    slot: Arc<Mutex<Option<Banner>>>,
    next_id: Arc<AtomicU64>,
    dismiss_after: Duration,
}

impl NotificationCenter {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            next_id: Arc::new(AtomicU64::new(1)),
            dismiss_after,
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Banner>> {
        // A panic while holding the lock cannot leave the slot half-written.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces any visible banner and schedules the new one's expiry.
    /// Must be called from within a tokio runtime.
    pub fn show(&self, kind: AlertKind, message: impl Into<String>) -> NotificationHandle {
        let banner = Banner {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
        };
        let id = banner.id;

        let previous = self.slot().replace(banner);
        if let Some(previous) = previous {
            tracing::debug!("Replacing alert #{}", previous.id);
        }
        tracing::debug!("Showing {} alert #{}", kind.as_str(), id);

        let center = self.clone();
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if center.dismiss(id) {
                tracing::debug!("Alert #{} expired", id);
            }
        });

        NotificationHandle {
            id,
            center: self.clone(),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(AlertKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(AlertKind::Error, message)
    }

    /// Removes banner `id` if it is still the visible one. Safe to call any
    /// number of times; returns whether something was removed.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut slot = self.slot();
        if slot.as_ref().map(|b| b.id) == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<Banner> {
        self.slot().clone()
    }

    pub fn visible_count(&self) -> usize {
        usize::from(self.slot().is_some())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

/// Close action of a shown banner.
#[derive(Debug, Clone)]
pub struct NotificationHandle {
    id: u64,
    center: NotificationCenter,
}

impl NotificationHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn close(&self) -> bool {
        self.center.dismiss(self.id)
    }
}
