///! Toast notifications and inline field errors
///!
///! `Toaster` is the browser-side notification collaborator: the login flow
///! pushes into it and `ToastStack` renders whatever is queued.

use leptos::*;
use sigil_common::auth::{NotificationKind, Notifier};

/// One queued notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Ordered toast list with stable ids
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Returns false when `id` was already gone
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Get icon for notification kind
pub fn toast_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✅",
        NotificationKind::Error => "❌",
    }
}

/// App-wide toast queue, provided as context
#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
    /// Auto-dismiss delay; 0 keeps toasts until closed
    duration_ms: u32,
}

impl Toaster {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            queue: create_rw_signal(ToastQueue::default()),
            duration_ms,
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.with(|q| q.items().to_vec())
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

impl Notifier for Toaster {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let Some(id) = self.queue.try_update(|q| q.push(kind, message)) else {
            return;
        };

        // Auto-dismiss after duration
        if self.duration_ms > 0 {
            let toaster = *self;
            set_timeout(
                move || toaster.dismiss(id),
                std::time::Duration::from_millis(self.duration_ms as u64),
            );
        }
    }
}

/// Renders every queued toast
#[component]
pub fn ToastStack(toaster: Toaster) -> impl IntoView {
    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || toaster.toasts()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <ToastItem toast=toast on_dismiss=Callback::new(move |_| toaster.dismiss(id))/>
                    }
                }
            />
        </div>
    }
}

/// Toast notification component
#[component]
pub fn ToastItem(
    /// Notification to display
    toast: Toast,
    /// Close button callback
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <div class={format!("toast {}", toast.kind.class())} role="status">
            <div class="toast-icon">{toast_icon(toast.kind)}</div>
            <div class="toast-message">{toast.message}</div>
            <button
                type="button"
                class="toast-close"
                on:click=move |_| on_dismiss.call(())
            >
                "✕"
            </button>
        </div>
    }
}

/// Inline error message for form fields
#[component]
pub fn FieldError(
    /// Error message
    message: String,
) -> impl IntoView {
    view! {
        <div class="field-error" role="alert">
            <span class="field-error-icon">"⚠️"</span>
            <span class="field-error-message">{message}</span>
        </div>
    }
}
