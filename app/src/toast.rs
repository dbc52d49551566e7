use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
            Self::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Notifications currently on screen, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
}

impl Toasts {
    pub fn provide() -> Self {
        let toasts = Self {
            queue: RwSignal::new(ToastQueue::default()),
        };
        provide_context(toasts);
        toasts
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Error => tracing::warn!("{}", message),
            _ => tracing::debug!("{}", message),
        }

        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, message));
        self.schedule_dismiss(id);
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let queue = self.queue;
        set_timeout(
            move || queue.update(|q| q.dismiss(id)),
            std::time::Duration::from_millis(crate::config::TOAST_DURATION_MS),
        );
    }

    // Server-rendered toasts never reach the client; nothing to expire.
    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                let:toast
            >
                <div class=toast.kind.class() role="status">
                    <span>{toast.message.clone()}</span>
                    <button
                        type="button"
                        class="toast-close"
                        on:click=move |_| toasts.dismiss(toast.id)
                    >
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}
