use crate::components_impl::{
    application_status_badge_class, application_status_label, trip_status_badge_class,
    trip_status_label,
};
use crate::error::Result as ApiResult;
use crate::toast::Toasts;
use crate::types::{ApplicationStatus, TripStatus, Upload};
use leptos::prelude::*;
use std::future::Future;

/// Browser confirm dialog. Without a browser there is nobody to ask.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        true
    }
}

/// Await a load, toasting `failure` if it goes wrong.
///
/// Resources keep the error as a `String` so the value stays `Clone`.
pub async fn load_or_toast<T>(
    fut: impl Future<Output = ApiResult<T>>,
    toasts: Toasts,
    failure: &'static str,
) -> Result<T, String> {
    fut.await.map_err(|e| {
        tracing::warn!("{}: {}", failure, e);
        toasts.error(failure);
        e.to_string()
    })
}

/// Read the file picked in an `<input type="file">` into memory.
pub fn on_file_selected(ev: &leptos::ev::Event, set_upload: WriteSignal<Option<Upload>>, toasts: Toasts) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            set_upload.set(None);
            return;
        };

        leptos::task::spawn_local(async move {
            match read_file(file).await {
                Ok(upload) => set_upload.set(Some(upload)),
                Err(message) => toasts.error(message),
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (ev, toasts);
        set_upload.set(None);
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file(file: web_sys::File) -> Result<Upload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("Could not read {}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(Upload {
        file_name: file.name(),
        mime,
        bytes,
    })
}

#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-3 py-16 text-surface-500">
            <svg class="w-10 h-10 animate-spin text-primary-600" fill="none" viewBox="0 0 24 24">
                <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"/>
                <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"/>
            </svg>
            {label.map(|l| view! { <p class="text-sm">{l}</p> })}
        </div>
    }
}

#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="card text-center py-12">
            <p class="text-sm text-surface-500">{message}</p>
        </div>
    }
}

#[component]
pub fn ErrorNotice(message: String) -> impl IntoView {
    view! { <p class="text-danger-600 py-6 text-center">"Error: " {message}</p> }
}

#[component]
pub fn PageHeader(title: &'static str, #[prop(optional)] subtitle: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="mb-6 border-b pb-4">
            <h1 class="text-2xl font-bold text-surface-900">{title}</h1>
            {subtitle.map(|s| view! { <p class="mt-1 text-sm text-surface-500">{s}</p> })}
        </div>
    }
}

#[component]
pub fn TripStatusBadge(status: TripStatus) -> impl IntoView {
    view! { <span class=trip_status_badge_class(status)>{trip_status_label(status)}</span> }
}

#[component]
pub fn ApplicationStatusBadge(status: ApplicationStatus) -> impl IntoView {
    view! {
        <span class=application_status_badge_class(status)>{application_status_label(status)}</span>
    }
}

#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop" on:click=move |_| on_close()>
            <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header flex items-center justify-between">
                    <h2 class="text-xl font-semibold text-surface-900">{title}</h2>
                    <button
                        type="button"
                        class="btn-ghost p-2 -mr-2 rounded-lg"
                        on:click=move |_| on_close()
                    >
                        <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                        </svg>
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Read-only view of the notes a passenger left for the driver.
#[component]
pub fn NotesModal(
    notes: ReadSignal<Option<String>>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <Show when=move || notes.with(Option::is_some)>
            <Modal title="Notes for driver" on_close=on_close>
                <div class="modal-body">
                    <p class="whitespace-pre-wrap text-surface-700">
                        {move || notes.get().unwrap_or_default()}
                    </p>
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close()>
                        "Close"
                    </button>
                </div>
            </Modal>
        </Show>
    }
}

#[component]
pub fn NotesButton(notes: String, set_notes: WriteSignal<Option<String>>) -> impl IntoView {
    if notes.trim().is_empty() {
        view! { <span class="text-surface-400">"-"</span> }.into_any()
    } else {
        view! {
            <button
                type="button"
                class="btn-ghost btn-sm"
                on:click=move |_| set_notes.set(Some(notes.clone()))
            >
                "View notes"
            </button>
        }
        .into_any()
    }
}
