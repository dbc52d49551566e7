use crate::components::common::{
    EmptyState, ErrorNotice, Modal, PageHeader, Spinner, confirm, load_or_toast,
};
use crate::components_impl::total_pages;
use crate::config::LOCATIONS_PAGE_SIZE;
use crate::store::use_user_store;
use crate::types::{Location, LocationForm};
use leptos::prelude::*;

/// Modal state: `Some(None)` creates, `Some(Some(loc))` edits.
type Editing = Option<Option<Location>>;

#[component]
pub fn LocationsPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let (page, set_page) = signal(1u32);
    let locations = LocalResource::new(move || {
        let client = store.client();
        let page = page.get();
        async move {
            load_or_toast(
                client.locations_page(page, LOCATIONS_PAGE_SIZE),
                toasts,
                "Failed to load locations.",
            )
            .await
        }
    });
    let (editing, set_editing) = signal::<Editing>(None);

    let delete = move |location: Location| {
        if !confirm(&format!("Delete {}? This cannot be undone.", location.name)) {
            return;
        }
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.delete_location(location.id).await {
                Ok(()) => {
                    toasts.success("The location has been deleted.");
                    locations.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <PageHeader title="Locations" subtitle="Cities that routes start from and lead to"/>
                <button type="button" class="btn-primary" on:click=move |_| set_editing.set(Some(None))>
                    "Add location"
                </button>
            </div>

            <Suspense fallback=|| view! { <Spinner label="Loading locations..."/> }>
                {move || {
                    locations
                        .get()
                        .map(|result| match result {
                            Ok((items, count)) => {
                                let pages = total_pages(count, LOCATIONS_PAGE_SIZE);
                                view! {
                                    <LocationsTable
                                        locations=items
                                        on_edit=move |loc: Location| set_editing.set(Some(Some(loc)))
                                        on_delete=delete
                                    />
                                    <Pagination page=page set_page=set_page pages=pages/>
                                }
                                    .into_any()
                            }
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>

            <LocationModal
                editing=editing
                on_close=move || set_editing.set(None)
                on_saved=move || {
                    set_editing.set(None);
                    locations.refetch();
                }
            />
        </div>
    }
}

#[component]
fn LocationsTable(
    locations: Vec<Location>,
    on_edit: impl Fn(Location) + 'static + Copy,
    on_delete: impl Fn(Location) + 'static + Copy,
) -> impl IntoView {
    if locations.is_empty() {
        return view! { <EmptyState message="No locations yet."/> }.into_any();
    }

    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"#"</th>
                        <th class="table-header-cell">"Name"</th>
                        <th class="table-header-cell text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {locations
                        .into_iter()
                        .map(|location| {
                            let for_edit = location.clone();
                            let for_delete = location.clone();
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell text-surface-500">{location.pk}</td>
                                    <td class="table-cell font-medium">{location.name}</td>
                                    <td class="table-cell">
                                        <div class="flex justify-end gap-2">
                                            <button
                                                type="button"
                                                class="btn-ghost btn-sm"
                                                on:click=move |_| on_edit(for_edit.clone())
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                type="button"
                                                class="btn-ghost btn-sm text-danger-600"
                                                on:click=move |_| on_delete(for_delete.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_any()
}

#[component]
fn Pagination(page: ReadSignal<u32>, set_page: WriteSignal<u32>, pages: u32) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <button
                type="button"
                class="btn-secondary btn-sm"
                disabled=move || page.get() <= 1
                on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            <span class="text-sm text-surface-600">{move || format!("Page {} of {}", page.get(), pages)}</span>
            <button
                type="button"
                class="btn-secondary btn-sm"
                disabled=move || page.get() >= pages
                on:click=move |_| set_page.update(|p| *p = (*p + 1).min(pages))
            >
                "Next"
            </button>
        </div>
    }
}

#[component]
fn LocationModal(
    editing: ReadSignal<Editing>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_saved: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let (name, set_name) = signal(String::new());
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        if let Some(current) = editing.get() {
            set_name.set(current.map(|l| l.name).unwrap_or_default());
        }
    });

    let is_edit = move || editing.with(|e| matches!(e, Some(Some(_))));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = LocationForm {
            name: name.get_untracked().trim().to_string(),
        };
        if form.name.is_empty() {
            toasts.error("Location name is required.");
            return;
        }
        let target = editing.get_untracked().flatten().map(|l| l.id);

        set_saving.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            let result = match target {
                Some(id) => client.update_location(id, &form).await,
                None => client.create_location(&form).await,
            };
            match result {
                Ok(_) => {
                    toasts.success(if target.is_some() {
                        "Location updated successfully."
                    } else {
                        "Location added successfully."
                    });
                    on_saved();
                }
                Err(e) => toasts.error(e.to_string()),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Show when=move || editing.with(Option::is_some)>
            <Modal
                title=if is_edit() { "Edit location" } else { "Add location" }
                on_close=on_close
            >
                <form on:submit=submit>
                    <div class="modal-body">
                        <div class="form-group">
                            <label class="form-label form-label-required">"Name"</label>
                            <input
                                type="text"
                                class="form-input"
                                prop:value=name
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="btn-secondary" on:click=move |_| on_close()>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Modal>
        </Show>
    }
}
