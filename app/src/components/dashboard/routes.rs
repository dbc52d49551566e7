use crate::api::RouteFormData;
use crate::components::common::{
    EmptyState, ErrorNotice, Modal, PageHeader, Spinner, confirm, load_or_toast,
};
use crate::components_impl::{
    RouteFormState, SelectOption, driver_options, extract_route_form_state, location_options,
    parse_select, route_label, toggle_id, validate_route_form, vehicle_options,
};
use crate::store::use_user_store;
use crate::types::Route;
use leptos::prelude::*;

/// Modal state: `Some(None)` creates, `Some(Some(route))` edits.
type Editing = Option<Option<Route>>;

#[component]
pub fn RoutesPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let routes = LocalResource::new(move || {
        let client = store.client();
        async move { load_or_toast(client.routes(), toasts, "Failed to load routes.").await }
    });
    let form_data = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.route_form_data(), toasts, "Failed to load route form data.").await
        }
    });
    let (editing, set_editing) = signal::<Editing>(None);

    let delete = move |route: Route| {
        if !confirm(&format!("Delete the route {}?", route_label(&route))) {
            return;
        }
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.delete_route(route.pk).await {
                Ok(()) => {
                    toasts.success("Route deleted successfully.");
                    routes.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <PageHeader title="Routes" subtitle="Fixed-price connections between locations"/>
                <button type="button" class="btn-primary" on:click=move |_| set_editing.set(Some(None))>
                    "Add route"
                </button>
            </div>

            <Suspense fallback=|| view! { <Spinner label="Loading routes..."/> }>
                {move || {
                    routes
                        .get()
                        .map(|result| match result {
                            Ok(list) => view! {
                                <RoutesTable
                                    routes=list
                                    on_edit=move |r: Route| set_editing.set(Some(Some(r)))
                                    on_delete=delete
                                />
                            }
                                .into_any(),
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>

            <Suspense fallback=|| ()>
                {move || {
                    form_data
                        .get()
                        .and_then(Result::ok)
                        .map(|data| view! {
                            <RouteModal
                                editing=editing
                                data=data
                                on_close=move || set_editing.set(None)
                                on_saved=move || {
                                    set_editing.set(None);
                                    routes.refetch();
                                }
                            />
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn RoutesTable(
    routes: Vec<Route>,
    on_edit: impl Fn(Route) + 'static + Copy,
    on_delete: impl Fn(Route) + 'static + Copy,
) -> impl IntoView {
    if routes.is_empty() {
        return view! { <EmptyState message="No routes yet."/> }.into_any();
    }

    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Pickup"</th>
                        <th class="table-header-cell">"Drop-off"</th>
                        <th class="table-header-cell">"Price"</th>
                        <th class="table-header-cell">"Drivers"</th>
                        <th class="table-header-cell">"Vehicles"</th>
                        <th class="table-header-cell text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {routes
                        .into_iter()
                        .map(|route| {
                            let for_edit = route.clone();
                            let for_delete = route.clone();
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium">{route.pickup.name}</td>
                                    <td class="table-cell font-medium">{route.drop.name}</td>
                                    <td class="table-cell">{route.price_af} " AF"</td>
                                    <td class="table-cell">{route.drivers.len()}</td>
                                    <td class="table-cell">{route.vehicles.len()}</td>
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
fn RouteModal(
    editing: ReadSignal<Editing>,
    data: RouteFormData,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_saved: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let form = RwSignal::new(RouteFormState::default());
    let (saving, set_saving) = signal(false);

    let locations = StoredValue::new(location_options(&data.locations));
    let drivers = StoredValue::new(driver_options(&data.profiles));
    let vehicles = StoredValue::new(vehicle_options(&data.vehicles));

    Effect::new(move |_| {
        if let Some(current) = editing.get() {
            form.set(extract_route_form_state(current.as_ref()));
        }
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.with_untracked(validate_route_form) {
            Ok(payload) => payload,
            Err(message) => {
                toasts.error(message);
                return;
            }
        };
        let target = editing.get_untracked().flatten().map(|r| r.pk);

        set_saving.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            let result = match target {
                Some(pk) => client.update_route(pk, &payload).await,
                None => client.create_route(&payload).await,
            };
            match result {
                Ok(_) => {
                    toasts.success(if target.is_some() {
                        "Route updated successfully."
                    } else {
                        "Route created successfully."
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
                title=if editing.with_untracked(|e| matches!(e, Some(Some(_)))) { "Edit route" } else { "Add route" }
                on_close=on_close
            >
                <form on:submit=submit>
                    <div class="modal-body space-y-4">
                        <div class="grid grid-cols-2 gap-4">
                            <LocationSelect
                                label="Pickup"
                                options=locations.get_value()
                                selected=Signal::derive(move || form.with(|f| f.pickup))
                                on_change=move |v| form.update(|f| f.pickup = v)
                            />
                            <LocationSelect
                                label="Drop-off"
                                options=locations.get_value()
                                selected=Signal::derive(move || form.with(|f| f.drop))
                                on_change=move |v| form.update(|f| f.drop = v)
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label form-label-required">"Price (AF)"</label>
                            <input
                                type="number"
                                min="0"
                                step="0.01"
                                class="form-input"
                                prop:value=move || form.with(|f| f.price_af.clone())
                                on:input=move |ev| form.update(|f| f.price_af = event_target_value(&ev))
                            />
                        </div>
                        <CheckboxList
                            label="Drivers"
                            options=drivers.get_value()
                            checked=Signal::derive(move || form.with(|f| f.drivers.clone()))
                            on_toggle=move |id| form.update(|f| toggle_id(&mut f.drivers, id))
                        />
                        <CheckboxList
                            label="Vehicles"
                            options=vehicles.get_value()
                            checked=Signal::derive(move || form.with(|f| f.vehicles.clone()))
                            on_toggle=move |id| form.update(|f| toggle_id(&mut f.vehicles, id))
                        />
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="btn-secondary" on:click=move |_| on_close()>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save route" }}
                        </button>
                    </div>
                </form>
            </Modal>
        </Show>
    }
}

#[component]
fn LocationSelect(
    label: &'static str,
    options: Vec<SelectOption>,
    selected: Signal<Option<i64>>,
    on_change: impl Fn(Option<i64>) + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label form-label-required">{label}</label>
            <select class="form-input" on:change=move |ev| on_change(parse_select(&event_target_value(&ev)))>
                <option value="">"Select a location"</option>
                {options
                    .into_iter()
                    .map(|o| {
                        let value = o.value;
                        view! {
                            <option value=value.to_string() selected=move || selected.get() == Some(value)>
                                {o.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn CheckboxList(
    label: &'static str,
    options: Vec<SelectOption>,
    checked: Signal<Vec<i64>>,
    on_toggle: impl Fn(i64) + 'static + Copy,
) -> impl IntoView {
    view! {
        <fieldset class="form-group">
            <legend class="form-label">{label}</legend>
            {if options.is_empty() {
                view! { <p class="text-sm text-surface-500">"Nothing to choose from yet."</p> }.into_any()
            } else {
                view! {
                    <div class="max-h-40 overflow-y-auto grid grid-cols-2 gap-1 border rounded-lg p-2">
                        {options
                            .into_iter()
                            .map(|o| {
                                let value = o.value;
                                view! {
                                    <label class="flex items-center gap-2 text-sm">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || checked.with(|ids| ids.contains(&value))
                                            on:change=move |_| on_toggle(value)
                                        />
                                        {o.label}
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
        </fieldset>
    }
}
