use crate::components::common::{
    EmptyState, ErrorNotice, Modal, PageHeader, Spinner, confirm, load_or_toast, on_file_selected,
};
use crate::components_impl::{
    SelectOption, VehicleFormState, driver_options, extract_vehicle_form_state, parse_select,
    validate_vehicle_form,
};
use crate::store::use_user_store;
use crate::types::{Role, Upload, Vehicle, VehicleType};
use leptos::prelude::*;

/// Modal state: `Some(None)` creates, `Some(Some(vehicle))` edits.
type Editing = Option<Option<Vehicle>>;

#[component]
pub fn VehiclesPage(role: Role) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let vehicles = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.vehicles_for(role), toasts, "Failed to load vehicles.").await
        }
    });
    // Only admins pick a driver for a vehicle.
    let drivers = LocalResource::new(move || {
        let client = store.client();
        async move {
            if role == Role::Admin {
                load_or_toast(client.all_profiles(), toasts, "Failed to load drivers.")
                    .await
                    .map(|profiles| driver_options(&profiles))
            } else {
                Ok(Vec::new())
            }
        }
    });
    let (editing, set_editing) = signal::<Editing>(None);

    let delete = move |vehicle: Vehicle| {
        if !confirm(&format!("Delete {} ({})?", vehicle.model, vehicle.plate_number)) {
            return;
        }
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.delete_vehicle(vehicle.id).await {
                Ok(()) => {
                    toasts.success("Vehicle deleted successfully.");
                    vehicles.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let title = if role == Role::Admin { "Vehicles" } else { "My vehicles" };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <PageHeader title=title/>
                <button type="button" class="btn-primary" on:click=move |_| set_editing.set(Some(None))>
                    "Add vehicle"
                </button>
            </div>

            <Suspense fallback=|| view! { <Spinner label="Loading vehicles..."/> }>
                {move || {
                    vehicles
                        .get()
                        .map(|result| match result {
                            Ok(list) => view! {
                                <VehiclesTable
                                    vehicles=list
                                    show_driver={role == Role::Admin}
                                    on_edit=move |v: Vehicle| set_editing.set(Some(Some(v)))
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
                    drivers
                        .get()
                        .map(|result| view! {
                            <VehicleModal
                                role=role
                                editing=editing
                                drivers=result.unwrap_or_default()
                                on_close=move || set_editing.set(None)
                                on_saved=move || {
                                    set_editing.set(None);
                                    vehicles.refetch();
                                }
                            />
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn VehiclesTable(
    vehicles: Vec<Vehicle>,
    show_driver: bool,
    on_edit: impl Fn(Vehicle) + 'static + Copy,
    on_delete: impl Fn(Vehicle) + 'static + Copy,
) -> impl IntoView {
    if vehicles.is_empty() {
        return view! { <EmptyState message="No vehicles registered yet."/> }.into_any();
    }

    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Model"</th>
                        <th class="table-header-cell">"Plate"</th>
                        <th class="table-header-cell">"Type"</th>
                        {show_driver.then(|| view! { <th class="table-header-cell">"Driver"</th> })}
                        <th class="table-header-cell">"License"</th>
                        <th class="table-header-cell text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {vehicles
                        .into_iter()
                        .map(|vehicle| {
                            let for_edit = vehicle.clone();
                            let for_delete = vehicle.clone();
                            let driver_name = vehicle.driver_name.clone().unwrap_or_else(|| "-".to_string());
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium">{vehicle.model}</td>
                                    <td class="table-cell">{vehicle.plate_number}</td>
                                    <td class="table-cell">
                                        <span class="badge-neutral">{vehicle.vehicle_type.label()}</span>
                                    </td>
                                    {show_driver.then(|| view! { <td class="table-cell">{driver_name}</td> })}
                                    <td class="table-cell">
                                        {match vehicle.license {
                                            Some(url) => view! {
                                                <a href=url target="_blank" class="text-primary-600">"View"</a>
                                            }
                                                .into_any(),
                                            None => view! { <span class="text-surface-400">"-"</span> }.into_any(),
                                        }}
                                    </td>
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
fn VehicleModal(
    role: Role,
    editing: ReadSignal<Editing>,
    drivers: Vec<SelectOption>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_saved: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let form = RwSignal::new(VehicleFormState::default());
    let (license, set_license) = signal::<Option<Upload>>(None);
    let (saving, set_saving) = signal(false);
    let drivers = StoredValue::new(drivers);

    Effect::new(move |_| {
        if let Some(current) = editing.get() {
            form.set(extract_vehicle_form_state(current.as_ref()));
            set_license.set(None);
        }
    });

    let is_edit = move || editing.with_untracked(|e| matches!(e, Some(Some(_))));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let target = editing.get_untracked().flatten().map(|v| v.id);
        let payload = match form.with_untracked(|state| {
            validate_vehicle_form(state, role, target.is_some(), license.get_untracked())
        }) {
            Ok(payload) => payload,
            Err(message) => {
                toasts.error(message);
                return;
            }
        };

        set_saving.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            let result = match target {
                Some(id) => client.update_vehicle(id, role, payload).await,
                None => client.create_vehicle(role, payload).await,
            };
            match result {
                Ok(_) => {
                    toasts.success(if target.is_some() {
                        "Vehicle updated successfully."
                    } else {
                        "Vehicle added successfully."
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
            <Modal title=if is_edit() { "Edit vehicle" } else { "Add vehicle" } on_close=on_close>
                <form on:submit=submit>
                    <div class="modal-body space-y-4">
                        <div class="form-group">
                            <label class="form-label form-label-required">"Model"</label>
                            <input
                                type="text"
                                class="form-input"
                                prop:value=move || form.with(|f| f.model.clone())
                                on:input=move |ev| form.update(|f| f.model = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label form-label-required">"Plate number"</label>
                            <input
                                type="text"
                                class="form-input"
                                prop:value=move || form.with(|f| f.plate_number.clone())
                                on:input=move |ev| form.update(|f| f.plate_number = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label">"Type"</label>
                            <select
                                class="form-input"
                                on:change=move |ev| {
                                    if let Some(t) = VehicleType::parse(&event_target_value(&ev)) {
                                        form.update(|f| f.vehicle_type = t);
                                    }
                                }
                            >
                                {VehicleType::ALL
                                    .into_iter()
                                    .map(|t| view! {
                                        <option
                                            value=t.as_str()
                                            selected=move || form.with(|f| f.vehicle_type == t)
                                        >
                                            {t.label()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        {(role == Role::Admin).then(|| view! {
                            <div class="form-group">
                                <label class="form-label">"Driver"</label>
                                <select
                                    class="form-input"
                                    on:change=move |ev| {
                                        let driver = parse_select(&event_target_value(&ev));
                                        form.update(|f| f.driver = driver);
                                    }
                                >
                                    <option value="">"Select a driver"</option>
                                    {drivers
                                        .get_value()
                                        .into_iter()
                                        .map(|d| {
                                            let value = d.value;
                                            view! {
                                                <option
                                                    value=value.to_string()
                                                    selected=move || form.with(|f| f.driver == Some(value))
                                                >
                                                    {d.label}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </div>
                        })}
                        <div class="form-group">
                            <label class="form-label">"License document"</label>
                            <input
                                type="file"
                                class="form-input"
                                accept="image/*,application/pdf"
                                on:change=move |ev| on_file_selected(&ev, set_license, toasts)
                            />
                            <Show when=move || license.with(Option::is_some)>
                                <p class="text-xs text-surface-500 mt-1">
                                    {move || license.with(|l| l.as_ref().map(|l| l.file_name.clone()).unwrap_or_default())}
                                </p>
                            </Show>
                        </div>
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="btn-secondary" on:click=move |_| on_close()>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save vehicle" }}
                        </button>
                    </div>
                </form>
            </Modal>
        </Show>
    }
}
