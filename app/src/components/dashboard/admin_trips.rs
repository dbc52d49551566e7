use crate::components::common::{
    EmptyState, ErrorNotice, Modal, NotesButton, NotesModal, PageHeader, Spinner, TripStatusBadge,
    load_or_toast,
};
use crate::components_impl::{
    SelectOption, TripFilter, driver_options, fare_label, filter_trips_by_status, format_datetime,
    parse_select, route_label,
};
use crate::store::use_user_store;
use crate::types::{AdminTrip, TripStatus};
use leptos::prelude::*;

#[component]
pub fn AdminTripsPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let board = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.admin_trip_board(), toasts, "Failed to load trip data.").await
        }
    });

    let (filter, set_filter) = signal(TripFilter::All);
    let (assigning, set_assigning) = signal::<Option<AdminTrip>>(None);
    let (notes, set_notes) = signal::<Option<String>>(None);

    view! {
        <div class="space-y-6">
            <PageHeader title="Trip management" subtitle="Assign drivers to requested trips"/>

            <div class="flex flex-wrap gap-2">
                {TripFilter::ALL
                    .into_iter()
                    .map(|f| view! {
                        <button
                            type="button"
                            class=move || if filter.get() == f { "btn-primary btn-sm" } else { "btn-secondary btn-sm" }
                            on:click=move |_| set_filter.set(f)
                        >
                            {f.label()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <Suspense fallback=|| view! { <Spinner label="Loading trips..."/> }>
                {move || {
                    board
                        .get()
                        .map(|result| match result {
                            Ok((trips, profiles)) => {
                                let drivers = driver_options(&profiles);
                                let visible = filter_trips_by_status(&trips, filter.get());
                                view! {
                                    <TripsTable trips=visible on_assign=set_assigning set_notes=set_notes/>
                                    <AssignModal
                                        trip=assigning
                                        drivers=drivers
                                        on_close=move || set_assigning.set(None)
                                        on_assigned=move || {
                                            set_assigning.set(None);
                                            board.refetch();
                                        }
                                    />
                                }
                                    .into_any()
                            }
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>

            <NotesModal notes=notes on_close=move || set_notes.set(None)/>
        </div>
    }
}

#[component]
fn TripsTable(
    trips: Vec<AdminTrip>,
    on_assign: WriteSignal<Option<AdminTrip>>,
    set_notes: WriteSignal<Option<String>>,
) -> impl IntoView {
    if trips.is_empty() {
        return view! { <EmptyState message="No trips match this filter."/> }.into_any();
    }

    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Passenger"</th>
                        <th class="table-header-cell">"Route"</th>
                        <th class="table-header-cell">"Fare"</th>
                        <th class="table-header-cell">"Seats"</th>
                        <th class="table-header-cell">"Driver"</th>
                        <th class="table-header-cell">"Status"</th>
                        <th class="table-header-cell">"Requested"</th>
                        <th class="table-header-cell">"Notes"</th>
                        <th class="table-header-cell text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {trips
                        .into_iter()
                        .map(|trip| {
                            let assignable = trip.status == TripStatus::Requested;
                            let row = trip.clone();
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium">{trip.passenger}</td>
                                    <td class="table-cell">{route_label(&trip.route)}</td>
                                    <td class="table-cell">{fare_label(trip.fare.as_deref())}</td>
                                    <td class="table-cell">{trip.passenger_count}</td>
                                    <td class="table-cell">
                                        {trip.driver_name.unwrap_or_else(|| "Unassigned".to_string())}
                                    </td>
                                    <td class="table-cell"><TripStatusBadge status=trip.status/></td>
                                    <td class="table-cell">{format_datetime(&trip.request_time)}</td>
                                    <td class="table-cell">
                                        <NotesButton notes=trip.notes_for_driver set_notes=set_notes/>
                                    </td>
                                    <td class="table-cell text-right">
                                        <Show when=move || assignable>
                                            <button
                                                type="button"
                                                class="btn-primary btn-sm"
                                                on:click={
                                                    let row = row.clone();
                                                    move |_| on_assign.set(Some(row.clone()))
                                                }
                                            >
                                                "Assign"
                                            </button>
                                        </Show>
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
fn AssignModal(
    trip: ReadSignal<Option<AdminTrip>>,
    drivers: Vec<SelectOption>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_assigned: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let (driver, set_driver) = signal::<Option<i64>>(None);
    let (saving, set_saving) = signal(false);
    let drivers = StoredValue::new(drivers);

    let assign = move |_| {
        let Some(trip) = trip.get_untracked() else {
            return;
        };
        let Some(driver_id) = driver.get_untracked() else {
            toasts.error("Please select a driver to assign.");
            return;
        };

        set_saving.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.assign_driver(trip.id, driver_id).await {
                Ok(()) => {
                    toasts.success("Trip has been assigned to the driver.");
                    set_driver.set(None);
                    on_assigned();
                }
                Err(e) => {
                    tracing::warn!("Failed to assign trip {}: {}", trip.id, e);
                    toasts.error("Failed to assign trip.");
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <Show when=move || trip.with(Option::is_some)>
            <Modal title="Assign a driver" on_close=on_close>
                <div class="modal-body space-y-4">
                    <p class="text-sm text-surface-600">
                        {move || trip.with(|t| t.as_ref().map(|t| route_label(&t.route)).unwrap_or_default())}
                    </p>
                    <select
                        class="form-input"
                        on:change=move |ev| set_driver.set(parse_select(&event_target_value(&ev)))
                    >
                        <option value="">"Select a driver"</option>
                        {drivers
                            .get_value()
                            .into_iter()
                            .map(|d| view! { <option value=d.value.to_string()>{d.label}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close()>"Cancel"</button>
                    <button type="button" class="btn-primary" disabled=move || saving.get() on:click=assign>
                        {move || if saving.get() { "Assigning..." } else { "Assign" }}
                    </button>
                </div>
            </Modal>
        </Show>
    }
}
