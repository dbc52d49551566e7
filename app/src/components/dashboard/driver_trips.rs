use crate::components::common::{
    EmptyState, ErrorNotice, NotesButton, NotesModal, PageHeader, Spinner, TripStatusBadge,
    confirm, load_or_toast,
};
use crate::components_impl::{
    DriverTab, can_complete, fare_label, finish_prompts, route_label, trip_time_display,
};
use crate::store::use_user_store;
use crate::types::{DriverTrip, TripStatus};
use leptos::prelude::*;

#[component]
pub fn DriverTripsPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let board = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.driver_board(), toasts, "Could not load trip data. Please refresh.").await
        }
    });
    let (tab, set_tab) = signal(DriverTab::Available);
    let (notes, set_notes) = signal::<Option<String>>(None);

    let accept = move |trip: DriverTrip| {
        if !confirm("Do you want to accept this trip?") {
            return;
        }
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.accept_trip(trip.pk).await {
                Ok(detail) => {
                    toasts.success(detail);
                    set_tab.set(DriverTab::Assigned);
                    board.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let finish = move |trip: DriverTrip, status: TripStatus| {
        let Some((question, done)) = finish_prompts(status) else {
            return;
        };
        if !confirm(question) {
            return;
        }
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.update_trip_status(trip.id, status).await {
                Ok(()) => {
                    toasts.success(done);
                    board.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Trip requests" subtitle="Accept new requests and finish your trips"/>
            <Suspense fallback=|| view! { <Spinner label="Loading trips..."/> }>
                {move || {
                    board
                        .get()
                        .map(|result| match result {
                            Ok((available, assigned)) => {
                                let counts = (available.len(), assigned.len());
                                let current = tab.get();
                                let trips = match current {
                                    DriverTab::Available => available,
                                    DriverTab::Assigned => assigned,
                                };
                                view! {
                                    <div class="flex gap-2 border-b">
                                        <TabButton tab=DriverTab::Available count=counts.0 current=tab set_tab=set_tab/>
                                        <TabButton tab=DriverTab::Assigned count=counts.1 current=tab set_tab=set_tab/>
                                    </div>
                                    <DriverTripsTable
                                        trips=trips
                                        tab=current
                                        on_accept=accept
                                        on_finish=finish
                                        set_notes=set_notes
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
fn TabButton(
    tab: DriverTab,
    count: usize,
    current: ReadSignal<DriverTab>,
    set_tab: WriteSignal<DriverTab>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || {
                if current.get() == tab {
                    "px-4 py-2 -mb-px border-b-2 border-primary-600 font-semibold text-primary-600"
                } else {
                    "px-4 py-2 -mb-px text-surface-500 hover:text-surface-900"
                }
            }
            on:click=move |_| set_tab.set(tab)
        >
            {tab.label(count)}
        </button>
    }
}

#[component]
fn DriverTripsTable(
    trips: Vec<DriverTrip>,
    tab: DriverTab,
    on_accept: impl Fn(DriverTrip) + 'static + Copy,
    on_finish: impl Fn(DriverTrip, TripStatus) + 'static + Copy,
    set_notes: WriteSignal<Option<String>>,
) -> impl IntoView {
    if trips.is_empty() {
        return view! { <EmptyState message=tab.empty_message()/> }.into_any();
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
                        <th class="table-header-cell">"When"</th>
                        <th class="table-header-cell">"Status"</th>
                        <th class="table-header-cell">"Notes"</th>
                        <th class="table-header-cell text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {trips
                        .into_iter()
                        .map(|trip| {
                            let (when_label, when) = trip_time_display(
                                trip.scheduled_for.as_deref(),
                                trip.request_time.as_deref(),
                            );
                            let action = trip.clone();
                            let cancelled = trip.clone();
                            let action_view = match tab {
                                DriverTab::Available => view! {
                                    <button
                                        type="button"
                                        class="btn-primary btn-sm"
                                        on:click=move |_| on_accept(action.clone())
                                    >
                                        "Accept"
                                    </button>
                                }
                                    .into_any(),
                                DriverTab::Assigned if can_complete(trip.status) => view! {
                                    <div class="flex justify-end gap-2">
                                        <button
                                            type="button"
                                            class="btn-primary btn-sm"
                                            on:click=move |_| on_finish(action.clone(), TripStatus::Completed)
                                        >
                                            "Complete"
                                        </button>
                                        <button
                                            type="button"
                                            class="btn-ghost btn-sm text-danger-600"
                                            on:click=move |_| on_finish(cancelled.clone(), TripStatus::Cancelled)
                                        >
                                            "Cancel"
                                        </button>
                                    </div>
                                }
                                    .into_any(),
                                DriverTab::Assigned => ().into_any(),
                            };
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium">
                                        {trip.passenger_name.unwrap_or_else(|| "-".to_string())}
                                    </td>
                                    <td class="table-cell">
                                        {trip.route.as_ref().map_or_else(|| "-".to_string(), route_label)}
                                    </td>
                                    <td class="table-cell">{fare_label(trip.fare.as_deref())}</td>
                                    <td class="table-cell">{trip.passenger_count}</td>
                                    <td class="table-cell">
                                        <span class="block text-xs text-surface-500">{when_label}</span>
                                        {when}
                                    </td>
                                    <td class="table-cell"><TripStatusBadge status=trip.status/></td>
                                    <td class="table-cell">
                                        <NotesButton notes=trip.notes_for_driver set_notes=set_notes/>
                                    </td>
                                    <td class="table-cell text-right">{action_view}</td>
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
