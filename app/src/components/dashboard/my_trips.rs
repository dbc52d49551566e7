use crate::components::common::{
    EmptyState, ErrorNotice, NotesButton, NotesModal, PageHeader, Spinner, TripStatusBadge,
    load_or_toast,
};
use crate::components_impl::{fare_label, route_label, trip_time_display};
use crate::store::use_user_store;
use crate::types::PassengerTrip;
use leptos::prelude::*;

#[component]
pub fn MyTripsPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let trips = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.my_trips(), toasts, "Could not load your trip history.").await
        }
    });
    let (notes, set_notes) = signal::<Option<String>>(None);

    view! {
        <div class="space-y-6">
            <PageHeader title="My trips"/>
            <Suspense fallback=|| view! { <Spinner label="Loading your trips..."/> }>
                {move || {
                    trips
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <EmptyState message="You have not requested any trips yet."/> }.into_any()
                            }
                            Ok(list) => view! { <TripsTable trips=list set_notes=set_notes/> }.into_any(),
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>
            <NotesModal notes=notes on_close=move || set_notes.set(None)/>
        </div>
    }
}

#[component]
fn TripsTable(trips: Vec<PassengerTrip>, set_notes: WriteSignal<Option<String>>) -> impl IntoView {
    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Route"</th>
                        <th class="table-header-cell">"Fare"</th>
                        <th class="table-header-cell">"Seats"</th>
                        <th class="table-header-cell">"When"</th>
                        <th class="table-header-cell">"Status"</th>
                        <th class="table-header-cell">"Notes"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {trips
                        .into_iter()
                        .map(|trip| {
                            let (when_label, when) = trip_time_display(
                                trip.scheduled_for.as_deref(),
                                Some(trip.request_time.as_str()),
                            );
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium">
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
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
