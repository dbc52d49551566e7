use crate::components::common::{EmptyState, ErrorNotice, Modal, PageHeader, Spinner, load_or_toast};
use crate::components_impl::{RouteOption, bookable_routes, format_datetime, parse_select, validate_trip_request};
use crate::config::MAX_PASSENGERS;
use crate::store::use_user_store;
use crate::types::TripRequest;
use leptos::prelude::*;

#[component]
pub fn RequestTripPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let routes = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.routes(), toasts, "Could not load available routes.")
                .await
                .map(|routes| bookable_routes(&routes))
        }
    });

    view! {
        <div class="space-y-6">
            <PageHeader title="Request a trip" subtitle="Pick a route and tell us how many of you are travelling"/>
            <Suspense fallback=|| view! { <Spinner label="Loading routes..."/> }>
                {move || {
                    routes
                        .get()
                        .map(|result| match result {
                            Ok(options) if options.is_empty() => view! {
                                <EmptyState message="No routes are available right now. Please check back later."/>
                            }
                                .into_any(),
                            Ok(options) => view! { <TripRequestForm routes=options/> }.into_any(),
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn TripRequestForm(routes: Vec<RouteOption>) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let routes = StoredValue::new(routes);

    let (route_id, set_route_id) = signal::<Option<i64>>(None);
    let (passengers, set_passengers) = signal("1".to_string());
    let (notes, set_notes) = signal(String::new());
    let (scheduled, set_scheduled) = signal(false);
    let (scheduled_for, set_scheduled_for) = signal(String::new());
    let (review, set_review) = signal::<Option<TripRequest>>(None);
    let (submitting, set_submitting) = signal(false);

    let selected = move || {
        route_id
            .get()
            .and_then(|id| routes.with_value(|r| r.iter().find(|o| o.pk == id).cloned()))
    };

    let reset = move || {
        set_route_id.set(None);
        set_passengers.set("1".to_string());
        set_notes.set(String::new());
        set_scheduled.set(false);
        set_scheduled_for.set(String::new());
        set_review.set(None);
    };

    let open_review = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_trip_request(
            route_id.get_untracked(),
            &passengers.get_untracked(),
            notes.get_untracked(),
            scheduled.get_untracked(),
            scheduled_for.get_untracked(),
        ) {
            Ok(request) => set_review.set(Some(request)),
            Err(message) => toasts.error(message),
        }
    };

    let send = move |_| {
        let Some(request) = review.get_untracked() else {
            return;
        };
        set_submitting.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.request_trip(&request).await {
                Ok(_) => {
                    toasts.success("Your trip has been requested! A driver will accept it soon.");
                    reset();
                }
                Err(e) => toasts.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card max-w-2xl space-y-4" on:submit=open_review>
            <div class="form-group">
                <label class="form-label form-label-required">"Route"</label>
                <select
                    class="form-input"
                    on:change=move |ev| set_route_id.set(parse_select(&event_target_value(&ev)))
                >
                    <option value="" selected=move || route_id.get().is_none()>"Choose a route"</option>
                    {routes
                        .get_value()
                        .into_iter()
                        .map(|o| {
                            let pk = o.pk;
                            view! {
                                <option value=pk.to_string() selected=move || route_id.get() == Some(pk)>
                                    {format!("{} ({} AF)", o.label, o.price)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                {move || selected().map(|o| view! {
                    <p class="text-xs text-surface-500 mt-1">
                        {format!("{} driver(s) serve this route", o.driver_count)}
                    </p>
                })}
            </div>
            <div class="form-group">
                <label class="form-label form-label-required">"Passengers"</label>
                <input
                    type="number"
                    min="1"
                    max=MAX_PASSENGERS.to_string()
                    class="form-input"
                    prop:value=passengers
                    on:input=move |ev| set_passengers.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label class="form-label">"Notes for the driver"</label>
                <textarea
                    class="form-input"
                    rows="3"
                    prop:value=notes
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                />
            </div>
            <label class="flex items-center gap-2 text-sm">
                <input
                    type="checkbox"
                    prop:checked=scheduled
                    on:change=move |_| set_scheduled.update(|s| *s = !*s)
                />
                "Schedule for later"
            </label>
            <Show when=move || scheduled.get()>
                <div class="form-group">
                    <label class="form-label form-label-required">"Date and time"</label>
                    <input
                        type="datetime-local"
                        class="form-input"
                        prop:value=scheduled_for
                        on:input=move |ev| set_scheduled_for.set(event_target_value(&ev))
                    />
                </div>
            </Show>
            <button type="submit" class="btn-primary w-full">"Review trip"</button>
        </form>

        <Show when=move || review.with(Option::is_some)>
            <Modal title="Confirm your trip" on_close=move || set_review.set(None)>
                <div class="modal-body space-y-2 text-sm">
                    <p><span class="font-semibold">"Route: "</span>{move || selected().map(|o| o.label).unwrap_or_default()}</p>
                    <p><span class="font-semibold">"Price: "</span>{move || selected().map(|o| format!("{} AF", o.price)).unwrap_or_default()}</p>
                    <p>
                        <span class="font-semibold">"Passengers: "</span>
                        {move || review.with(|r| r.as_ref().map(|r| r.passenger_count).unwrap_or(1))}
                    </p>
                    <p>
                        <span class="font-semibold">"When: "</span>
                        {move || review.with(|r| {
                            r.as_ref()
                                .and_then(|r| r.scheduled_for.as_deref())
                                .map_or_else(|| "As soon as possible".to_string(), format_datetime)
                        })}
                    </p>
                    <p class="whitespace-pre-wrap">
                        <span class="font-semibold">"Notes: "</span>
                        {move || review.with(|r| {
                            r.as_ref()
                                .map(|r| r.notes_for_driver.clone())
                                .filter(|n| !n.trim().is_empty())
                                .unwrap_or_else(|| "-".to_string())
                        })}
                    </p>
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn-secondary" on:click=move |_| set_review.set(None)>"Back"</button>
                    <button type="button" class="btn-primary" disabled=move || submitting.get() on:click=send>
                        {move || if submitting.get() { "Requesting..." } else { "Request trip" }}
                    </button>
                </div>
            </Modal>
        </Show>
    }
}
