use crate::components::common::{ErrorNotice, Modal, Spinner, load_or_toast};
use crate::components_impl::{
    dropoff_locations, fare_label, find_route, format_datetime, parse_select, pickup_locations,
    route_label, validate_trip_request,
};
use crate::config::{MAX_PASSENGERS, ROUTE_CARDS_LIMIT};
use crate::store::use_user_store;
use crate::types::{Route, TripRequest};
use leptos::prelude::*;
use leptos_router::components::A;

/// Book a trip between two cities: pick where you start, then where you go.
#[component]
pub fn CityPage() -> impl IntoView {
    let store = use_user_store();

    view! {
        <section class="mx-auto max-w-6xl px-4 py-12">
            <Show
                when=move || store.is_authenticated()
                fallback=|| view! {
                    <div class="card max-w-md mx-auto text-center space-y-4">
                        <h1 class="text-2xl font-bold">"Book your trip"</h1>
                        <p class="text-surface-600">"Sign in to your account to request a trip."</p>
                        <A href="/sign-in" attr:class="btn-primary">"Sign in"</A>
                    </div>
                }
            >
                <CityBooking/>
            </Show>
        </section>
    }
}

#[component]
fn CityBooking() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let routes = LocalResource::new(move || {
        let client = store.client();
        async move { load_or_toast(client.routes(), toasts, "Could not load available routes.").await }
    });

    view! {
        <Suspense fallback=|| view! { <Spinner label="Loading routes..."/> }>
            {move || {
                routes
                    .get()
                    .map(|result| match result {
                        Ok(list) => view! { <CityBookingForm routes=list/> }.into_any(),
                        Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                    })
            }}
        </Suspense>
    }
}

#[component]
fn CityBookingForm(routes: Vec<Route>) -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let routes = StoredValue::new(routes);

    let (pickup, set_pickup) = signal::<Option<i64>>(None);
    let (dropoff, set_dropoff) = signal::<Option<i64>>(None);
    let (passengers, set_passengers) = signal("1".to_string());
    let (notes, set_notes) = signal(String::new());
    let (scheduled, set_scheduled) = signal(false);
    let (scheduled_for, set_scheduled_for) = signal(String::new());
    let (review, set_review) = signal::<Option<TripRequest>>(None);
    let (submitting, set_submitting) = signal(false);
    let (requested, set_requested) = signal(false);

    let selected = Memo::new(move |_| {
        routes.with_value(|r| find_route(r, pickup.get(), dropoff.get()))
    });

    let reset = move || {
        set_pickup.set(None);
        set_dropoff.set(None);
        set_passengers.set("1".to_string());
        set_notes.set(String::new());
        set_scheduled.set(false);
        set_scheduled_for.set(String::new());
        set_review.set(None);
        set_requested.set(false);
    };

    let open_review = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_trip_request(
            selected.get_untracked().map(|r| r.pk),
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
        set_review.set(None);
        set_submitting.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.request_trip(&request).await {
                Ok(_) => set_requested.set(true),
                Err(e) => toasts.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Show
            when=move || !requested.get()
            fallback=move || view! {
                <div class="card max-w-lg mx-auto text-center space-y-4">
                    <h2 class="text-3xl font-bold text-green-600">"Your trip has been requested!"</h2>
                    <p class="text-surface-600">"You can follow its status under My trips."</p>
                    <div class="flex flex-col gap-2">
                        <button type="button" class="btn-primary" on:click=move |_| reset()>
                            "Request another trip"
                        </button>
                        <A href="/dashboard/my-trips" attr:class="btn-secondary">"Go to my trips"</A>
                    </div>
                </div>
            }
        >
            <div class="grid gap-8 lg:grid-cols-5 items-start">
                <form class="card lg:col-span-3 space-y-4" on:submit=open_review>
                    <div class="text-center">
                        <h1 class="text-3xl font-bold">"Book your trip"</h1>
                        <p class="text-surface-500 mt-2">"Choose a route here or pick one from the list."</p>
                    </div>
                    <div class="form-group">
                        <label class="form-label form-label-required">"From"</label>
                        <select
                            class="form-input"
                            on:change=move |ev| {
                                set_pickup.set(parse_select(&event_target_value(&ev)));
                                set_dropoff.set(None);
                            }
                        >
                            <option value="" selected=move || pickup.get().is_none()>"Choose a city"</option>
                            {routes
                                .with_value(|r| pickup_locations(r.as_slice()))
                                .into_iter()
                                .map(|l| {
                                    let pk = l.pk;
                                    view! {
                                        <option value=pk.to_string() selected=move || pickup.get() == Some(pk)>
                                            {l.name}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label class="form-label form-label-required">"To"</label>
                        <select
                            class="form-input"
                            disabled=move || pickup.get().is_none()
                            on:change=move |ev| set_dropoff.set(parse_select(&event_target_value(&ev)))
                        >
                            <option value="" selected=move || dropoff.get().is_none()>
                                "Choose where you start first"
                            </option>
                            {move || {
                                routes
                                    .with_value(|r| dropoff_locations(r, pickup.get()))
                                    .into_iter()
                                    .map(|l| {
                                        let pk = l.pk;
                                        view! {
                                            <option value=pk.to_string() selected=move || dropoff.get() == Some(pk)>
                                                {l.name}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    {move || selected.get().map(|r| view! {
                        <div class="rounded-lg border border-green-200 bg-green-50 p-4 text-center">
                            <p class="text-surface-600">"Estimated fare"</p>
                            <p class="text-3xl font-bold text-green-600">{fare_label(Some(r.price_af.as_str()))}</p>
                        </div>
                    })}
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
                            placeholder="I am next to the blue gate..."
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
                        "Book for later"
                    </label>
                    <Show when=move || scheduled.get()>
                        <div class="form-group">
                            <label class="form-label form-label-required">"Departure date and time"</label>
                            <input
                                type="datetime-local"
                                class="form-input"
                                prop:value=scheduled_for
                                on:input=move |ev| set_scheduled_for.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>
                    <button
                        type="submit"
                        class="btn-primary w-full"
                        disabled=move || selected.with(Option::is_none) || submitting.get()
                    >
                        {move || if submitting.get() { "Requesting..." } else { "Review and request" }}
                    </button>
                </form>

                <aside class="card lg:col-span-2 space-y-3">
                    <h2 class="text-xl font-bold">"Routes"</h2>
                    {routes
                        .get_value()
                        .into_iter()
                        .take(ROUTE_CARDS_LIMIT)
                        .map(|r| {
                            let (from, to) = (r.pickup.pk, r.drop.pk);
                            view! {
                                <button
                                    type="button"
                                    class="w-full rounded-lg border p-4 text-left shadow-sm hover:shadow-md"
                                    on:click=move |_| {
                                        set_pickup.set(Some(from));
                                        set_dropoff.set(Some(to));
                                    }
                                >
                                    <p class="font-semibold text-surface-700">{route_label(&r)}</p>
                                    <p class="mt-2 text-center text-lg font-bold text-green-600">
                                        {fare_label(Some(r.price_af.as_str()))}
                                    </p>
                                </button>
                            }
                        })
                        .collect_view()}
                </aside>
            </div>
        </Show>

        <Show when=move || review.with(Option::is_some)>
            <Modal title="Review your trip" on_close=move || set_review.set(None)>
                <div class="modal-body space-y-2 text-sm">
                    <p>
                        <span class="font-semibold">"Route: "</span>
                        {move || selected.get().map(|r| route_label(&r)).unwrap_or_default()}
                    </p>
                    <p>
                        <span class="font-semibold">"Fare: "</span>
                        {move || selected.get().map(|r| fare_label(Some(r.price_af.as_str()))).unwrap_or_default()}
                    </p>
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
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn-secondary" on:click=move |_| set_review.set(None)>"Back"</button>
                    <button type="button" class="btn-primary" disabled=move || submitting.get() on:click=send>
                        "Confirm and request"
                    </button>
                </div>
            </Modal>
        </Show>
    }
}
