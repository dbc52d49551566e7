use crate::components::Avatar;
use crate::components::common::confirm;
use crate::components_impl::{Section, menu_items, resolve_section};
use crate::store::use_user_store;
use crate::types::Role;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

mod admin_trips;
mod applications;
mod driver_trips;
mod locations;
mod my_trips;
mod profile;
mod reporting;
mod request_trip;
mod routes;
mod users;
mod vehicles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Loading,
    Ready(Role),
    NoProfile,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_user_store();
    let params = use_params_map();

    let section = Memo::new(move |_| {
        let role = store.role().unwrap_or_default();
        resolve_section(params.read().get("section").as_deref(), role)
    });

    // Refresh the stored profile once per visit.
    Effect::new(move |fetched: Option<bool>| {
        if fetched == Some(true) {
            return true;
        }
        if store.restored() && store.is_authenticated() {
            leptos::task::spawn_local(async move {
                store.fetch_profile().await;
            });
            true
        } else {
            false
        }
    });

    // The session is only known once the browser has restored it.
    let access = Memo::new(move |_| {
        let state = store.state().get();
        if !store.restored() || (state.loading && state.profile.is_none()) {
            Access::Loading
        } else {
            match (state.role(), state.profile.is_some()) {
                (Some(role), true) => Access::Ready(role),
                _ => Access::NoProfile,
            }
        }
    });

    view! {
        {move || match access.get() {
            Access::Loading => view! {
                <div class="flex h-screen w-full items-center justify-center">"Loading..."</div>
            }
                .into_any(),
            Access::Ready(role) => view! { <DashboardLayout role=role section=section/> }.into_any(),
            Access::NoProfile => view! {
                <div class="flex flex-col gap-4 h-screen w-full items-center justify-center">
                    <p>"Could not load profile. Please log in again."</p>
                    <A href="/sign-in" attr:class="btn-primary">"Sign in"</A>
                </div>
            }
                .into_any(),
        }}
    }
}

#[component]
fn DashboardLayout(role: Role, section: Memo<Section>) -> impl IntoView {
    let store = use_user_store();
    let (sidebar_open, set_sidebar_open) = signal(true);
    let full_name = move || {
        store
            .profile()
            .map(|p| format!("{} {}", p.first_name, p.last_name))
            .unwrap_or_default()
    };

    view! {
        <div class="flex h-screen w-full overflow-hidden bg-white">
            <Sidebar role=role section=section open=sidebar_open/>
            <div class="flex flex-col flex-1 h-screen overflow-hidden">
                <header class="bg-white py-2 w-full flex items-center justify-between px-4 shadow-sm border-b">
                    <button
                        type="button"
                        class="btn-ghost btn-sm"
                        on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
                    >
                        "☰"
                    </button>
                    <div class="flex items-center gap-2">
                        <Avatar/>
                        <span class="font-semibold text-gray-600">{full_name}</span>
                    </div>
                </header>
                <main class="flex-1 overflow-y-auto bg-gray-100 p-3 md:p-6">
                    {move || section_view(section.get(), role)}
                </main>
            </div>
        </div>
    }
}

fn section_view(section: Section, role: Role) -> AnyView {
    match section {
        Section::Reporting => view! { <reporting::ReportingPage/> }.into_any(),
        Section::Trips => view! { <admin_trips::AdminTripsPage/> }.into_any(),
        Section::Users => view! { <users::UsersPage/> }.into_any(),
        Section::Drivers => view! { <users::DriversPage/> }.into_any(),
        Section::Applications => view! { <applications::ApplicationsPage/> }.into_any(),
        Section::Vehicles => view! { <vehicles::VehiclesPage role=role/> }.into_any(),
        Section::Locations => view! { <locations::LocationsPage/> }.into_any(),
        Section::Routes => view! { <routes::RoutesPage/> }.into_any(),
        Section::TripRequests => view! { <driver_trips::DriverTripsPage/> }.into_any(),
        Section::RequestTrip => view! { <request_trip::RequestTripPage/> }.into_any(),
        Section::MyTrips => view! { <my_trips::MyTripsPage/> }.into_any(),
        Section::Profile => view! { <profile::ProfilePage/> }.into_any(),
    }
}

#[component]
fn Sidebar(role: Role, section: Memo<Section>, open: ReadSignal<bool>) -> impl IntoView {
    let store = use_user_store();
    let navigate = use_navigate();

    let sign_out = move |_| {
        if confirm("Are you sure? You will be logged out!") {
            store.sign_out();
            navigate("/sign-in", Default::default());
        }
    };

    view! {
        <aside class=move || {
            if open.get() {
                "h-full w-64 bg-secondary shadow-lg transition-all overflow-hidden"
            } else {
                "h-full w-0 overflow-hidden"
            }
        }>
            <div class="flex items-center gap-3 p-5 font-bold text-xl">
                <A href="/" attr:class="text-black">"YouRide"</A>
            </div>
            <ul class="mx-2 mt-4 space-y-1">
                {menu_items(role)
                    .into_iter()
                    .map(|item| view! {
                        <li>
                            <A
                                href=item.href()
                                attr:class=move || {
                                    if section.get() == item {
                                        "flex w-full px-4 py-3 rounded-md bg-gray-200 text-primary font-semibold"
                                    } else {
                                        "flex w-full px-4 py-3 rounded-md hover:bg-gray-200 text-black font-semibold"
                                    }
                                }
                            >
                                {item.label(role)}
                            </A>
                        </li>
                    })
                    .collect_view()}
                <li>
                    <button
                        type="button"
                        class="flex w-full px-4 py-3 rounded-md hover:bg-gray-200 text-danger-600 font-semibold"
                        on:click=sign_out
                    >
                        "Sign out"
                    </button>
                </li>
            </ul>
        </aside>
    }
}
