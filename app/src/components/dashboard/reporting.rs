use crate::components::common::{ErrorNotice, PageHeader, Spinner, TripStatusBadge, load_or_toast};
use crate::components_impl::{chart_bar_percent, format_date, format_datetime};
use crate::config::RECENT_TRIPS_LIMIT;
use crate::store::use_user_store;
use crate::types::{ChartPoint, DashboardStats, Kpi, RecentTrip};
use leptos::prelude::*;

#[component]
pub fn ReportingPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let stats = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.dashboard_stats(), toasts, "Failed to load dashboard data.").await
        }
    });

    view! {
        <div class="space-y-6">
            <PageHeader title="Dashboard" subtitle="Overview of users, drivers and trips"/>
            <Suspense fallback=|| view! { <Spinner label="Loading dashboard..."/> }>
                {move || {
                    stats
                        .get()
                        .map(|result| match result {
                            Ok(DashboardStats { kpi, recent_trips, chart_data }) => view! {
                                <KpiCards kpi=kpi/>
                                <div class="grid gap-6 lg:grid-cols-2">
                                    <TripsChart points=chart_data/>
                                    <RecentTrips trips=recent_trips/>
                                </div>
                            }
                                .into_any(),
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn KpiCards(kpi: Kpi) -> impl IntoView {
    let cards = [
        ("Total users", kpi.total_users),
        ("Drivers", kpi.total_drivers),
        ("Passengers", kpi.total_passengers),
        ("Total trips", kpi.total_trips),
        ("Pending applications", kpi.pending_applications),
    ];

    view! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-5">
            {cards
                .into_iter()
                .map(|(label, value)| view! {
                    <div class="card">
                        <p class="text-sm text-surface-500">{label}</p>
                        <p class="text-3xl font-bold text-surface-900 mt-1">{value}</p>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

/// Trips per day as plain CSS bars.
#[component]
fn TripsChart(points: Vec<ChartPoint>) -> impl IntoView {
    let max = points.iter().map(|p| p.trips).max().unwrap_or(0);

    view! {
        <div class="card">
            <h2 class="font-semibold mb-4">"Trips per day"</h2>
            {if points.is_empty() {
                view! { <p class="text-sm text-surface-500">"No trips recorded yet."</p> }.into_any()
            } else {
                view! {
                    <div class="flex items-end gap-2 h-48">
                        {points
                            .into_iter()
                            .map(|point| {
                                let height = format!("height: {}%", chart_bar_percent(point.trips, max));
                                view! {
                                    <div class="flex flex-1 flex-col items-center justify-end h-full" title=point.trips.to_string()>
                                        <div class="w-full rounded-t bg-primary-500" style=height/>
                                        <span class="mt-1 text-[10px] text-surface-500">{format_date(&point.date)}</span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn RecentTrips(trips: Vec<RecentTrip>) -> impl IntoView {
    view! {
        <div class="card">
            <h2 class="font-semibold mb-4">"Recent trips"</h2>
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Passenger"</th>
                        <th class="table-header-cell">"Route"</th>
                        <th class="table-header-cell">"Status"</th>
                        <th class="table-header-cell">"Requested"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {trips
                        .into_iter()
                        .take(RECENT_TRIPS_LIMIT)
                        .map(|trip| view! {
                            <tr class="table-row">
                                <td class="table-cell">{trip.passenger_name}</td>
                                <td class="table-cell">{trip.route_display}</td>
                                <td class="table-cell"><TripStatusBadge status=trip.status/></td>
                                <td class="table-cell">{format_datetime(&trip.request_time)}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
