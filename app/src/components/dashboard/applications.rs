use crate::components::common::{
    ApplicationStatusBadge, EmptyState, ErrorNotice, PageHeader, Spinner, load_or_toast,
};
use crate::store::use_user_store;
use crate::types::{ApplicationStatus, DriverApplication};
use leptos::prelude::*;
use uuid::Uuid;

#[component]
pub fn ApplicationsPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let applications = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.applications(), toasts, "Failed to load driver applications.").await
        }
    });

    let review = move |id: Uuid, status: ApplicationStatus| {
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.review_application(id, status).await {
                Ok(()) => {
                    toasts.success(format!("Application has been {}.", status.as_str()));
                    applications.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Driver applications" subtitle="Approve or deny requests to drive"/>
            <Suspense fallback=|| view! { <Spinner label="Loading applications..."/> }>
                {move || {
                    applications
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <EmptyState message="There are no driver applications."/> }.into_any()
                            }
                            Ok(list) => view! { <ApplicationsTable applications=list on_review=review/> }.into_any(),
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn ApplicationsTable(
    applications: Vec<DriverApplication>,
    on_review: impl Fn(Uuid, ApplicationStatus) + 'static + Copy,
) -> impl IntoView {
    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Applicant"</th>
                        <th class="table-header-cell">"Email"</th>
                        <th class="table-header-cell">"License"</th>
                        <th class="table-header-cell">"Experience"</th>
                        <th class="table-header-cell">"Status"</th>
                        <th class="table-header-cell text-right">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="table-body">
                    {applications
                        .into_iter()
                        .map(|app| {
                            let id = app.id;
                            let pending = app.status == ApplicationStatus::Pending;
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium">{app.applicant_name.unwrap_or_else(|| "-".to_string())}</td>
                                    <td class="table-cell">{app.applicant_email.unwrap_or_else(|| "-".to_string())}</td>
                                    <td class="table-cell">{app.license_number}</td>
                                    <td class="table-cell">{app.years_of_experience} " years"</td>
                                    <td class="table-cell"><ApplicationStatusBadge status=app.status/></td>
                                    <td class="table-cell">
                                        {pending.then(|| view! {
                                            <div class="flex justify-end gap-2">
                                                <button
                                                    type="button"
                                                    class="btn-primary btn-sm"
                                                    on:click=move |_| on_review(id, ApplicationStatus::Approved)
                                                >
                                                    "Approve"
                                                </button>
                                                <button
                                                    type="button"
                                                    class="btn-danger btn-sm"
                                                    on:click=move |_| on_review(id, ApplicationStatus::Denied)
                                                >
                                                    "Deny"
                                                </button>
                                            </div>
                                        })}
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
