use crate::components::common::{
    EmptyState, ErrorNotice, Modal, PageHeader, confirm, load_or_toast,
};
use crate::components_impl::{
    drivers_only, format_date, role_badge_class, search_users, user_status_badge_class,
    user_status_text,
};
use crate::store::use_user_store;
use crate::types::{AdminUser, AdminUserUpdate, Role};
use leptos::prelude::*;

#[component]
pub fn UsersPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let users = LocalResource::new(move || {
        let client = store.client();
        async move { load_or_toast(client.admin_users(), toasts, "Failed to load users.").await }
    });
    let (search, set_search) = signal(String::new());
    let (editing, set_editing) = signal::<Option<AdminUser>>(None);

    let save = move |pkid: i64, update: AdminUserUpdate| {
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.update_admin_user(pkid, &update).await {
                Ok(()) => {
                    toasts.success("User has been updated successfully.");
                    set_editing.set(None);
                    users.refetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Users" subtitle="Manage roles and account status"/>
            <SearchBox value=search set_value=set_search/>

            <Suspense fallback=move || view! { <UsersTableSkeleton/> }>
                {move || {
                    users
                        .get()
                        .map(|result| match result {
                            Ok(all) => {
                                let visible = search_users(&all, &search.get());
                                view! {
                                    <UsersTable
                                        users=visible
                                        on_edit=move |user: AdminUser| set_editing.set(Some(user))
                                        on_toggle=move |user: AdminUser| {
                                            let action = if user.is_active { "deactivate" } else { "activate" };
                                            let message = format!("Do you want to {action} {}?", user.full_name);
                                            if confirm(&message) {
                                                save(
                                                    user.pkid,
                                                    AdminUserUpdate {
                                                        is_active: Some(!user.is_active),
                                                        ..AdminUserUpdate::default()
                                                    },
                                                );
                                            }
                                        }
                                    />
                                }
                                    .into_any()
                            }
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>

            <RoleModal
                user=editing
                on_close=move || set_editing.set(None)
                on_save=move |pkid, role| {
                    save(pkid, AdminUserUpdate { role: Some(role), ..AdminUserUpdate::default() });
                }
            />
        </div>
    }
}

#[component]
pub fn DriversPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = store.toasts();
    let users = LocalResource::new(move || {
        let client = store.client();
        async move {
            load_or_toast(client.admin_users(), toasts, "Could not load the list of drivers.").await
        }
    });
    let (search, set_search) = signal(String::new());

    view! {
        <div class="space-y-6">
            <PageHeader title="Drivers" subtitle="Everyone registered to drive with YouRide"/>
            <SearchBox value=search set_value=set_search/>

            <Suspense fallback=move || view! { <UsersTableSkeleton/> }>
                {move || {
                    users
                        .get()
                        .map(|result| match result {
                            Ok(all) => {
                                let drivers = search_users(&drivers_only(&all), &search.get());
                                view! { <UsersTable users=drivers/> }.into_any()
                            }
                            Err(e) => view! { <ErrorNotice message=e/> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn SearchBox(value: ReadSignal<String>, set_value: WriteSignal<String>) -> impl IntoView {
    view! {
        <input
            type="search"
            class="form-input max-w-sm"
            placeholder="Search by name or email"
            prop:value=value
            on:input=move |ev| set_value.set(event_target_value(&ev))
        />
    }
}

#[component]
fn UsersTableSkeleton() -> impl IntoView {
    view! {
        <div class="table-container">
            <table class="table">
                <tbody class="table-body">
                    {(0..5).map(|_| view! {
                        <tr class="table-row">
                            <td class="table-cell"><div class="skeleton-text w-40"/></td>
                            <td class="table-cell"><div class="skeleton-text w-48"/></td>
                            <td class="table-cell"><div class="skeleton h-5 w-16 rounded-full"/></td>
                            <td class="table-cell"><div class="skeleton h-5 w-16 rounded-full"/></td>
                            <td class="table-cell"><div class="skeleton-text w-24"/></td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

/// Without callbacks the table is read-only.
#[component]
fn UsersTable(
    users: Vec<AdminUser>,
    #[prop(optional, into)] on_edit: Option<Callback<AdminUser>>,
    #[prop(optional, into)] on_toggle: Option<Callback<AdminUser>>,
) -> impl IntoView {
    if users.is_empty() {
        return view! { <EmptyState message="No users found."/> }.into_any();
    }
    let editable = on_edit.is_some() || on_toggle.is_some();

    view! {
        <div class="table-container">
            <table class="table">
                <thead class="table-header">
                    <tr>
                        <th class="table-header-cell">"Name"</th>
                        <th class="table-header-cell">"Email"</th>
                        <th class="table-header-cell">"Role"</th>
                        <th class="table-header-cell">"Status"</th>
                        <th class="table-header-cell">"Joined"</th>
                        {editable.then(|| view! { <th class="table-header-cell text-right">"Actions"</th> })}
                    </tr>
                </thead>
                <tbody class="table-body">
                    {users
                        .into_iter()
                        .map(|user| {
                            let for_edit = user.clone();
                            let for_toggle = user.clone();
                            let toggle_label = if user.is_active { "Deactivate" } else { "Activate" };
                            view! {
                                <tr class="table-row">
                                    <td class="table-cell font-medium text-surface-900">{user.full_name.clone()}</td>
                                    <td class="table-cell">{user.email.clone()}</td>
                                    <td class="table-cell">
                                        <span class=role_badge_class(user.role)>{user.role.label()}</span>
                                    </td>
                                    <td class="table-cell">
                                        <span class=user_status_badge_class(user.is_active)>
                                            {user_status_text(user.is_active)}
                                        </span>
                                    </td>
                                    <td class="table-cell">{format_date(&user.date_joined)}</td>
                                    {editable.then(|| view! {
                                        <td class="table-cell">
                                            <div class="flex items-center justify-end gap-2">
                                                {on_edit.map(|cb| view! {
                                                    <button
                                                        type="button"
                                                        class="btn-ghost btn-sm"
                                                        on:click=move |_| cb.run(for_edit.clone())
                                                    >
                                                        "Change role"
                                                    </button>
                                                })}
                                                {on_toggle.map(|cb| view! {
                                                    <button
                                                        type="button"
                                                        class="btn-ghost btn-sm"
                                                        on:click=move |_| cb.run(for_toggle.clone())
                                                    >
                                                        {toggle_label}
                                                    </button>
                                                })}
                                            </div>
                                        </td>
                                    })}
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
fn RoleModal(
    user: ReadSignal<Option<AdminUser>>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
    on_save: impl Fn(i64, Role) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let (role, set_role) = signal(Role::Passenger);

    Effect::new(move |_| {
        if let Some(u) = user.get() {
            set_role.set(u.role);
        }
    });

    view! {
        <Show when=move || user.with(Option::is_some)>
            <Modal title="Change role" on_close=on_close>
                <div class="modal-body space-y-4">
                    <p class="text-sm text-surface-600">
                        {move || user.with(|u| u.as_ref().map(|u| u.full_name.clone()).unwrap_or_default())}
                    </p>
                    <select
                        class="form-input"
                        on:change=move |ev| {
                            if let Some(r) = Role::parse(&event_target_value(&ev)) {
                                set_role.set(r);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|r| view! {
                                <option value=r.as_str() selected=move || role.get() == r>{r.label()}</option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close()>"Cancel"</button>
                    <button
                        type="button"
                        class="btn-primary"
                        on:click=move |_| {
                            if let Some(u) = user.get_untracked() {
                                on_save(u.pkid, role.get_untracked());
                            }
                        }
                    >
                        "Save"
                    </button>
                </div>
            </Modal>
        </Show>
    }
}
