use crate::components_impl::{SignUpFormState, validate_registration};
use crate::store::use_user_store;
use crate::types::{Credentials, Role};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

#[component]
pub fn SignInPage() -> impl IntoView {
    let store = use_user_store();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            store.toasts().error("Please fill in all fields.");
            return;
        }

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if store.sign_in(credentials).await {
                navigate("/dashboard", Default::default());
            }
        });
    };

    view! {
        <section class="mx-auto max-w-md px-4 py-16">
            <form class="card space-y-4" on:submit=handle_submit>
                <h1 class="text-2xl font-bold text-center">"Sign in"</h1>
                <Show when=move || store.state().with(|s| s.error.is_some())>
                    <p class="text-danger-600 text-sm" on:click=move |_| store.clear_error()>
                        {move || store.state().with(|s| s.error.clone().unwrap_or_default())}
                    </p>
                </Show>
                <div class="form-group">
                    <label class="form-label form-label-required">"Email"</label>
                    <input
                        type="email"
                        class="form-input"
                        autocomplete="email"
                        required
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label class="form-label form-label-required">"Password"</label>
                    <input
                        type="password"
                        class="form-input"
                        autocomplete="current-password"
                        required
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn-primary w-full" disabled=move || store.loading()>
                    {move || if store.loading() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="text-center text-sm text-surface-500">
                    "No account yet? " <A href="/sign-up" attr:class="text-primary-600">"Sign up"</A>
                </p>
            </form>
        </section>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let store = use_user_store();
    let navigate = use_navigate();
    let (username, set_username) = signal(String::new());
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (role, set_role) = signal(Role::Passenger);
    let (password, set_password) = signal(String::new());
    let (password2, set_password2) = signal(String::new());

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = SignUpFormState {
            username: username.get(),
            first_name: first_name.get(),
            last_name: last_name.get(),
            email: email.get(),
            role: role.get(),
            password: password.get(),
            password2: password2.get(),
        };
        let registration = match validate_registration(state) {
            Ok(registration) => registration,
            Err(message) => {
                store.toasts().error(message);
                return;
            }
        };

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if store.register(registration).await {
                navigate("/sign-in", Default::default());
            }
        });
    };

    view! {
        <section class="mx-auto max-w-lg px-4 py-16">
            <form class="card space-y-4" on:submit=handle_submit>
                <h1 class="text-2xl font-bold text-center">"Create an account"</h1>
                <TextField label="Username" value=username set_value=set_username/>
                <div class="grid grid-cols-2 gap-4">
                    <TextField label="First name" value=first_name set_value=set_first_name/>
                    <TextField label="Last name" value=last_name set_value=set_last_name/>
                </div>
                <TextField label="Email" kind="email" value=email set_value=set_email/>
                <div class="form-group">
                    <label class="form-label form-label-required">"I want to"</label>
                    <select
                        class="form-input"
                        on:change=move |ev| {
                            set_role.set(match Role::parse(&event_target_value(&ev)) {
                                Some(Role::Driver) => Role::Driver,
                                _ => Role::Passenger,
                            });
                        }
                    >
                        <option value="passenger" selected=move || role.get() == Role::Passenger>
                            "Ride as a passenger"
                        </option>
                        <option value="driver" selected=move || role.get() == Role::Driver>
                            "Drive with YouRide"
                        </option>
                    </select>
                </div>
                <TextField label="Password" kind="password" value=password set_value=set_password/>
                <TextField label="Confirm password" kind="password" value=password2 set_value=set_password2/>
                <button type="submit" class="btn-primary w-full" disabled=move || store.loading()>
                    {move || if store.loading() { "Creating account..." } else { "Sign up" }}
                </button>
                <p class="text-center text-sm text-surface-500">
                    "Already registered? " <A href="/sign-in" attr:class="text-primary-600">"Sign in"</A>
                </p>
            </form>
        </section>
    }
}

#[component]
fn TextField(
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label form-label-required">{label}</label>
            <input
                type=kind
                class="form-input"
                required
                prop:value=value
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </div>
    }
}
