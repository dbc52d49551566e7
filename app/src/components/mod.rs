use crate::components_impl::{initials, profile_photo_url};
use crate::config::api_base_url;
use crate::store::{UserStore, use_user_store};
use crate::toast::{Toaster, Toasts};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{A, Route, Router, Routes},
};

pub mod auth;
pub mod city;
pub mod common;
pub mod dashboard;
pub mod marketing;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let toasts = Toasts::provide();
    let store = UserStore::provide(toasts);

    // Effects only run in the browser, after hydration.
    Effect::new(move |_| store.restore_session());

    view! {
        <Title text="YouRide"/>

        <Router>
            <Routes fallback=|| view! { <SiteLayout><NotFound/></SiteLayout> }>
                <Route path=StaticSegment("") view=|| view! { <SiteLayout><marketing::HomePage/></SiteLayout> }/>
                <Route path=StaticSegment("about") view=|| view! { <SiteLayout><marketing::AboutPage/></SiteLayout> }/>
                <Route path=StaticSegment("contact") view=|| view! { <SiteLayout><marketing::ContactPage/></SiteLayout> }/>
                <Route
                    path=StaticSegment("become-a-driver")
                    view=|| view! { <SiteLayout><marketing::BecomeDriverPage/></SiteLayout> }
                />
                <Route path=StaticSegment("city") view=|| view! { <SiteLayout><city::CityPage/></SiteLayout> }/>
                <Route path=StaticSegment("sign-in") view=|| view! { <SiteLayout><auth::SignInPage/></SiteLayout> }/>
                <Route path=StaticSegment("sign-up") view=|| view! { <SiteLayout><auth::SignUpPage/></SiteLayout> }/>
                <Route path=StaticSegment("dashboard") view=dashboard::DashboardPage/>
                <Route
                    path=(StaticSegment("dashboard"), ParamSegment("section"))
                    view=dashboard::DashboardPage
                />
            </Routes>
        </Router>

        <Toaster/>
    }
}

#[component]
fn SiteLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex flex-col min-h-screen bg-white">
            <SiteHeader/>
            <main class="flex-grow">{children()}</main>
            <SiteFooter/>
        </div>
    }
}

static NAV_LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/city", "Book a trip"),
    ("/contact", "Contact"),
    ("/become-a-driver", "Become a driver"),
];

#[component]
fn SiteHeader() -> impl IntoView {
    let store = use_user_store();
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <header class="bg-primary">
            <nav class="mx-auto max-w-7xl px-4 flex h-16 items-center justify-between text-white">
                <div class="flex items-center gap-10">
                    <A href="/" attr:class="text-3xl font-bold">"YouRide"</A>
                    <div class="hidden md:flex gap-6">
                        {NAV_LINKS
                            .iter()
                            .map(|&(href, label)| view! { <A href=href attr:class="hover:text-blue-200">{label}</A> })
                            .collect_view()}
                    </div>
                </div>
                <div class="flex items-center gap-3">
                    <Show
                        when=move || store.is_authenticated()
                        fallback=|| view! {
                            <div class="flex gap-3">
                                <A href="/sign-in" attr:class="btn-secondary btn-sm">"Sign in"</A>
                                <A href="/sign-up" attr:class="btn-primary btn-sm">"Sign up"</A>
                            </div>
                        }
                    >
                        <A href="/dashboard" attr:class="flex items-center gap-2">
                            <Avatar/>
                            <span class="hidden lg:inline">"Dashboard"</span>
                        </A>
                    </Show>
                    <button
                        type="button"
                        class="md:hidden p-2 text-2xl"
                        aria-label="Toggle menu"
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        {move || if menu_open.get() { "✕" } else { "☰" }}
                    </button>
                </div>
            </nav>
            <Show when=move || menu_open.get()>
                // Any link click bubbles up here and closes the menu.
                <div
                    class="md:hidden flex flex-col gap-1 px-4 pb-4 text-white"
                    on:click=move |_| set_menu_open.set(false)
                >
                    {NAV_LINKS
                        .iter()
                        .map(|&(href, label)| view! {
                            <A href=href attr:class="block rounded-md px-3 py-2 hover:bg-white/10">{label}</A>
                        })
                        .collect_view()}
                </div>
            </Show>
        </header>
    }
}

/// Profile photo of the signed-in user, or their initials.
#[component]
pub fn Avatar() -> impl IntoView {
    let store = use_user_store();
    let photo = move || {
        store.profile().and_then(|p| {
            profile_photo_url(&api_base_url(), p.profile_photo.as_deref())
        })
    };
    let name = move || store.profile().map(|p| p.full_name).unwrap_or_default();

    view! {
        {move || match photo() {
            Some(src) => view! {
                <img src=src alt="User" class="w-8 h-8 rounded-full object-cover"/>
            }.into_any(),
            None => view! {
                <div class="w-8 h-8 rounded-full bg-gray-300 flex items-center justify-center text-xs font-semibold text-gray-700">
                    {initials(&name())}
                </div>
            }.into_any(),
        }}
    }
}

#[component]
fn SiteFooter() -> impl IntoView {
    view! {
        <footer class="bg-gray-900 text-gray-300 py-10">
            <div class="mx-auto max-w-7xl px-4 grid gap-8 md:grid-cols-3">
                <div>
                    <h3 class="text-xl font-bold text-white mb-2">"YouRide"</h3>
                    <p class="text-sm">"Safe, affordable rides between the cities you care about."</p>
                </div>
                <div class="flex flex-col gap-2 text-sm">
                    <A href="/">"Home"</A>
                    <A href="/about">"About us"</A>
                    <A href="/contact">"Contact"</A>
                </div>
                <div class="text-sm">
                    <p>"Kabul, Afghanistan"</p>
                    <p>"support@youride.af"</p>
                </div>
            </div>
            <p class="text-center text-xs text-gray-500 mt-8">"© YouRide. All rights reserved."</p>
        </footer>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center py-24">
            <h1 class="text-6xl font-bold text-surface-900 mb-4">"404"</h1>
            <p class="text-surface-500 mb-8">"The page you are looking for does not exist."</p>
            <A href="/" attr:class="btn-primary">"Back to home"</A>
        </div>
    }
}
