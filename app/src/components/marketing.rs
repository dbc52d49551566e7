use crate::components_impl::{validate_application, validate_contact_message};
use crate::store::use_user_store;
use crate::toast::use_toasts;
use leptos::prelude::*;
use leptos_router::components::A;

static SERVICES: [(&str, &str); 3] = [
    ("Ride sharing", "Share the trip with other passengers and split the cost."),
    ("City to city", "Fixed-price routes between major cities, booked in advance."),
    ("Rent with driver", "Book a car together with an experienced driver."),
];

static REASONS: [(&str, &str); 4] = [
    ("Verified drivers", "Every driver is reviewed by our team before their first trip."),
    ("Clear prices", "Each route has a fixed fare in Afghani, shown before you book."),
    ("Plan ahead", "Schedule a trip for later and add notes for your driver."),
    ("Always reachable", "Our support team answers every day of the week."),
];

static STEPS: [(&str, &str); 4] = [
    ("Create an account", "Sign up as a passenger in under a minute."),
    ("Pick a route", "Choose where you start and where you are going."),
    ("Meet your driver", "A driver accepts your request and gets ready."),
    ("Enjoy the ride", "Travel comfortably, safely and on time."),
];

static TESTIMONIALS: [(&str, &str); 3] = [
    ("Mariam", "Booking Kabul to Mazar took two minutes and the driver was on time."),
    ("Farid", "I drive with YouRide on weekends. Trips are clear and fairly priced."),
    ("Zahra", "Scheduling a trip for my parents ahead of time was very easy."),
];

static FAQ: [(&str, &str); 4] = [
    (
        "How do I book a ride?",
        "Sign in, open your dashboard and choose Request a trip. Pick a route, set the number of passengers and confirm.",
    ),
    (
        "Can I book a car with a driver?",
        "Yes. Every trip on YouRide is driven by one of our verified drivers.",
    ),
    (
        "What do I need to become a driver?",
        "A valid driving license and some driving experience. Apply from the Become a driver page.",
    ),
    (
        "Are the vehicles insured?",
        "Vehicles registered with YouRide must carry valid insurance.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="bg-primary text-white py-24">
            <div class="mx-auto max-w-7xl px-4 text-center">
                <h1 class="text-5xl font-bold mb-4">"Your ride, your way"</h1>
                <p class="text-lg mb-8 text-blue-100">
                    "Book safe and affordable trips between cities with trusted drivers."
                </p>
                <div class="flex justify-center gap-4">
                    <A href="/sign-up" attr:class="btn-primary">"Get started"</A>
                    <A href="/become-a-driver" attr:class="btn-secondary">"Drive with us"</A>
                </div>
            </div>
        </section>

        <CardSection title="Our popular services" items=&SERVICES/>
        <CardSection title="Why choose YouRide" items=&REASONS/>

        <section class="py-16 bg-gray-50">
            <div class="mx-auto max-w-7xl px-4">
                <h2 class="text-3xl font-bold text-center mb-10">"How to get started"</h2>
                <ol class="grid gap-6 md:grid-cols-4">
                    {STEPS
                        .iter()
                        .enumerate()
                        .map(|(i, (title, text))| view! {
                            <li class="card">
                                <span class="text-primary-600 font-bold">{i + 1}</span>
                                <h3 class="font-semibold mt-2">{*title}</h3>
                                <p class="text-sm text-surface-500 mt-1">{*text}</p>
                            </li>
                        })
                        .collect_view()}
                </ol>
            </div>
        </section>

        <section class="py-16">
            <div class="mx-auto max-w-7xl px-4">
                <h2 class="text-3xl font-bold text-center mb-10">"Five star reviews"</h2>
                <div class="grid gap-6 md:grid-cols-3">
                    {TESTIMONIALS
                        .iter()
                        .map(|(name, quote)| view! {
                            <blockquote class="card">
                                <p class="italic text-surface-700">"\u{201c}" {*quote} "\u{201d}"</p>
                                <footer class="mt-3 font-semibold">{*name}</footer>
                            </blockquote>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>

        <FaqSection/>
    }
}

#[component]
fn CardSection(title: &'static str, items: &'static [(&'static str, &'static str)]) -> impl IntoView {
    view! {
        <section class="py-16">
            <div class="mx-auto max-w-7xl px-4">
                <h2 class="text-3xl font-bold text-center mb-10">{title}</h2>
                <div class="grid gap-6 md:grid-cols-3 lg:grid-cols-4">
                    {items
                        .iter()
                        .map(|(heading, text)| view! {
                            <div class="card">
                                <h3 class="font-semibold text-lg">{*heading}</h3>
                                <p class="text-sm text-surface-500 mt-2">{*text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn FaqSection() -> impl IntoView {
    let (open, set_open) = signal(Some(0usize));

    view! {
        <section class="py-16 bg-gray-50">
            <div class="mx-auto max-w-3xl px-4">
                <h2 class="text-3xl font-bold text-center mb-10">"Frequently asked questions"</h2>
                {FAQ
                    .iter()
                    .enumerate()
                    .map(|(i, (question, answer))| view! {
                        <div class="border-b py-4">
                            <button
                                type="button"
                                class="w-full text-left font-semibold flex justify-between"
                                on:click=move |_| set_open.update(|o| {
                                    *o = if *o == Some(i) { None } else { Some(i) };
                                })
                            >
                                {*question}
                                <span>{move || if open.get() == Some(i) { "−" } else { "+" }}</span>
                            </button>
                            <Show when=move || open.get() == Some(i)>
                                <p class="py-2 text-surface-600">{*answer}</p>
                            </Show>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="mx-auto max-w-4xl px-4 py-16 space-y-8">
            <h1 class="text-4xl font-bold">"Our story"</h1>
            <p class="text-surface-700">
                "YouRide started with a simple idea: travelling between cities should be easy to plan, \
                 fairly priced and safe. We connect passengers with verified drivers on fixed routes \
                 so everyone knows what to expect before the trip begins."
            </p>
            <div class="grid gap-6 md:grid-cols-3 text-center">
                <div class="card"><p class="text-3xl font-bold">"500+"</p><p>"Happy drivers"</p></div>
                <div class="card"><p class="text-3xl font-bold">"300+"</p><p>"Vehicles"</p></div>
                <div class="card"><p class="text-3xl font-bold">"10k+"</p><p>"Happy customers"</p></div>
            </div>
        </section>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = use_toasts();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (sending, set_sending) = signal(false);

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let contact = match validate_contact_message(
            &name.get_untracked(),
            &email.get_untracked(),
            &message.get_untracked(),
        ) {
            Ok(contact) => contact,
            Err(e) => {
                toasts.error(e);
                return;
            }
        };

        set_sending.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.send_contact_message(&contact).await {
                Ok(()) => {
                    toasts.success("Your message has been sent successfully!");
                    set_name.set(String::new());
                    set_email.set(String::new());
                    set_message.set(String::new());
                }
                Err(e) => toasts.error(e.to_string()),
            }
            set_sending.set(false);
        });
    };

    view! {
        <section class="mx-auto max-w-2xl px-4 py-16">
            <h1 class="text-4xl font-bold mb-2">"Get in touch"</h1>
            <p class="text-surface-500 mb-8">"Our office is in Kabul. We usually reply within a day."</p>
            <form class="card space-y-4" on:submit=handle_submit>
                <div class="form-group">
                    <label class="form-label form-label-required">"Name"</label>
                    <input
                        type="text"
                        class="form-input"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label class="form-label form-label-required">"Email"</label>
                    <input
                        type="email"
                        class="form-input"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label class="form-label form-label-required">"Message"</label>
                    <textarea
                        class="form-input"
                        rows="5"
                        prop:value=message
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn-primary w-full" disabled=move || sending.get()>
                    {move || if sending.get() { "Sending..." } else { "Send message" }}
                </button>
            </form>
        </section>
    }
}

#[component]
pub fn BecomeDriverPage() -> impl IntoView {
    let store = use_user_store();
    let toasts = use_toasts();
    let (license, set_license) = signal(String::new());
    let (experience, set_experience) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (submitted, set_submitted) = signal(false);

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = match validate_application(&license.get(), &experience.get()) {
            Ok(form) => form,
            Err(message) => {
                toasts.error(message);
                return;
            }
        };

        set_submitting.set(true);
        let client = store.client();
        leptos::task::spawn_local(async move {
            match client.apply_as_driver(&form).await {
                Ok(()) => {
                    toasts.success("Application submitted! An admin will review it shortly.");
                    set_submitted.set(true);
                }
                Err(e) => toasts.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="mx-auto max-w-md px-4 py-16">
            <Show
                when=move || store.is_authenticated()
                fallback=|| view! {
                    <div class="card text-center space-y-4">
                        <h1 class="text-2xl font-bold">"Become a driver"</h1>
                        <p class="text-surface-600">"Sign in to your account to apply."</p>
                        <A href="/sign-in" attr:class="btn-primary">"Sign in"</A>
                    </div>
                }
            >
                <Show
                    when=move || !submitted.get()
                    fallback=|| view! {
                        <div class="card text-center space-y-4">
                            <h1 class="text-2xl font-bold text-green-600">"Thank you!"</h1>
                            <p class="text-surface-700">
                                "Your application has been received. We will review it and get back to you soon."
                            </p>
                            <A href="/dashboard" attr:class="btn-primary">"Back to dashboard"</A>
                        </div>
                    }
                >
                    <form class="card space-y-4" on:submit=handle_submit>
                        <h1 class="text-2xl font-bold text-center">"Become a driver"</h1>
                        <p class="text-center text-surface-600">
                            "Fill out the form below to start the application process."
                        </p>
                        <div class="form-group">
                            <label class="form-label form-label-required">"License number"</label>
                            <input
                                type="text"
                                class="form-input"
                                required
                                prop:value=license
                                on:input=move |ev| set_license.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label form-label-required">"Years of experience"</label>
                            <input
                                type="number"
                                class="form-input"
                                min="0"
                                required
                                prop:value=experience
                                on:input=move |ev| set_experience.set(event_target_value(&ev))
                            />
                        </div>
                        <button type="submit" class="btn-primary w-full" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Submitting..." } else { "Submit application" }}
                        </button>
                    </form>
                </Show>
            </Show>
        </section>
    }
}
