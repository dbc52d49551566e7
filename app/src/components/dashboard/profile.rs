use crate::components::Avatar;
use crate::components::common::{PageHeader, on_file_selected};
use crate::components_impl::{ProfileFormState, build_profile_update, extract_profile_form_state};
use crate::store::use_user_store;
use crate::types::Upload;
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let store = use_user_store();
    let form = RwSignal::new(ProfileFormState::default());
    let (photo, set_photo) = signal::<Option<Upload>>(None);

    Effect::new(move |_| {
        form.set(extract_profile_form_state(store.profile().as_ref()));
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let update = build_profile_update(form.get_untracked(), photo.get_untracked());
        leptos::task::spawn_local(async move {
            if store.update_profile(update).await {
                set_photo.set(None);
            }
        });
    };

    let summary = move || store.profile().unwrap_or_default();

    view! {
        <div class="space-y-6">
            <PageHeader title="My profile"/>
            <div class="grid gap-6 lg:grid-cols-3">
                <div class="card flex flex-col items-center gap-3 text-center">
                    <div class="scale-[2.5] my-8"><Avatar/></div>
                    <p class="text-lg font-semibold">{move || summary().full_name}</p>
                    <p class="text-sm text-surface-500">{move || summary().email}</p>
                    <span class="badge-neutral">{move || summary().role.label()}</span>
                </div>

                <form class="card lg:col-span-2 space-y-4" on:submit=submit>
                    <div class="grid gap-4 md:grid-cols-2">
                        <ProfileField label="First name" form=form get=|f| f.first_name.clone() set=|f, v| f.first_name = v/>
                        <ProfileField label="Last name" form=form get=|f| f.last_name.clone() set=|f, v| f.last_name = v/>
                        <ProfileField label="Phone number" form=form get=|f| f.phone_number.clone() set=|f, v| f.phone_number = v/>
                        <div class="form-group">
                            <label class="form-label">"Gender"</label>
                            <select
                                class="form-input"
                                on:change=move |ev| form.update(|f| f.gender = event_target_value(&ev))
                            >
                                {[("", "Prefer not to say"), ("male", "Male"), ("female", "Female"), ("other", "Other")]
                                    .into_iter()
                                    .map(|(value, label)| view! {
                                        <option value=value selected=move || form.with(|f| f.gender == value)>
                                            {label}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <ProfileField label="Country" form=form get=|f| f.country.clone() set=|f, v| f.country = v/>
                        <ProfileField label="City" form=form get=|f| f.city.clone() set=|f, v| f.city = v/>
                    </div>
                    <div class="form-group">
                        <label class="form-label">"About me"</label>
                        <textarea
                            class="form-input"
                            rows="4"
                            prop:value=move || form.with(|f| f.about_me.clone())
                            on:input=move |ev| form.update(|f| f.about_me = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Profile photo"</label>
                        <input
                            type="file"
                            accept="image/*"
                            class="form-input"
                            on:change=move |ev| on_file_selected(&ev, set_photo, store.toasts())
                        />
                    </div>
                    <button type="submit" class="btn-primary" disabled=move || store.loading()>
                        {move || if store.loading() { "Saving..." } else { "Save changes" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[component]
fn ProfileField(
    label: &'static str,
    form: RwSignal<ProfileFormState>,
    get: fn(&ProfileFormState) -> String,
    set: fn(&mut ProfileFormState, String),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label">{label}</label>
            <input
                type="text"
                class="form-input"
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}
