//! Labelled text input bound to a string signal.

use leptos::prelude::*;

#[component]
pub fn FormInput(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-input">
            <span class="form-input__label">{label}</span>
            <input
                class="form-input__field"
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}
