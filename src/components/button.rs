//! Full-width primary button used by the auth forms.

use leptos::prelude::*;

#[component]
pub fn Button(
    children: Children,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <button class="btn btn--primary btn--block" type="submit" disabled=move || disabled.get()>
            {children()}
        </button>
    }
}
