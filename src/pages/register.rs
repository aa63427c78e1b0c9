//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::button::Button;
use crate::components::form_input::FormInput;
use crate::state::session::AppSession;
#[cfg(any(test, feature = "hydrate"))]
use crate::state::session::RegisterOutcome;

#[cfg(feature = "hydrate")]
const REGISTER_FAILED_MESSAGE: &str = "Registration failed.";
const MISSING_FIELDS_MESSAGE: &str = "Fill in every field.";
const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

#[derive(Clone, Debug, PartialEq, Eq)]
struct RegistrationInput {
    name: String,
    email: String,
    password: String,
    password_confirmation: String,
}

fn validate_registration_input(
    name: &str,
    email: &str,
    password: &str,
    password_confirmation: &str,
) -> Result<RegistrationInput, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() || password_confirmation.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    if password != password_confirmation {
        return Err(PASSWORD_MISMATCH_MESSAGE);
    }
    Ok(RegistrationInput {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        password_confirmation: password_confirmation.to_owned(),
    })
}

/// Route to open once registration succeeds.
#[cfg(any(test, feature = "hydrate"))]
fn next_route(outcome: RegisterOutcome) -> &'static str {
    match outcome {
        RegisterOutcome::SignedIn => "/dashboard",
        RegisterOutcome::AccountCreated => "/login",
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let input = match validate_registration_input(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirmation.get_untracked(),
        ) {
            Ok(input) => input,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = session
                    .register(&input.name, &input.email, &input.password, &input.password_confirmation)
                    .await;
                match result {
                    Ok(outcome) => navigate(next_route(outcome), NavigateOptions::default()),
                    Err(_) => error.set(REGISTER_FAILED_MESSAGE.to_owned()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, input);
        }
    };

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <h1>"Register"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <FormInput label="Name" value=name/>
                    <FormInput label="Email" input_type="email" value=email/>
                    <FormInput label="Password" input_type="password" value=password/>
                    <FormInput label="Confirm Password" input_type="password" value=confirmation/>
                    <Button disabled=busy>"Register"</Button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-card__error">{move || error.get()}</p>
                </Show>
                <p class="auth-card__switch">
                    "Already have an account? "
                    <a href="/login">"Login"</a>
                </p>
            </div>
        </main>
    }
}
