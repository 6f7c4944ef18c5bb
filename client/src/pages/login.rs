//! Login page: email + password sign-in against the hosted auth service.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use frontdesk::AuthError;

use crate::state::backend::Backend;

const MISSING_CREDENTIALS: &str = "Informe email e senha.";
const BACKEND_UNAVAILABLE: &str = "Serviço indisponível. Tente novamente mais tarde.";

/// Trim the email and require both values. The password is sent as typed.
pub fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Inline message for a failed sign-in.
pub fn sign_in_failed_message(error: &AuthError) -> String {
    match error {
        AuthError::Rejected { message, .. } => format!("Falha no login: {message}"),
        _ => format!("Falha no login: {BACKEND_UNAVAILABLE}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let backend = expect_context::<RwSignal<Option<Backend>>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let Some(connected) = backend.get_untracked() else {
            info.set(BACKEND_UNAVAILABLE.to_owned());
            return;
        };
        busy.set(true);
        info.set("Entrando...".to_owned());

        // On success the gate swaps this page out; only failures touch it.
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = connected.sessions.sign_in_with_password(&email_value, &password_value).await {
                log::warn!("sign-in failed: {e}");
                info.set(sign_in_failed_message(&e));
                busy.set(false);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (connected, email_value, password_value);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Clínica D'Luca"</h1>
                <p class="login-card__subtitle">"Acesso da recepção"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Senha"
                        required=true
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Entrar"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
