//! Session gate: decides which screen is on display.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at the root route. On the browser it loads the backend config,
//! wires the session manager into the [`ViewRouter`] signal, resolves the
//! stored session once, then keeps the access token fresh until unmounted.
//!
//! ERROR HANDLING
//! ==============
//! A config or session lookup failure resolves the router with an error,
//! which lands on the login screen rather than staying on the loader.

use leptos::prelude::*;

use frontdesk::{Screen, ViewRouter};

use crate::pages::login::LoginPage;
use crate::pages::patients::PatientsPage;
use crate::state::backend::Backend;
use crate::state::session_link::SessionLink;

/// Seconds between checks for an access token nearing expiry.
pub const REFRESH_POLL_SECS: u64 = 30;

#[component]
pub fn SessionGate() -> impl IntoView {
    let router = expect_context::<RwSignal<ViewRouter>>();
    let backend = expect_context::<RwSignal<Option<Backend>>>();
    let link = SessionLink::default();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(start(router, backend, link.clone()));
    #[cfg(not(feature = "hydrate"))]
    let _ = backend;

    on_cleanup(move || link.release());

    // Token refreshes change the session but not the screen; the memo keeps
    // the patients page mounted across them.
    let screen = Memo::new(move |_| router.with(ViewRouter::screen));
    let session = Signal::derive(move || router.with(|r| r.session().cloned()));

    view! {
        {move || match screen.get() {
            Screen::Loading => view! { <div class="loader">"Carregando..."</div> }.into_any(),
            Screen::Login => view! { <LoginPage/> }.into_any(),
            Screen::Patients => view! { <PatientsPage session=session/> }.into_any(),
        }}
    }
}

#[cfg(feature = "hydrate")]
async fn start(router: RwSignal<ViewRouter>, backend: RwSignal<Option<Backend>>, link: SessionLink) {
    let config = match crate::net::api::fetch_backend_config().await {
        Ok(config) => config,
        Err(e) => {
            router.update(|r| r.resolve(Err(frontdesk::AuthError::Transport(e))));
            return;
        }
    };

    let connected = Backend::connect(config);
    let subscription = connected.sessions.on_session_change(move |event, session| {
        router.update(|r| r.apply_change(event, session.cloned()));
    });
    if !link.attach(subscription) {
        return;
    }
    backend.set(Some(connected.clone()));

    let lookup = connected.sessions.get_current_session().await;
    router.update(|r| r.resolve(lookup));

    keep_fresh(&connected, &link).await;
}

#[cfg(feature = "hydrate")]
async fn keep_fresh(backend: &Backend, link: &SessionLink) {
    loop {
        gloo_timers::future::sleep(std::time::Duration::from_secs(REFRESH_POLL_SECS)).await;
        if !link.is_alive() {
            break;
        }
        if let Err(e) = backend.sessions.refresh_if_due().await {
            log::warn!("session refresh failed: {e}");
        }
    }
}
