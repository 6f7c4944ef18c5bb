//! Patient records page: list, create, edit, delete, and sign out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shown by the session gate while a session exists. All record state lives
//! in one [`PatientsState`] signal; store calls run on spawned tasks and fold
//! their outcome back into it. The list is re-fetched on mount and after
//! every successful mutation.

use leptos::prelude::*;

use frontdesk::{PatientId, PatientsState, Session};

use crate::components::patient_form::PatientForm;
use crate::components::patient_table::PatientTable;
use crate::net::rest::RestPatientStore;
use crate::state::backend::Backend;

#[derive(Clone, Copy)]
struct PatientOps {
    backend: RwSignal<Option<Backend>>,
    session: Signal<Option<Session>>,
    state: RwSignal<PatientsState>,
}

impl PatientOps {
    /// Store bound to the current access token, read at call time so a
    /// refreshed token is picked up. `None` before the backend is connected
    /// or after sign-out; calls on it fail as `StoreError::Unavailable`.
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn store(self) -> Option<RestPatientStore> {
        let session = self.session.get_untracked()?;
        self.backend.with_untracked(|b| b.as_ref().map(|b| b.patient_store(&session)))
    }

    fn refresh(self) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = frontdesk::screen::fetch_records(&self.store()).await;
            self.state.update(|s| {
                s.apply_list(result);
            });
        });
    }

    fn submit(self) {
        let Some(attempt) = self.state.try_update(PatientsState::begin_submit) else {
            return;
        };
        let submission = match attempt {
            Ok(submission) => submission,
            Err(rejected) => {
                log::debug!("submit ignored: {rejected}");
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = frontdesk::screen::submit(&self.store(), &submission).await;
            let saved = outcome.is_ok();
            self.state.update(|s| s.finish_submit(&submission, &outcome));
            if saved {
                self.refresh();
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = submission;
    }

    fn delete(self, id: PatientId) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if frontdesk::screen::delete_record(&self.store(), &id).await {
                self.refresh();
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    }

    fn sign_out(self) {
        let Some(backend) = self.backend.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            backend.sessions.sign_out().await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = backend;
    }
}

#[component]
pub fn PatientsPage(session: Signal<Option<Session>>) -> impl IntoView {
    let backend = expect_context::<RwSignal<Option<Backend>>>();
    let state = RwSignal::new(PatientsState::default());
    let ops = PatientOps { backend, session, state };

    ops.refresh();

    let user_email = move || session.with(|s| s.as_ref().and_then(|s| s.user.email.clone()).unwrap_or_default());

    view! {
        <div class="patients-page">
            <header class="patients-page__header">
                <h1>"Painel - Clínica D'Luca"</h1>
                <span class="patients-page__user">{user_email}</span>
                <button class="logout-btn" on:click=move |_| ops.sign_out()>
                    "Sair"
                </button>
            </header>
            <PatientForm state=state on_submit=Callback::new(move |()| ops.submit())/>
            <PatientTable state=state on_delete=Callback::new(move |id: PatientId| ops.delete(id))/>
        </div>
    }
}
