//! Create / edit form for a single patient.

#[cfg(test)]
#[path = "patient_form_test.rs"]
mod patient_form_test;

use leptos::prelude::*;

use frontdesk::{FormDraft, PatientField, PatientsState};

/// Form heading for the current draft.
pub fn form_title(draft: &FormDraft) -> &'static str {
    if draft.is_editing() { "Editar Paciente" } else { "Novo Paciente" }
}

/// Submit button label; a save in flight wins over the mode.
pub fn submit_label(state: &PatientsState) -> &'static str {
    if state.is_submitting {
        "Salvando..."
    } else if state.draft.is_editing() {
        "Atualizar"
    } else {
        "Adicionar"
    }
}

#[component]
pub fn PatientForm(state: RwSignal<PatientsState>, on_submit: Callback<()>) -> impl IntoView {
    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    let inputs = PatientField::ALL
        .into_iter()
        .map(|field| {
            view! {
                <input
                    class="patient-form__input"
                    type=field.input_type()
                    placeholder=field.label()
                    required=true
                    prop:value=move || state.with(|s| s.draft.fields.get(field).to_owned())
                    on:input=move |ev| state.update(|s| s.set_field(field, event_target_value(&ev)))
                />
            }
        })
        .collect_view();

    view! {
        <section class="patient-form">
            <h2>{move || state.with(|s| form_title(&s.draft))}</h2>
            <form on:submit=submit>
                {inputs}
                <div class="patient-form__actions">
                    <button type="submit" disabled=move || state.with(|s| s.is_submitting)>
                        {move || state.with(submit_label)}
                    </button>
                    <Show when=move || state.with(|s| s.draft.is_editing())>
                        <button type="button" class="btn-secondary" on:click=move |_| state.update(PatientsState::cancel_edit)>
                            "Cancelar"
                        </button>
                    </Show>
                </div>
            </form>
        </section>
    }
}
