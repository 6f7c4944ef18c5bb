//! Patient records table with per-row edit and delete actions.

use leptos::prelude::*;

use frontdesk::{Patient, PatientField, PatientId, PatientsState};

#[component]
pub fn PatientTable(state: RwSignal<PatientsState>, on_delete: Callback<PatientId>) -> impl IntoView {
    // Typing in the form must not re-render the rows.
    let records = Memo::new(move |_| state.with(|s| s.records.clone()));

    let headers = PatientField::ALL.into_iter().map(|field| view! { <th>{field.label()}</th> }).collect_view();

    view! {
        <section class="patient-table">
            <h2>"Pacientes"</h2>
            <table>
                <thead>
                    <tr>
                        {headers}
                        <th>"Ações"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || records.get()
                        key=|patient| (patient.id.clone(), patient.fields.clone())
                        children=move |patient: Patient| {
                            let id = patient.id.clone();
                            let cells = PatientField::ALL
                                .into_iter()
                                .map(|field| view! { <td>{patient.fields.get(field).to_owned()}</td> })
                                .collect_view();
                            view! {
                                <tr>
                                    {cells}
                                    <td class="patient-table__actions">
                                        <button class="btn-edit" on:click=move |_| state.update(|s| s.begin_edit(&patient))>
                                            "Editar"
                                        </button>
                                        <button class="btn-delete" on:click=move |_| on_delete.run(id.clone())>
                                            "Deletar"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
