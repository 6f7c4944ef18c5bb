use super::*;
use crate::memory::MemoryPatientStore;

fn fields(name: &str) -> PatientFields {
    PatientFields {
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "11 99999-0000".to_owned(),
        procedure: "Clareamento".to_owned(),
    }
}

fn fill(state: &mut PatientsState, values: &PatientFields) {
    for field in PatientField::ALL {
        state.set_field(field, values.get(field).to_owned());
    }
}

/// Drive one submit through the store the way the page does.
async fn submit_draft(store: &MemoryPatientStore, state: &mut PatientsState) -> bool {
    let submission = state.begin_submit().unwrap();
    let outcome = submit(store, &submission).await;
    let ok = outcome.is_ok();
    state.finish_submit(&submission, &outcome);
    if ok {
        state.apply_list(fetch_records(store).await);
    }
    ok
}

async fn mounted(store: &MemoryPatientStore) -> PatientsState {
    let mut state = PatientsState::default();
    state.apply_list(fetch_records(store).await);
    state
}

async fn seed(store: &MemoryPatientStore, names: &[&str]) -> Vec<Patient> {
    let mut out = Vec::new();
    for name in names {
        out.push(store.insert(&fields(name)).await.unwrap());
    }
    out
}

// =============================================================
// List
// =============================================================

#[tokio::test]
async fn list_is_idempotent_without_mutation() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana", "Bruno"]).await;
    let first = fetch_records(&store).await.unwrap();
    let second = fetch_records(&store).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn list_is_newest_first() {
    let store = MemoryPatientStore::new();
    let seeded = seed(&store, &["R1", "R2"]).await;
    let listed: Vec<PatientId> = fetch_records(&store).await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(listed, vec![seeded[1].id.clone(), seeded[0].id.clone()]);
}

#[tokio::test]
async fn failed_list_keeps_previous_snapshot() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    let before = state.records.clone();

    store.fail_next(StoreError::Transport("offline".to_owned()));
    assert!(!state.apply_list(fetch_records(&store).await));
    assert_eq!(state.records, before);
}

// =============================================================
// Create
// =============================================================

#[tokio::test]
async fn create_adds_exactly_one_record_with_draft_fields() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    let before: Vec<PatientId> = state.records.iter().map(|p| p.id.clone()).collect();

    fill(&mut state, &fields("Carla"));
    assert!(submit_draft(&store, &mut state).await);

    let new: Vec<&Patient> = state.records.iter().filter(|p| !before.contains(&p.id)).collect();
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].fields, fields("Carla"));
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.draft, FormDraft::default());
    assert!(!state.is_submitting);
}

#[tokio::test]
async fn rejected_create_keeps_records_and_draft() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    let records_before = state.records.clone();
    fill(&mut state, &fields("Duda"));
    let draft_before = state.draft.clone();

    store.fail_next(StoreError::Rejected { status: 409, message: "duplicate key".to_owned() });
    assert!(!submit_draft(&store, &mut state).await);

    assert_eq!(state.records, records_before);
    assert_eq!(state.draft, draft_before);
    assert!(!state.is_submitting);
}

#[test]
fn submit_requires_every_field() {
    let mut state = PatientsState::default();
    fill(&mut state, &fields("Ana"));
    state.set_field(PatientField::Phone, "  ".to_owned());
    assert_eq!(state.begin_submit(), Err(SubmitRejected::MissingField(PatientField::Phone)));
    assert!(!state.is_submitting);
}

#[test]
fn submit_is_not_reentrant() {
    let mut state = PatientsState::default();
    fill(&mut state, &fields("Ana"));
    assert_eq!(state.begin_submit(), Ok(Submission::Create(fields("Ana"))));
    assert!(state.is_submitting);
    assert_eq!(state.begin_submit(), Err(SubmitRejected::InFlight));
}

// =============================================================
// Update
// =============================================================

#[tokio::test]
async fn update_changes_only_the_edited_record() {
    let store = MemoryPatientStore::new();
    let seeded = seed(&store, &["Ana", "Bruno", "Carla"]).await;
    let mut state = mounted(&store).await;
    let target = state.records.iter().find(|p| p.id == seeded[1].id).unwrap().clone();

    state.begin_edit(&target);
    assert_eq!(state.draft.fields, target.fields);
    let replacement = fields("Bruna");
    fill(&mut state, &replacement);
    assert!(submit_draft(&store, &mut state).await);

    for patient in &state.records {
        if patient.id == target.id {
            assert_eq!(patient.fields, replacement);
        } else {
            let original = seeded.iter().find(|p| p.id == patient.id).unwrap();
            assert_eq!(patient.fields, original.fields);
        }
    }
    assert!(!state.draft.is_editing());
    assert_eq!(state.draft.fields, PatientFields::default());
}

#[tokio::test]
async fn failed_update_leaves_edit_mode_intact() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    let target = state.records[0].clone();
    state.begin_edit(&target);
    state.set_field(PatientField::Procedure, "Canal".to_owned());
    let draft_before = state.draft.clone();

    store.fail_next(StoreError::Transport("offline".to_owned()));
    assert!(!submit_draft(&store, &mut state).await);
    assert_eq!(state.draft, draft_before);
    assert_eq!(state.records[0], target);
}

#[tokio::test]
async fn update_of_deleted_record_is_not_found() {
    let store = MemoryPatientStore::new();
    let seeded = seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    state.begin_edit(&state.records[0].clone());
    store.delete(&seeded[0].id).await.unwrap();

    let submission = state.begin_submit().unwrap();
    let outcome = submit(&store, &submission).await;
    assert_eq!(outcome, Err(StoreError::NotFound(seeded[0].id.clone())));
    state.finish_submit(&submission, &outcome);
    assert!(state.draft.is_editing());
}

#[tokio::test]
async fn begin_edit_uses_displayed_snapshot_not_store() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    let shown = state.records[0].clone();
    store.overwrite(&shown.id, fields("Changed Elsewhere"));

    state.begin_edit(&shown);
    assert_eq!(state.draft.fields, shown.fields);
}

// =============================================================
// Delete
// =============================================================

#[tokio::test]
async fn delete_removes_exactly_that_record() {
    let store = MemoryPatientStore::new();
    let seeded = seed(&store, &["Ana", "Bruno"]).await;
    let mut state = mounted(&store).await;

    assert!(delete_record(&store, &seeded[0].id).await);
    state.apply_list(fetch_records(&store).await);
    assert_eq!(state.records.len(), 1);
    assert!(state.records.iter().all(|p| p.id != seeded[0].id));
}

#[tokio::test]
async fn delete_of_unknown_id_leaves_list_length() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana", "Bruno"]).await;
    assert!(delete_record(&store, &PatientId::new("999")).await);
    assert_eq!(fetch_records(&store).await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_delete_keeps_row_visible() {
    let store = MemoryPatientStore::new();
    let seeded = seed(&store, &["Ana"]).await;
    let state = mounted(&store).await;

    store.fail_next(StoreError::Rejected { status: 403, message: "permission denied".to_owned() });
    assert!(!delete_record(&store, &seeded[0].id).await);
    assert_eq!(state.records.len(), 1);
    assert_eq!(fetch_records(&store).await.unwrap().len(), 1);
}

// =============================================================
// Cancel
// =============================================================

#[tokio::test]
async fn cancel_edit_discards_draft_and_leaves_list() {
    let store = MemoryPatientStore::new();
    seed(&store, &["Ana"]).await;
    let mut state = mounted(&store).await;
    let listed_before = fetch_records(&store).await.unwrap();

    state.begin_edit(&state.records[0].clone());
    state.set_field(PatientField::Name, "Not Saved".to_owned());
    state.cancel_edit();

    assert_eq!(state.draft, FormDraft::default());
    assert_eq!(fetch_records(&store).await.unwrap(), listed_before);
}
