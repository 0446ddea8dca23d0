use resume_core::engine::{
    add_experience, add_experience_task, add_project, add_skill, remove_experience,
    remove_experience_task, remove_project, remove_skill, reset, set_dashboard_field,
    set_personal_field, set_summary, update_experience_field, update_experience_task,
    update_project_field,
};
use resume_core::{apply, Document, Edit, ExperienceField, PersonalField, ProjectField};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn operations_leave_input_document_untouched() {
    let doc = Document::template();
    let before = doc.clone();

    let next = set_personal_field(&doc, PersonalField::Name, "Alice");
    let next = add_skill(&next, "Go");

    assert_eq!(doc, before);
    assert_eq!(next.personal.name, "Alice");
    assert_eq!(next.skills.last().map(String::as_str), Some("Go"));
}

#[test]
fn add_experience_generates_unique_ids_and_placeholders() {
    let doc = Document::template();
    let existing: HashSet<_> = doc.experience.iter().map(|entry| entry.id).collect();

    let once = add_experience(&doc);
    let twice = add_experience(&once);

    let first_new = once.experience.last().unwrap();
    let second_new = twice.experience.last().unwrap();
    assert!(!existing.contains(&first_new.id));
    assert!(!existing.contains(&second_new.id));
    assert_ne!(first_new.id, second_new.id);
    assert_eq!(twice.experience.len(), doc.experience.len() + 2);
    assert_eq!(first_new.company, "Company Name");
    assert_eq!(first_new.tasks, vec!["Task 1".to_string()]);
    twice.validate().unwrap();
}

#[test]
fn remove_experience_task_shifts_later_tasks_down() {
    let doc = Document::template();
    let entry = &doc.experience[0];
    let original = entry.tasks.clone();

    let next = remove_experience_task(&doc, entry.id, 1);
    let tasks = &next.experience[0].tasks;

    assert_eq!(tasks.len(), original.len() - 1);
    assert_eq!(tasks[0], original[0]);
    assert_eq!(tasks[1], original[2]);
}

#[test]
fn removing_last_task_leaves_empty_sequence() {
    let mut doc = Document::template();
    let id = doc.experience[0].id;
    for _ in 0..3 {
        doc = remove_experience_task(&doc, id, 0);
    }
    assert!(doc.experience[0].tasks.is_empty());

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["experience"][0]["tasks"], serde_json::json!([]));

    let unchanged = remove_experience_task(&doc, id, 0);
    assert_eq!(unchanged, doc);
}

#[test]
fn update_experience_task_out_of_bounds_is_noop() {
    let mut doc = Document::template();
    let id = doc.experience[1].id;
    doc = remove_experience_task(&doc, id, 2);
    assert_eq!(doc.experience[1].tasks.len(), 2);

    let next = update_experience_task(&doc, id, 99, "never stored");
    assert_eq!(next, doc);

    let next = update_experience_task(&doc, id, 1, "rewritten");
    assert_eq!(next.experience[1].tasks[1], "rewritten");
    assert_eq!(next.experience[1].tasks.len(), 2);
}

#[test]
fn unknown_entry_ids_are_noops() {
    let doc = Document::template();
    let missing = Uuid::new_v4();

    assert_eq!(remove_experience(&doc, missing), doc);
    assert_eq!(remove_project(&doc, missing), doc);
    assert_eq!(add_experience_task(&doc, missing), doc);
    assert_eq!(
        update_experience_field(&doc, missing, ExperienceField::Period, "x"),
        doc
    );
    assert_eq!(
        update_project_field(&doc, missing, ProjectField::Title, "x"),
        doc
    );
}

#[test]
fn entry_field_updates_target_only_matching_id() {
    let doc = Document::template();
    let target = doc.projects[1].id;

    let next = update_project_field(&doc, target, ProjectField::Description, "new text");
    assert_eq!(next.projects[1].description, "new text");
    assert_eq!(next.projects[0], doc.projects[0]);

    let exp_id = doc.experience[0].id;
    let next = update_experience_field(&doc, exp_id, ExperienceField::Position, "Lead");
    assert_eq!(next.experience[0].position, "Lead");
    assert_eq!(next.experience[0].id, exp_id);
    assert_eq!(next.experience[1], doc.experience[1]);
}

#[test]
fn remove_experience_keeps_remaining_ids_stable() {
    let doc = add_experience(&Document::template());
    let removed = doc.experience[0].id;
    let kept: Vec<_> = doc.experience[1..].iter().map(|entry| entry.id).collect();

    let next = remove_experience(&doc, removed);
    let ids: Vec<_> = next.experience.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, kept);
}

#[test]
fn skills_keep_insertion_order_and_ignore_bad_index() {
    let doc = Document::template();
    let next = add_skill(&add_skill(&doc, "Rust"), "Go");
    assert_eq!(&next.skills[next.skills.len() - 2..], ["Rust", "Go"]);

    let next = remove_skill(&next, 0);
    assert_eq!(next.skills[0], "CSS3");
    assert_eq!(remove_skill(&next, 100), next);
}

#[test]
fn add_project_appends_placeholder_with_fresh_id() {
    let doc = Document::template();
    let next = add_project(&doc);
    let added = next.projects.last().unwrap();

    assert_eq!(added.title, "Project Title");
    assert_eq!(added.description, "Project Description");
    assert!(doc.projects.iter().all(|entry| entry.id != added.id));
}

#[test]
fn dashboard_updates_existing_tiles_and_ignores_unknown_tiles() {
    let doc = Document::template();

    let next = set_dashboard_field(&doc, "salary", "value", "5000만원");
    assert_eq!(next.dashboard["salary"]["value"], "5000만원");

    let next = set_dashboard_field(&next, "career", "note", "free-form");
    assert_eq!(next.dashboard["career"]["note"], "free-form");

    assert_eq!(set_dashboard_field(&doc, "hobbies", "value", "x"), doc);
}

#[test]
fn reset_restores_template_after_any_edits() {
    let mut doc = Document::template();
    doc = set_summary(&doc, "changed");
    doc = add_project(&doc);
    doc = remove_skill(&doc, 0);
    doc = set_personal_field(&doc, PersonalField::Role, "Engineer");

    assert_ne!(doc, Document::template());
    assert_eq!(reset(), Document::template());
    assert_eq!(apply(&doc, &Edit::Reset), Document::template());
}

#[test]
fn apply_dispatches_each_instruction() {
    let doc = Document::template();
    let id = doc.experience[0].id;

    let next = apply(
        &doc,
        &Edit::UpdateExperienceTask {
            id,
            index: 0,
            value: "first".to_string(),
        },
    );
    let next = apply(&next, &Edit::AddExperienceTask { id });
    let next = apply(
        &next,
        &Edit::SetSummary {
            text: "summary".to_string(),
        },
    );

    assert_eq!(next.experience[0].tasks[0], "first");
    assert_eq!(next.experience[0].tasks.last().map(String::as_str), Some("New Task"));
    assert_eq!(next.summary, "summary");
}
