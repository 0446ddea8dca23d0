//! Pure edit operations over the résumé document.
//!
//! # Responsibility
//! - Produce a new document from an old one plus one edit instruction.
//! - Decode edit instructions delivered by the editing surface.
//!
//! # Invariants
//! - Inputs are never modified; every operation returns a fresh document.
//! - Unknown ids and out-of-bounds indices leave the document unchanged.
//! - Sequences never grow implicitly; only `add_*` operations append.
//! - New entry ids never collide with ids already in the sequence.

use crate::model::document::{
    Document, EntryId, ExperienceEntry, ExperienceField, PersonalField, ProjectEntry, ProjectField,
};
use crate::model::image::ProfileImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const NEW_EXPERIENCE_PERIOD: &str = "Period";
const NEW_EXPERIENCE_COMPANY: &str = "Company Name";
const NEW_EXPERIENCE_POSITION: &str = "Position";
const NEW_EXPERIENCE_TASK: &str = "Task 1";
const NEW_TASK: &str = "New Task";
const NEW_PROJECT_TITLE: &str = "Project Title";
const NEW_PROJECT_DESCRIPTION: &str = "Project Description";

/// One edit instruction, as delivered by the editing surface.
///
/// Wire form is internally tagged: `{"op": "add_skill", "value": "Go"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    SetPersonalField {
        field: PersonalField,
        value: String,
    },
    SetProfileImage {
        image: Option<ProfileImage>,
    },
    SetDashboardField {
        tile: String,
        field: String,
        value: String,
    },
    SetSummary {
        text: String,
    },
    AddExperience,
    UpdateExperienceField {
        id: EntryId,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience {
        id: EntryId,
    },
    UpdateExperienceTask {
        id: EntryId,
        index: usize,
        value: String,
    },
    AddExperienceTask {
        id: EntryId,
    },
    RemoveExperienceTask {
        id: EntryId,
        index: usize,
    },
    AddSkill {
        value: String,
    },
    RemoveSkill {
        index: usize,
    },
    AddProject,
    UpdateProjectField {
        id: EntryId,
        field: ProjectField,
        value: String,
    },
    RemoveProject {
        id: EntryId,
    },
    Reset,
}

impl Edit {
    /// Decodes one JSON instruction.
    ///
    /// Unknown operations and unknown field names are decode errors; callers
    /// treat them as no-ops.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Stable operation name used in diagnostics.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::SetPersonalField { .. } => "set_personal_field",
            Self::SetProfileImage { .. } => "set_profile_image",
            Self::SetDashboardField { .. } => "set_dashboard_field",
            Self::SetSummary { .. } => "set_summary",
            Self::AddExperience => "add_experience",
            Self::UpdateExperienceField { .. } => "update_experience_field",
            Self::RemoveExperience { .. } => "remove_experience",
            Self::UpdateExperienceTask { .. } => "update_experience_task",
            Self::AddExperienceTask { .. } => "add_experience_task",
            Self::RemoveExperienceTask { .. } => "remove_experience_task",
            Self::AddSkill { .. } => "add_skill",
            Self::RemoveSkill { .. } => "remove_skill",
            Self::AddProject => "add_project",
            Self::UpdateProjectField { .. } => "update_project_field",
            Self::RemoveProject { .. } => "remove_project",
            Self::Reset => "reset",
        }
    }
}

/// Applies one instruction and returns the resulting document.
pub fn apply(doc: &Document, edit: &Edit) -> Document {
    match edit {
        Edit::SetPersonalField { field, value } => set_personal_field(doc, *field, value),
        Edit::SetProfileImage { image } => set_profile_image(doc, image.clone()),
        Edit::SetDashboardField { tile, field, value } => {
            set_dashboard_field(doc, tile, field, value)
        }
        Edit::SetSummary { text } => set_summary(doc, text),
        Edit::AddExperience => add_experience(doc),
        Edit::UpdateExperienceField { id, field, value } => {
            update_experience_field(doc, *id, *field, value)
        }
        Edit::RemoveExperience { id } => remove_experience(doc, *id),
        Edit::UpdateExperienceTask { id, index, value } => {
            update_experience_task(doc, *id, *index, value)
        }
        Edit::AddExperienceTask { id } => add_experience_task(doc, *id),
        Edit::RemoveExperienceTask { id, index } => remove_experience_task(doc, *id, *index),
        Edit::AddSkill { value } => add_skill(doc, value),
        Edit::RemoveSkill { index } => remove_skill(doc, *index),
        Edit::AddProject => add_project(doc),
        Edit::UpdateProjectField { id, field, value } => {
            update_project_field(doc, *id, *field, value)
        }
        Edit::RemoveProject { id } => remove_project(doc, *id),
        Edit::Reset => reset(),
    }
}

pub fn set_personal_field(doc: &Document, field: PersonalField, value: &str) -> Document {
    let mut next = doc.clone();
    *next.personal.field_mut(field) = value.to_string();
    next
}

/// Sets or clears the embedded profile image.
pub fn set_profile_image(doc: &Document, image: Option<ProfileImage>) -> Document {
    let mut next = doc.clone();
    next.personal.profile_image = image;
    next
}

/// Upserts `field` inside an existing tile. Unknown tiles are a no-op.
pub fn set_dashboard_field(doc: &Document, tile: &str, field: &str, value: &str) -> Document {
    let mut next = doc.clone();
    if let Some(fields) = next.dashboard.get_mut(tile) {
        fields.insert(field.to_string(), value.to_string());
    }
    next
}

pub fn set_summary(doc: &Document, text: &str) -> Document {
    let mut next = doc.clone();
    next.summary = text.to_string();
    next
}

/// Appends a placeholder experience entry with a fresh id.
pub fn add_experience(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = fresh_id(next.experience.iter().map(|entry| entry.id));
    next.experience.push(ExperienceEntry {
        id,
        period: NEW_EXPERIENCE_PERIOD.to_string(),
        company: NEW_EXPERIENCE_COMPANY.to_string(),
        position: NEW_EXPERIENCE_POSITION.to_string(),
        tasks: vec![NEW_EXPERIENCE_TASK.to_string()],
    });
    next
}

pub fn update_experience_field(
    doc: &Document,
    id: EntryId,
    field: ExperienceField,
    value: &str,
) -> Document {
    with_experience(doc, id, |entry| *entry.field_mut(field) = value.to_string())
}

pub fn remove_experience(doc: &Document, id: EntryId) -> Document {
    let mut next = doc.clone();
    next.experience.retain(|entry| entry.id != id);
    next
}

/// Replaces the task at `index`; out-of-bounds indices are a no-op.
pub fn update_experience_task(doc: &Document, id: EntryId, index: usize, value: &str) -> Document {
    with_experience(doc, id, |entry| {
        if let Some(task) = entry.tasks.get_mut(index) {
            *task = value.to_string();
        }
    })
}

pub fn add_experience_task(doc: &Document, id: EntryId) -> Document {
    with_experience(doc, id, |entry| entry.tasks.push(NEW_TASK.to_string()))
}

/// Removes the task at `index`; later tasks shift down by one.
pub fn remove_experience_task(doc: &Document, id: EntryId, index: usize) -> Document {
    with_experience(doc, id, |entry| {
        if index < entry.tasks.len() {
            entry.tasks.remove(index);
        }
    })
}

pub fn add_skill(doc: &Document, value: &str) -> Document {
    let mut next = doc.clone();
    next.skills.push(value.to_string());
    next
}

pub fn remove_skill(doc: &Document, index: usize) -> Document {
    let mut next = doc.clone();
    if index < next.skills.len() {
        next.skills.remove(index);
    }
    next
}

/// Appends a placeholder project entry with a fresh id.
pub fn add_project(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = fresh_id(next.projects.iter().map(|entry| entry.id));
    next.projects.push(ProjectEntry {
        id,
        title: NEW_PROJECT_TITLE.to_string(),
        description: NEW_PROJECT_DESCRIPTION.to_string(),
    });
    next
}

pub fn update_project_field(
    doc: &Document,
    id: EntryId,
    field: ProjectField,
    value: &str,
) -> Document {
    let mut next = doc.clone();
    if let Some(entry) = next.projects.iter_mut().find(|entry| entry.id == id) {
        *entry.field_mut(field) = value.to_string();
    }
    next
}

pub fn remove_project(doc: &Document, id: EntryId) -> Document {
    let mut next = doc.clone();
    next.projects.retain(|entry| entry.id != id);
    next
}

/// Returns the default template.
pub fn reset() -> Document {
    Document::template()
}

fn with_experience(
    doc: &Document,
    id: EntryId,
    update: impl FnOnce(&mut ExperienceEntry),
) -> Document {
    let mut next = doc.clone();
    if let Some(entry) = next.experience.iter_mut().find(|entry| entry.id == id) {
        update(entry);
    }
    next
}

fn fresh_id(existing: impl Iterator<Item = EntryId> + Clone) -> EntryId {
    loop {
        let candidate = Uuid::new_v4();
        if !existing.clone().any(|id| id == candidate) {
            return candidate;
        }
    }
}
