//! Résumé document model.
//!
//! # Responsibility
//! - Define the canonical résumé aggregate edited by one session.
//! - Provide the fixed default template used on first run and on reset.
//! - Provide typed field selectors used by the mutation engine.
//!
//! # Invariants
//! - `experience` and `projects` ids are non-nil and unique per sequence.
//! - Entry ids are assigned at creation and never renumbered.
//! - `tasks` is always present; an entry without tasks holds an empty vec.
//!
//! # See also
//! - crate::engine for the update operations over this shape.

use crate::model::image::ProfileImage;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for experience and project entries.
pub type EntryId = Uuid;

/// Free-form label/value fields of one dashboard tile.
pub type DashboardTile = BTreeMap<String, String>;

/// Dashboard tile key for the current-career tile.
pub const TILE_CAREER: &str = "career";
/// Dashboard tile key for the education tile.
pub const TILE_EDUCATION: &str = "education";
/// Dashboard tile key for the desired-salary tile.
pub const TILE_SALARY: &str = "salary";
/// Dashboard tile key for the portfolio tile.
pub const TILE_PORTFOLIO: &str = "portfolio";

/// Tiles every template carries, in display order.
pub const FIXED_TILES: [&str; 4] = [TILE_CAREER, TILE_EDUCATION, TILE_SALARY, TILE_PORTFOLIO];

static TEMPLATE: Lazy<Document> = Lazy::new(build_template);

/// Root résumé aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub personal: Personal,
    /// Tile key -> tile fields. Ordered map so iteration is deterministic.
    pub dashboard: BTreeMap<String, DashboardTile>,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    /// Insertion order is display order.
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
}

/// Owner identity and contact block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub name: String,
    pub role: String,
    pub email: String,
    pub github: String,
    pub location: String,
    /// Self-contained data URL; `None` renders no image at all.
    #[serde(default)]
    pub profile_image: Option<ProfileImage>,
}

/// One employment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub period: String,
    pub company: String,
    pub position: String,
    pub tasks: Vec<String>,
}

/// One portfolio project entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: EntryId,
    pub title: String,
    pub description: String,
}

/// Text fields of [`Personal`] addressable by edits.
///
/// The profile image is not a text field and has a dedicated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Role,
    Email,
    Github,
    Location,
}

/// Text fields of [`ExperienceEntry`] addressable by edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Period,
    Company,
    Position,
}

/// Text fields of [`ProjectEntry`] addressable by edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Title,
    Description,
}

impl Personal {
    /// Returns a mutable handle to one text field.
    pub fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Role => &mut self.role,
            PersonalField::Email => &mut self.email,
            PersonalField::Github => &mut self.github,
            PersonalField::Location => &mut self.location,
        }
    }
}

impl ExperienceEntry {
    pub fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Period => &mut self.period,
            ExperienceField::Company => &mut self.company,
            ExperienceField::Position => &mut self.position,
        }
    }
}

impl ProjectEntry {
    pub fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Description => &mut self.description,
        }
    }
}

/// Structural validation errors for documents read from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    /// An entry carries the nil UUID.
    NilEntryId { section: &'static str },
    /// Two entries of the same section share one id.
    DuplicateEntryId { section: &'static str, id: EntryId },
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilEntryId { section } => write!(f, "{section} entry has nil id"),
            Self::DuplicateEntryId { section, id } => {
                write!(f, "duplicate {section} entry id: {id}")
            }
        }
    }
}

impl Error for DocumentValidationError {}

impl Document {
    /// Returns the fixed default document used on first run and on reset.
    pub fn template() -> Self {
        TEMPLATE.clone()
    }

    /// Validates id invariants of both entry sequences.
    ///
    /// # Errors
    /// - `NilEntryId` when any entry id is nil.
    /// - `DuplicateEntryId` when one sequence repeats an id.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        check_entry_ids("experience", self.experience.iter().map(|entry| entry.id))?;
        check_entry_ids("projects", self.projects.iter().map(|entry| entry.id))?;
        Ok(())
    }
}

fn check_entry_ids(
    section: &'static str,
    ids: impl Iterator<Item = EntryId>,
) -> Result<(), DocumentValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_nil() {
            return Err(DocumentValidationError::NilEntryId { section });
        }
        if !seen.insert(id) {
            return Err(DocumentValidationError::DuplicateEntryId { section, id });
        }
    }
    Ok(())
}

fn tile(fields: &[(&str, &str)]) -> DashboardTile {
    fields
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn build_template() -> Document {
    let mut dashboard = BTreeMap::new();
    dashboard.insert(
        TILE_CAREER.to_string(),
        tile(&[
            ("company", "SK하이닉스"),
            ("status", "재직중"),
            ("total", "총 5년"),
        ]),
    );
    dashboard.insert(
        TILE_EDUCATION.to_string(),
        tile(&[("school", "한국대학교"), ("desc", "대학교(4년) 졸업")]),
    );
    dashboard.insert(TILE_SALARY.to_string(), tile(&[("value", "면접 후 결정")]));
    dashboard.insert(TILE_PORTFOLIO.to_string(), tile(&[("count", "총 0건")]));

    Document {
        personal: Personal {
            name: "홍길동".to_string(),
            role: "Web Publisher / Frontend Developer".to_string(),
            email: "hong@example.com".to_string(),
            github: "github.com/yourname".to_string(),
            location: "Seoul, Korea".to_string(),
            profile_image: None,
        },
        dashboard,
        summary: "공공기관 웹사이트 및 접근성 인증 프로젝트를 다수 수행한 웹 퍼블리셔 겸 \
                  프론트엔드 개발자입니다. HTML, CSS, SCSS 구조화와 유지보수에 강점이 있으며, \
                  React 기반 프로젝트 경험도 보유하고 있습니다."
            .to_string(),
        experience: vec![
            ExperienceEntry {
                id: Uuid::from_u128(0x3b1f_6c9e_41d2_4a07_9e55_0000_0000_0001),
                period: "2020.03 – 2024.12".to_string(),
                company: "OOO Company".to_string(),
                position: "Web Publisher".to_string(),
                tasks: strings(&[
                    "공공기관 웹사이트 퍼블리싱 및 유지보수",
                    "웹 접근성(WA) 인증 대응",
                    "SCSS 기반 디자인 시스템 정비",
                ]),
            },
            ExperienceEntry {
                id: Uuid::from_u128(0x3b1f_6c9e_41d2_4a07_9e55_0000_0000_0002),
                period: "2017.01 – 2020.02".to_string(),
                company: "XXX Studio".to_string(),
                position: "Frontend Developer".to_string(),
                tasks: strings(&[
                    "React 기반 통계 시스템 화면 개발",
                    "공공 컴포넌트 설계",
                    "디자이너/기획자 협업",
                ]),
            },
        ],
        skills: strings(&[
            "HTML5",
            "CSS3",
            "SCSS",
            "JavaScript",
            "React",
            "Web Accessibility",
        ]),
        projects: vec![
            ProjectEntry {
                id: Uuid::from_u128(0x8d20_a4f3_77c1_4e18_b3a6_0000_0000_0001),
                title: "국회 통합 정보 시스템".to_string(),
                description: "공공기관 통합 포털 퍼블리싱 및 접근성 인증 대응".to_string(),
            },
            ProjectEntry {
                id: Uuid::from_u128(0x8d20_a4f3_77c1_4e18_b3a6_0000_0000_0002),
                title: "부동산 통계 시스템 (R-ONE)".to_string(),
                description: "React 기반 통계 화면 퍼블리싱 및 UI 개선".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentValidationError, FIXED_TILES};

    #[test]
    fn template_is_valid_and_has_fixed_tiles() {
        let template = Document::template();
        template.validate().unwrap();
        for key in FIXED_TILES {
            assert!(template.dashboard.contains_key(key), "missing tile {key}");
        }
    }

    #[test]
    fn validate_rejects_duplicate_project_ids() {
        let mut doc = Document::template();
        let first = doc.projects[0].clone();
        doc.projects.push(first.clone());

        let err = doc.validate().unwrap_err();
        assert_eq!(
            err,
            DocumentValidationError::DuplicateEntryId {
                section: "projects",
                id: first.id,
            }
        );
    }
}
