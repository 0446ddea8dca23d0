use resume_core::db::open_db_in_memory;
use resume_core::{
    Document, Edit, ImageEmbedError, MemorySlotRepository, PersonalField, ResumeService,
    SlotRepository, SqliteSlotRepository, DOCUMENT_SLOT_KEY,
};

fn stored_document<R: SlotRepository>(service: &ResumeService<R>) -> Document {
    service.repository().load()
}

#[test]
fn open_loads_template_when_nothing_is_persisted() {
    let service = ResumeService::open(MemorySlotRepository::new());
    assert_eq!(service.document(), &Document::template());
    assert!(!service.repository().slots().contains(DOCUMENT_SLOT_KEY));
}

#[test]
fn apply_persists_after_every_edit() {
    let conn = open_db_in_memory().unwrap();
    let mut service = ResumeService::open(SqliteSlotRepository::new(&conn));

    service.apply(&Edit::SetPersonalField {
        field: PersonalField::Name,
        value: "Alice".to_string(),
    });
    assert_eq!(stored_document(&service).personal.name, "Alice");

    service.apply(&Edit::AddSkill {
        value: "Go".to_string(),
    });
    assert_eq!(&stored_document(&service), service.document());

    let reopened = ResumeService::open(SqliteSlotRepository::new(&conn));
    assert_eq!(reopened.document(), service.document());
}

#[test]
fn reset_restores_template_and_clears_slot() {
    let mut service = ResumeService::open(MemorySlotRepository::new());
    service.apply(&Edit::AddProject);
    assert!(service.repository().slots().contains(DOCUMENT_SLOT_KEY));

    let doc = service.apply(&Edit::Reset).clone();

    assert_eq!(doc, Document::template());
    assert!(!service.repository().slots().contains(DOCUMENT_SLOT_KEY));
}

#[test]
fn apply_json_ignores_unknown_instructions() {
    let mut service = ResumeService::open(MemorySlotRepository::new());

    let doc = service
        .apply_json(r#"{"op":"set_personal_field","field":"salary","value":"x"}"#)
        .clone();
    assert_eq!(doc, Document::template());
    assert!(!service.repository().slots().contains(DOCUMENT_SLOT_KEY));

    service.apply_json(r#"{"op":"add_skill","value":"Rust"}"#);
    assert_eq!(service.document().skills.last().map(String::as_str), Some("Rust"));
}

#[test]
fn failed_image_embed_keeps_previous_image() {
    let mut service = ResumeService::open(MemorySlotRepository::new());
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
    service.set_profile_image_bytes(&png).unwrap();
    let before = service.document().clone();

    let err = service.set_profile_image_bytes(b"not an image").unwrap_err();
    assert!(matches!(err, ImageEmbedError::UnsupportedFormat));
    let err = service
        .set_profile_image_bytes(&vec![0xFF; resume_core::MAX_PROFILE_IMAGE_BYTES + 1])
        .unwrap_err();
    assert!(matches!(err, ImageEmbedError::TooLarge { .. }));

    assert_eq!(service.document(), &before);
    assert!(before.personal.profile_image.is_some());
}

#[test]
fn profile_image_file_is_embedded_and_exported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("me.gif");
    std::fs::write(&path, b"GIF89a\x01\x00\x01\x00").unwrap();

    let mut service = ResumeService::open(MemorySlotRepository::new());
    service.set_profile_image_file(&path).unwrap();

    let image = service.document().personal.profile_image.clone().unwrap();
    assert_eq!(image.mime_type(), "image/gif");
    assert!(service.export().content.contains("data:image/gif;base64,"));

    let missing = service.set_profile_image_file(dir.path().join("missing.png"));
    assert!(matches!(missing, Err(ImageEmbedError::Io(_))));
}

#[test]
fn export_reflects_current_document() {
    let mut service = ResumeService::open(MemorySlotRepository::new());
    service.apply(&Edit::AddSkill {
        value: "<b>X</b>".to_string(),
    });

    let artifact = service.export();
    assert_eq!(artifact.file_name, "resume_홍길동.html");
    assert!(artifact.content.contains("&lt;b&gt;X&lt;/b&gt;"));
}
