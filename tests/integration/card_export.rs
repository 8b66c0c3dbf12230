use agentos::EventType;
use anyhow::Result;
use std::fs::File;
use std::io::Read;

use crate::support::card_fixture::{png, CardFixture};

#[test]
fn export_bundles_active_card_and_gallery() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut form = fixture.filled_form();
    form.add_photos(vec![png("one.png", 1), png("two.png", 2)]);
    let artifacts = form.generate().cloned().expect("valid form");
    fixture
        .workspace
        .publish(form.draft(), None)
        .expect("published");

    let descriptor = fixture.workspace.export_card("janedoe", None)?;
    assert_eq!(descriptor.path, fixture.workspace.paths.export_path("janedoe"));
    assert_eq!(descriptor.entries.len(), 4);
    assert_eq!(descriptor.checksum.len(), 64);

    let mut archive = zip::ZipArchive::new(File::open(&descriptor.path)?)?;
    let mut card = String::new();
    archive.by_name("card.txt")?.read_to_string(&mut card)?;
    assert_eq!(card, artifacts.card_text);
    let photo_entries = archive
        .file_names()
        .filter(|name| name.starts_with("photos/"))
        .count();
    assert_eq!(photo_entries, 2);

    let exported = fixture
        .workspace
        .events()
        .load()?
        .into_iter()
        .filter(|event| event.event_type == EventType::CardExported)
        .count();
    assert_eq!(exported, 1);
    Ok(())
}

#[test]
fn export_refuses_to_overwrite_and_unknown_users() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut form = fixture.filled_form();
    form.generate();
    fixture
        .workspace
        .publish(form.draft(), None)
        .expect("published");

    let destination = fixture.root().join("out").join("card.zip");
    fixture
        .workspace
        .export_card("janedoe", Some(destination.clone()))?;
    assert!(fixture
        .workspace
        .export_card("janedoe", Some(destination))
        .is_err());
    assert!(fixture.workspace.export_card("nobody", None).is_err());
    Ok(())
}
