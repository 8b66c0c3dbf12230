use agentos::profiles::ProfileField;
use agentos::storage::ProfileStore;
use anyhow::Result;

use crate::support::card_fixture::{png, CardFixture};

#[test]
fn form_publish_stores_profile_card_and_gallery() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut form = fixture.filled_form();
    form.add_photos(vec![png("one.png", 1), png("two.png", 2)]);
    let artifacts = form.generate().cloned().expect("valid form");
    assert_eq!(form.microsite_path(), "/microsite/janedoe");

    let published = fixture
        .workspace
        .publish(form.draft(), None)
        .expect("published");
    assert!(!published.updated_existing);
    assert_eq!(published.card.card_text, artifacts.card_text);

    let store = fixture.workspace.store();
    let gallery = store.list_gallery_photos(published.profile.id)?;
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0].caption, "Portfolio 1");
    assert_eq!(gallery[1].display_order, 1);
    assert!(gallery[0].photo_path.starts_with(fixture.root()));
    assert_eq!(std::fs::read(&gallery[1].photo_path)?, png("two.png", 2).bytes);
    Ok(())
}

#[test]
fn republishing_after_edit_keeps_one_active_card() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut form = fixture.filled_form();
    form.generate();
    let first = fixture
        .workspace
        .publish(form.draft(), None)
        .expect("first publish");

    form.edit();
    form.set_field(ProfileField::City, "Penang");
    assert!(form.generate().is_some());
    let second = fixture
        .workspace
        .publish(form.draft(), None)
        .expect("second publish");

    assert!(second.updated_existing);
    assert_eq!(second.profile.id, first.profile.id);
    let active = fixture
        .workspace
        .store()
        .active_card(first.profile.id)?
        .expect("active card");
    assert_eq!(active.id, second.card.id);
    assert!(active.card_text.contains("📍 **Penang**"));
    Ok(())
}

#[test]
fn incomplete_form_neither_generates_nor_publishes() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut form = fixture.filled_form();
    form.set_field(ProfileField::Whatsapp, "");
    assert!(form.generate().is_none());
    let report = form.validation().expect_err("whatsapp missing");
    assert_eq!(report.missing(), &[ProfileField::Whatsapp]);

    assert!(fixture.workspace.publish(form.draft(), None).is_none());
    assert!(fixture
        .workspace
        .store()
        .find_profile_by_username("janedoe")?
        .is_none());
    Ok(())
}
