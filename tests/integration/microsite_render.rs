use anyhow::Result;

use crate::support::card_fixture::{png, CardFixture};

#[test]
fn published_profile_renders_its_own_microsite() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut form = fixture.filled_form();
    form.add_photos(vec![png("one.png", 1)]);
    form.generate();
    fixture
        .workspace
        .publish(form.draft(), None)
        .expect("published");

    let html = fixture.workspace.microsite_html("janedoe", false)?;
    assert!(html.contains("<h1>janedoe.agentos.my.id</h1>"));
    assert!(html.contains("<div class=\"avatar\">JD</div>"));
    assert!(html.contains("href=\"https://wa.me/60111\""));
    assert!(html.contains("<li>Strategy</li>"));
    assert!(html.contains("1 photos"));
    assert!(html.contains("#AgentOSCard"));
    assert!(!html.contains("Quick Stats"));
    Ok(())
}

#[test]
fn unknown_username_falls_back_to_demo_only_when_allowed() -> Result<()> {
    let fixture = CardFixture::new();
    assert!(fixture.workspace.microsite_html("nobody", false).is_err());

    let html = fixture.workspace.microsite_html("nobody", true)?;
    assert!(html.contains("<h1>nobody.agentos.my.id</h1>"));
    assert!(html.contains("Siti Nur Ahmad"));
    assert!(html.contains("<dd>47</dd>"));
    Ok(())
}
