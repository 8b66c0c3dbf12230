use agentos::interview::InterviewStep;
use agentos::storage::ProfileStore;
use agentos::EventType;
use anyhow::Result;

use crate::support::card_fixture::{CardFixture, SITI_ANSWERS};

#[test]
fn full_interview_refines_bio_and_publishes() -> Result<()> {
    let mut fixture = CardFixture::new();
    let mut session = fixture.interview();
    assert_eq!(
        session.current_prompt(),
        Some("Hi! 👋 Welcome to OFTN: AgentOS. What's your name?")
    );

    for answer in &SITI_ANSWERS[..5] {
        assert!(session.submit(answer).accepted);
    }
    let after_bio = session.submit(SITI_ANSWERS[5]);
    assert_eq!(
        after_bio.replies[0],
        "How about: \"Creative student photographer capturing vibrant moments in Penang.\" OK? 👍"
    );
    session.submit(SITI_ANSWERS[6]);
    let finale = session.submit(SITI_ANSWERS[7]);
    assert!(session.is_complete());
    assert_eq!(finale.replies[0], "Thanks! Here's your professional card: 🎉");
    assert!(finale.replies[1].contains("Visit your microsite: sitinurahmad.agentos.my.id"));

    let artifacts = session.artifacts().cloned().expect("card rendered");
    assert!(artifacts
        .card_text
        .contains("📝 Creative student photographer capturing vibrant moments in Penang."));
    assert!(artifacts
        .condensed_bio
        .contains("| Event Photography, Portrait Sessions, Photo Editing 🔗"));

    let session_id = session.id();
    let draft = session.into_draft();
    let published = fixture
        .workspace
        .publish(&draft, Some(session_id))
        .expect("published");
    assert_eq!(published.profile.username, "sitinurahmad");
    assert_eq!(published.card.card_text, artifacts.card_text);

    let stored = fixture
        .workspace
        .store()
        .find_profile_by_username("sitinurahmad")?
        .expect("stored profile");
    assert_eq!(stored.services.len(), 3);

    let kinds: Vec<EventType> = fixture
        .workspace
        .events()
        .for_session(session_id)?
        .into_iter()
        .map(|event| event.event_type)
        .collect();
    assert_eq!(kinds.first(), Some(&EventType::InterviewStarted));
    assert_eq!(
        kinds.iter().filter(|k| **k == EventType::AnswerRecorded).count(),
        8
    );
    assert!(kinds.ends_with(&[
        EventType::InterviewCompleted,
        EventType::CardGenerated,
        EventType::ProfilePublished,
    ]));
    Ok(())
}

#[test]
fn blank_answers_are_ignored_mid_interview() {
    let fixture = CardFixture::new();
    let mut session = fixture.interview();
    session.submit("Jane Doe");
    let outcome = session.submit("   ");
    assert!(!outcome.accepted);
    assert!(outcome.replies.is_empty());
    assert_eq!(session.step(), InterviewStep::AwaitingRole);
    assert_eq!(session.draft().name, "Jane Doe");
}

#[test]
fn unrefined_bio_is_kept_and_photo_answer_uses_placeholder() {
    let fixture = CardFixture::new();
    let mut session = fixture.interview();
    for answer in [
        "Jane Doe",
        "Consultant",
        "KL",
        "9-5",
        "+60111",
        "Helps businesses grow.",
        "Strategy, Coaching,",
    ] {
        session.submit(answer);
    }
    assert_eq!(session.draft().bio, "Helps businesses grow.");
    assert_eq!(session.draft().services, vec!["Strategy", "Coaching"]);

    let outcome = session.submit("here are my photos");
    assert!(outcome.replies[0].starts_with("Great! For demo purposes"));
    assert!(session.is_complete());
    assert!(session.draft().photos().is_empty());

    let late = session.submit("one more thing");
    assert!(!late.accepted);
}
