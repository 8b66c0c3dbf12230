pub mod card_fixture;
