//! Behavioural properties of the credential store, exercised against the
//! in-memory cipher.

use fediscord_storage::{CredentialStore, Protection, StoreError, TokenState};
use fediscord_test::{MockCipher, TestHome, init_test_tracing, test_token};

fn setup() -> (TestHome, MockCipher, CredentialStore) {
    init_test_tracing();
    let home = TestHome::new();
    let cipher = MockCipher::new();
    let store = CredentialStore::new(home.paths(), Box::new(cipher.clone()));
    (home, cipher, store)
}

#[test]
fn at_most_one_representation_after_every_store() {
    let (_home, _cipher, store) = setup();
    let sequence = [
        ("one", Protection::Plain),
        ("two", Protection::Encrypted),
        ("three", Protection::Encrypted),
        ("four", Protection::Plain),
        ("five", Protection::Plain),
        ("six", Protection::Encrypted),
    ];

    for (raw, protection) in sequence {
        store.store_token(&test_token(raw), protection).unwrap();
        assert!(
            !(store.has_encrypted_token() && store.has_plain_token()),
            "both representations after storing {raw} as {protection}"
        );
        assert_eq!(store.token_state().authoritative(), Some(protection));
        assert_eq!(store.retrieve_token().unwrap().expose(), raw);
    }
}

#[test]
fn encrypted_round_trip() {
    let (_home, cipher, store) = setup();
    store
        .store_token(&test_token("secret"), Protection::Encrypted)
        .unwrap();

    assert_eq!(store.retrieve_token().unwrap().expose(), "secret");
    assert_eq!(cipher.encrypt_calls(), 1);
    assert_eq!(cipher.decrypt_calls(), 1);
}

#[test]
fn no_silent_fallback_to_stale_plaintext() {
    let (home, cipher, store) = setup();
    store
        .store_token(&test_token("secret"), Protection::Encrypted)
        .unwrap();
    std::fs::write(home.paths().plain_token_path(), "stale-plaintext").unwrap();
    assert_eq!(store.token_state(), TokenState::Conflicted);

    cipher.set_available(false);
    let err = store.retrieve_token().unwrap_err();
    assert!(matches!(err, StoreError::ToolUnavailable { .. }), "{err:?}");
}

#[test]
fn encrypted_artifact_wins_over_preference() {
    let (_home, _cipher, store) = setup();
    store
        .store_token(&test_token("secret"), Protection::Encrypted)
        .unwrap();
    store.set_preference(Protection::Plain).unwrap();

    assert_eq!(store.retrieve_token().unwrap().expose(), "secret");
    assert_eq!(store.token_state(), TokenState::Encrypted);
}

#[test]
fn preference_is_idempotent_and_leaves_tokens_alone() {
    let (home, _cipher, store) = setup();
    store
        .store_token(&test_token("secret"), Protection::Plain)
        .unwrap();
    let before = std::fs::read(home.paths().plain_token_path()).unwrap();

    store.set_preference(Protection::Encrypted).unwrap();
    store.set_preference(Protection::Encrypted).unwrap();

    assert_eq!(store.get_preference().unwrap(), Protection::Encrypted);
    assert_eq!(store.token_state(), TokenState::Plain);
    assert_eq!(std::fs::read(home.paths().plain_token_path()).unwrap(), before);
}

#[test]
fn failing_tool_leaves_previous_token_retrievable() {
    for previous in [Protection::Plain, Protection::Encrypted] {
        let (_home, cipher, store) = setup();
        store.store_token(&test_token("old"), previous).unwrap();

        cipher.set_failing(true);
        let err = store
            .store_token(&test_token("new"), Protection::Encrypted)
            .unwrap_err();
        assert!(matches!(err, StoreError::EncryptionFailed(_)), "{err:?}");

        cipher.set_failing(false);
        assert_eq!(store.token_state().authoritative(), Some(previous));
        assert_eq!(store.retrieve_token().unwrap().expose(), "old");
    }
}

#[test]
fn unavailable_tool_leaves_previous_token_retrievable() {
    let (_home, cipher, store) = setup();
    store
        .store_token(&test_token("old"), Protection::Plain)
        .unwrap();

    cipher.set_available(false);
    let err = store
        .store_token(&test_token("new"), Protection::Encrypted)
        .unwrap_err();
    assert!(matches!(err, StoreError::ToolUnavailable { .. }));
    assert_eq!(store.retrieve_token().unwrap().expose(), "old");
}

#[test]
fn unset_is_distinct_from_false() {
    let (_home, _cipher, store) = setup();
    assert!(store.get_preference().unwrap_err().is_not_set());

    store.set_preference(Protection::Plain).unwrap();
    assert_eq!(store.get_preference().unwrap(), Protection::Plain);
}

#[test]
fn handle_and_token_are_independent() {
    let (_home, _cipher, store) = setup();
    store.store_handle("alice@example.social").unwrap();
    assert!(store.retrieve_token().unwrap_err().is_not_found());

    store.store_handle("bob@example.social\n").unwrap();
    assert_eq!(store.retrieve_handle().unwrap(), "bob@example.social");
}

#[test]
fn delete_all_removes_everything() {
    let (home, _cipher, store) = setup();
    store
        .store_token(&test_token("secret"), Protection::Encrypted)
        .unwrap();
    store.store_handle("alice@example.social").unwrap();
    store.set_preference(Protection::Encrypted).unwrap();

    store.delete_all().unwrap();

    assert!(!home.paths().root().exists());
    assert!(store.retrieve_token().unwrap_err().is_not_found());
    assert!(store.retrieve_handle().unwrap_err().is_not_found());
    assert!(store.get_preference().unwrap_err().is_not_set());
}

#[test]
fn switching_resolves_conflicted_state() {
    let (home, _cipher, store) = setup();
    store
        .store_token(&test_token("secret"), Protection::Encrypted)
        .unwrap();
    std::fs::write(home.paths().plain_token_path(), "stale").unwrap();

    store.switch_protection(Protection::Plain).unwrap();

    assert_eq!(store.token_state(), TokenState::Plain);
    assert_eq!(store.retrieve_token().unwrap().expose(), "secret");
    assert!(store.verify().is_empty());
}
