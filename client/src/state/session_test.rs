use super::*;

#[test]
fn fresh_session_is_not_authenticated() {
    let session = Session::in_memory();
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(session.user_info().is_none());
}

#[test]
fn login_stores_token_and_user_info() {
    let session = Session::in_memory();
    session.login("tok-1", Some(r#"{"name":"alice"}"#));
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(session.user_info().as_deref(), Some(r#"{"name":"alice"}"#));
    assert!(session.is_authenticated());
}

#[test]
fn login_without_user_info_drops_stale_entry() {
    let session = Session::in_memory();
    session.login("tok-1", Some("old"));
    session.login("tok-2", None);
    assert_eq!(session.token().as_deref(), Some("tok-2"));
    assert!(session.user_info().is_none());
}

#[test]
fn clear_removes_both_entries() {
    let session = Session::in_memory();
    session.login("tok-1", Some("info"));
    session.clear();
    assert!(session.token().is_none());
    assert!(session.user_info().is_none());
}

#[test]
fn empty_token_counts_as_absent() {
    let session = Session::in_memory();
    session.login("", None);
    assert!(!session.is_authenticated());
}

#[test]
fn clones_share_the_same_store() {
    let session = Session::in_memory();
    let other = session.clone();
    session.login("shared", None);
    assert_eq!(other.token().as_deref(), Some("shared"));
    other.clear();
    assert!(!session.is_authenticated());
}

#[test]
fn debug_output_hides_token() {
    let session = Session::in_memory();
    session.login("secret-token", None);
    let rendered = format!("{session:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("authenticated: true"));
}

#[test]
fn memory_store_remove_missing_key_is_noop() {
    let store = MemoryStore::default();
    store.remove(TOKEN_KEY);
    assert!(store.get(TOKEN_KEY).is_none());
}
