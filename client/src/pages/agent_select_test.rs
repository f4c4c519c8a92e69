use super::*;

#[test]
fn display_name_reads_known_keys() {
    assert_eq!(display_name(Some(r#"{"name":"Ada"}"#)).as_deref(), Some("Ada"));
    assert_eq!(display_name(Some(r#"{"username":"ada99"}"#)).as_deref(), Some("ada99"));
}

#[test]
fn display_name_ignores_missing_or_malformed_info() {
    assert_eq!(display_name(None), None);
    assert_eq!(display_name(Some("not json")), None);
    assert_eq!(display_name(Some(r#"{"id":7}"#)), None);
    assert_eq!(display_name(Some(r#"{"name":7}"#)), None);
}
