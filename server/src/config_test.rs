use super::*;

/// # Safety
/// Only `from_env_defaults_then_overrides` touches these variables, so no
/// other test can race it.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("API_PROXY_TARGET");
        std::env::remove_var("API_PROXY_STRIP_PREFIX");
        std::env::remove_var("API_PROXY_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_then_overrides() {
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(
        cfg.proxy,
        ProxyConfig {
            target: DEFAULT_PROXY_TARGET.to_owned(),
            strip_prefix: true,
            timeout_secs: DEFAULT_PROXY_TIMEOUT_SECS,
        }
    );

    unsafe {
        std::env::set_var("PORT", "8081");
        std::env::set_var("API_PROXY_TARGET", "https://backend.example.test/");
        std::env::set_var("API_PROXY_STRIP_PREFIX", "off");
        std::env::set_var("API_PROXY_TIMEOUT_SECS", "5");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.proxy.target, "https://backend.example.test");
    assert!(!cfg.proxy.strip_prefix);
    assert_eq!(cfg.proxy.timeout_secs, 5);

    unsafe { std::env::set_var("API_PROXY_TIMEOUT_SECS", "abc") };
    assert_eq!(ServerConfig::from_env(), Err(ConfigError::InvalidTimeout("abc".to_owned())));

    unsafe { clear_server_env() };
}

#[test]
fn parse_port_rejects_garbage() {
    assert_eq!(parse_port(Some("abc")), Err(ConfigError::InvalidPort("abc".to_owned())));
    assert_eq!(parse_port(Some("70000")), Err(ConfigError::InvalidPort("70000".to_owned())));
    assert_eq!(parse_port(Some(" 4000 ")), Ok(4000));
    assert_eq!(parse_port(Some("")), Ok(DEFAULT_PORT));
}

#[test]
fn parse_timeout_rejects_garbage_and_zero() {
    assert_eq!(parse_timeout(None), Ok(DEFAULT_PROXY_TIMEOUT_SECS));
    assert_eq!(parse_timeout(Some(" ")), Ok(DEFAULT_PROXY_TIMEOUT_SECS));
    assert_eq!(parse_timeout(Some("12")), Ok(12));
    assert_eq!(parse_timeout(Some("abc")), Err(ConfigError::InvalidTimeout("abc".to_owned())));
    assert_eq!(parse_timeout(Some("-5")), Err(ConfigError::InvalidTimeout("-5".to_owned())));
    assert_eq!(parse_timeout(Some("0")), Err(ConfigError::InvalidTimeout("0".to_owned())));
}

#[test]
fn parse_target_requires_http_url() {
    assert_eq!(parse_target(Some("http://localhost:9000")), Ok("http://localhost:9000".to_owned()));
    assert!(matches!(parse_target(Some("localhost:9000")), Err(ConfigError::InvalidTarget(_))));
    assert!(matches!(parse_target(Some("ftp://files.test")), Err(ConfigError::InvalidTarget(_))));
    assert!(matches!(parse_target(Some("not a url")), Err(ConfigError::InvalidTarget(_))));
}

#[test]
fn parse_bool_variants() {
    for value in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool("K", Some(value), false), Ok(true), "value {value:?}");
    }
    for value in ["0", "false", "No", "off"] {
        assert_eq!(parse_bool("K", Some(value), true), Ok(false), "value {value:?}");
    }
    assert_eq!(parse_bool("K", None, true), Ok(true));
    assert_eq!(parse_bool("K", Some(""), false), Ok(false));
    assert_eq!(
        parse_bool("K", Some("maybe"), true),
        Err(ConfigError::InvalidBool { key: "K", value: "maybe".to_owned() })
    );
}
