use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key: &str| vars.get(key).cloned()
}

const BASE: [(&str, &str); 2] =
    [(BACKEND_URL_VAR, "https://abcd1234.supabase.co/"), (BACKEND_ANON_KEY_VAR, "anon-key")];

#[test]
fn defaults_port_and_normalizes_backend() {
    let cfg = ServerConfig::from_lookup(lookup_from(&BASE)).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend, BackendConfig::new("https://abcd1234.supabase.co", "anon-key"));
    assert_eq!(cfg.backend.url, "https://abcd1234.supabase.co");
}

#[test]
fn port_override_is_parsed() {
    let mut pairs = BASE.to_vec();
    pairs.push((PORT_VAR, " 8080 "));
    assert_eq!(ServerConfig::from_lookup(lookup_from(&pairs)).unwrap().port, 8080);
}

#[test]
fn invalid_port_is_rejected() {
    let mut pairs = BASE.to_vec();
    pairs.push((PORT_VAR, "eighty"));
    assert_eq!(
        ServerConfig::from_lookup(lookup_from(&pairs)),
        Err(ConfigError::Invalid { var: PORT_VAR, value: "eighty".to_owned() })
    );
}

#[test]
fn missing_or_blank_required_vars_are_rejected() {
    assert_eq!(
        ServerConfig::from_lookup(lookup_from(&[(BACKEND_ANON_KEY_VAR, "k")])),
        Err(ConfigError::Missing { var: BACKEND_URL_VAR })
    );
    assert_eq!(
        ServerConfig::from_lookup(lookup_from(&[(BACKEND_URL_VAR, "https://x.co"), (BACKEND_ANON_KEY_VAR, "  ")])),
        Err(ConfigError::Missing { var: BACKEND_ANON_KEY_VAR })
    );
}

#[test]
fn non_http_backend_url_is_rejected() {
    let pairs = [(BACKEND_URL_VAR, "abcd1234.supabase.co"), (BACKEND_ANON_KEY_VAR, "k")];
    assert!(matches!(
        ServerConfig::from_lookup(lookup_from(&pairs)),
        Err(ConfigError::Invalid { var: BACKEND_URL_VAR, .. })
    ));
}

#[test]
fn from_env_reads_process_environment() {
    // Only test in this binary that touches these variables.
    unsafe {
        std::env::set_var(BACKEND_URL_VAR, "http://localhost:54321");
        std::env::set_var(BACKEND_ANON_KEY_VAR, "local-key");
        std::env::remove_var(PORT_VAR);
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.backend.storage_key(), "sb-localhost-auth-token");
    assert_eq!(cfg.port, DEFAULT_PORT);

    unsafe {
        std::env::remove_var(BACKEND_URL_VAR);
        std::env::remove_var(BACKEND_ANON_KEY_VAR);
    }
}
