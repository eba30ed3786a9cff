//! Environment credential overrides.
//!
//! Kept in its own test binary with a single test: it mutates process
//! environment variables, which must not race with other tests.

use geocode_core::{Config, ProviderConfig, ProviderId};

#[test]
fn test_here_credentials_are_read_from_environment() {
    // SAFETY: this binary runs exactly one test, so no other thread reads the environment.
    unsafe {
        std::env::remove_var("HERE_APP_ID");
        std::env::remove_var("HERE_APP_CODE");
    }

    let mut cfg = Config::default();
    let mut provider = ProviderConfig::new("FILE_ID", "FILE_CODE");
    provider.max_results = 5;
    cfg.upsert_provider(ProviderId::Here, provider);

    cfg.apply_env_overrides();
    assert_eq!(cfg.provider_config(ProviderId::Here).unwrap().app_id, "FILE_ID");

    // SAFETY: see above.
    unsafe {
        std::env::set_var("HERE_APP_ID", "ENV_ID");
        std::env::set_var("HERE_APP_CODE", "ENV_CODE");
    }

    cfg.apply_env_overrides();
    let here = cfg.provider_config(ProviderId::Here).unwrap();
    assert_eq!(here.app_id, "ENV_ID");
    assert_eq!(here.app_code, "ENV_CODE");
    assert_eq!(here.max_results, 5);

    let mut empty = Config::default();
    empty.apply_env_overrides();
    assert!(empty.is_provider_configured(ProviderId::Here));
    assert_eq!(empty.default_provider_id().unwrap(), ProviderId::Here);

    // SAFETY: see above.
    unsafe {
        std::env::remove_var("HERE_APP_ID");
        std::env::remove_var("HERE_APP_CODE");
    }
}
