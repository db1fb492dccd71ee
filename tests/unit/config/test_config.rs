// Configuration tests: environment loading of key material

use crate::common::*;
use record_integrity::config::Config;
use record_integrity::core::constants::config::{
    ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_PRIVATE_KEY, ENV_PRIVATE_KEY_PATH, ENV_PUBLIC_KEY,
    ENV_PUBLIC_KEY_PATH,
};
use record_integrity::{IntegrityError, KeyPair};
use secrecy::ExposeSecret;
use std::env;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

// Mutex to ensure tests that modify environment variables run sequentially
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    for key in [
        ENV_PRIVATE_KEY,
        ENV_PUBLIC_KEY,
        ENV_PRIVATE_KEY_PATH,
        ENV_PUBLIC_KEY_PATH,
        ENV_LOG_LEVEL,
        ENV_LOG_FORMAT,
    ] {
        env::remove_var(key);
    }
}

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn test_inline_keys() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PRIVATE_KEY, PRIMARY_PRIVATE);
    env::set_var(ENV_PUBLIC_KEY, PRIMARY_PUBLIC);

    let config = Config::from_env().unwrap();
    assert_eq!(config.private_key_pem.expose_secret(), PRIMARY_PRIVATE);
    assert_eq!(config.public_key_pem, PRIMARY_PUBLIC);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_format, "text");
    assert!(KeyPair::from_config(&config).is_ok());

    clear_env_vars();
}

#[test]
fn test_inline_keys_with_escaped_newlines() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PRIVATE_KEY, escape_newlines(PRIMARY_PRIVATE));
    env::set_var(ENV_PUBLIC_KEY, escape_newlines(PRIMARY_PUBLIC));

    let config = Config::from_env().unwrap();
    assert_eq!(config.public_key_pem, PRIMARY_PUBLIC);

    let key_pair = KeyPair::from_config(&config).unwrap();
    assert_eq!(key_pair.public_key().to_pem(), PRIMARY_PUBLIC);

    clear_env_vars();
}

#[test]
fn test_key_paths() {
    let _guard = lock_env();
    clear_env_vars();

    let temp_dir = TempDir::new().unwrap();
    let private_path = temp_dir.path().join("private.pem");
    let public_path = temp_dir.path().join("public.pem");
    fs::write(&private_path, SECONDARY_PRIVATE).unwrap();
    fs::write(&public_path, SECONDARY_PUBLIC).unwrap();

    env::set_var(ENV_PRIVATE_KEY_PATH, &private_path);
    env::set_var(ENV_PUBLIC_KEY_PATH, &public_path);

    let config = Config::from_env().unwrap();
    assert_eq!(config.public_key_pem, SECONDARY_PUBLIC);
    assert!(KeyPair::from_config(&config).is_ok());

    clear_env_vars();
}

#[test]
fn test_missing_private_key() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PUBLIC_KEY, PRIMARY_PUBLIC);

    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, IntegrityError::ConfigurationError(_)));
    let msg = err.to_string();
    assert!(msg.contains(ENV_PRIVATE_KEY));
    assert!(msg.contains(ENV_PRIVATE_KEY_PATH));

    clear_env_vars();
}

#[test]
fn test_empty_value_counts_as_missing() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PRIVATE_KEY, "   ");
    env::set_var(ENV_PUBLIC_KEY, PRIMARY_PUBLIC);

    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("Private key not set"));

    clear_env_vars();
}

#[test]
fn test_inline_and_path_both_set() {
    let _guard = lock_env();
    clear_env_vars();

    let temp_dir = TempDir::new().unwrap();
    let public_path = temp_dir.path().join("public.pem");
    fs::write(&public_path, PRIMARY_PUBLIC).unwrap();

    env::set_var(ENV_PRIVATE_KEY, PRIMARY_PRIVATE);
    env::set_var(ENV_PUBLIC_KEY, PRIMARY_PUBLIC);
    env::set_var(ENV_PUBLIC_KEY_PATH, &public_path);

    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("use one"));

    clear_env_vars();
}

#[test]
fn test_missing_key_file() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PRIVATE_KEY, PRIMARY_PRIVATE);
    env::set_var(ENV_PUBLIC_KEY_PATH, "/nonexistent/public.pem");

    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("not found"));

    clear_env_vars();
}

#[test]
fn test_invalid_log_settings() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PRIVATE_KEY, PRIMARY_PRIVATE);
    env::set_var(ENV_PUBLIC_KEY, PRIMARY_PUBLIC);

    env::set_var(ENV_LOG_LEVEL, "verbose");
    assert!(Config::from_env().is_err());

    env::set_var(ENV_LOG_LEVEL, "debug");
    env::set_var(ENV_LOG_FORMAT, "xml");
    assert!(Config::from_env().is_err());

    env::set_var(ENV_LOG_FORMAT, "json");
    let config = Config::from_env().unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.log_format, "json");

    clear_env_vars();
}

#[test]
fn test_public_key_only() {
    let _guard = lock_env();
    clear_env_vars();

    env::set_var(ENV_PUBLIC_KEY, escape_newlines(PRIMARY_PUBLIC));
    assert_eq!(Config::public_key_from_env().unwrap(), PRIMARY_PUBLIC);

    clear_env_vars();
}
