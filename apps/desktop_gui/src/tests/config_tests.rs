use super::{load_settings_from, normalize_api_url, Settings, DEFAULT_API_URL};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("user_admin_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("user_admin.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_to_fixed_api_location() {
    let missing = env::temp_dir().join("user_admin_config_test_missing/user_admin.toml");
    assert_eq!(load_settings_from(&missing, no_env, None), Settings::default());
    assert_eq!(Settings::default().api_url, DEFAULT_API_URL);
}

#[test]
fn settings_file_overrides_default() {
    let path = temp_settings_file("api_url = \"http://localhost:3000/api\"\n");
    let settings = load_settings_from(&path, no_env, None);
    assert_eq!(settings.api_url, "http://localhost:3000/api");
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unreadable_settings_file_is_ignored() {
    let path = temp_settings_file("api_url = [1, 2]\n");
    let settings = load_settings_from(&path, no_env, None);
    assert_eq!(settings, Settings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_then_cli_take_precedence() {
    let path = temp_settings_file("api_url = \"http://file.example/api\"\n");
    let vars = HashMap::from([
        ("USER_ADMIN_API_URL", "http://env.example/api"),
        ("APP__API_URL", "http://app.example/api"),
    ]);
    let env = |name: &str| vars.get(name).map(|v| v.to_string());

    assert_eq!(
        load_settings_from(&path, env, None).api_url,
        "http://app.example/api"
    );
    assert_eq!(
        load_settings_from(&path, env, Some("http://cli.example/api")).api_url,
        "http://cli.example/api"
    );
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn normalizes_trailing_slash_and_whitespace() {
    assert_eq!(
        normalize_api_url("  https://host.example/api/ ").expect("valid"),
        "https://host.example/api"
    );
}

#[test]
fn rejects_empty_and_non_http_urls() {
    assert!(normalize_api_url("   ").is_err());
    assert!(normalize_api_url("not a url").is_err());
    assert!(normalize_api_url("ftp://host.example/api").is_err());
}
