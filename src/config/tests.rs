use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadenza_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", "/tmp/cadenza-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cadenza-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state/cadenza/cadenza.log")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/cadenza/cadenza.log")
    );
}

#[test]
fn defaults_match_widget_behavior() {
    let s = Settings::default();
    assert!(s.playback.looping);
    assert_eq!(s.playback.initial_volume, 1.0);
    assert_eq!(s.thumbnails.residency_ms, 1000);
    assert_eq!(s.log.filter, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[site]
default_thumbnail = "/srv/covers/default.jpg"

[playback]
looping = false
initial_volume = 0.4
tick_ms = 100

[thumbnails]
residency_ms = 1500
cover_names = ["art.png"]

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false

[log]
filter = "cadenza=debug"
file = "/tmp/cadenza.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENZA__PLAYBACK__LOOPING");

    let s = Settings::load().unwrap();
    assert_eq!(s.site.default_thumbnail, "/srv/covers/default.jpg");
    assert!(!s.playback.looping);
    assert!((s.playback.initial_volume - 0.4).abs() < 1e-6);
    assert_eq!(s.playback.tick_ms, 100);
    assert_eq!(s.thumbnails.residency_ms, 1500);
    assert_eq!(s.thumbnails.cover_names, vec!["art.png".to_string()]);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.log.filter, "cadenza=debug");
    assert_eq!(s.log.file, Some(std::path::PathBuf::from("/tmp/cadenza.log")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
looping = true
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENZA__PLAYBACK__LOOPING", "false");

    let s = Settings::load().unwrap();
    assert!(!s.playback.looping);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.site.default_thumbnail = "  ".to_string();
    assert!(s.validate().is_err());
}
