// src/runtime_manifest/tests.rs

use super::*;
use std::path::PathBuf;

fn manifest(name: Option<&str>, library_path: &str) -> RuntimeManifest {
    RuntimeManifest {
        file_format_version: "1.0.0".to_string(),
        runtime: RuntimeInfo {
            name: name.map(str::to_string),
            library_path: PathBuf::from(library_path),
        },
    }
}

// --- Runtime name ---

#[test_log::test]
fn it_should_prefer_the_manifest_name() {
    assert_eq!(manifest(Some("Monado"), "libopenxr_monado.so").runtime_name(), "Monado");
}

#[test_log::test]
fn it_should_derive_the_name_from_a_dll() {
    assert_eq!(manifest(None, "steamxr.dll").runtime_name(), "steamxr");
}

#[test_log::test]
fn it_should_strip_lib_prefix_from_shared_objects() {
    assert_eq!(manifest(None, "/usr/lib/libopenxr_monado.so").runtime_name(), "openxr_monado");
}

#[test_log::test]
fn it_should_fall_back_to_the_library_path() {
    assert_eq!(manifest(None, "/opt/runtime.bin").runtime_name(), "/opt/runtime.bin");
    assert_eq!(manifest(None, "openxr.so").runtime_name(), "openxr.so");
}

// --- Parsing ---

#[test_log::test]
fn it_should_parse_a_manifest_without_a_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("active_runtime.json");
    std::fs::write(
        &path,
        r#"{ "file_format_version": "1.0.0", "runtime": { "library_path": "./libfoo.so" } }"#,
    )
    .unwrap();

    let loaded = RuntimeManifest::load(&path).unwrap();
    assert_eq!(loaded.runtime.name, None);
    assert_eq!(loaded.runtime_name(), "foo");
}

#[test_log::test]
fn it_should_report_unparseable_manifests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("active_runtime.json");
    std::fs::write(&path, "{}").unwrap();

    let err = RuntimeManifest::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse runtime manifest"));
}

// --- Status ---

#[test_log::test]
fn it_should_classify_a_different_runtime() {
    let active = ActiveManifest {
        path: PathBuf::from("/etc/openxr/1/active_runtime.json"),
        manifest: manifest(Some("Monado"), "/usr/lib/libopenxr_monado.so"),
    };
    assert_eq!(
        active.status("AetherVR", Path::new("/opt/aethervr/libaethervr.so")),
        RuntimeStatus::DifferentRuntime
    );
}

#[test_log::test]
fn it_should_classify_an_unnamed_runtime_as_different() {
    let active = ActiveManifest {
        path: PathBuf::from("/etc/openxr/1/active_runtime.json"),
        manifest: manifest(None, "/opt/aethervr/libaethervr.so"),
    };
    assert_eq!(
        active.status("AetherVR", Path::new("/opt/aethervr/libaethervr.so")),
        RuntimeStatus::DifferentRuntime
    );
}

#[test_log::test]
fn it_should_classify_another_install_as_a_different_version() {
    let active = ActiveManifest {
        path: PathBuf::from("/etc/openxr/1/active_runtime.json"),
        manifest: manifest(Some("AetherVR"), "/old/aethervr/libaethervr.so"),
    };
    assert_eq!(
        active.status("AetherVR", Path::new("/opt/aethervr/libaethervr.so")),
        RuntimeStatus::DifferentVersion
    );
}

#[test_log::test]
fn it_should_resolve_relative_library_paths_against_the_manifest_dir() {
    let dir = tempfile::tempdir().unwrap();
    let active = ActiveManifest {
        path: dir.path().join("openxr_runtime.json"),
        manifest: manifest(Some("AetherVR"), "libaethervr.so"),
    };
    assert_eq!(
        active.status("AetherVR", &dir.path().join("libaethervr.so")),
        RuntimeStatus::Ok
    );
}

// --- Search paths ---

#[test_log::test]
fn it_should_search_home_then_config_dirs_then_etc() {
    let paths = ManifestSearchPaths::new(PathBuf::from("/home/u/.config"), Some("/a:/b"));
    let candidates = paths.candidates();
    let expected: Vec<PathBuf> = [
        "/home/u/.config/openxr/1/active_runtime.x86_64.json",
        "/home/u/.config/openxr/1/active_runtime.json",
        "/a/openxr/1/active_runtime.x86_64.json",
        "/a/openxr/1/active_runtime.json",
        "/b/openxr/1/active_runtime.x86_64.json",
        "/b/openxr/1/active_runtime.json",
        "/etc/openxr/1/active_runtime.x86_64.json",
        "/etc/openxr/1/active_runtime.json",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(candidates, expected);
}

#[test_log::test]
fn it_should_default_config_dirs_to_etc_xdg() {
    let paths = ManifestSearchPaths::new(PathBuf::from("/home/u/.config"), None);
    assert_eq!(paths.config_dirs, vec![PathBuf::from("/etc/xdg")]);
}

#[test_log::test]
fn it_should_prefer_the_arch_specific_manifest() {
    let home = tempfile::tempdir().unwrap();
    let base = home.path().join("openxr").join("1");
    std::fs::create_dir_all(&base).unwrap();
    std::fs::write(base.join("active_runtime.json"), "{}").unwrap();
    std::fs::write(base.join("active_runtime.x86_64.json"), "{}").unwrap();

    let paths = ManifestSearchPaths::new(home.path().to_path_buf(), Some(""));
    assert_eq!(paths.find(), Some(base.join("active_runtime.x86_64.json")));
}

#[test_log::test]
fn it_should_prefer_config_home_over_config_dirs() {
    let home = tempfile::tempdir().unwrap();
    let system = tempfile::tempdir().unwrap();
    for dir in [home.path(), system.path()] {
        let base = dir.join("openxr").join("1");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("active_runtime.json"), "{}").unwrap();
    }

    let system_dirs = system.path().to_str().unwrap().to_string();
    let paths = ManifestSearchPaths::new(home.path().to_path_buf(), Some(&system_dirs));
    assert_eq!(
        paths.find(),
        Some(home.path().join("openxr").join("1").join("active_runtime.json"))
    );
}

// --- Activation ---

#[test_log::test]
fn it_should_write_a_manifest_the_search_finds() {
    let home = tempfile::tempdir().unwrap();
    let paths = ManifestSearchPaths::new(home.path().join("config"), Some(""));
    let ours = manifest(Some("AetherVR"), "/opt/aethervr/libaethervr.so");

    let written = activate_in(&paths, &ours).unwrap();
    assert_eq!(written, paths.user_manifest_path());

    let text = std::fs::read_to_string(&written).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"runtime\""));

    let found = paths.find().unwrap();
    assert_eq!(found, written);
    let active = ActiveManifest {
        manifest: RuntimeManifest::load(&found).unwrap(),
        path: found,
    };
    assert_eq!(active.manifest, ours);
    assert_eq!(
        active.status("AetherVR", Path::new("/opt/aethervr/libaethervr.so")),
        RuntimeStatus::Ok
    );
}

#[test_log::test]
fn it_should_build_the_manifest_from_config() {
    let mut config = Config::default();
    config.runtime.runtime_dir = Some(PathBuf::from("/opt/aethervr"));

    match RuntimeManifest::for_runtime(&config) {
        Ok(ours) => {
            assert_eq!(ours.runtime.name.as_deref(), Some("AetherVR"));
            assert_eq!(ours.file_format_version, "1.0.0");
            assert!(ours.runtime.library_path.starts_with("/opt/aethervr"));
        }
        Err(_) => assert_eq!(resolve_target(), PlatformTarget::Unknown),
    }
}

// --- Status from the search paths ---

fn isolated_paths(root: &Path) -> ManifestSearchPaths {
    ManifestSearchPaths::new(root.join("config"), Some(""))
        .with_system_dir(root.join("etc"))
}

#[test_log::test]
fn it_should_report_not_installed_when_no_manifest_exists() {
    let root = tempfile::tempdir().unwrap();
    let paths = isolated_paths(root.path());

    assert_eq!(load_active_manifest_in(&paths).unwrap(), None);
    assert_eq!(
        status_in(&paths, &Config::default()).unwrap(),
        RuntimeStatus::NotInstalled
    );
    assert_eq!(
        classify(None, &Config::default()).unwrap(),
        RuntimeStatus::NotInstalled
    );
}

#[test_log::test]
fn it_should_search_the_system_dir_last() {
    let root = tempfile::tempdir().unwrap();
    let paths = isolated_paths(root.path());
    let candidates = paths.candidates();
    assert_eq!(
        candidates.last(),
        Some(&root.path().join("etc").join("openxr").join("1").join("active_runtime.json"))
    );
}

#[cfg(any(windows, target_os = "linux", target_os = "macos"))]
#[test_log::test]
fn it_should_report_ok_after_registering_our_runtime() {
    let root = tempfile::tempdir().unwrap();
    let paths = isolated_paths(root.path());
    let mut config = Config::default();
    config.runtime.runtime_dir = Some(root.path().join("runtime"));

    let ours = RuntimeManifest::for_runtime(&config).unwrap();
    activate_in(&paths, &ours).unwrap();

    assert_eq!(status_in(&paths, &config).unwrap(), RuntimeStatus::Ok);

    let active = load_active_manifest_in(&paths).unwrap().unwrap();
    assert_eq!(active.path, paths.user_manifest_path());
    assert_eq!(active.manifest.runtime_name(), "AetherVR");
}

#[cfg(any(windows, target_os = "linux", target_os = "macos"))]
#[test_log::test]
fn it_should_report_a_different_version_for_another_install_dir() {
    let root = tempfile::tempdir().unwrap();
    let paths = isolated_paths(root.path());
    let mut config = Config::default();
    config.runtime.runtime_dir = Some(root.path().join("old"));
    activate_in(&paths, &RuntimeManifest::for_runtime(&config).unwrap()).unwrap();

    config.runtime.runtime_dir = Some(root.path().join("new"));
    assert_eq!(
        status_in(&paths, &config).unwrap(),
        RuntimeStatus::DifferentVersion
    );
}

#[test_log::test]
fn it_should_fail_status_on_a_broken_manifest() {
    let root = tempfile::tempdir().unwrap();
    let paths = isolated_paths(root.path());
    let path = paths.user_manifest_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    assert!(status_in(&paths, &Config::default()).is_err());
}

// --- Environment ---

#[test_log::test]
fn it_should_fall_back_to_home_dot_config() {
    let paths = ManifestSearchPaths::from_vars(None, Some("/home/u".into()), None).unwrap();
    assert_eq!(paths.config_home, PathBuf::from("/home/u/.config"));
    assert_eq!(paths.config_dirs, vec![PathBuf::from("/etc/xdg")]);
    assert_eq!(paths.system_dir, PathBuf::from("/etc"));
}

#[test_log::test]
fn it_should_prefer_xdg_config_home_over_home() {
    let paths = ManifestSearchPaths::from_vars(
        Some("/xdg/config".into()),
        Some("/home/u".into()),
        Some("/a:/b"),
    )
    .unwrap();
    assert_eq!(paths.config_home, PathBuf::from("/xdg/config"));
    assert_eq!(paths.config_dirs, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
}

#[test_log::test]
fn it_should_treat_an_empty_xdg_config_home_as_unset() {
    let paths = ManifestSearchPaths::from_vars(Some("".into()), Some("/home/u".into()), None).unwrap();
    assert_eq!(paths.config_home, PathBuf::from("/home/u/.config"));
}

#[test_log::test]
fn it_should_fail_without_any_home_directory() {
    let err = ManifestSearchPaths::from_vars(None, None, None).unwrap_err();
    assert!(err.to_string().contains("Neither XDG_CONFIG_HOME nor HOME is set"));
}

#[test_log::test]
fn it_should_read_the_process_environment() {
    let expected = ManifestSearchPaths::from_vars(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
        std::env::var("XDG_CONFIG_DIRS").ok().as_deref(),
    );
    match (ManifestSearchPaths::from_env(), expected) {
        (Ok(paths), Ok(expected)) => assert_eq!(paths, expected),
        (Err(_), Err(_)) => {}
        (actual, expected) => panic!("from_env {actual:?} vs {expected:?}"),
    }
}
