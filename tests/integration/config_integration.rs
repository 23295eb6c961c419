//! Integration tests for layered configuration loading

use super::test_utils::with_config_env;
use bctx::config::global_config_path;
use bctx::{BrowsingContext, ConfigLoader, Configuration, Sandbox, SandboxFlag};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn workspace(test_dir: &TempDir) -> PathBuf {
    let root = test_dir.path().join("workspace");
    fs::create_dir_all(root.join("config")).unwrap();
    root
}

fn write_workspace_config(root: &Path, file: &str, contents: &str) {
    fs::write(root.join("config").join(file), contents).unwrap();
}

#[test]
fn test_defaults_without_any_source() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);

    let config = with_config_env(&test_dir, &[], || ConfigLoader::load(&root).unwrap());
    assert!(config.default_sandbox.is_empty());
    assert!(config.group_fallback);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_workspace_file_sets_family_settings() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);
    write_workspace_config(
        &root,
        "config.toml",
        r#"
default_sandbox = ["scripts", "plugins"]
group_fallback = false

[logging]
level = "debug"
"#,
    );

    let config = with_config_env(&test_dir, &[], || ConfigLoader::load(&root).unwrap());
    assert_eq!(
        config.default_sandbox,
        vec![SandboxFlag::Scripts, SandboxFlag::Plugins]
    );
    assert!(!config.group_fallback);
    assert_eq!(config.logging.level, "debug");

    let settings = config.settings().unwrap();
    assert!(settings.default_sandbox.contains(SandboxFlag::Plugins));
    assert!(!settings.group_fallback);
}

#[test]
fn test_environment_file_overrides_base() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);
    write_workspace_config(&root, "config.toml", "group_fallback = false\n");
    write_workspace_config(&root, "production.toml", "group_fallback = true\n");
    write_workspace_config(&root, "development.toml", "default_sandbox = [\"forms\"]\n");

    let production = with_config_env(&test_dir, &[("BCTX_ENV", "production")], || {
        ConfigLoader::load(&root).unwrap()
    });
    assert!(production.group_fallback);
    assert!(production.default_sandbox.is_empty());

    let development = with_config_env(&test_dir, &[], || ConfigLoader::load(&root).unwrap());
    assert!(!development.group_fallback);
    assert_eq!(development.default_sandbox, vec![SandboxFlag::Forms]);
}

#[test]
fn test_environment_variables_take_precedence() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);
    write_workspace_config(
        &root,
        "config.toml",
        "group_fallback = true\ndefault_sandbox = [\"forms\"]\n",
    );

    let config = with_config_env(
        &test_dir,
        &[
            ("BCTX__GROUP_FALLBACK", "false"),
            ("BCTX__DEFAULT_SANDBOX", "scripts,modals"),
        ],
        || ConfigLoader::load(&root).unwrap(),
    );
    assert!(!config.group_fallback);
    assert_eq!(
        config.default_sandbox,
        vec![SandboxFlag::Scripts, SandboxFlag::Modals]
    );
}

#[test]
fn test_global_file_is_lowest_file_layer() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);

    let config = with_config_env(&test_dir, &[], || {
        let global = global_config_path().unwrap();
        assert!(global.starts_with(test_dir.path()));
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(
            &global,
            "group_fallback = false\ndefault_sandbox = [\"pointer-lock\"]\n",
        )
        .unwrap();
        write_workspace_config(&root, "config.toml", "group_fallback = true\n");

        ConfigLoader::load(&root).unwrap()
    });
    assert!(config.group_fallback);
    assert_eq!(config.default_sandbox, vec![SandboxFlag::PointerLock]);
}

#[test]
fn test_unknown_flag_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);
    write_workspace_config(&root, "config.toml", "default_sandbox = [\"teleport\"]\n");

    let result = with_config_env(&test_dir, &[], || ConfigLoader::load(&root));
    assert!(result.is_err());
}

#[test]
fn test_duplicate_flags_fail_validation() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);
    write_workspace_config(
        &root,
        "config.toml",
        "default_sandbox = [\"scripts\", \"scripts\"]\n",
    );

    let config = with_config_env(&test_dir, &[], || ConfigLoader::load(&root).unwrap());
    let err = config.settings().unwrap_err();
    assert!(err.to_string().contains("Duplicate flag 'scripts'"));
}

/// Loaded settings drive the contexts of a family end to end.
#[test]
fn test_loaded_settings_shape_family() {
    let test_dir = TempDir::new().unwrap();
    let root = workspace(&test_dir);
    write_workspace_config(
        &root,
        "config.toml",
        "default_sandbox = [\"modals\"]\ngroup_fallback = false\n",
    );

    let settings = with_config_env(&test_dir, &[], || {
        ConfigLoader::load(&root).unwrap().settings().unwrap()
    });
    let top = BrowsingContext::with_settings(Configuration::new(), Sandbox::NONE, settings);
    let frame = top.create_child(Sandbox::NONE, true);

    assert!(!frame.settings().group_fallback);
    let popup = frame.choose_target("_blank").unwrap();
    assert_eq!(popup.security(), Sandbox::from(SandboxFlag::Modals));
}
