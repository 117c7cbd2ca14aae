use exo_config::{ExoConfig, PROJECT_CONFIG_FILE};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn flat_deployment_variables_fill_upstream() {
    Jail::expect_with(|jail| {
        jail.set_env("EXO_API_URL", "https://exo-model.example.org");
        jail.set_env("EXO_API_KEY", "flat-key");

        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.url, "https://exo-model.example.org");
        assert_eq!(config.upstream.api_key, "flat-key");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_flat_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("EXO_API_URL", "http://flat");
        jail.set_env("EXO_UPSTREAM__URL", "http://prefixed");

        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.url, "http://prefixed");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            PROJECT_CONFIG_FILE,
            r#"
[upstream]
url = "http://from-toml"
api_key = "toml-key"

[server]
bind = "127.0.0.1:9000"
"#,
        )?;
        jail.set_env("EXO_API_KEY", "env-key");
        jail.set_env("EXO_SERVER__BIND", "0.0.0.0:4321");

        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.url, "http://from-toml");
        assert_eq!(config.upstream.api_key, "env-key");
        assert_eq!(config.server.bind, "0.0.0.0:4321");
        Ok(())
    });
}

#[test]
fn numeric_env_values_are_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("EXO_UPSTREAM__TIMEOUT_SECS", "5");
        jail.set_env("EXO_SERVER__MAX_BODY_BYTES", "2048");

        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.timeout_secs, Some(5));
        assert_eq!(config.server.max_body_bytes, 2048);
        Ok(())
    });
}

#[test]
fn unrelated_exo_variables_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("EXO_LOG", "debug");
        jail.set_env("EXO_UPSTREAM__URL", "http://127.0.0.1:8000");

        let config = ExoConfig::load(None).expect("config loads");
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn numeric_looking_api_key_is_kept_verbatim() {
    Jail::expect_with(|jail| {
        jail.set_env("EXO_API_URL", "http://127.0.0.1:8000");
        jail.set_env("EXO_API_KEY", "1234567890");

        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.api_key, "1234567890");
        assert!(config.validate().is_ok());

        jail.set_env("EXO_UPSTREAM__API_KEY", "0012345");
        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.api_key, "0012345");
        Ok(())
    });
}

#[test]
fn boolean_looking_values_stay_text() {
    Jail::expect_with(|jail| {
        jail.set_env("EXO_UPSTREAM__URL", "http://127.0.0.1:8000");
        jail.set_env("EXO_API_KEY", "true");
        jail.set_env("EXO_SERVER__BIND", "127.0.0.1:9999");

        let config = ExoConfig::load(None).expect("config loads");
        assert_eq!(config.upstream.api_key, "true");
        assert_eq!(config.server.bind, "127.0.0.1:9999");
        assert_eq!(config.upstream.timeout_secs, None);
        Ok(())
    });
}
