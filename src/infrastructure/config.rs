use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://water-quality-backend-f49b.onrender.com";
const DEFAULT_CONFIG_FILE: &str = "config/client";
const ENV_PREFIX: &str = "WQ";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub token_path: PathBuf,
    /// When false the token only lives for the current process
    pub persist: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub download_dir: PathBuf,
    pub chart_width: usize,
    pub chart_height: usize,
}

/// Defaults, then `config/client.*` when present, then `WQ__SECTION__KEY` variables
pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    load_client_config_from(DEFAULT_CONFIG_FILE)
}

pub fn load_client_config_from(file: &str) -> anyhow::Result<ClientConfig> {
    build_client_config(file, None)
}

/// `env` replaces the process environment when given
fn build_client_config(
    file: &str,
    env: Option<config::Map<String, String>>,
) -> anyhow::Result<ClientConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("session.token_path", default_token_path().to_string_lossy().to_string())?
        .set_default("session.persist", true)?
        .set_default("output.download_dir", ".")?
        .set_default("output.chart_width", 60_i64)?
        .set_default("output.chart_height", 10_i64)?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let mut client: ClientConfig = settings.try_deserialize()?;
    client.api.base_url = client.api.base_url.trim_end_matches('/').to_string();
    Ok(client)
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("water-quality")
        .join("session.toml")
}

/// Joins an API path onto the configured base URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:8000/", "/api/predict"),
            "http://localhost:8000/api/predict"
        );
        assert_eq!(endpoint_url("http://h", "health"), "http://h/health");
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_client_config_from("does/not/exist").unwrap();
        assert_eq!(config.output.chart_width, 60);
        assert_eq!(config.output.download_dir, PathBuf::from("."));
        assert!(config.session.token_path.ends_with("session.toml"));
        assert!(config.session.persist);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://localhost:8000/\"\n\n[output]\nchart_height = 6"
        )
        .unwrap();

        let stem = dir.path().join("client");
        let config = load_client_config_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.output.chart_height, 6);
        assert_eq!(config.output.chart_width, 60);
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("client.toml"),
            "[api]\nbase_url = \"http://from-file\"\n",
        )
        .unwrap();

        let env = config::Map::from([
            ("WQ__API__BASE_URL".to_string(), "http://staging:9000/".to_string()),
            ("WQ__SESSION__PERSIST".to_string(), "false".to_string()),
            ("WQ__OUTPUT__CHART_WIDTH".to_string(), "80".to_string()),
            ("OTHER__API__BASE_URL".to_string(), "http://ignored".to_string()),
        ]);
        let stem = dir.path().join("client");
        let config = build_client_config(stem.to_str().unwrap(), Some(env)).unwrap();

        assert_eq!(config.api.base_url, "http://staging:9000");
        assert!(!config.session.persist);
        assert_eq!(config.output.chart_width, 80);
        assert_eq!(config.output.chart_height, 10);
    }
}
