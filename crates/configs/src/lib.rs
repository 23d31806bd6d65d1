use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            worker_threads: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded image files. Created at startup if absent.
    pub upload_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".into(),
        }
    }
}

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields
/// the built-in defaults so the service runs with no config at all.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // Environment variables win over the TOML file, matching the
        // original env-only deployment surface (HOST, PORT, UPLOAD_DIR).
        self.server.apply_env();
        self.storage.apply_env();
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(0) = self.worker_threads {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl StorageConfig {
    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            if !dir.trim().is_empty() {
                self.upload_dir = dir;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.upload_dir.trim().is_empty() {
            return Err(anyhow!(
                "storage.upload_dir is empty; set it in config.toml or the UPLOAD_DIR env var"
            ));
        }
        Ok(())
    }
}
