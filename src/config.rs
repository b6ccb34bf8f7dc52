use std::time::Duration;

/// Effective runtime settings. There is no config file; values come
/// from these defaults, the environment, and CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub workers: usize,
    pub catalog_size: u32,
}

/// Size of the national dex served by the reference deployment.
pub const DEFAULT_CATALOG_SIZE: u32 = 1025;

const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
const DEFAULT_WORKERS: usize = 8;
const MAX_WORKERS: usize = 32;

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            workers: DEFAULT_WORKERS,
            catalog_size: DEFAULT_CATALOG_SIZE,
        }
    }
}

impl Settings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(url) = std::env::var("POKEDEX_BASE_URL") {
            if !url.trim().is_empty() {
                settings.base_url = url.trim().to_string();
            }
        }
        if let Ok(workers) = std::env::var("POKEDEX_WORKERS") {
            if let Ok(value) = workers.trim().parse::<usize>() {
                settings.workers = value;
            }
        }
        settings.workers = settings.workers.clamp(1, MAX_WORKERS);
        settings
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, MAX_WORKERS);
        self
    }
}
