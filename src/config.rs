use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use smartmeal_llm::{GenerationOptions, ProviderKind, ProviderSettings};
use smartmeal_recipe::{CatalogLoader, default_search_paths};
use smartmeal_recommend::{DEFAULT_SIMILAR_POOL, RecommenderOptions};
use smartmeal_similarity::{DEFAULT_NUMERIC_WEIGHT, FeatureOptions};
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Build the catalog and similarity index before accepting requests
    #[serde(default = "default_true")]
    pub warm_up: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            warm_up: true,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Dataset file tried before the search paths
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            search_paths: default_search_paths(),
        }
    }
}

impl CatalogConfig {
    pub fn loader(&self) -> CatalogLoader {
        let paths = self
            .path
            .iter()
            .cloned()
            .chain(self.search_paths.iter().cloned())
            .collect();

        CatalogLoader::new(paths)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimilarityConfig {
    #[serde(default = "default_numeric_weight")]
    pub numeric_weight: f64,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default = "default_similar_pool")]
    pub similar_pool: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            numeric_weight: default_numeric_weight(),
            max_features: default_max_features(),
            similar_pool: default_similar_pool(),
        }
    }
}

fn default_numeric_weight() -> f64 {
    DEFAULT_NUMERIC_WEIGHT
}

fn default_max_features() -> usize {
    FeatureOptions::default().max_features
}

fn default_similar_pool() -> usize {
    DEFAULT_SIMILAR_POOL
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// `openai` for any OpenAI-compatible server, `fake` for offline runs
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_extraction_max_tokens")]
    pub extraction_max_tokens: u32,
    #[serde(default = "default_explanation_max_tokens")]
    pub explanation_max_tokens: u32,
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,
    #[serde(default = "default_explanation_temperature")]
    pub explanation_temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_llm_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            extraction_max_tokens: default_extraction_max_tokens(),
            explanation_max_tokens: default_explanation_max_tokens(),
            extraction_temperature: default_extraction_temperature(),
            explanation_temperature: default_explanation_temperature(),
        }
    }
}

fn default_provider() -> String {
    "fake".to_string()
}

fn default_llm_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_model() -> String {
    "qwen3:4b".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_extraction_max_tokens() -> u32 {
    400
}

fn default_explanation_max_tokens() -> u32 {
    600
}

fn default_extraction_temperature() -> f32 {
    0.2
}

fn default_explanation_temperature() -> f32 {
    0.3
}

impl LlmConfig {
    pub fn provider_settings(&self) -> Result<ProviderSettings, String> {
        let kind = self
            .provider
            .parse::<ProviderKind>()
            .map_err(|_| format!("Unknown LLM provider: {}", self.provider))?;

        Ok(ProviderSettings {
            kind,
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines (also enabled by ENVIRONMENT=production)
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SMARTMEAL__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("similarity.numeric_weight", DEFAULT_NUMERIC_WEIGHT)?
            .set_default("llm.provider", default_provider())?;

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SMARTMEAL")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy environment variables without prefix
        if let Ok(weight) = env::var("SIM_NUMERIC_WEIGHT") {
            let weight = weight.trim().parse::<f64>().map_err(|e| {
                ConfigError::Message(format!("SIM_NUMERIC_WEIGHT is not a number: {e}"))
            })?;
            builder = builder.set_override("similarity.numeric_weight", weight)?;
        }
        if let Ok(skip) = env::var("SKIP_WARM_UP") {
            builder = builder.set_override("server.warm_up", !truthy(&skip))?;
        }
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            builder = builder.set_override("llm.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.similarity.numeric_weight.is_finite() || self.similarity.numeric_weight < 0.0 {
            return Err("Similarity numeric_weight must be a finite, non-negative number".to_string());
        }
        if self.similarity.max_features == 0 {
            return Err("Similarity max_features must be at least 1".to_string());
        }
        if self.similarity.similar_pool == 0 {
            return Err("Similarity similar_pool must be at least 1".to_string());
        }
        self.llm.provider_settings()?;
        Ok(())
    }

    pub fn recommender_options(&self) -> RecommenderOptions {
        RecommenderOptions {
            features: FeatureOptions {
                numeric_weight: self.similarity.numeric_weight,
                max_features: self.similarity.max_features,
            },
            similar_pool: self.similarity.similar_pool,
            extraction: GenerationOptions {
                max_tokens: self.llm.extraction_max_tokens,
                temperature: self.llm.extraction_temperature,
            },
            explanation: GenerationOptions {
                max_tokens: self.llm.explanation_max_tokens,
                temperature: self.llm.explanation_temperature,
            },
        }
    }
}
