use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AdPilotError, ModelTier, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdPilotConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl FromStr for Provider {
    type Err = AdPilotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            other => Err(AdPilotError::Config(format!("unknown provider '{other}'"))),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: Provider,
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_base: Option<String>,
    pub pro_model: String,
    pub flash_model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            api_key: None,
            api_base: None,
            pro_model: "gemini-3-pro-preview".to_string(),
            flash_model: "gemini-3-flash-preview".to_string(),
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn model(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Pro => &self.pro_model,
            ModelTier::Flash => &self.flash_model,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("pro_model", &self.pro_model)
            .field("flash_model", &self.flash_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl AdPilotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count
    /// as unset. A missing credential is not an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = get("ADPILOT_PROVIDER")
            .map(|p| p.parse::<Provider>())
            .transpose()?
            .unwrap_or_default();

        let mut llm = match provider {
            Provider::Gemini => LlmConfig {
                api_key: get("API_KEY").or_else(|| get("GEMINI_API_KEY")),
                ..LlmConfig::default()
            },
            Provider::OpenAi => LlmConfig {
                provider,
                api_key: get("OPENAI_API_KEY").or_else(|| get("API_KEY")),
                pro_model: "gpt-4o".to_string(),
                flash_model: "gpt-4o-mini".to_string(),
                ..LlmConfig::default()
            },
        };

        if let Some(base) = get("ADPILOT_API_BASE") {
            llm.api_base = Some(base);
        }
        if let Some(model) = get("ADPILOT_PRO_MODEL") {
            llm.pro_model = model;
        }
        if let Some(model) = get("ADPILOT_FLASH_MODEL") {
            llm.flash_model = model;
        }
        if let Some(secs) = get("ADPILOT_TIMEOUT_SECS") {
            llm.timeout_secs = secs.trim().parse().map_err(|_| {
                AdPilotError::Config(format!("ADPILOT_TIMEOUT_SECS must be an integer, got '{secs}'"))
            })?;
        }

        let server = ServerConfig {
            addr: get("ADPILOT_ADDR").unwrap_or_else(|| ServerConfig::default().addr),
        };

        Ok(Self { llm, server })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AdPilotConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdPilotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.llm.provider, Provider::Gemini);
        assert!(!config.llm.has_credential());
        assert_eq!(config.llm.model(ModelTier::Pro), "gemini-3-pro-preview");
        assert_eq!(config.llm.model(ModelTier::Flash), "gemini-3-flash-preview");
        assert_eq!(config.server.addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_gemini_key_fallback_and_blank_values() {
        let config = config_from(&[("API_KEY", "  "), ("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn test_openai_provider_defaults() {
        let config = config_from(&[
            ("ADPILOT_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ADPILOT_FLASH_MODEL", "local-small"),
        ])
        .unwrap();
        assert_eq!(config.llm.provider, Provider::OpenAi);
        assert_eq!(config.llm.pro_model, "gpt-4o");
        assert_eq!(config.llm.flash_model, "local-small");
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            config_from(&[("ADPILOT_PROVIDER", "bard")]),
            Err(AdPilotError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("ADPILOT_TIMEOUT_SECS", "soon")]),
            Err(AdPilotError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = config_from(&[("API_KEY", "secret-value")]).unwrap();
        let debug = format!("{:?}", config.llm);
        assert!(!debug.contains("secret-value"));
    }
}
