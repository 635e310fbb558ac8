use anyhow::{Context as _, Result};

/// Process configuration, built once at startup and passed by reference to
/// everything that needs it. Nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter credential for the shared model client. Required.
    pub openrouter_api_key: String,
    /// Serper.dev credential for the web search tool. When absent the
    /// agents are built without the search tool (scraping still works).
    pub serper_api_key: Option<String>,
    /// Model identifier passed to the OpenRouter client.
    pub model: String,
    pub port: u16,
    /// Language pair for the post-run translation step.
    pub source_lang: String,
    pub target_lang: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
            .context("OPENROUTER_API_KEY environment variable is required")?;

        let serper_api_key = std::env::var("SERPER_API_KEY").ok();

        let model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| "openai/gpt-4o-mini".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .unwrap_or(3000);

        Ok(Self {
            openrouter_api_key,
            serper_api_key,
            model,
            port,
            source_lang: "en".to_string(),
            target_lang: "pt".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var manipulation is process-global, so both cases live in one test.
    #[test]
    fn missing_model_credential_is_fatal() {
        unsafe {
            std::env::remove_var("OPENROUTER_API_KEY");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));

        unsafe {
            std::env::set_var("OPENROUTER_API_KEY", "test-key");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.openrouter_api_key, "test-key");
        assert_eq!(config.source_lang, "en");
        assert_eq!(config.target_lang, "pt");

        unsafe {
            std::env::remove_var("OPENROUTER_API_KEY");
        }
    }
}
