use anyhow::{Result, anyhow, bail};
use serde_json::Value;
use tracing::info;

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for the Google Translate HTTP endpoint. Translation is a hard
/// requirement of a run: a failure here fails the run, there is no
/// fallback to untranslated text.
pub struct Translator {
    client: reqwest::Client,
    source_lang: String,
    target_lang: String,
}

impl Translator {
    pub fn new(source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    pub async fn translate(&self, text: &str) -> Result<String> {
        info!(
            source = %self.source_lang,
            target = %self.target_lang,
            chars = text.len(),
            "translating result"
        );

        let url = format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            TRANSLATE_URL,
            self.source_lang,
            self.target_lang,
            urlencoding::encode(text)
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let data: Value = response.json().await?;

        let translated = collect_segments(&data)
            .ok_or_else(|| anyhow!("unexpected translation response shape"))?;

        if translated.is_empty() {
            bail!("translation service returned empty text");
        }
        Ok(translated)
    }
}

// The gtx endpoint answers with nested arrays; the first element holds
// [translated, original, ...] segment pairs.
fn collect_segments(data: &Value) -> Option<String> {
    let segments = data.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            out.push_str(piece);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn segments_are_joined_in_order() {
        let data = json!([
            [["Olá ", "Hello ", null], ["mundo", "world", null]],
            null
        ]);
        assert_eq!(collect_segments(&data).as_deref(), Some("Olá mundo"));
    }

    #[test]
    fn malformed_response_is_rejected() {
        assert!(collect_segments(&json!({"error": "nope"})).is_none());
        assert!(collect_segments(&json!("plain")).is_none());
    }
}
