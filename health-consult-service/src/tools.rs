use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

const SERPER_URL: &str = "https://google.serper.dev/search";
const MAX_SEARCH_RESULTS: usize = 5;
const MAX_PAGE_CHARS: usize = 8_000;

#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Response(String),
}

#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

/// Web search capability backed by serper.dev, exposed to the agents as a
/// model-callable tool.
pub struct WebSearchTool {
    api_key: String,
    client: reqwest::Client,
}

impl WebSearchTool {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

impl Tool for WebSearchTool {
    const NAME: &'static str = "web_search";

    type Error = ToolCallError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for medical information. Returns titles, links and \
                          snippets of the top results."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        info!(query = %args.query, "running web search");

        let response = self
            .client
            .post(SERPER_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "q": args.query }))
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        let results = format_search_results(&data);
        if results.is_empty() {
            return Err(ToolCallError::Response(format!(
                "no search results for: {}",
                args.query
            )));
        }
        Ok(results)
    }
}

fn format_search_results(data: &Value) -> String {
    let Some(organic) = data["organic"].as_array() else {
        return String::new();
    };

    organic
        .iter()
        .take(MAX_SEARCH_RESULTS)
        .filter_map(|entry| {
            let title = entry["title"].as_str()?;
            let link = entry["link"].as_str().unwrap_or_default();
            let snippet = entry["snippet"].as_str().unwrap_or_default();
            Some(format!("{title}\n{link}\n{snippet}"))
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

#[derive(Debug, Deserialize)]
pub struct ScrapeArgs {
    pub url: String,
}

/// Fetches a web page and returns its visible text, markup stripped.
pub struct ScrapeWebsiteTool {
    client: reqwest::Client,
}

impl ScrapeWebsiteTool {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ScrapeWebsiteTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ScrapeWebsiteTool {
    const NAME: &'static str = "scrape_website";

    type Error = ToolCallError;
    type Args = ScrapeArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Fetch a web page and return its text content with HTML removed."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "The URL of the page to fetch"
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        info!(url = %args.url, "scraping page");

        let html = self
            .client
            .get(&args.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let mut text = strip_html(&html);
        if text.is_empty() {
            return Err(ToolCallError::Response(format!(
                "page had no readable text: {}",
                args.url
            )));
        }
        text.truncate_to_chars(MAX_PAGE_CHARS);
        Ok(text)
    }
}

trait TruncateChars {
    fn truncate_to_chars(&mut self, max: usize);
}

impl TruncateChars for String {
    fn truncate_to_chars(&mut self, max: usize) {
        if let Some((idx, _)) = self.char_indices().nth(max) {
            self.truncate(idx);
        }
    }
}

/// Drop script/style blocks and tags, collapsing runs of whitespace.
fn strip_html(html: &str) -> String {
    let without_scripts = remove_blocks(html, "<script", "</script>");
    let without_styles = remove_blocks(&without_scripts, "<style", "</style>");

    let mut text = String::with_capacity(without_styles.len() / 2);
    let mut in_tag = false;
    let mut last_was_space = true;
    for c in without_styles.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                if !last_was_space {
                    text.push(' ');
                    last_was_space = true;
                }
            }
            _ if in_tag => {}
            c if c.is_whitespace() => {
                if !last_was_space {
                    text.push(' ');
                    last_was_space = true;
                }
            }
            c => {
                text.push(c);
                last_was_space = false;
            }
        }
    }
    text.trim().to_string()
}

fn remove_blocks(input: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let lower = |s: &str| s.to_ascii_lowercase();
    loop {
        match lower(rest).find(open) {
            Some(start) => {
                out.push_str(&rest[..start]);
                match lower(&rest[start..]).find(close) {
                    Some(end) => rest = &rest[start + end + close.len()..],
                    None => return out,
                }
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_markup_and_scripts() {
        let html = r#"<html><head><style>body { color: red }</style>
            <script>alert("hi")</script></head>
            <body><h1>Febre</h1><p>Um sintoma <b>comum</b>.</p></body></html>"#;
        let text = strip_html(html);
        assert_eq!(text, "Febre Um sintoma comum .");
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn search_results_are_formatted_from_organic_entries() {
        let data = json!({
            "organic": [
                { "title": "Gripe", "link": "https://example.com/gripe", "snippet": "Sintomas da gripe" },
                { "title": "Resfriado", "link": "https://example.com/resfriado", "snippet": "Resfriado comum" }
            ]
        });
        let formatted = format_search_results(&data);
        assert!(formatted.contains("Gripe"));
        assert!(formatted.contains("https://example.com/resfriado"));
        assert!(formatted.contains("---"));
    }

    #[test]
    fn missing_organic_section_yields_empty() {
        assert!(format_search_results(&json!({})).is_empty());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut text = "àéíóú".repeat(10);
        text.truncate_to_chars(7);
        assert_eq!(text.chars().count(), 7);
    }
}
