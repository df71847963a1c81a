//! Prompts sent to Gemini.

use std::fmt::Write as _;

/// System instruction for search turns.
///
/// Fixes the persona, the target stores, and the JSON shape the parser
/// expects at the end of every answer.
pub const SEARCH_SYSTEM_INSTRUCTION: &str = r#"You are LaptOptimus, an expert agent that finds laptops in Romanian and Ukrainian online stores.
Your goal is to find specific laptop models, compare prices, or suggest alternatives for the user's request. Answer in Russian.

Target markets:
- Romanian sites (for example eMAG.ro, Altex.ro, pcgarage.ro).
- Ukrainian sites (for example Rozetka, Citrus, Moyo).

Rules:
1. Look for real, current information using Google Search.
2. Extract technical specifications and prices.
3. At the end of the answer you MUST return a JSON array of the products found, wrapped in a ```json code block.
4. Each product in the JSON must have this shape:
   {
     "modelName": "string",
     "specs": { "cpu": "string", "ram": "string", "storage": "string", "gpu": "string", "screen": "string" },
     "priceOriginal": number,
     "currency": "RON" or "UAH",
     "storeName": "string",
     "country": "RO" or "UA",
     "link": "string",
     "notes": "string"
   }
5. All prose before the JSON must be in Russian."#;

/// Runtime figures summarized by [`crate::GeminiSearchClient::system_insights`].
///
/// Values are free-form display strings such as `"99.98%"` or `"120ms"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemStats {
    /// Service uptime.
    pub uptime: String,
    /// API quota usage.
    pub quota: String,
    /// Average latency.
    pub latency: String,
    /// Database health.
    pub db_health: String,
}

impl SystemStats {
    /// Creates a stats record.
    pub fn new(
        uptime: impl Into<String>,
        quota: impl Into<String>,
        latency: impl Into<String>,
        db_health: impl Into<String>,
    ) -> Self {
        Self {
            uptime: uptime.into(),
            quota: quota.into(),
            latency: latency.into(),
            db_health: db_health.into(),
        }
    }
}

/// Builds the status-report prompt for the given stats.
pub fn insights_prompt(stats: &SystemStats) -> String {
    let mut prompt = String::from(
        "Analyze the state of the price monitoring system and give a short (2-3 sentence) report.\n",
    );
    let _ = writeln!(
        prompt,
        "Data: Uptime: {}, API Quota: {}, Latency: {}, DB Health: {}.",
        stats.uptime, stats.quota, stats.latency, stats.db_health
    );
    prompt.push_str(
        "Give one optimization tip or praise the stability. Speak as the LaptOptimus project manager agent.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_markets_and_shape() {
        for needle in ["eMAG.ro", "Rozetka", "modelName", "priceOriginal", "```json"] {
            assert!(SEARCH_SYSTEM_INSTRUCTION.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_insights_prompt() {
        let stats = SystemStats::new("99.98%", "42%", "120ms", "OK");
        let prompt = insights_prompt(&stats);
        assert!(prompt.contains("Uptime: 99.98%"));
        assert!(prompt.contains("API Quota: 42%"));
        assert!(prompt.contains("Latency: 120ms"));
        assert!(prompt.contains("DB Health: OK"));
    }
}
