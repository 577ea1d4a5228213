use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded AI-agent call and its token counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub id: u64,
    pub ai_agent_name: String,
    pub project: u64,
    pub query: u64,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub model_role: String,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub precached_prompt_tokens: u64,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    pub datetime: DateTime<Utc>,
}

/// Per-agent or per-model aggregate inside [`TokenUsageStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsageBucket {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub count: u64,
}

/// Response of `GET /token-usage/statistics/`.
///
/// Sums are `null` on the server when nothing matched; they read as zero here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsageStats {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_tokens: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_requests: u64,
    #[serde(default)]
    pub by_agent: BTreeMap<String, TokenUsageBucket>,
    #[serde(default)]
    pub by_model: BTreeMap<String, TokenUsageBucket>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}
