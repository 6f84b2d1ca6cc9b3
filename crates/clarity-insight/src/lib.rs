//! Natural-language insights over stored datasets.
//!
//! A question is turned into a prompt, the model answers with a declarative
//! [`ChartQuery`] plus narrative, and the query is executed against the
//! dataset to produce chart data. Answered questions are kept per dataset in
//! a [`HistoryStore`].

mod client;
mod error;
mod history;
mod prompt;
mod query;
mod response;

pub use client::{
    ChatCompletionsClient, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, LlmClient,
    LlmConfig,
};
pub use error::{InsightError, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use prompt::{PROMPT_SAMPLE_ROWS, SYSTEM_PROMPT, build_prompt};
pub use query::{Aggregation, ChartPoint, ChartQuery, SortOrder};
pub use response::{ChartSpec, parse_chart_spec, request_insight, strip_code_fences};
