//! Prompt construction for chart insights.

use serde_json::{Map, Value};

/// System message sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a JSON-only assistant. Return ONLY valid JSON without any \
markdown code blocks, explanations, or formatting. Do not use ``` or any other markdown.";

/// Number of sample rows shown to the model.
pub const PROMPT_SAMPLE_ROWS: usize = 3;

const RESPONSE_SHAPE: &str = r##"{
  "charts": [
    {
      "query": {
        "group_by": "column holding the chart categories",
        "value_column": "numeric column to aggregate (omit for count)",
        "aggregation": "sum|mean|count|min|max",
        "sort": "asc|desc (optional, orders by value)",
        "limit": 10
      },
      "chart_config": {
        "type": "BarChart|LineChart|PieChart",
        "dataKey": "value",
        "xAxisKey": "category",
        "yAxisKey": "value",
        "colors": ["#0088FE", "#00C49F", "#FFBB28", "#FF8042"],
        "title": "Chart Title"
      },
      "explanation": "Detailed business analysis with specific findings and implications",
      "insights": ["Actionable recommendation with specific numbers and next steps"]
    }
  ]
}"##;

const QUERY_RULES: &str = "QUERY INSTRUCTIONS:
- group_by and value_column must be exact names from COLUMNS
- value_column must be numeric unless aggregation is count
- The chart data is produced as rows of {\"category\": ..., \"value\": ...}

CHART CONFIG INSTRUCTIONS:
- BarChart for comparisons, LineChart for trends, PieChart for proportions
- dataKey is \"value\" and xAxisKey is \"category\"

EXPLANATION: start with the key finding, include specific numbers and what they mean for the business.
INSIGHTS: each one a concrete action with its rationale, 30-50 words.

Output ONLY the raw JSON object starting with { and ending with }. No markdown.";

/// Builds the user prompt from the dataset's columns, a few sample rows and
/// the question.
pub fn build_prompt(columns: &[String], sample_rows: &[Map<String, Value>], question: &str) -> String {
    let columns_json = serde_json::to_string(columns).unwrap_or_else(|_| "[]".to_string());
    let rows_json = serde_json::to_string(sample_rows).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are an expert business data analyst. Analyze this dataset and describe one chart that answers the question.\n\n\
         COLUMNS: {columns_json}\n\
         SAMPLE DATA: {rows_json}\n\
         USER QUESTION: {question}\n\n\
         Return STRICTLY VALID JSON in this format:\n\n\
         {RESPONSE_SHAPE}\n\n\
         {QUERY_RULES}\n"
    )
}
