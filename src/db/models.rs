use serde::Serialize;
use sqlx::FromRow;

// Database entity models
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct InsightRecord {
    pub id: i64,
    pub file_source: String,
    pub modifier_type: Option<String>,
    pub modifier: Option<String>,
    pub suggestion: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub keyword: Option<String>,
    pub search_volume: Option<i64>,
    pub cost_per_click: Option<f64>,
}

/// Row of `COUNT(*) ... GROUP BY file_source`
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct FileSourceCount {
    pub file_source: String,
    pub count: i64,
}
