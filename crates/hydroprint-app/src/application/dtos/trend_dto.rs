use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageTrendPoint {
    pub date: String, // YYYY-MM-DD
    pub is_logged: bool,
    pub grand_total: Option<f64>,
    pub score: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageTrendDto {
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
    pub logged_days: u32,
    pub average_grand_total: Option<f64>,
    pub data_points: Vec<UsageTrendPoint>,
}
