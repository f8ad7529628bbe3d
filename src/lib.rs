pub mod app;
pub mod db;
pub mod entity;
pub mod environment;
pub mod llm;
pub mod logging;
pub mod prompts;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
pub const TARGET_DB: &str = "db_query";
