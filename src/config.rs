use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    // Rate limiting
    pub rate_apply_per_min: u32,
    pub rate_leave_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),

            rate_apply_per_min: env::var("RATE_APPLY_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_leave_per_min: env::var("RATE_LEAVE_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_default(),
        }
    }
}
