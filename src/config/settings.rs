pub struct ClientSettings {
    pub api_base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub default_per_page: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.start.gg/gql/alpha",
            user_agent: "StartggCalendar/0.1",
            timeout_secs: 30,
            rate_limit_ms: 100, // 10 req/sec
            default_per_page: 100,
        }
    }
}

pub struct AppConfig {
    pub client: ClientSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            client: ClientSettings::default(),
        }
    }
}

// Passed explicitly into the client and services (Dependency Injection)
// rather than read from globals.
