use fmdesk_client::TaskService;
use fmdesk_config::FmdeskConfig;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TaskService,
    pub config: FmdeskConfig,
}

impl AppContext {
    pub fn init(config: FmdeskConfig) -> anyhow::Result<Self> {
        let service = TaskService::from_config(&config)?;
        tracing::debug!(
            base_url = service.client().base_url(),
            authenticated = config.api.is_configured(),
            demo_fallback = service.client().demo_fallback_enabled(),
            "API client ready"
        );
        Ok(Self { service, config })
    }

    /// Estimate used for progress on tasks without one.
    pub const fn default_estimate(&self) -> u32 {
        self.config.dashboard.default_estimate_minutes
    }
}
