use anyhow::Context;
use fmdesk_config::FmdeskConfig;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<FmdeskConfig> {
    if let Err(error) = dotenvy::dotenv()
        && !error.not_found()
    {
        return Err(error).context("failed to load .env file");
    }

    FmdeskConfig::load().context("failed to load fmdesk configuration")
}
