use fmdesk_config::{ENV_PREFIX, FmdeskConfig};

/// Env vars under the prefix that are not config keys.
const NON_CONFIG_KEYS: &[&str] = &["FMDESK_LOG"];

/// Emit warnings for likely mistyped env var keys and anonymous API access.
pub fn warn_unconfigured(config: &FmdeskConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FmdeskConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env_keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with(ENV_PREFIX) && !NON_CONFIG_KEYS.contains(&key.as_str()))
        .collect::<Vec<_>>();
    env_keys.sort();

    let mut warnings = env_keys
        .iter()
        .filter(|key| !key[ENV_PREFIX.len()..].contains("__"))
        .map(|key| {
            format!(
                "{key} is ignored: separate section and field with a double underscore (example: FMDESK_API__TOKEN)."
            )
        })
        .collect::<Vec<_>>();

    if !config.api.is_configured() {
        warnings.push(format!(
            "No API token configured; requests to {} will be anonymous. Set FMDESK_API__TOKEN or [api] token.",
            config.api.trimmed_base_url()
        ));
    }

    warnings
}
