use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Scopes the configured level to this service and its HTTP layer; sqlx
/// statement logging stays at warn so listings don't flood the output.
fn default_directives(level: &str) -> String {
    format!("blogicum_server={level},tower_http={level},sqlx=warn")
}

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::default_directives;

    #[test]
    fn default_directives_parse_as_filter() {
        for level in ["trace", "debug", "info", "warn"] {
            assert!(EnvFilter::try_new(default_directives(level)).is_ok());
        }
    }

    #[test]
    fn sqlx_noise_is_capped() {
        assert!(default_directives("debug").contains("sqlx=warn"));
    }
}
