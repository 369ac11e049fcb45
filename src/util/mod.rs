use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ffscripts=debug"
    } else {
        "ffscripts=info"
    }
}

/// Takes the `RUST_LOG` filter when it parses, otherwise the built-in default
/// along with the reason it was rejected.
fn choose_filter<E>(from_env: Result<EnvFilter, E>, verbose: bool) -> (EnvFilter, Option<E>) {
    match from_env {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(default_directive(verbose)), Some(err)),
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`.
pub fn init_logging(verbose: bool) {
    let (filter, rejected) = choose_filter(EnvFilter::try_from_default_env(), verbose);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    // An unset variable also lands here; only complain about a bad one.
    if let Some(err) = rejected {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            tracing::warn!("ignoring {}: {err}", EnvFilter::DEFAULT_ENV);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_is_kept_when_valid() {
        let (filter, rejected) = choose_filter::<&str>(Ok(EnvFilter::new("warn")), true);
        assert_eq!(filter.to_string(), "warn");
        assert!(rejected.is_none());
    }

    #[test]
    fn rejected_env_filter_falls_back() {
        let (filter, rejected) = choose_filter(Err("bad directive"), false);
        assert_eq!(filter.to_string(), "ffscripts=info");
        assert_eq!(rejected, Some("bad directive"));

        let (filter, _) = choose_filter(Err(()), true);
        assert_eq!(filter.to_string(), "ffscripts=debug");
    }
}
