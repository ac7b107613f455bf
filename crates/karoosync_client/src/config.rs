pub const DEFAULT_INTERVALS_BASE_URL: &str = "https://intervals.icu";
pub const DEFAULT_HAMMERHEAD_BASE_URL: &str = "https://dashboard.hammerhead.io";

/// Base URLs of the two remote services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub intervals_base_url: String,
    pub hammerhead_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            intervals_base_url: DEFAULT_INTERVALS_BASE_URL.into(),
            hammerhead_base_url: DEFAULT_HAMMERHEAD_BASE_URL.into(),
        }
    }
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads overrides using the provided function, so
    /// tests never have to mutate the process environment.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let pick = |v: Option<String>, default: &str| {
            v.filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            intervals_base_url: pick(
                get("KAROOSYNC_INTERVALS_BASE_URL"),
                DEFAULT_INTERVALS_BASE_URL,
            ),
            hammerhead_base_url: pick(
                get("KAROOSYNC_HAMMERHEAD_BASE_URL"),
                DEFAULT_HAMMERHEAD_BASE_URL,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_to_production() {
        let e = Endpoints::from_env_with(|_| None);
        assert_eq!(e, Endpoints::default());
    }

    #[test]
    fn from_env_reads_overrides() {
        let get = |k: &str| match k {
            "KAROOSYNC_INTERVALS_BASE_URL" => Some("http://localhost:1".into()),
            "KAROOSYNC_HAMMERHEAD_BASE_URL" => Some("   ".into()),
            _ => None,
        };
        let e = Endpoints::from_env_with(get);
        assert_eq!(e.intervals_base_url, "http://localhost:1");
        assert_eq!(e.hammerhead_base_url, DEFAULT_HAMMERHEAD_BASE_URL);
    }
}
