use rand::seq::SliceRandom;

/// Common desktop user agents
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Fingerprint configuration applied at browser launch
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub user_agent: String,
}

impl FingerprintConfig {
    /// Pick a random desktop user agent
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();
        let user_agent = USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        Self {
            user_agent: user_agent.to_string(),
        }
    }

    /// Chromium command-line flag carrying the user agent
    pub fn user_agent_arg(&self) -> String {
        format!("--user-agent={}", self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomized_fingerprint() {
        let config = FingerprintConfig::randomized();
        assert!(USER_AGENTS.contains(&config.user_agent.as_str()));
        assert!(config.user_agent_arg().starts_with("--user-agent=Mozilla/5.0"));
    }

    #[test]
    fn test_fingerprint_variation() {
        // Probabilistic, but 20 draws from 3 agents all matching is ~1e-9
        let configs: Vec<_> = (0..20).map(|_| FingerprintConfig::randomized()).collect();

        let first_ua = &configs[0].user_agent;
        let all_same = configs.iter().all(|c| &c.user_agent == first_ua);
        assert!(!all_same, "Expected variation in user agents");
    }
}
