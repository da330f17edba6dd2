//! Log configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use verifiable_log_memo::CachePolicy;

/// How a [`VerifiableLog`](crate::VerifiableLog) memoizes and bounds its
/// collaborator calls
///
/// Deserializable so it can be embedded in a host service's configuration:
///
/// ```
/// use std::time::Duration;
/// use verifiable_log::LogConfig;
/// use verifiable_log_memo::CachePolicy;
///
/// let config: LogConfig = serde_json::from_str(
///     r#"{ "memoization": "power-of-two", "boundary_timeout_ms": 250 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.memoization, Some(CachePolicy::PowerOfTwo));
/// assert_eq!(config.boundary_timeout, Some(Duration::from_millis(250)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// In-memory memoization policy; `None` disables memoization
    pub memoization: Option<CachePolicy>,
    /// Upper bound on every single leaf-store or memoization-store call
    ///
    /// `None` waits indefinitely.
    #[serde(rename = "boundary_timeout_ms", with = "duration_ms")]
    pub boundary_timeout: Option<Duration>,
}

impl LogConfig {
    /// Memoize every subtree hash in memory
    pub fn memoized() -> Self {
        Self::default().with_memoization(CachePolicy::All)
    }

    /// Memoize the subtrees `policy` admits
    pub fn with_memoization(mut self, policy: CachePolicy) -> Self {
        self.memoization = Some(policy);
        self
    }

    /// Disable memoization
    pub fn without_memoization(mut self) -> Self {
        self.memoization = None;
        self
    }

    /// Bound every leaf-store and memoization-store call by `timeout`
    pub fn with_boundary_timeout(mut self, timeout: Duration) -> Self {
        self.boundary_timeout = Some(timeout);
        self
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unmemoized_and_unbounded() {
        let config = LogConfig::default();
        assert_eq!(config.memoization, None);
        assert_eq!(config.boundary_timeout, None);
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::memoized()
            .with_memoization(CachePolicy::PowerOfTwoNoLeaves)
            .with_boundary_timeout(Duration::from_secs(2));
        assert_eq!(config.memoization, Some(CachePolicy::PowerOfTwoNoLeaves));
        assert_eq!(config.boundary_timeout, Some(Duration::from_secs(2)));

        assert_eq!(config.without_memoization().memoization, None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = LogConfig::memoized().with_boundary_timeout(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"memoization":"all","boundary_timeout_ms":1500}"#);
        assert_eq!(serde_json::from_str::<LogConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());
    }
}
