//! Generator settings and test-engine profiles
//!
//! A [`Profile`] is chosen once at start-up, usually from the `CI`
//! environment variable, and turned into an explicit [`Settings`] value that
//! is handed to the sampler and the proptest runner.

use crate::error::Result;
use crate::fields::MAX_FIELDS;
use crate::primitives::PrimitiveSet;
use proptest::test_runner::Config as ProptestConfig;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;
use std::time::Duration;

/// Environment variable whose presence selects [`Profile::Ci`]
pub const CI_ENV_VAR: &str = "CI";

/// Test-engine profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Local runs: per-example deadline and the too-slow diagnostic are on
    #[default]
    Default,
    /// Continuous integration: no deadline, too-slow diagnostic suppressed
    Ci,
}

impl Profile {
    /// Profile for the value of the `CI` variable; any value selects `Ci`
    #[must_use]
    pub const fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(_) => Self::Ci,
            None => Self::Default,
        }
    }

    /// Read the profile from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        let value = std::env::var_os(CI_ENV_VAR);
        Self::from_env_value(value.as_deref().map(|v| v.to_str().unwrap_or_default()))
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Ci => write!(f, "ci"),
        }
    }
}

/// Ceiling for `max_depth`; deeper nesting exhausts the stack
pub const MAX_DEPTH: u32 = 16;

/// Deadline applied to each generated example under the default profile
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(200);

/// Generator and test-engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Profile these settings were derived from
    pub profile: Profile,
    /// Number of test cases per property
    pub cases: u32,
    /// Per-example time ceiling in milliseconds, `None` to disable
    pub deadline_ms: Option<u64>,
    /// Suppress the "generation too slow" diagnostic
    pub suppress_too_slow: bool,
    /// Maximum nesting depth for both drivers (capped at [`MAX_DEPTH`])
    pub max_depth: u32,
    /// Maximum number of simple fields per record (capped at 10)
    pub max_fields: usize,
    /// Primitive kinds available to collection strategies
    pub primitives: PrimitiveSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_profile(Profile::Default)
    }
}

impl Settings {
    /// Settings for a profile
    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        let (deadline_ms, suppress_too_slow) = match profile {
            Profile::Default => (Some(duration_ms(DEFAULT_DEADLINE)), false),
            Profile::Ci => (None, true),
        };
        Self {
            profile,
            cases: 256,
            deadline_ms,
            suppress_too_slow,
            max_depth: 4,
            max_fields: MAX_FIELDS,
            primitives: PrimitiveSet::Full,
        }
    }

    /// Settings for the profile selected by the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::for_profile(Profile::from_env())
    }

    /// Parse settings from YAML.
    ///
    /// Keys that are absent take the values of the named `profile` (or the
    /// default profile), so `profile: ci` alone yields CI settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: Option<Mapping> = serde_yaml::from_str(yaml)?;
        let overrides = overrides.unwrap_or_default();
        let profile: Profile = overrides
            .get("profile")
            .cloned()
            .map(serde_yaml::from_value)
            .transpose()?
            .unwrap_or_default();

        let mut merged = serde_yaml::to_value(Self::for_profile(profile))?;
        if let YamlValue::Mapping(base) = &mut merged {
            base.extend(overrides);
        }
        let settings: Self = serde_yaml::from_value(merged)?;
        Ok(settings.normalized())
    }

    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Set the number of cases
    #[must_use]
    pub const fn with_cases(mut self, cases: u32) -> Self {
        self.cases = cases;
        self
    }

    /// Set the per-example deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline_ms = deadline.map(duration_ms);
        self
    }

    /// Set the maximum nesting depth (capped at [`MAX_DEPTH`])
    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.min(MAX_DEPTH);
        self
    }

    /// Set the maximum number of simple fields (capped at 10)
    #[must_use]
    pub fn with_max_fields(mut self, fields: usize) -> Self {
        self.max_fields = fields.min(MAX_FIELDS);
        self
    }

    /// Set the primitive kind set
    #[must_use]
    pub const fn with_primitives(mut self, primitives: PrimitiveSet) -> Self {
        self.primitives = primitives;
        self
    }

    /// Per-example deadline
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Returns true if an example that took `elapsed` should be reported as
    /// too slow
    #[must_use]
    pub fn is_too_slow(&self, elapsed: Duration) -> bool {
        !self.suppress_too_slow && self.deadline().is_some_and(|d| elapsed > d)
    }

    /// Runner configuration for the test engine
    #[must_use]
    pub fn proptest_config(&self) -> ProptestConfig {
        let mut config = ProptestConfig::with_cases(self.cases);
        if self.suppress_too_slow {
            // Slow generators reject and regenerate more often; give them room.
            config.max_local_rejects *= 4;
            config.max_global_rejects *= 4;
            config.max_flat_map_regens *= 4;
        }
        config
    }

    fn normalized(mut self) -> Self {
        self.max_fields = self.max_fields.min(MAX_FIELDS);
        self.max_depth = self.max_depth.min(MAX_DEPTH);
        self
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_env_value() {
        assert_eq!(Profile::from_env_value(None), Profile::Default);
        assert_eq!(Profile::from_env_value(Some("true")), Profile::Ci);
        assert_eq!(Profile::from_env_value(Some("")), Profile::Ci);
    }

    #[test]
    fn test_default_profile_has_deadline() {
        let settings = Settings::for_profile(Profile::Default);
        assert_eq!(settings.deadline(), Some(DEFAULT_DEADLINE));
        assert!(!settings.suppress_too_slow);
        assert!(settings.is_too_slow(Duration::from_secs(1)));
        assert!(!settings.is_too_slow(Duration::from_millis(10)));
    }

    #[test]
    fn test_ci_profile_disables_deadline() {
        let settings = Settings::for_profile(Profile::Ci);
        assert!(settings.deadline().is_none());
        assert!(settings.suppress_too_slow);
        assert!(!settings.is_too_slow(Duration::from_secs(3600)));
    }

    #[test]
    fn test_proptest_config() {
        let default = Settings::default().with_cases(17).proptest_config();
        assert_eq!(default.cases, 17);
        let ci = Settings::for_profile(Profile::Ci).proptest_config();
        assert!(ci.max_global_rejects > default.max_global_rejects);
    }

    #[test]
    fn test_builders() {
        let settings = Settings::default()
            .with_max_depth(2)
            .with_max_fields(50)
            .with_primitives(PrimitiveSet::TextAndBytes)
            .with_deadline(None);
        assert_eq!(settings.max_depth, 2);
        assert_eq!(settings.max_fields, MAX_FIELDS);
        assert_eq!(settings.primitives, PrimitiveSet::TextAndBytes);
        assert!(settings.deadline().is_none());
    }

    #[test]
    fn test_yaml_partial_and_clamped() {
        let settings = Settings::from_yaml_str("profile: ci\nmax_fields: 99\ncases: 8\n").unwrap();
        assert_eq!(settings.profile, Profile::Ci);
        assert_eq!(settings.cases, 8);
        assert_eq!(settings.max_fields, MAX_FIELDS);
        assert_eq!(settings.max_depth, Settings::default().max_depth);
        assert!(settings.deadline().is_none());
        assert!(settings.suppress_too_slow);
    }

    #[test]
    fn test_max_depth_capped() {
        assert_eq!(Settings::default().with_max_depth(3000).max_depth, MAX_DEPTH);
        let settings = Settings::from_yaml_str("max_depth: 999\n").unwrap();
        assert_eq!(settings.max_depth, MAX_DEPTH);
    }

    #[test]
    fn test_yaml_empty_document() {
        assert_eq!(Settings::from_yaml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_yaml_roundtrip_and_file() {
        let settings = Settings::for_profile(Profile::Ci).with_max_depth(3);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recsynth.yaml");
        std::fs::write(&path, settings.to_yaml().unwrap()).unwrap();
        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_yaml_errors() {
        assert!(Settings::from_yaml_str("cases: [not a number").is_err());
        assert!(Settings::from_file(Path::new("/nonexistent/recsynth.yaml")).is_err());
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(Profile::Default.to_string(), "default");
        assert_eq!(Profile::Ci.to_string(), "ci");
    }
}
