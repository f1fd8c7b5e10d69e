use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment tier a host is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Dev,
    Stage,
    Production,
    /// No host context, or a host no pattern matched
    Unknown,
}

impl Environment {
    pub const ALL: [Self; 5] = [
        Self::Local,
        Self::Dev,
        Self::Stage,
        Self::Production,
        Self::Unknown,
    ];

    /// Lowercase name used in configuration and display output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Stage => "stage",
            Self::Production => "production",
            Self::Unknown => "unknown",
        }
    }

    /// Resolve an environment from its lowercase name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Set of environments in which logging stays active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EnvironmentSet: u8 {
        const LOCAL      = 0b0000_0001;
        const DEV        = 0b0000_0010;
        const STAGE      = 0b0000_0100;
        const PRODUCTION = 0b0000_1000;
        const UNKNOWN    = 0b0001_0000;
        const DEFAULT    = Self::LOCAL.bits() | Self::DEV.bits() | Self::STAGE.bits();
    }
}

impl Default for EnvironmentSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl EnvironmentSet {
    /// Check whether logging is active in the given environment
    #[must_use]
    pub fn allows(self, environment: Environment) -> bool {
        self.contains(Self::from(environment))
    }

    /// Individual environments contained in the set, in tier order
    #[must_use]
    pub fn environments(self) -> Vec<Environment> {
        Environment::ALL
            .into_iter()
            .filter(|e| self.allows(*e))
            .collect()
    }
}

impl From<Environment> for EnvironmentSet {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Local => Self::LOCAL,
            Environment::Dev => Self::DEV,
            Environment::Stage => Self::STAGE,
            Environment::Production => Self::PRODUCTION,
            Environment::Unknown => Self::UNKNOWN,
        }
    }
}

impl FromIterator<Environment> for EnvironmentSet {
    fn from_iter<I: IntoIterator<Item = Environment>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, e| set | Self::from(e))
    }
}

// Custom serialization to store as a list of environment names
impl Serialize for EnvironmentSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.environments())
    }
}

impl<'de> Deserialize<'de> for EnvironmentSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let environments = Vec::<Environment>::deserialize(deserializer)?;
        Ok(environments.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_excludes_production_and_unknown() {
        let set = EnvironmentSet::default();
        assert!(set.allows(Environment::Local));
        assert!(set.allows(Environment::Dev));
        assert!(set.allows(Environment::Stage));
        assert!(!set.allows(Environment::Production));
        assert!(!set.allows(Environment::Unknown));
    }

    #[test]
    fn test_custom_set() {
        let set = EnvironmentSet::PRODUCTION | EnvironmentSet::UNKNOWN;
        assert!(set.allows(Environment::Production));
        assert!(set.allows(Environment::Unknown));
        assert!(!set.allows(Environment::Local));
    }

    #[test]
    fn test_from_iterator() {
        let set: EnvironmentSet = [Environment::Local, Environment::Production]
            .into_iter()
            .collect();
        assert!(set.allows(Environment::Local));
        assert!(set.allows(Environment::Production));
        assert!(!set.allows(Environment::Dev));
    }

    #[test]
    fn test_environments_in_tier_order() {
        let set = EnvironmentSet::STAGE | EnvironmentSet::LOCAL;
        assert_eq!(
            set.environments(),
            vec![Environment::Local, Environment::Stage]
        );
    }

    #[test]
    fn test_name_round_trip() {
        for environment in Environment::ALL {
            assert_eq!(
                Environment::from_name(environment.as_str()),
                Some(environment)
            );
        }
        assert_eq!(Environment::from_name("qa"), None);
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Local.to_string(), "local");
    }

    #[test]
    fn test_serialization_as_name_list() {
        let set = EnvironmentSet::LOCAL | EnvironmentSet::DEV;
        let serialized = serde_json::to_string(&set).expect("serialization should succeed");
        assert_eq!(serialized, r#"["local","dev"]"#);
        let deserialized: EnvironmentSet =
            serde_json::from_str(&serialized).expect("deserialization should succeed");
        assert_eq!(set, deserialized);
    }

    #[test]
    fn test_deserialization_rejects_unknown_name() {
        let result = serde_json::from_str::<EnvironmentSet>(r#"["local","qa"]"#);
        assert!(result.is_err());
    }
}
