//! Runtime context that test files execute in.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Simulated runtime for test execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TestEnvironment {
    /// Plain server-side runtime.
    #[default]
    Node,
    /// Browser-like DOM emulation.
    Jsdom,
}

impl TestEnvironment {
    /// Every accepted environment, in the order they are listed to users.
    pub const ALL: [Self; 2] = [Self::Node, Self::Jsdom];

    /// Returns the configuration spelling of this environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Jsdom => "jsdom",
        }
    }
}

impl fmt::Display for TestEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an environment name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test environment '{0}'; expected one of: node, jsdom")]
pub struct UnknownEnvironment(pub String);

impl FromStr for TestEnvironment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| UnknownEnvironment(s.to_owned()))
    }
}

impl Serialize for TestEnvironment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
