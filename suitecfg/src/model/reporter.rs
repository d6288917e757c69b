//! Coverage report formats and the artifacts they produce.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Where a coverage reporter writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    /// A file or directory entry relative to the coverage directory.
    Artifact(&'static str),
    /// The console only.
    Console,
    /// Nothing is written.
    Nothing,
}

macro_rules! reporters {
    ($($variant:ident => $name:literal, $target:expr;)+) => {
        /// Coverage report format, named as the Istanbul reporters are.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CoverageReporter {
            $(
                #[doc = concat!("The `", $name, "` reporter.")]
                $variant,
            )+
        }

        impl CoverageReporter {
            /// Every recognised reporter.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the configuration spelling of this reporter.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Returns where this reporter writes its output.
            #[must_use]
            pub const fn target(self) -> ReportTarget {
                match self {
                    $(Self::$variant => $target,)+
                }
            }
        }
    };
}

reporters! {
    Clover => "clover", ReportTarget::Artifact("clover.xml");
    Cobertura => "cobertura", ReportTarget::Artifact("cobertura-coverage.xml");
    Html => "html", ReportTarget::Artifact("index.html");
    HtmlSpa => "html-spa", ReportTarget::Artifact("index.html");
    Json => "json", ReportTarget::Artifact("coverage-final.json");
    JsonSummary => "json-summary", ReportTarget::Artifact("coverage-summary.json");
    Lcov => "lcov", ReportTarget::Artifact("lcov-report/index.html");
    Lcovonly => "lcovonly", ReportTarget::Artifact("lcov.info");
    Silent => "none", ReportTarget::Nothing;
    Teamcity => "teamcity", ReportTarget::Console;
    Text => "text", ReportTarget::Console;
    TextLcov => "text-lcov", ReportTarget::Console;
    TextSummary => "text-summary", ReportTarget::Console;
}

impl CoverageReporter {
    /// Extra artifacts written alongside [`Self::target`].
    ///
    /// `lcov` emits both the HTML report and the raw trace file.
    #[must_use]
    pub const fn companion_artifacts(self) -> &'static [&'static str] {
        match self {
            Self::Lcov => &["lcov.info"],
            _ => &[],
        }
    }
}

impl fmt::Display for CoverageReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a reporter name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coverage reporter '{0}'")]
pub struct UnknownReporter(pub String);

impl FromStr for CoverageReporter {
    type Err = UnknownReporter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|reporter| reporter.as_str() == s)
            .ok_or_else(|| UnknownReporter(s.to_owned()))
    }
}

impl Serialize for CoverageReporter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
