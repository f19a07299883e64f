use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Outcome of a test file or a single assertion.
///
/// Only [`TestStatus::Passed`] counts as passing. Statuses other than `passed` and `failed`
/// (`pending`, `todo`, ...) are kept verbatim and treated as failing.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    Passed,
    #[default]
    Failed,
    Other(String),
}

impl TestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }

    #[inline]
    pub fn is_passed(&self) -> bool { matches!(self, Self::Passed) }
}

impl From<String> for TestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<TestStatus> for String {
    fn from(value: TestStatus) -> Self {
        match value {
            TestStatus::Other(s) => s,
            status => status.as_str().to_string(),
        }
    }
}

impl FromStr for TestStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self::from(s.to_string())) }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A decoded Jest `--json` report.
///
/// Field names follow Jest's camelCase output. The PascalCase spellings are accepted too.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(alias = "NumFailedTests")]
    pub num_failed_tests: u64,
    #[serde(alias = "NumPassedTests")]
    pub num_passed_tests: u64,
    #[serde(alias = "NumTotalTests")]
    pub num_total_tests: u64,
    #[serde(alias = "NumFailedTestSuites")]
    pub num_failed_test_suites: u64,
    #[serde(alias = "NumPassedTestSuites")]
    pub num_passed_test_suites: u64,
    #[serde(alias = "NumTotalTestSuites")]
    pub num_total_test_suites: u64,
    #[serde(alias = "Success")]
    pub success: bool,
    #[serde(alias = "TestResults", default)]
    pub test_results: Vec<TestResult>,
}

impl Report {
    /// Decode a report. Decoding is all-or-nothing.
    pub fn parse(data: &[u8]) -> Result<Self, serde_json::Error> { serde_json::from_slice(data) }
}

/// Results for one test file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(alias = "AssertionResults", default)]
    pub assertion_results: Vec<AssertionResult>,
    /// Suite-level failure message, set when the file failed to run at all.
    #[serde(alias = "Message", default)]
    pub message: String,
    #[serde(rename = "name", alias = "Name")]
    pub file_path: String,
    #[serde(alias = "Status", default)]
    pub status: TestStatus,
    #[serde(alias = "Summary", default)]
    pub summary: String,
}

/// A single test case.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResult {
    #[serde(alias = "AncestorTitles", default)]
    pub ancestor_titles: Vec<String>,
    #[serde(alias = "FailureMessages", default)]
    pub failure_messages: Vec<String>,
    #[serde(alias = "FullName")]
    pub full_name: String,
    /// Absent unless Jest ran with `testLocationInResults`.
    #[serde(alias = "Location", default)]
    pub location: Option<Location>,
    #[serde(alias = "Status")]
    pub status: TestStatus,
    #[serde(alias = "Title", default)]
    pub title: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(alias = "Column", default)]
    pub column: u32,
    #[serde(alias = "Line", default)]
    pub line: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Notice,
    Warning,
    #[default]
    Failure,
}

/// A check-run annotation, serialized in the shape the checks API expects.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    pub title: String,
    pub message: String,
}
