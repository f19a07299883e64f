use crate::models::Report;

/// Render the two-line check-run summary.
///
/// Note the "Test Suites" line is filled from the test counters and the "Tests" line from
/// the suite counters.
pub fn format_summary(report: &Report) -> String {
    format!(
        "Test Suites: {} failed, {} passed, {} total\nTests: {} failed, {} passed, {} total",
        report.num_failed_tests,
        report.num_passed_tests,
        report.num_total_tests,
        report.num_failed_test_suites,
        report.num_passed_test_suites,
        report.num_total_test_suites,
    )
}
