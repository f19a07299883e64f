use crate::{
    models::{Annotation, AnnotationLevel, AssertionResult, Report, TestResult},
    util::strip_workspace,
};

/// Title used when a test file failed before any of its tests ran.
pub const SUITE_ERROR_TITLE: &str = "Test Suite Error";

/// Derive one annotation per failing assertion, or one per failing file that has no
/// assertions, in report order.
///
/// Successful reports yield nothing.
pub fn derive_annotations(report: &Report, workspace: Option<&str>) -> Vec<Annotation> {
    if report.success {
        return vec![];
    }
    let mut annotations = vec![];
    for result in &report.test_results {
        if result.status.is_passed() {
            continue;
        }
        let path = strip_workspace(&result.file_path, workspace);
        if result.assertion_results.is_empty() {
            // usually a file that failed to load or parse
            annotations.push(suite_error(path, result));
            continue;
        }
        annotations.extend(
            result
                .assertion_results
                .iter()
                .filter(|a| !a.status.is_passed())
                .map(|a| assertion_failure(path, a)),
        );
    }
    tracing::debug!(
        "Derived {} annotations from {} test results",
        annotations.len(),
        report.test_results.len()
    );
    annotations
}

/// Annotated on the recorded line, except that a missing location or a recorded line 0 is
/// moved to line 1.
fn assertion_failure(path: &str, assertion: &AssertionResult) -> Annotation {
    // GitHub rejects line 0
    let line = assertion.location.map(|l| l.line).filter(|&l| l > 0).unwrap_or(1);
    Annotation {
        path: path.to_string(),
        start_line: line,
        end_line: line,
        annotation_level: AnnotationLevel::Failure,
        title: assertion.full_name.clone(),
        message: assertion.failure_messages.join("\n\n"),
    }
}

fn suite_error(path: &str, result: &TestResult) -> Annotation {
    Annotation {
        path: path.to_string(),
        start_line: 1,
        end_line: 1,
        annotation_level: AnnotationLevel::Failure,
        title: SUITE_ERROR_TITLE.to_string(),
        message: result.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, TestStatus};

    fn assertion(full_name: &str, status: TestStatus, line: Option<u32>) -> AssertionResult {
        AssertionResult {
            ancestor_titles: vec![],
            failure_messages: vec![format!("{full_name} failed")],
            full_name: full_name.to_string(),
            location: line.map(|line| Location { column: 1, line }),
            status,
            title: full_name.to_string(),
        }
    }

    fn test_result(name: &str, status: TestStatus, assertions: Vec<AssertionResult>) -> TestResult {
        TestResult {
            assertion_results: assertions,
            message: String::new(),
            file_path: name.to_string(),
            status,
            summary: String::new(),
        }
    }

    fn report(success: bool, test_results: Vec<TestResult>) -> Report {
        Report {
            num_failed_tests: 0,
            num_passed_tests: 0,
            num_total_tests: 0,
            num_failed_test_suites: 0,
            num_passed_test_suites: 0,
            num_total_test_suites: 0,
            success,
            test_results,
        }
    }

    #[test]
    fn test_successful_report_yields_nothing() {
        let report = report(true, vec![test_result(
            "/work/a.test.js",
            TestStatus::Failed,
            vec![assertion("a", TestStatus::Failed, Some(3))],
        )]);
        assert!(derive_annotations(&report, Some("/work/")).is_empty());
    }

    #[test]
    fn test_passed_files_are_skipped() {
        let report = report(false, vec![test_result(
            "/work/a.test.js",
            TestStatus::Passed,
            vec![assertion("a", TestStatus::Failed, Some(3))],
        )]);
        assert!(derive_annotations(&report, Some("/work/")).is_empty());
    }

    #[test]
    fn test_single_failing_assertion() {
        let report = report(false, vec![test_result(
            "/work/src/a.test.js",
            TestStatus::Failed,
            vec![
                assertion("a > passes", TestStatus::Passed, Some(4)),
                assertion("a > fails", TestStatus::Failed, Some(10)),
            ],
        )]);
        let annotations = derive_annotations(&report, Some("/work/"));
        assert_eq!(annotations, vec![Annotation {
            path: "src/a.test.js".to_string(),
            start_line: 10,
            end_line: 10,
            annotation_level: AnnotationLevel::Failure,
            title: "a > fails".to_string(),
            message: "a > fails failed".to_string(),
        }]);
    }

    #[test]
    fn test_failure_messages_are_joined() {
        let mut failing = assertion("a", TestStatus::Failed, Some(2));
        failing.failure_messages = vec!["expected 1".to_string(), "got 2".to_string()];
        let report =
            report(false, vec![test_result("/work/a.test.js", TestStatus::Failed, vec![failing])]);
        let annotations = derive_annotations(&report, Some("/work/"));
        assert_eq!(annotations[0].message, "expected 1\n\ngot 2");
    }

    #[test]
    fn test_suite_error_without_assertions() {
        let mut broken = test_result("/work/broken.test.js", TestStatus::Failed, vec![]);
        broken.message = "SyntaxError: Unexpected token".to_string();
        let empty = test_result("/work/empty.test.js", TestStatus::Failed, vec![]);
        let annotations = derive_annotations(&report(false, vec![broken, empty]), Some("/work"));
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].path, "broken.test.js");
        assert_eq!((annotations[0].start_line, annotations[0].end_line), (1, 1));
        assert_eq!(annotations[0].title, SUITE_ERROR_TITLE);
        assert_eq!(annotations[0].message, "SyntaxError: Unexpected token");
        assert_eq!(annotations[1].title, SUITE_ERROR_TITLE);
        assert_eq!(annotations[1].message, "");
    }

    #[test]
    fn test_non_passed_statuses_are_failures() {
        let report = report(false, vec![test_result(
            "/work/a.test.js",
            TestStatus::Other("pending".to_string()),
            vec![
                assertion("skipped", TestStatus::Other("pending".to_string()), Some(5)),
                assertion("todo", TestStatus::Other("todo".to_string()), None),
            ],
        )]);
        let annotations = derive_annotations(&report, None);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].path, "work/a.test.js");
        assert_eq!(annotations[1].start_line, 1);
    }

    #[test]
    fn test_missing_or_zero_line_moves_to_line_one() {
        let cases: &[(Option<u32>, u32)] = &[(None, 1), (Some(0), 1), (Some(1), 1), (Some(42), 42)];
        for &(line, expected) in cases {
            let report = report(false, vec![test_result("/work/a.test.js", TestStatus::Failed, vec![
                assertion("a", TestStatus::Failed, line),
            ])]);
            let annotations = derive_annotations(&report, Some("/work"));
            assert_eq!((annotations[0].start_line, annotations[0].end_line), (expected, expected));
        }
    }

    #[test]
    fn test_order_is_file_then_assertion() {
        let report = report(false, vec![
            test_result("/work/a.test.js", TestStatus::Failed, vec![
                assertion("a1", TestStatus::Failed, Some(1)),
                assertion("a2", TestStatus::Failed, Some(2)),
            ]),
            test_result("/work/b.test.js", TestStatus::Passed, vec![]),
            test_result("/work/c.test.js", TestStatus::Failed, vec![]),
            test_result("/work/d.test.js", TestStatus::Failed, vec![assertion(
                "d1",
                TestStatus::Failed,
                Some(7),
            )]),
        ]);
        let titles = derive_annotations(&report, Some("/work/"))
            .into_iter()
            .map(|a| format!("{}:{}", a.path, a.title))
            .collect::<Vec<_>>();
        assert_eq!(titles, vec![
            "a.test.js:a1",
            "a.test.js:a2",
            "c.test.js:Test Suite Error",
            "d.test.js:d1",
        ]);
    }
}
