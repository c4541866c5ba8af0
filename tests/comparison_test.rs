mod common;

use common::{fixed_time, rich_document, PAGE_URL};
use llmo_audit::{audit, AuditComparison, AuditDocument};

#[test]
fn fixing_a_page_resolves_issues_and_raises_scores() {
    let before = audit(&AuditDocument::new("<p>coming soon</p>", PAGE_URL), fixed_time());
    let after = audit(&rich_document(), fixed_time());

    let diff = AuditComparison::between(&before, &after);

    assert!(diff.overall.improved());
    assert_eq!(diff.overall.current, after.overall_score);
    assert_eq!(diff.schema.previous, 0);
    assert_eq!(diff.schema.percent_change, None);
    assert_eq!(i16::from(diff.meta.current) - i16::from(diff.meta.previous), diff.meta.delta);

    assert!(diff.resolved_issues.iter().any(|i| i == "Missing page title"));
    assert!(diff.resolved_issues.iter().any(|i| i == "Missing H1 heading"));
    assert!(diff.resolved_issues.iter().any(|i| i == "No valid JSON-LD structured data found"));
    for issue in &diff.new_issues {
        assert!(!before.recommendations.iter().any(|r| &r.issue == issue));
    }
}

#[test]
fn regression_is_reported_as_new_issues() {
    let good = audit(&rich_document(), fixed_time());
    let broken = audit(
        &AuditDocument::new(
            r#"<html><head><title>Acme</title></head><body><p>Gone.</p></body></html>"#,
            PAGE_URL,
        ),
        fixed_time(),
    );

    let diff = AuditComparison::between(&good, &broken);

    assert!(diff.overall.delta < 0);
    assert!(diff.overall.percent_change.is_some_and(|p| p < 0.0));
    assert!(diff.new_issues.iter().any(|i| i == "Missing H1 heading"));
    assert!(diff.new_issues.iter().any(|i| i == "Missing meta description"));
}

#[test]
fn comparing_an_audit_with_itself_is_neutral() {
    let result = audit(&rich_document(), fixed_time());
    let diff = AuditComparison::between(&result, &result);

    for change in [diff.overall, diff.schema, diff.meta, diff.content, diff.technical] {
        assert_eq!(change.delta, 0);
        assert!(!change.improved());
    }
    assert!(diff.new_issues.is_empty());
    assert!(diff.resolved_issues.is_empty());
}
