use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builder_collects_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E2009)
        .with_message("`Int` does not conform to `Hashable`")
        .with_label(Span::new(4, 7), "required here")
        .with_secondary_label(Span::new(0, 3), "declared here")
        .with_note("conformances are looked up in the enclosing scope");

    assert!(!diag.is_internal());
    assert_eq!(diag.primary_span(), Some(Span::new(4, 7)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn primary_span_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E2009)
        .with_secondary_label(Span::new(0, 1), "context")
        .with_label(Span::new(5, 6), "here");
    assert_eq!(diag.primary_span(), Some(Span::new(5, 6)));
}

#[test]
fn display_renders_every_part() {
    let diag = Diagnostic::error(ErrorCode::E9002)
        .with_message("stale constraint")
        .with_label(Span::new(1, 2), "origin")
        .with_note("this is a bug in the compiler")
        .with_suggestion("please file an issue");

    assert_eq!(
        diag.to_string(),
        "error [E9002]: stale constraint\n  --> 1..2: origin\n  = note: this is a bug in the compiler\n  = help: please file an issue"
    );
    assert!(diag.is_internal());
}
