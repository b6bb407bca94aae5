use kiln_ir::{FileId, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::{shadowed_import, unknown_identifier, ErrorCode};

#[test]
fn empty_sink_has_no_errors() {
    let sink = DiagnosticSink::new();
    assert!(sink.has_errors().is_none());
    assert!(sink.is_empty());
}

#[test]
fn warnings_do_not_count_as_errors() {
    let mut sink = DiagnosticSink::new();
    sink.push(shadowed_import(Span::new(1, 1, 4), "Foo", "core"));
    assert!(sink.has_errors().is_none());
    assert_eq!(sink.warning_count(), 1);
    assert_eq!(sink.error_count(), 0);
}

#[test]
fn errors_give_a_guarantee() {
    let mut sink = DiagnosticSink::new();
    sink.push(unknown_identifier(Span::new(1, 1, 2), "x"));
    assert!(sink.has_errors().is_some());
    assert_eq!(sink.error_count(), 1);
}

#[test]
fn sorted_orders_by_file_then_position() {
    let mut sink = DiagnosticSink::new();
    sink.push(unknown_identifier(Span::new(5, 1, 2), "c").in_file(FileId::new(1)));
    sink.push(unknown_identifier(Span::new(9, 3, 4), "b").in_file(FileId::new(0)));
    sink.push(unknown_identifier(Span::new(2, 7, 8), "a").in_file(FileId::new(0)));
    sink.push(crate::assembly_not_found("core"));

    let order: Vec<_> = sink.sorted().iter().map(|d| d.message.clone()).collect();
    assert_eq!(
        order,
        vec![
            "assembly `core` not found".to_string(),
            "cannot find `a` in this scope".to_string(),
            "cannot find `b` in this scope".to_string(),
            "cannot find `c` in this scope".to_string(),
        ]
    );
    // Report order is untouched.
    assert_eq!(sink.iter().next().map(|d| d.code), Some(ErrorCode::E2002));
}

#[test]
fn extend_counts_errors() {
    let mut sink = DiagnosticSink::new();
    sink.extend(vec![
        unknown_identifier(Span::new(1, 1, 2), "x"),
        shadowed_import(Span::new(2, 1, 2), "y", "core"),
    ]);
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.error_count(), 1);
    assert_eq!(sink.into_vec().len(), 2);
}
