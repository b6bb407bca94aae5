use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .in_file(FileId::new(0))
        .with_message("test error")
        .with_label(Span::new(1, 1, 5), "here")
        .with_note("some context");

    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(diag.message, "test error");
    assert!(diag.is_error());
    assert_eq!(diag.file, Some(FileId::new(0)));
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_type_mismatch_helper() {
    let diag = type_mismatch(Span::new(3, 10, 15), "Int", "String", "return value");

    assert_eq!(diag.code, ErrorCode::E2003);
    assert!(diag.message.contains("Int"));
    assert!(diag.message.contains("String"));
    assert_eq!(diag.primary_span(), Some(Span::new(3, 10, 15)));
}

#[test]
fn test_shadowed_import_is_warning() {
    let diag = shadowed_import(Span::new(1, 8, 11), "Foo", "core");
    assert_eq!(diag.severity, Severity::Warning);
    assert!(!diag.is_error());
    assert_eq!(diag.code, ErrorCode::W2006);
}

#[test]
fn test_secondary_label_in_same_file_omits_file() {
    let diag = duplicate_declaration(Span::new(4, 1, 4), "Foo")
        .in_file(FileId::new(2))
        .with_secondary_label_in(FileId::new(2), Span::new(1, 1, 4), "first declared here")
        .with_secondary_label_in(FileId::new(5), Span::new(9, 1, 4), "also here");

    assert_eq!(diag.labels.len(), 3);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.labels[1].file, None);
    assert_eq!(diag.labels[2].file, Some(FileId::new(5)));
}

#[test]
fn test_assembly_diagnostics_have_no_location() {
    let diag = assembly_not_found("core");
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.file, None);
    assert_eq!(diag.primary_span(), None);
    assert!(diag.message.contains("core"));
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E2004)
        .in_file(FileId::new(1))
        .with_message("cannot assign to `x`")
        .with_label(Span::new(2, 5, 6), "immutable")
        .with_note("declared with let");

    let output = diag.to_string();
    assert_eq!(
        output,
        "error [E2004]: cannot assign to `x`\n  --> file 1, 2:5..6: immutable\n  = note: declared with let"
    );
}

#[test]
fn test_arity_mismatch_pluralizes() {
    let one = arity_mismatch(Span::new(1, 1, 5), "f", 1, 2);
    assert!(one.message.contains("1 argument but"));
    let two = arity_mismatch(Span::new(1, 1, 5), "g", 2, 0);
    assert!(two.message.contains("2 arguments"));
    assert_eq!(two.code, ErrorCode::E2003);
}

#[test]
fn test_value_and_type_kind_errors() {
    let diag = not_a_value(Span::new(1, 1, 4), "type", "Foo");
    assert_eq!(diag.message, "expected a value, found type `Foo`");
    let diag = not_a_type(Span::new(1, 1, 4), "function", "run");
    assert_eq!(diag.message, "expected a type, found function `run`");
}
