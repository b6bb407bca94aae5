use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E2003.to_string(), "E2003");
    assert_eq!(ErrorCode::W2006.to_string(), "W2006");
}

#[test]
fn test_all_codes_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in ErrorCode::ALL {
        assert!(seen.insert(code.as_str()), "duplicate code {code}");
    }
}

#[test]
fn test_kind_names() {
    assert_eq!(ErrorCode::E2001.kind(), "DuplicateDeclaration");
    assert_eq!(ErrorCode::E2004.kind(), "ImmutabilityViolation");
}

#[test]
fn test_warning_classification() {
    let warnings: Vec<_> = ErrorCode::ALL.iter().filter(|c| c.is_warning()).collect();
    assert_eq!(warnings, vec![&ErrorCode::W2006]);
}
