#![expect(clippy::unwrap_used, reason = "tests unwrap known-good insertions")]

use kiln_ir::{Span, StringInterner};

use super::*;
use crate::{Origin, Symbol, SymbolData, TypeData, TypeKind, ValueData};

#[test]
fn base_is_global() {
    let interner = StringInterner::new();
    let table = SymbolTable::new(&interner);
    let scopes = ScopeStack::new(&table);
    assert_eq!(scopes.current(), table.global());
    assert_eq!(scopes.depth(), 0);
}

#[test]
fn exit_at_base_is_refused() {
    let interner = StringInterner::new();
    let table = SymbolTable::new(&interner);
    let mut scopes = ScopeStack::new(&table);
    assert_eq!(scopes.exit(), Err(ResolveError::ScopeUnderflow));
    assert_eq!(scopes.current(), table.global());
}

#[test]
fn enter_exit_and_lookup() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let ty = table
        .declare(
            global,
            Symbol::new(
                interner.intern("Point"),
                Origin::Implicit,
                Span::DUMMY,
                SymbolData::Type(TypeData {
                    kind: TypeKind::Struct,
                    bases: Vec::new(),
                }),
            ),
        )
        .unwrap();
    let x = table
        .declare(
            ty,
            Symbol::new(
                interner.intern("x"),
                Origin::Implicit,
                Span::DUMMY,
                SymbolData::Property(ValueData::default()),
            ),
        )
        .unwrap();

    let mut scopes = ScopeStack::new(&table);
    let name = interner.intern("x");
    assert_eq!(scopes.lookup(&table, name), None);

    scopes.enter(ty);
    assert_eq!(scopes.lookup(&table, name), Some(x));
    assert_eq!(scopes.exit(), Ok(ty));
    assert_eq!(scopes.current(), global);
}

#[test]
fn at_global_does_not_push() {
    let interner = StringInterner::new();
    let table = SymbolTable::new(&interner);
    let scopes = ScopeStack::at(&table, table.global());
    assert_eq!(scopes.depth(), 0);
}
