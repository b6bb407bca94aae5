#![expect(clippy::unwrap_used, reason = "tests unwrap known-good insertions")]

use kiln_ir::FileId;
use pretty_assertions::assert_eq;

use super::*;
use crate::{FunctionData, TypeData, TypeKind, ValueData};

const FILE: Origin = Origin::Source {
    file: FileId::new(0),
};

fn sym(interner: &StringInterner, name: &str, data: SymbolData) -> Symbol {
    Symbol::new(interner.intern(name), FILE, Span::new(1, 1, 2), data)
}

fn class(interner: &StringInterner, name: &str) -> Symbol {
    sym(
        interner,
        name,
        SymbolData::Type(TypeData {
            kind: TypeKind::Class,
            bases: Vec::new(),
        }),
    )
}

fn var(interner: &StringInterner, name: &str) -> Symbol {
    sym(interner, name, SymbolData::Variable(ValueData::default()))
}

#[test]
fn new_table_has_only_global() {
    let interner = StringInterner::new();
    let table = SymbolTable::new(&interner);
    assert_eq!(table.len(), 1);
    assert_eq!(table.roots(), &[table.global()]);
    assert_eq!(
        table.find_root(interner.intern(GLOBAL_MODULE)),
        Some(table.global())
    );
    assert_eq!(table[table.global()].parent, None);
}

#[test]
fn declare_links_parent_and_children() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let foo = table.declare(global, class(&interner, "Foo")).unwrap();
    let x = table.declare(foo, var(&interner, "x")).unwrap();

    assert_eq!(table[x].parent, Some(foo));
    assert_eq!(table[foo].children, vec![x]);
    assert_eq!(table[global].children, vec![foo]);
    assert_eq!(table.ancestors(x).collect::<Vec<_>>(), vec![x, foo, global]);
}

#[test]
fn duplicate_sibling_is_rejected() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let first = table.declare(global, class(&interner, "Foo")).unwrap();
    let err = table.declare(global, class(&interner, "Foo")).unwrap_err();

    assert_eq!(err.existing, first);
    assert_eq!(table.len(), 2);
    assert_eq!(table.find_child(global, interner.intern("Foo")), Some(first));
}

#[test]
fn same_name_in_different_scopes_is_allowed() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let a = table.declare(global, class(&interner, "A")).unwrap();
    let b = table.declare(global, class(&interner, "B")).unwrap();
    assert!(table.declare(a, var(&interner, "x")).is_ok());
    assert!(table.declare(b, var(&interner, "x")).is_ok());
}

#[test]
fn lookup_prefers_innermost() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let outer = table.declare(global, var(&interner, "x")).unwrap();
    let func = table
        .declare(
            global,
            sym(
                &interner,
                "f",
                SymbolData::Function(FunctionData::unresolved()),
            ),
        )
        .unwrap();
    let param = table
        .declare(
            func,
            sym(&interner, "x", SymbolData::Parameter(ValueData::default())),
        )
        .unwrap();
    let body = table.add_scope(func, FILE, Span::DUMMY);

    let x = interner.intern("x");
    assert_eq!(table.lookup(body, x), Some(param));
    assert_eq!(table.lookup(global, x), Some(outer));
}

#[test]
fn lookup_reaches_global_and_roots_from_module() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let helper = table.declare(global, class(&interner, "Helper")).unwrap();
    let app = table
        .open_module(None, interner.intern("App"), FILE, Span::DUMMY)
        .unwrap();
    let sys = table
        .open_module(None, interner.intern("Sys"), FILE, Span::DUMMY)
        .unwrap();

    assert_eq!(table[app].parent, None);
    assert_eq!(table.lookup(app, interner.intern("Helper")), Some(helper));
    assert_eq!(table.lookup(app, interner.intern("Sys")), Some(sys));
    assert_eq!(table.lookup(app, interner.intern("Missing")), None);
}

#[test]
fn modules_reopen() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let name = interner.intern("Sys");
    let first = table.open_module(None, name, FILE, Span::DUMMY).unwrap();
    let again = table.open_module(None, name, FILE, Span::DUMMY).unwrap();
    assert_eq!(first, again);

    let io = interner.intern("Io");
    let nested = table.open_module(Some(first), io, FILE, Span::DUMMY).unwrap();
    assert_eq!(
        table.open_module(Some(first), io, FILE, Span::DUMMY).unwrap(),
        nested
    );
}

#[test]
fn module_over_non_module_collides() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let foo = table.declare(global, class(&interner, "Foo")).unwrap();
    let err = table
        .open_module(Some(global), interner.intern("Foo"), FILE, Span::DUMMY)
        .unwrap_err();
    assert_eq!(err.existing, foo);
}

#[test]
fn root_modules_and_global_children_share_names() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let foo = interner.intern("Foo");
    let module = table.open_module(None, foo, FILE, Span::DUMMY).unwrap();
    let err = table.declare(global, class(&interner, "Foo")).unwrap_err();
    assert_eq!(err.existing, module);

    let bar = table.declare(global, class(&interner, "Bar")).unwrap();
    let err = table
        .open_module(None, interner.intern("Bar"), FILE, Span::DUMMY)
        .unwrap_err();
    assert_eq!(err.existing, bar);
    assert_eq!(table.roots().len(), 2);
}

#[test]
fn shadowed_root_module_leaves_lookup() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let foo = interner.intern("Foo");
    let module = table.open_module(None, foo, FILE, Span::DUMMY).unwrap();
    table.shadow(module);
    let class = table.declare(global, class(&interner, "Foo")).unwrap();

    assert_eq!(table.find_root(foo), None);
    assert_eq!(table.lookup(global, foo), Some(class));
    assert!(table.roots().contains(&module));
}

#[test]
fn shadowed_symbol_leaves_lookup_but_stays_owned() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let imported = table.declare(global, class(&interner, "Foo")).unwrap();
    table.shadow(imported);
    let local = table.declare(global, class(&interner, "Foo")).unwrap();

    assert!(table[imported].is_shadowed());
    assert_eq!(table.lookup(global, interner.intern("Foo")), Some(local));
    assert_eq!(
        table
            .children_of_kind(global, SymbolKind::Type)
            .collect::<Vec<_>>(),
        vec![imported, local]
    );
}

#[test]
fn members_are_inherited_through_bases() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let base = table.declare(global, class(&interner, "Base")).unwrap();
    let field = table.declare(base, var(&interner, "id")).unwrap();
    let derived = table.declare(global, class(&interner, "Derived")).unwrap();
    table.set_bases(derived, vec![base]).unwrap();

    assert_eq!(table.find_member(derived, interner.intern("id")), Some(field));
    assert!(table.is_subtype(derived, base));
    assert!(!table.is_subtype(base, derived));
}

#[test]
fn base_cycles_terminate() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let a = table.declare(global, class(&interner, "A")).unwrap();
    let b = table.declare(global, class(&interner, "B")).unwrap();
    table.set_bases(a, vec![b]).unwrap();
    table.set_bases(b, vec![a]).unwrap();

    assert_eq!(table.find_member(a, interner.intern("nothing")), None);
    assert!(table.is_subtype(a, b));
}

#[test]
fn setters_check_kind() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let foo = table.declare(global, class(&interner, "Foo")).unwrap();
    assert_eq!(
        table.set_value_ty(foo, Ty::Int),
        Err(ResolveError::KindMismatch {
            symbol: foo,
            expected: "value",
        })
    );
    assert_eq!(
        table.set_value_ty(SymbolId::new(99), Ty::Int),
        Err(ResolveError::DanglingSymbol(SymbolId::new(99)))
    );
}

#[test]
fn qualified_names_skip_global_and_scopes() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let sys = table
        .open_module(None, interner.intern("Sys"), FILE, Span::DUMMY)
        .unwrap();
    let file = table.declare(sys, class(&interner, "File")).unwrap();
    let scope = table.add_scope(file, FILE, Span::DUMMY);
    let local = table.declare(scope, var(&interner, "n")).unwrap();

    assert_eq!(table.qualified_name(file, &interner), "Sys.File");
    assert_eq!(table.qualified_name(local, &interner), "Sys.File.n");
    let top = table
        .declare(table.global(), class(&interner, "Top"))
        .unwrap();
    assert_eq!(table.qualified_name(top, &interner), "Top");
}

#[test]
fn dump_lists_forest() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let global = table.global();
    let foo = table.declare(global, class(&interner, "Foo")).unwrap();
    table.declare(foo, var(&interner, "x")).unwrap();

    assert_eq!(
        table.dump(&interner),
        "module Global\n  type Foo\n    variable x: Unknown\n"
    );
}
