use kiln_ir::StringInterner;

use super::*;

fn variable(interner: &StringInterner, ty: Ty) -> Symbol {
    Symbol::new(
        interner.intern("x"),
        Origin::Source {
            file: FileId::new(0),
        },
        Span::new(1, 5, 6),
        SymbolData::Variable(ValueData { ty }),
    )
}

#[test]
fn kind_follows_payload() {
    let interner = StringInterner::new();
    assert_eq!(variable(&interner, Ty::Int).kind(), SymbolKind::Variable);

    let case = Symbol::new(
        interner.intern("Red"),
        Origin::Implicit,
        Span::DUMMY,
        SymbolData::EnumCase(ValueData::default()),
    );
    assert_eq!(case.kind(), SymbolKind::Enum);
    assert!(case.kind().is_value());
    assert!(!SymbolKind::Scope.is_value());
}

#[test]
fn value_ty_only_for_value_symbols() {
    let interner = StringInterner::new();
    assert_eq!(variable(&interner, Ty::Str).value_ty(), Some(Ty::Str));

    let func = Symbol::new(
        interner.intern("f"),
        Origin::Implicit,
        Span::DUMMY,
        SymbolData::Function(FunctionData::unresolved()),
    );
    assert_eq!(func.value_ty(), None);
    assert_eq!(func.function_data().map(|f| f.ret), Some(Ty::Unknown));
}

#[test]
fn flags_accumulate() {
    let interner = StringInterner::new();
    let sym = variable(&interner, Ty::Int)
        .with_flags(SymbolFlags::MUTABLE)
        .with_flags(SymbolFlags::PUBLIC);
    assert!(sym.is_mutable());
    assert!(!sym.is_shadowed());
    assert!(sym.flags.contains(SymbolFlags::PUBLIC));
}

#[test]
fn origin_distinguishes_imports() {
    let interner = StringInterner::new();
    let imported = Origin::Imported {
        assembly: interner.intern("core"),
    };
    assert!(imported.is_imported());
    assert_eq!(imported.file(), None);
    assert_eq!(
        Origin::Source {
            file: FileId::new(3)
        }
        .file(),
        Some(FileId::new(3))
    );
}

#[test]
fn type_kind_from_declaration() {
    assert_eq!(TypeKind::from(TypeDeclKind::Contract), TypeKind::Contract);
    assert_eq!(TypeKind::from(TypeDeclKind::Enum), TypeKind::Enum);
}

#[test]
fn named_type_exposes_symbol() {
    let id = SymbolId::new(4);
    assert_eq!(Ty::Named(id).symbol(), Some(id));
    assert_eq!(Ty::Int.symbol(), None);
    assert!(Ty::Float.is_numeric());
    assert!(Ty::default().is_unknown());
}
