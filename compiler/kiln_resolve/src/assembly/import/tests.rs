#![expect(clippy::unwrap_used, reason = "tests unwrap known-good imports")]

use pretty_assertions::assert_eq;

use super::*;
use crate::assembly::ParamMetadata;
use crate::{SymbolKind, TypeKind};

fn core() -> AssemblyMetadata {
    AssemblyMetadata::new("core").with_module(
        ModuleMetadata::new("Sys.Io")
            .with_type(
                TypeMetadata::new("File", TypeKind::Class)
                    .with_base("Sys.Io.Stream")
                    .with_property(PropertyMetadata::new("size", "Int"))
                    .with_property(PropertyMetadata::new("name", "String").settable())
                    .with_function(FunctionMetadata::new("close", "Void")),
            )
            .with_type(TypeMetadata::new("Stream", TypeKind::Contract))
            .with_type(TypeMetadata::new("Handle", TypeKind::Struct).private())
            .with_function(FunctionMetadata::new("open", "File").with_param("path", "String")),
    )
}

fn path(table: &SymbolTable, interner: &StringInterner, text: &str) -> Option<SymbolId> {
    let names: Vec<Name> = text.split('.').map(|s| interner.intern(s)).collect();
    crate::resolver::expr::resolve_path(table, table.global(), &names).ok()
}

#[test]
fn public_surface_is_imported() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let problems = import_assembly(&mut table, &interner, &core()).unwrap();
    assert_eq!(problems, Vec::<String>::new());

    let file = path(&table, &interner, "Sys.Io.File").unwrap();
    assert!(table[file].is_imported());
    assert_eq!(table[file].kind(), SymbolKind::Type);
    assert!(table[file].flags.contains(SymbolFlags::PUBLIC));

    let stream = path(&table, &interner, "Sys.Io.Stream").unwrap();
    assert_eq!(table[file].type_data().unwrap().bases, vec![stream]);
    assert_eq!(path(&table, &interner, "Sys.Io.Handle"), None);
}

#[test]
fn signatures_and_properties_are_typed() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    import_assembly(&mut table, &interner, &core()).unwrap();

    let file = path(&table, &interner, "Sys.Io.File").unwrap();
    let open = path(&table, &interner, "Sys.Io.open").unwrap();
    let sig = table[open].function_data().unwrap();
    assert_eq!(sig.params, vec![Ty::Str]);
    assert_eq!(sig.ret, Ty::Named(file));
    assert_eq!(
        table.children_of_kind(open, SymbolKind::Parameter).count(),
        1
    );

    let size = path(&table, &interner, "Sys.Io.File.size").unwrap();
    let name = path(&table, &interner, "Sys.Io.File.name").unwrap();
    assert_eq!(table[size].value_ty(), Some(Ty::Int));
    assert!(!table[size].is_mutable());
    assert!(table[name].is_mutable());
}

#[test]
fn enum_cases_are_typed_by_their_enum() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let meta = AssemblyMetadata::new("colors").with_module(ModuleMetadata::new("Gfx").with_type(
        TypeMetadata::new("Color", TypeKind::Enum)
            .with_case("Red")
            .with_case("Green"),
    ));
    import_assembly(&mut table, &interner, &meta).unwrap();

    let color = path(&table, &interner, "Gfx.Color").unwrap();
    let red = path(&table, &interner, "Gfx.Color.Red").unwrap();
    assert_eq!(table[red].kind(), SymbolKind::Enum);
    assert_eq!(table[red].value_ty(), Some(Ty::Named(color)));
}

#[test]
fn unresolved_type_path_is_a_problem() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let meta = AssemblyMetadata::new("broken").with_module(
        ModuleMetadata::new("M").with_property(PropertyMetadata::new("p", "Missing.Type")),
    );
    let problems = import_assembly(&mut table, &interner, &meta).unwrap();
    assert_eq!(problems, vec!["unresolved type `Missing.Type` in `M.p`".to_string()]);

    let p = path(&table, &interner, "M.p").unwrap();
    assert_eq!(table[p].value_ty(), Some(Ty::Error));
}

#[test]
fn modules_merge_across_units() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    import_assembly(&mut table, &interner, &core()).unwrap();
    let connect = FunctionMetadata {
        name: "connect".to_string(),
        public: true,
        params: vec![ParamMetadata {
            name: "file".to_string(),
            ty: "Sys.Io.File".to_string(),
        }],
        ret: "Bool".to_string(),
    };
    let extra = AssemblyMetadata::new("net")
        .with_module(ModuleMetadata::new("Sys.Net").with_function(connect));
    assert!(import_assembly(&mut table, &interner, &extra)
        .unwrap()
        .is_empty());

    assert!(path(&table, &interner, "Sys.Net.connect").is_some());
    assert!(path(&table, &interner, "Sys.Io.open").is_some());
    let sys = interner.intern("Sys");
    let sys_roots = table.roots().iter().filter(|&&r| table[r].name == sys);
    assert_eq!(sys_roots.count(), 1);
}

#[test]
fn conflicting_imports_are_reported() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    import_assembly(&mut table, &interner, &core()).unwrap();
    let io = ModuleMetadata::new("Sys.Io").with_function(FunctionMetadata::new("open", "Int"));
    let clash = AssemblyMetadata::new("clash").with_module(io);
    let problems = import_assembly(&mut table, &interner, &clash).unwrap();
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("Sys.Io.open"));
}

#[test]
fn enclosing_modules_are_opened_implicitly() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let meta = AssemblyMetadata::new("deep")
        .with_module(ModuleMetadata::new("A.B.C").with_property(PropertyMetadata::new("x", "Int")))
        .with_module(ModuleMetadata::new("A").with_property(PropertyMetadata::new("y", "Int")));
    assert!(import_assembly(&mut table, &interner, &meta).unwrap().is_empty());

    let b = path(&table, &interner, "A.B").unwrap();
    assert_eq!(table[b].kind(), SymbolKind::Module);
    assert!(path(&table, &interner, "A.B.C.x").is_some());
    assert!(path(&table, &interner, "A.y").is_some());
    // `Global` and `A`.
    assert_eq!(table.roots().len(), 2);
}

#[test]
fn empty_path_segment_is_a_problem() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new(&interner);
    let meta = AssemblyMetadata::new("bad").with_module(ModuleMetadata::new("A..B"));
    let problems = import_assembly(&mut table, &interner, &meta).unwrap();
    assert_eq!(problems, vec!["malformed module path `A..B`".to_string()]);
}
