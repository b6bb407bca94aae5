// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Resolution does not depend on declaration order or file split.

use kiln_ir::{BinaryOp, FileBuilder, FileId, Item, Name, SourceFile, StringInterner};
use kiln_resolve::assembly::MemoryLoader;
use kiln_resolve::resolver::expr::resolve_path;
use kiln_resolve::Ty;
use kilnc::{CompileOptions, Compiler};
use proptest::prelude::*;

const FUNCTIONS: usize = 5;
const DECLS: usize = FUNCTIONS + 2;

/// Declaration `index`:
/// - `func f{i}() -> Int { return f{i+1}() }` (wrapping)
/// - `class Shape { prop area = f0() }`
/// - `let total = Shape().area + 1`
fn decl(b: &mut FileBuilder<'_>, index: usize) -> Item {
    match index {
        i if i < FUNCTIONS => {
            let next = b.ident(&format!("f{}", (i + 1) % FUNCTIONS));
            let call = b.call(next, vec![]);
            let ret = b.ret(Some(call));
            let body = b.block(vec![ret]);
            b.function(&format!("f{i}"), vec![], Some("Int"), Some(body))
        }
        FUNCTIONS => {
            let f0 = b.ident("f0");
            let call = b.call(f0, vec![]);
            let area = b.property("area", None, false, Some(call));
            b.class("Shape", vec![area])
        }
        _ => {
            let shape = b.ident("Shape");
            let made = b.call(shape, vec![]);
            let area = b.member(made, "area");
            let one = b.int(1);
            let sum = b.binary(BinaryOp::Add, area, one);
            b.variable("total", None, false, Some(sum))
        }
    }
}

fn build(interner: &StringInterner, order: &[usize], split: usize) -> Vec<SourceFile> {
    let (first, second) = order.split_at(split);
    [first, second]
        .iter()
        .enumerate()
        .map(|(n, indices)| {
            let id = u32::try_from(n).unwrap();
            let mut b = FileBuilder::new(interner, FileId::new(id), format!("file{n}.kn"));
            let items = indices.iter().map(|&i| decl(&mut b, i)).collect();
            b.finish(items)
        })
        .collect()
}

fn value_ty(interner: &StringInterner, table: &kiln_resolve::SymbolTable, path: &str) -> Option<Ty> {
    let names: Vec<Name> = path.split('.').map(|s| interner.intern(s)).collect();
    let id = resolve_path(table, table.global(), &names).ok()?;
    table[id].value_ty()
}

proptest! {
    #[test]
    fn any_order_and_split_resolves_cleanly(
        order in Just((0..DECLS).collect::<Vec<usize>>()).prop_shuffle(),
        split in 0..=DECLS,
    ) {
        let interner = StringInterner::new();
        let files = build(&interner, &order, split);
        let output = Compiler::new(&interner, CompileOptions::default())
            .run_with_loader(&files, &MemoryLoader::new())
            .unwrap();

        prop_assert_eq!(output.diagnostics.len(), 0, "{:#?}", output.diagnostics);
        prop_assert_eq!(value_ty(&interner, &output.table, "total"), Some(Ty::Int));
        prop_assert_eq!(value_ty(&interner, &output.table, "Shape.area"), Some(Ty::Int));
    }
}
