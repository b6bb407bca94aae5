#![expect(clippy::unwrap_used, reason = "tests unwrap known-good encodings")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builders_default_to_public() {
    let ty = TypeMetadata::new("File", TypeKind::Class)
        .with_property(PropertyMetadata::new("size", "Int"))
        .with_function(FunctionMetadata::new("close", "Void").private());
    assert!(ty.public);
    assert!(ty.properties[0].public);
    assert!(!ty.properties[0].settable);
    assert!(!ty.functions[0].public);
}

#[test]
fn wire_format_preserves_document() {
    let meta = AssemblyMetadata::new("core").with_module(
        ModuleMetadata::new("Sys.Io")
            .with_type(TypeMetadata::new("Mode", TypeKind::Enum).with_case("Read"))
            .with_function(
                FunctionMetadata::new("open", "Sys.Io.File").with_param("path", "String"),
            ),
    );
    let bytes = meta.encode().unwrap();
    assert_eq!(AssemblyMetadata::decode(&bytes).unwrap(), meta);
}

#[test]
fn truncated_bytes_fail_to_decode() {
    let bytes = AssemblyMetadata::new("core")
        .with_module(ModuleMetadata::new("Sys"))
        .encode()
        .unwrap();
    assert!(AssemblyMetadata::decode(&bytes[..bytes.len() / 2]).is_err());
}

#[test]
fn module_path_splits_into_segments() {
    let module = ModuleMetadata::new("Sys.Io.Fs");
    assert_eq!(module.segments().collect::<Vec<_>>(), vec!["Sys", "Io", "Fs"]);
}
