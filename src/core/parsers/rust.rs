use syn::{Item, Visibility};

/// A top-level, exported type declaration found in a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
}

/// Parse Rust source into a syntax tree.
///
/// Only the syntax is checked: nothing is resolved, expanded or type-checked,
/// so macros and unknown paths are fine as long as the file is well formed.
pub fn parse_rust_source(code: &str) -> syn::Result<syn::File> {
    syn::parse_file(code)
}

/// Collect the exported type declarations at the top level of a file, in
/// source order.
///
/// Items nested in inline modules, functions or impl blocks are not visited.
pub fn exported_type_declarations(file: &syn::File) -> Vec<TypeDeclaration> {
    file.items
        .iter()
        .filter_map(|item| {
            let (vis, ident) = match item {
                Item::Struct(s) => (&s.vis, &s.ident),
                Item::Enum(e) => (&e.vis, &e.ident),
                Item::Union(u) => (&u.vis, &u.ident),
                Item::Type(t) => (&t.vis, &t.ident),
                _ => return None,
            };
            is_exported(vis).then(|| TypeDeclaration {
                name: ident.to_string(),
            })
        })
        .collect()
}

/// `pub` and `pub(crate)` items are reachable from a generated module in the
/// same crate. `pub(super)`, `pub(self)` and `pub(in path)` are not.
fn is_exported(vis: &Visibility) -> bool {
    match vis {
        Visibility::Public(_) => true,
        Visibility::Restricted(restricted) => {
            restricted.in_token.is_none() && restricted.path.is_ident("crate")
        }
        Visibility::Inherited => false,
    }
}
