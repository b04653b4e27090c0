use syn::{Attribute, Expr, Lit, Meta};

/// Doc-comment line prefix selecting the HTTP method.
pub const METHOD_MARKER: &str = "@METHOD:";
/// Doc-comment line prefix selecting the URL path.
pub const PATH_MARKER: &str = "@PATH:";

/// Method and path directives read from a handler's doc comment.
///
/// Both values are copied verbatim after trimming; an absent marker leaves the field
/// empty. Nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub method: String,
    pub path: String,
}

/// Reads the `@METHOD:` and `@PATH:` directives from `attrs`.
///
/// Every doc line is checked in order and the last occurrence of a marker wins.
/// Lines are matched after their leading whitespace is stripped, so `/// @PATH: /x`
/// and `///@PATH: /x` are equivalent.
pub fn extract(attrs: &[Attribute]) -> Annotation {
    let mut annotation = Annotation::default();

    for line in doc_lines(attrs) {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(METHOD_MARKER) {
            annotation.method = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(PATH_MARKER) {
            annotation.path = rest.trim().to_string();
        }
    }

    annotation
}

/// Whether `attrs` carry a doc comment (`///`, `/** */` or `#[doc = ...]`).
///
/// List-form attributes such as `#[doc(hidden)]` document nothing and do not count.
pub fn has_doc_comment(attrs: &[Attribute]) -> bool {
    doc_values(attrs).next().is_some()
}

fn doc_values(attrs: &[Attribute]) -> impl Iterator<Item = &Expr> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => Some(&nv.value),
            _ => None,
        })
}

/// Lines of every `#[doc = "..."]` string literal, in source order.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    doc_values(attrs)
        .filter_map(|value| match value {
            Expr::Lit(expr_lit) => match &expr_lit.lit {
                Lit::Str(s) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|doc| doc.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}
