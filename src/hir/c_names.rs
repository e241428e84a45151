//! Mapping between IOP CamelCase names and generated C snake_case
//! identifiers.
//!
//! The code generator derives C identifiers mechanically from qualified
//! IOP names: package dots become `__`, the type name is snake_cased, and
//! a kind-dependent suffix is appended (`__t`, `__array_t`, ...). This
//! module implements both directions so the index can cross-reference
//! generated identifiers back to their declarations.

use smol_str::SmolStr;

/// Suffixes appended to generated C type names, ordered longest first so
/// that matching always strips the most specific form.
pub const C_TYPE_SUFFIXES: &[&str] = &["__array_t", "__opt_t", "__sp", "__ep", "__t", "__s", "__e"];

/// Convert a CamelCase name to its snake_case C form.
///
/// A separator is inserted before an uppercase letter preceded by a
/// lowercase letter or digit, and between a run of uppercase letters and a
/// following capitalized word, so acronyms stay intact:
/// `MyStructA` -> `my_struct_a`, `HTTPCode` -> `http_code`.
pub fn camel_to_c(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase()));
            if boundary {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Convert a snake_case C name back to CamelCase.
///
/// Each separator-delimited segment is capitalized with the remainder
/// lowercased, so the conversion is lossy for acronyms
/// (`http_code` -> `HttpCode`, not `HTTPCode`).
pub fn c_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            for c in chars {
                out.push(c.to_ascii_lowercase());
            }
        }
    }
    out
}

/// Convert a qualified IOP name to its C type base name, without suffix.
///
/// `tstiop.MyStructA` -> `tstiop__my_struct_a`; dots inside a nested
/// package become `__` as well, so `test.dso.ClassDso` ->
/// `test__dso__class_dso`. A name without a package yields just the
/// snake-cased form.
pub fn qualified_to_c(qualified_name: &str) -> SmolStr {
    match qualified_name.rsplit_once('.') {
        Some((pkg, type_name)) => {
            let pkg_c = pkg.replace('.', "__");
            SmolStr::new(format!("{pkg_c}__{}", camel_to_c(type_name)))
        }
        None => SmolStr::new(camel_to_c(qualified_name)),
    }
}

/// Strip the first matching generated-type suffix from a C identifier.
///
/// `tstiop__my_struct_a__t` -> `tstiop__my_struct_a`; identifiers without
/// a known suffix are returned unchanged.
pub fn strip_c_suffix(ident: &str) -> &str {
    for suffix in C_TYPE_SUFFIXES {
        if let Some(base) = ident.strip_suffix(suffix) {
            return base;
        }
    }
    ident
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("MyStruct", "my_struct")]
    #[case("MyStructA", "my_struct_a")]
    #[case("HTTPCode", "http_code")]
    #[case("Foo", "foo")]
    #[case("URL", "url")]
    #[case("ClassDso", "class_dso")]
    #[case("MyStruct2", "my_struct2")]
    #[case("V2Request", "v2_request")]
    fn test_camel_to_c(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(camel_to_c(input), expected);
    }

    #[rstest]
    #[case("my_struct", "MyStruct")]
    #[case("my_struct_a", "MyStructA")]
    #[case("foo", "Foo")]
    #[case("class_dso", "ClassDso")]
    fn test_c_to_camel(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(c_to_camel(input), expected);
    }

    #[rstest]
    #[case("tstiop.MyStructA", "tstiop__my_struct_a")]
    #[case("test.dso.ClassDso", "test__dso__class_dso")]
    #[case("core.LogLevel", "core__log_level")]
    #[case("foo.Bar", "foo__bar")]
    #[case("Bare", "bare")]
    fn test_qualified_to_c(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(qualified_to_c(input), expected);
    }

    #[test]
    fn test_strip_suffix_longest_first() {
        assert_eq!(strip_c_suffix("foo__bar__array_t"), "foo__bar");
        assert_eq!(strip_c_suffix("foo__bar__opt_t"), "foo__bar");
        assert_eq!(strip_c_suffix("foo__bar__t"), "foo__bar");
        assert_eq!(strip_c_suffix("foo__bar__e"), "foo__bar");
        assert_eq!(strip_c_suffix("foo__bar"), "foo__bar");
    }

    #[test]
    fn test_strip_suffix_only_once() {
        // Only the first matching suffix comes off.
        assert_eq!(strip_c_suffix("foo__t__t"), "foo__t");
    }
}
