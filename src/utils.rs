//! 通用辅助函数：
//! - 环境变量读取与解析
//! - 图标名到标识符的转换（PascalCase / camelCase）
//! - 图标名合法性检查

use std::{env, path::PathBuf};

/// 可选读取 PATH 环境变量为 PathBuf。
pub(crate) fn env_opt_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from).filter(|p| !p.as_os_str().is_empty())
}

/// 读取布尔环境变量的真值（1/true/on/yes/y）。
pub(crate) fn env_bool_truthy(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| parse_truthy(&v))
}

fn parse_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes" | "y"
    )
}

/// 首字母大写，其余保持不变（`path` -> `Path`，`clipPath` -> `ClipPath`）。
pub(crate) fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 组件标识符：按 `-`、`_`、空白切分，每段首字母大写、其余小写。
pub(crate) fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| uppercase_first(&w.to_lowercase()))
        .collect()
}

/// 按 `-` 切分的 camelCase：首段首字母小写，其余段首字母大写，段内其余字符不变。
pub(crate) fn to_camel_case(s: &str) -> String {
    camel_join(s.split('-'))
}

/// 属性名使用的 camelCase：命名空间分隔符 `:` 也视为分段（`xlink:href` -> `xlinkHref`）。
pub(crate) fn attr_camel_case(s: &str) -> String {
    camel_join(s.split(|c| c == '-' || c == ':'))
}

fn camel_join<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .enumerate()
        .map(|(i, w)| if i == 0 { lowercase_first(w) } else { uppercase_first(w) })
        .collect()
}

/// 小写连字符标识符：`[a-z][a-z0-9]*(-[a-z0-9]+)*`
pub(crate) fn is_icon_name(s: &str) -> bool {
    let mut segments = s.split('-');
    let Some(head) = segments.next() else { return false };
    let head_ok = head
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && head.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    head_ok
        && segments.all(|seg| {
            !seg.is_empty() && seg.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_for_component_names() {
        assert_eq!(to_pascal_case("address-card"), "AddressCard");
        assert_eq!(to_pascal_case("arrow_up right"), "ArrowUpRight");
        assert_eq!(to_pascal_case("star"), "Star");
        assert_eq!(to_pascal_case("ABC-def"), "AbcDef");
        assert_eq!(to_pascal_case("chevron--left"), "ChevronLeft");
    }

    #[test]
    fn camel_case_keeps_inner_letters() {
        assert_eq!(to_camel_case("address-card"), "addressCard");
        assert_eq!(to_camel_case("stroke-width"), "strokeWidth");
        assert_eq!(to_camel_case("viewBox"), "viewBox");
        assert_eq!(to_camel_case("Arrow-up"), "arrowUp");
    }

    #[test]
    fn attribute_camel_case_splits_namespaces() {
        assert_eq!(attr_camel_case("xlink:href"), "xlinkHref");
        assert_eq!(attr_camel_case("xml:space"), "xmlSpace");
        assert_eq!(attr_camel_case("clip-rule"), "clipRule");
    }

    #[test]
    fn uppercase_first_only_touches_first_char() {
        assert_eq!(uppercase_first("linearGradient"), "LinearGradient");
        assert_eq!(uppercase_first(""), "");
    }

    #[test]
    fn icon_name_validation() {
        assert!(is_icon_name("star"));
        assert!(is_icon_name("arrow-up-2"));
        assert!(!is_icon_name("Arrow"));
        assert!(!is_icon_name("2-arrows"));
        assert!(!is_icon_name("arrow--up"));
        assert!(!is_icon_name("arrow_up"));
        assert!(!is_icon_name(""));
    }

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "ON", " yes ", "y"] {
            assert!(parse_truthy(v), "{v}");
        }
        for v in ["0", "false", "off", "nope", ""] {
            assert!(!parse_truthy(v), "{v}");
        }
    }
}
