//! 树 -> 源码渲染模块：
//! - 将 `SvgNode` 渲染为 `React.createElement(SVG.Xxx, {...}, ...)` 形式的表达式
//! - 根 `<svg>` 只渲染子节点，其属性由 IconBase 提供
//! - 属性名转换为 React 属性命名，`fill` 一律丢弃（颜色由组件 `color` 控制）

use crate::{svg::SvgNode, utils::{attr_camel_case, uppercase_first}};

/// 不符合通用 camelCase 规则的属性名，优先于通用规则。
const SPECIAL_PROPS: [(&str, &str); 12] = [
    ("class", "className"),
    ("for", "htmlFor"),
    ("tabindex", "tabIndex"),
    ("readonly", "readOnly"),
    ("maxlength", "maxLength"),
    ("cellpadding", "cellPadding"),
    ("cellspacing", "cellSpacing"),
    ("rowspan", "rowSpan"),
    ("colspan", "colSpan"),
    ("usemap", "useMap"),
    ("frameborder", "frameBorder"),
    ("contenteditable", "contentEditable"),
];

const FRAGMENT: &str = "React.Fragment";
const PRIMITIVES: &str = "SVG";

/// SVG/XML 属性名 -> React 属性名
pub(crate) fn prop_name(attr: &str) -> String {
    SPECIAL_PROPS
        .iter()
        .find(|(from, _)| *from == attr)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| attr_camel_case(attr))
}

/// 渲染一个图标变体的整棵树。根为 `<svg>` 时只渲染其子节点。
pub(crate) fn render_root(node: &SvgNode, indent: &str) -> String {
    match node {
        SvgNode::Element { name, children, .. } if name == "svg" => {
            let rendered = render_children(children, indent);
            match rendered.len() {
                0 => format!("React.createElement({FRAGMENT}, null)"),
                1 => rendered.into_iter().next().unwrap_or_default(),
                _ => format!(
                    "React.createElement({FRAGMENT}, null, {})",
                    join_children(&rendered, indent)
                ),
            }
        }
        _ => render_node(node, indent, None).unwrap_or_else(|| "null".to_string()),
    }
}

/// 渲染单个节点；空文本节点返回 None。
pub(crate) fn render_node(node: &SvgNode, indent: &str, key: Option<usize>) -> Option<String> {
    match node {
        SvgNode::Text { value } if value.is_empty() => None,
        SvgNode::Text { value } => Some(js_string(value)),
        SvgNode::Element { name, attributes, children } => {
            let mut props: Vec<String> = Vec::with_capacity(attributes.len() + 1);
            if let Some(k) = key {
                props.push(format!("key: {k}"));
            }
            for (attr, value) in attributes {
                if attr == "fill" {
                    continue;
                }
                props.push(format!("{}: {}", js_key(&prop_name(attr)), js_string(value)));
            }
            let tag = format!("{PRIMITIVES}.{}", uppercase_first(name));
            let props = format!("{{{}}}", props.join(", "));

            let rendered = render_children(children, indent);
            Some(match rendered.len() {
                0 => format!("React.createElement({tag}, {props})"),
                1 => format!("React.createElement({tag}, {props}, {})", rendered[0]),
                _ => format!(
                    "React.createElement({tag}, {props}, {})",
                    join_children(&rendered, indent)
                ),
            })
        }
    }
}

fn render_children(children: &[SvgNode], indent: &str) -> Vec<String> {
    let child_indent = format!("{indent}  ");
    children
        .iter()
        .enumerate()
        .filter_map(|(idx, child)| render_node(child, &child_indent, Some(idx)))
        .collect()
}

fn join_children(rendered: &[String], indent: &str) -> String {
    format!(
        "[\n{indent}  {}\n{indent}]",
        rendered.join(&format!(",\n{indent}  "))
    )
}

/// JS 字符串字面量（JSON 转义规则）。
/// U+2028 / U+2029 在 JSON 中可原样出现，但 JS/JSON5 字符串里不行，需额外转义。
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// 对象键：合法标识符原样输出，否则加引号
pub(crate) fn js_key(key: &str) -> String {
    if is_js_identifier(key) {
        key.to_string()
    } else {
        js_string(key)
    }
}

pub(crate) fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
