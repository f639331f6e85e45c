//! SVG 读取模块：
//! - `SvgNode` 树结构（元素 / 文本），属性保持原始顺序
//! - `optimize`：去除注释、声明、元数据、编辑器命名空间等冗余，输出紧凑标记
//! - `parse`：将 SVG 文本解析为以 `<svg>` 为根的树
//! - `SvgNode::to_markup`：树 -> 紧凑 SVG 标记

use indexmap::IndexMap;
use quick_xml::{
    escape::escape,
    events::{attributes::AttrError, BytesStart, Event},
    Reader,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// SVG 树节点。文本节点没有属性与子节点，由类型本身保证。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum SvgNode {
    Element {
        name: String,
        #[serde(default)]
        attributes: IndexMap<String, String>,
        #[serde(default)]
        children: Vec<SvgNode>,
    },
    Text {
        value: String,
    },
}

#[derive(Debug, Error)]
pub(crate) enum SvgError {
    #[error("XML 解析失败（偏移 {position}）: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("属性解析失败: {0}")]
    Attr(#[from] AttrError),
    #[error("名称不是合法的 UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("文档中没有根元素")]
    Empty,
    #[error("根元素应为 <svg>，实际为 <{0}>")]
    NotSvg(String),
    #[error("文档存在多个根元素")]
    MultipleRoots,
    #[error("元素 <{0}> 未闭合")]
    Unclosed(String),
    #[error("根元素之外出现文本: {0:?}")]
    StrayText(String),
}

impl SvgNode {
    pub(crate) fn element(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = (String, String)>,
        children: Vec<SvgNode>,
    ) -> Self {
        SvgNode::Element {
            name: name.into(),
            attributes: attributes.into_iter().collect(),
            children,
        }
    }

    #[cfg(test)]
    pub(crate) fn text(value: impl Into<String>) -> Self {
        SvgNode::Text { value: value.into() }
    }

    /// 元素名；文本节点返回 None
    pub(crate) fn name(&self) -> Option<&str> {
        match self {
            SvgNode::Element { name, .. } => Some(name),
            SvgNode::Text { .. } => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            SvgNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            SvgNode::Text { .. } => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[SvgNode] {
        match self {
            SvgNode::Element { children, .. } => children,
            SvgNode::Text { .. } => &[],
        }
    }

    /// 序列化为紧凑 SVG 标记（无多余空白，属性按原顺序）
    pub(crate) fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            SvgNode::Text { value } => out.push_str(&escape(value.as_str())),
            SvgNode::Element { name, attributes, children } => {
                out.push('<');
                out.push_str(name);
                for (k, v) in attributes {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(&escape(v.as_str()));
                    out.push('"');
                }
                if children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for child in children {
                        child.write_markup(out);
                    }
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
    }
}

/// 去除可优化的冗余后输出紧凑标记；对已优化的文本再次调用结果不变。
pub(crate) fn optimize(text: &str) -> Result<String, SvgError> {
    Ok(read_tree(text, true)?.to_markup())
}

/// 解析 SVG 文本，根元素必须为 `<svg>`。
pub(crate) fn parse(text: &str) -> Result<SvgNode, SvgError> {
    read_tree(text, false)
}

// 编辑器写入的命名空间（Inkscape / Sodipodi / Sketch）
const EDITOR_PREFIXES: [&str; 3] = ["sodipodi:", "inkscape:", "sketch:"];
const EDITOR_NS_DECLS: [&str; 3] = ["xmlns:sodipodi", "xmlns:inkscape", "xmlns:sketch"];
const DROPPED_ELEMENTS: [&str; 3] = ["metadata", "title", "desc"];
const EMPTY_CONTAINERS: [&str; 2] = ["g", "defs"];

struct OpenElement {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<SvgNode>,
}

impl OpenElement {
    fn close(self) -> SvgNode {
        SvgNode::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

fn read_tree(text: &str, optimizing: bool) -> Result<SvgNode, SvgError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<SvgNode> = None;
    // 被丢弃元素的嵌套深度（>0 时忽略所有事件）
    let mut skipping = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(ev) => ev,
            Err(source) => {
                return Err(SvgError::Xml {
                    position: reader.buffer_position() as u64,
                    source,
                })
            }
        };
        match event {
            Event::Start(e) => {
                if skipping > 0 {
                    skipping += 1;
                    continue;
                }
                let open = open_element(&e, optimizing)?;
                if optimizing && is_dropped_element(&open.name) {
                    skipping = 1;
                    continue;
                }
                stack.push(open);
            }
            Event::Empty(e) => {
                if skipping > 0 {
                    continue;
                }
                let open = open_element(&e, optimizing)?;
                if optimizing && is_dropped_element(&open.name) {
                    continue;
                }
                attach(&mut stack, &mut root, open.close(), optimizing)?;
            }
            Event::End(_) => {
                if skipping > 0 {
                    skipping -= 1;
                    continue;
                }
                // 结束标签与开始标签的匹配由 reader 校验
                if let Some(open) = stack.pop() {
                    attach(&mut stack, &mut root, open.close(), optimizing)?;
                }
            }
            Event::Text(t) => {
                if skipping > 0 {
                    continue;
                }
                let value = t.unescape().map_err(|source| SvgError::Xml {
                    position: reader.buffer_position() as u64,
                    source,
                })?;
                push_text(&mut stack, value.into_owned())?;
            }
            Event::CData(c) => {
                if skipping > 0 {
                    continue;
                }
                push_text(&mut stack, std::str::from_utf8(&c)?.to_string())?;
            }
            Event::Eof => break,
            // 声明、处理指令、DOCTYPE、注释
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(SvgError::Unclosed(open.name));
    }
    let Some(node) = root else {
        return Err(SvgError::Empty);
    };
    match node.name() {
        Some("svg") => {}
        Some(other) => return Err(SvgError::NotSvg(other.to_string())),
        None => return Err(SvgError::Empty),
    }
    Ok(node)
}

fn open_element(e: &BytesStart<'_>, optimizing: bool) -> Result<OpenElement, SvgError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut attributes = IndexMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| SvgError::Xml { position: 0, source })?
            .into_owned();
        if optimizing {
            if is_editor_attribute(&key) {
                continue;
            }
            let cleaned = value.split_whitespace().collect::<Vec<_>>().join(" ");
            if cleaned.is_empty() {
                continue;
            }
            attributes.insert(key, cleaned);
        } else {
            attributes.insert(key, value);
        }
    }
    Ok(OpenElement { name, attributes, children: Vec::new() })
}

fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<SvgNode>,
    node: SvgNode,
    optimizing: bool,
) -> Result<(), SvgError> {
    if optimizing && is_empty_container(&node) {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => return Err(SvgError::MultipleRoots),
        None => *root = Some(node),
    }
    Ok(())
}

fn push_text(stack: &mut [OpenElement], value: String) -> Result<(), SvgError> {
    if value.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(SvgNode::Text { value });
            Ok(())
        }
        None => Err(SvgError::StrayText(value)),
    }
}

fn is_dropped_element(name: &str) -> bool {
    DROPPED_ELEMENTS.contains(&name) || EDITOR_PREFIXES.iter().any(|p| name.starts_with(p))
}

fn is_editor_attribute(key: &str) -> bool {
    EDITOR_NS_DECLS.contains(&key) || EDITOR_PREFIXES.iter().any(|p| key.starts_with(p))
}

fn is_empty_container(node: &SvgNode) -> bool {
    match node {
        SvgNode::Element { name, children, .. } => {
            children.is_empty() && EMPTY_CONTAINERS.contains(&name.as_str())
        }
        SvgNode::Text { .. } => false,
    }
}
