//! 图标汇总模块（convert 阶段）：
//! - 扫描 `<icons>/<variant>/*.svg`，优化并解析为 `SvgNode`
//! - 按图标名合并各变体，变体按规范顺序排列
//! - 将汇总结果写成中间模块 `export default [...] as const;`，并可读回

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    render::{js_key, js_string},
    svg::{self, SvgNode},
    utils::is_icon_name,
    variant::Variant,
};

/// 某个变体下的图标树
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct VariantEntry {
    pub(crate) variant: Variant,
    pub(crate) svg: SvgNode,
}

/// 单个图标在所有变体下的合并记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IconRecord {
    pub(crate) name: String,
    pub(crate) variants: Vec<VariantEntry>,
}

impl IconRecord {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), variants: Vec::new() }
    }

    /// 按规范顺序插入；同一变体再次出现时覆盖
    pub(crate) fn insert(&mut self, variant: Variant, svg: SvgNode) {
        match self.variants.binary_search_by(|e| e.variant.cmp(&variant)) {
            Ok(idx) => self.variants[idx].svg = svg,
            Err(idx) => self.variants.insert(idx, VariantEntry { variant, svg }),
        }
    }

    pub(crate) fn get(&self, variant: Variant) -> Option<&SvgNode> {
        self.variants.iter().find(|e| e.variant == variant).map(|e| &e.svg)
    }

    /// 与 IconBase 相同的选择规则：请求的变体缺失或无法识别时回退到 regular
    pub(crate) fn resolve(&self, requested: Option<&str>) -> Option<&SvgNode> {
        self.get(Variant::from_prop(requested))
            .or_else(|| self.get(Variant::DEFAULT))
    }
}

/// 按发现顺序排列的全部图标
pub(crate) type Collection = Vec<IconRecord>;

/// 扫描图标根目录并合并为 Collection；任一文件读取或解析失败即整体失败。
pub(crate) fn aggregate(icons_root: &Path) -> Result<Collection> {
    if !icons_root.is_dir() {
        bail!("图标目录不存在: {}", icons_root.display());
    }

    let mut collection: Collection = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for variant in Variant::ALL {
        let variant_dir = icons_root.join(variant.as_str());
        if !variant_dir.is_dir() {
            warn!("⚠️ 变体目录不存在，已跳过: {}", variant_dir.display());
            continue;
        }
        let files = list_svg_files(&variant_dir)?;
        debug!("{}: {} 个 SVG 文件", variant, files.len());

        for path in files {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                bail!("无法识别的文件名: {}", path.display());
            };
            if !is_icon_name(&name) {
                warn!("⚠️ 图标名不是小写连字符形式: {}", path.display());
            }
            let node = load_svg(&path)?;
            let slot = *index.entry(name.clone()).or_insert_with(|| {
                collection.push(IconRecord::new(name.clone()));
                collection.len() - 1
            });
            collection[slot].insert(variant, node);
        }
    }

    info!("共汇总 {} 个图标", collection.len());
    Ok(collection)
}

/// 目录下的 `*.svg` 普通文件，按文件名排序
fn list_svg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("读取目录失败: {}", dir.display()))? {
        let entry = entry.with_context(|| format!("读取目录失败: {}", dir.display()))?;
        let path = entry.path();
        // is_file 跟随符号链接
        if path.extension().is_some_and(|ext| ext == "svg") && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// 读取、优化并解析单个 SVG 文件
pub(crate) fn load_svg(path: &Path) -> Result<SvgNode> {
    let raw = fs::read_to_string(path).with_context(|| format!("读取 SVG 失败: {}", path.display()))?;
    let optimized = svg::optimize(&raw).with_context(|| format!("优化 SVG 失败: {}", path.display()))?;
    let node = svg::parse(&optimized).with_context(|| format!("解析 SVG 失败: {}", path.display()))?;
    Ok(node)
}

/// 将 Collection 序列化为中间模块源码（键顺序固定，标识符键不加引号）
pub(crate) fn module_source(collection: &[IconRecord]) -> String {
    let mut out = String::from("export default [\n");
    for icon in collection {
        out.push_str("  {\n");
        out.push_str(&format!("    name: {},\n", js_string(&icon.name)));
        out.push_str("    variants: [\n");
        for entry in &icon.variants {
            out.push_str("      {\n");
            out.push_str(&format!("        variant: {},\n", js_string(entry.variant.as_str())));
            out.push_str("        svg: ");
            write_node(&mut out, &entry.svg, 4);
            out.push_str("\n      },\n");
        }
        out.push_str("    ],\n");
        out.push_str("  },\n");
    }
    out.push_str("] as const;\n");
    out
}

fn write_node(out: &mut String, node: &SvgNode, depth: usize) {
    let pad = "  ".repeat(depth + 1);
    let close = "  ".repeat(depth);
    match node {
        SvgNode::Text { value } => {
            out.push_str(&format!("{{ type: \"text\", value: {} }}", js_string(value)));
        }
        SvgNode::Element { name, attributes, children } => {
            out.push_str("{\n");
            out.push_str(&format!("{pad}type: \"element\",\n"));
            out.push_str(&format!("{pad}name: {},\n", js_string(name)));
            if attributes.is_empty() {
                out.push_str(&format!("{pad}attributes: {{}},\n"));
            } else {
                out.push_str(&format!("{pad}attributes: {{\n"));
                for (k, v) in attributes {
                    out.push_str(&format!("{pad}  {}: {},\n", js_key(k), js_string(v)));
                }
                out.push_str(&format!("{pad}}},\n"));
            }
            if children.is_empty() {
                out.push_str(&format!("{pad}children: [],\n"));
            } else {
                out.push_str(&format!("{pad}children: [\n"));
                for child in children {
                    out.push_str(&format!("{pad}  "));
                    write_node(out, child, depth + 2);
                    out.push_str(",\n");
                }
                out.push_str(&format!("{pad}],\n"));
            }
            out.push_str(&format!("{close}}}"));
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ModuleError {
    #[error("中间模块缺少 `export default` 数组")]
    MissingExport,
    #[error("中间模块内容无法解析: {0}")]
    Syntax(#[from] json5::Error),
}

/// 读回中间模块源码
pub(crate) fn parse_module(source: &str) -> Result<Collection, ModuleError> {
    let body = source
        .trim()
        .strip_prefix("export default")
        .ok_or(ModuleError::MissingExport)?
        .trim();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    let body = body.strip_suffix("as const").unwrap_or(body).trim_end();
    if !body.starts_with('[') {
        return Err(ModuleError::MissingExport);
    }
    Ok(json5::from_str(body)?)
}

pub(crate) fn write_module(collection: &[IconRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建目录失败: {}", parent.display()))?;
        }
    }
    fs::write(path, module_source(collection))
        .with_context(|| format!("写入中间模块失败: {}", path.display()))?;
    Ok(())
}

pub(crate) fn read_module(path: &Path) -> Result<Collection> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("读取中间模块失败: {}（是否已运行 convert？）", path.display()))?;
    let collection =
        parse_module(&source).with_context(|| format!("解析中间模块失败: {}", path.display()))?;
    Ok(collection)
}

/// convert 阶段：汇总并写出中间模块
pub(crate) fn convert(icons_root: &Path, module_path: &Path) -> Result<Collection> {
    let collection = aggregate(icons_root)?;
    write_module(&collection, module_path)?;
    info!(
        "✅ 已转换 {} 个图标 -> {}",
        collection.len(),
        module_path.display()
    );
    Ok(collection)
}
