//! 组件生成模块（generate 阶段）：
//! - 按 Tera 模板渲染每个图标的组件文件与变体映射文件
//! - 渲染 index 与共用的 IconBase / 类型文件
//! - 模板内置于二进制中，可用模板目录按文件名覆盖

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use include_dir::{include_dir, Dir};
use indexmap::IndexMap;
use serde::Serialize;
use std::{fs, path::Path};
use tera::{Context as TContext, Tera};
use tracing::{debug, info, warn};

use crate::{
    aggregate::IconRecord,
    render::render_root,
    svg::SvgNode,
    utils::{to_camel_case, to_pascal_case},
    variant::Variant,
};

static DEFAULT_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

const COMPONENT_TEMPLATE: &str = "component.tsx.tera";
const VARIANTS_TEMPLATE: &str = "variants.ts.tera";
const INDEX_TEMPLATE: &str = "index.ts.tera";
const TYPES_TEMPLATE: &str = "lib/types.ts.tera";
const ICON_BASE_TEMPLATE: &str = "lib/icon-base.tsx.tera";

// IconBase 的默认属性
const DEFAULT_SIZE: u32 = 24;
const DEFAULT_COLOR: &str = "currentColor";
const VIEW_BOX: &str = "0 0 24 24";

// 预览图尺寸与背景
const PREVIEW_SIZE: &str = "20";
const VARIANT_INDENT: &str = "  ";

/// 内置模板：(相对路径, 内容)
pub(crate) fn embedded_templates() -> Vec<(String, &'static str)> {
    let mut out = Vec::new();
    collect_templates(&DEFAULT_TEMPLATES, &mut out);
    out
}

fn collect_templates(dir: &'static Dir<'static>, out: &mut Vec<(String, &'static str)>) {
    for f in dir.files() {
        if let Some(text) = f.contents_utf8() {
            out.push((f.path().to_string_lossy().replace('\\', "/"), text));
        }
    }
    for d in dir.dirs() {
        collect_templates(d, out);
    }
}

/// 已加载的模板集合
pub(crate) struct Templates {
    tera: Tera,
}

impl Templates {
    /// 指定目录时先加载目录中的模板，缺失的再由内置模板补齐
    pub(crate) fn load(dir: Option<&Path>) -> Result<Self> {
        let mut tera = match dir {
            Some(d) => {
                if !d.is_dir() {
                    anyhow::bail!("模板目录不存在: {}", d.display());
                }
                let pattern = d.join("**").join("*.tera");
                let pattern_str = pattern.to_string_lossy().to_string();
                let tera = Tera::new(&pattern_str)
                    .with_context(|| format!("加载模板失败: {}", pattern_str))?;
                info!("使用模板目录: {}", d.display());
                tera
            }
            None => Tera::default(),
        };
        let existing: Vec<String> = tera.get_template_names().map(str::to_string).collect();
        let missing: Vec<(String, &'static str)> = embedded_templates()
            .into_iter()
            .filter(|(name, _)| !existing.contains(name))
            .collect();
        tera.add_raw_templates(missing).context("加载内置模板失败")?;
        tera.autoescape_on(vec![]);
        Ok(Self { tera })
    }

    fn render(&self, name: &str, ctx: &TContext) -> Result<String> {
        self.tera
            .render(name, ctx)
            .with_context(|| format!("渲染模板 {} 失败", name))
    }
}

#[derive(Serialize)]
struct Preview {
    variant: &'static str,
    preview: String,
}

#[derive(Serialize)]
struct VariantCode {
    variant: &'static str,
    code: String,
}

#[derive(Serialize)]
struct IndexEntry<'a> {
    name: &'a str,
    component: String,
}

/// 组件源码：forwardRef 包装 IconBase，文档注释内嵌各变体预览
pub(crate) fn component_source(icon: &IconRecord, templates: &Templates) -> Result<String> {
    let previews: Vec<Preview> = Variant::ALL
        .into_iter()
        .map(|variant| Preview {
            variant: variant.as_str(),
            preview: icon
                .get(variant)
                .map(preview_data_uri)
                .unwrap_or_else(|| "(missing)".to_string()),
        })
        .collect();

    let mut ctx = TContext::new();
    ctx.insert("name", &icon.name);
    ctx.insert("component", &to_pascal_case(&icon.name));
    ctx.insert("previews", &previews);
    templates.render(COMPONENT_TEMPLATE, &ctx)
}

/// 变体映射源码：每个已有变体一条 `[variant, element]`，规范顺序
pub(crate) fn variants_source(icon: &IconRecord, templates: &Templates) -> Result<String> {
    let entries: Vec<VariantCode> = icon
        .variants
        .iter()
        .map(|e| VariantCode {
            variant: e.variant.as_str(),
            code: render_root(&e.svg, VARIANT_INDENT),
        })
        .collect();

    let mut ctx = TContext::new();
    ctx.insert("name", &icon.name);
    ctx.insert("camel", &to_camel_case(&icon.name));
    ctx.insert("entries", &entries);
    templates.render(VARIANTS_TEMPLATE, &ctx)
}

/// index 源码：按 Collection 顺序逐个导出组件
pub(crate) fn index_source(collection: &[IconRecord], templates: &Templates) -> Result<String> {
    let icons: Vec<IndexEntry> = collection
        .iter()
        .map(|icon| IndexEntry { name: &icon.name, component: to_pascal_case(&icon.name) })
        .collect();
    let mut ctx = TContext::new();
    ctx.insert("icons", &icons);
    templates.render(INDEX_TEMPLATE, &ctx)
}

fn lib_context() -> TContext {
    let variants: Vec<&str> = Variant::ALL.iter().map(|v| v.as_str()).collect();
    let mut ctx = TContext::new();
    ctx.insert("variants", &variants);
    ctx.insert("default_variant", Variant::DEFAULT.as_str());
    ctx.insert("default_size", &DEFAULT_SIZE);
    ctx.insert("default_color", DEFAULT_COLOR);
    ctx.insert("view_box", VIEW_BOX);
    ctx
}

/// 预览用 SVG：宽高固定为 20，并在最前面插入白色圆角背景
pub(crate) fn preview_markup(node: &SvgNode) -> String {
    match node {
        SvgNode::Element { name, attributes, children } if name == "svg" => {
            let mut attrs: IndexMap<String, String> = attributes
                .iter()
                .filter(|(k, _)| k.as_str() != "width" && k.as_str() != "height")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            attrs.insert("width".into(), PREVIEW_SIZE.into());
            attrs.insert("height".into(), PREVIEW_SIZE.into());

            let background = SvgNode::element(
                "rect",
                [
                    ("width".to_string(), "100%".to_string()),
                    ("height".to_string(), "100%".to_string()),
                    ("fill".to_string(), "white".to_string()),
                    ("rx".to_string(), "2".to_string()),
                    ("ry".to_string(), "2".to_string()),
                ],
                Vec::new(),
            );
            let mut kids = Vec::with_capacity(children.len() + 1);
            kids.push(background);
            kids.extend(children.iter().cloned());
            SvgNode::Element { name: name.clone(), attributes: attrs, children: kids }.to_markup()
        }
        other => other.to_markup(),
    }
}

/// Markdown 图片形式的 base64 data URI，供编辑器悬停预览
pub(crate) fn preview_data_uri(node: &SvgNode) -> String {
    format!(
        "![img](data:image/svg+xml;base64,{})",
        STANDARD.encode(preview_markup(node))
    )
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建目录失败: {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("写入失败: {}", path.display()))?;
    debug!("写入: {}", path.display());
    Ok(())
}

/// generate 阶段：写出 lib、变体映射、组件与 index
pub(crate) fn generate(collection: &[IconRecord], out_dir: &Path, templates: &Templates) -> Result<()> {
    let lib = lib_context();
    write_file(
        &out_dir.join("lib").join("types.ts"),
        &templates.render(TYPES_TEMPLATE, &lib)?,
    )?;
    write_file(
        &out_dir.join("lib").join("icon-base.tsx"),
        &templates.render(ICON_BASE_TEMPLATE, &lib)?,
    )?;

    let variants_dir = out_dir.join("variants");
    for icon in collection {
        if icon.resolve(None).is_none() {
            warn!("⚠️ 图标 {} 缺少 regular 变体，未指定 variant 时不会渲染内容", icon.name);
        }
        write_file(
            &variants_dir.join(format!("{}.ts", icon.name)),
            &variants_source(icon, templates)?,
        )?;
    }
    info!("✅ 已生成 {} 个图标的变体映射", collection.len());

    let icons_dir = out_dir.join("icons");
    for icon in collection {
        write_file(
            &icons_dir.join(format!("{}.tsx", icon.name)),
            &component_source(icon, templates)?,
        )?;
    }
    info!("✅ 已生成 {} 个图标组件", collection.len());

    write_file(&out_dir.join("index.ts"), &index_source(collection, templates)?)?;
    info!("✅ 已生成 index 文件 -> {}", out_dir.join("index.ts").display());
    Ok(())
}
