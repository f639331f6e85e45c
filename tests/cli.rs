//! `zappgen` 命令行集成测试：
//! - 每个用例在临时目录中布置图标集，在该目录下运行二进制
//! - 检查退出码与生成的文件

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const STAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="24" height="24"><path d="M1 1" fill="#000"/></svg>"##;

fn write_icon(root: &Path, variant: &str, name: &str, svg: &str) {
    let dir = root.join("core").join("icons").join(variant);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.svg")), svg).unwrap();
}

/// 在 `dir` 中运行 zappgen（清除 ZAPPGEN_* 环境变量）
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zappgen"))
        .current_dir(dir)
        .env_remove("ZAPPGEN_CONFIG")
        .env_remove("ZAPPGEN_ICONS_DIR")
        .env_remove("ZAPPGEN_MODULE")
        .env_remove("ZAPPGEN_OUT")
        .env_remove("ZAPPGEN_TEMPLATES")
        .env_remove("ZAPPGEN_SKIP_REFRESH")
        .args(args)
        .output()
        .expect("无法运行 zappgen")
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

// ============================================================================
// convert 与 generate 分阶段运行
// ============================================================================

#[test]
fn test_convert_then_generate() {
    let tmp = TempDir::new().unwrap();
    for variant in ["light", "regular", "filled"] {
        write_icon(tmp.path(), variant, "star", STAR);
    }

    let out = run(tmp.path(), &["convert"]);
    assert!(out.status.success(), "convert 失败: {}", String::from_utf8_lossy(&out.stderr));
    let module = read(tmp.path(), "core/src/index.ts");
    assert!(module.starts_with("export default ["));
    assert!(module.contains("variant: \"filled\""));

    let out = run(tmp.path(), &["generate", "--skip-refresh"]);
    assert!(out.status.success(), "generate 失败: {}", String::from_utf8_lossy(&out.stderr));

    let map = read(tmp.path(), "src/variants/star.ts");
    assert_eq!(map.lines().filter(|l| l.starts_with("[\"")).count(), 3);
    assert!(!map.contains("fill:"));
    assert!(!map.contains("viewBox"));
    assert!(map.ends_with("export default starVariants\n"));

    let component = read(tmp.path(), "src/icons/star.tsx");
    assert!(component.contains("Star.displayName = \"Star\""));
    assert!(component.contains("@duotone (missing)"));

    assert_eq!(
        read(tmp.path(), "src/index.ts"),
        "export { default as Star } from \"./icons/star\";\n"
    );
}

#[test]
fn test_build_with_config_file() {
    let tmp = TempDir::new().unwrap();
    write_icon(tmp.path(), "regular", "arrow-up", STAR);
    fs::write(
        tmp.path().join("zappgen.yaml"),
        "out_dir: generated\nrefresh:\n  enabled: false\n",
    )
    .unwrap();

    let out = run(tmp.path(), &["build"]);
    assert!(out.status.success(), "build 失败: {}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("generated/icons/arrow-up.tsx").is_file());
    assert_eq!(
        read(tmp.path(), "generated/index.ts"),
        "export { default as ArrowUp } from \"./icons/arrow-up\";\n"
    );
}

// ============================================================================
// 失败时非零退出
// ============================================================================

#[test]
fn test_broken_svg_fails_without_module() {
    let tmp = TempDir::new().unwrap();
    write_icon(tmp.path(), "regular", "star", STAR);
    write_icon(tmp.path(), "regular", "broken", "<svg><path></svg>");

    let out = run(tmp.path(), &["convert"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("broken.svg"));
    assert!(!tmp.path().join("core/src/index.ts").exists());
}

#[test]
fn test_generate_without_module_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["generate", "--skip-refresh"]);
    assert!(!out.status.success());
}

#[cfg(unix)]
#[test]
fn test_failed_refresh_aborts_build() {
    let tmp = TempDir::new().unwrap();
    write_icon(tmp.path(), "regular", "star", STAR);
    fs::write(tmp.path().join("zappgen.yaml"), "refresh:\n  command: [\"false\"]\n").unwrap();

    let out = run(tmp.path(), &["build"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("core/src/index.ts").exists());
    assert!(!tmp.path().join("src").exists());
}

#[test]
fn test_missing_variant_dirs_only_warn() {
    let tmp = TempDir::new().unwrap();
    write_icon(tmp.path(), "duotone", "moon", STAR);

    let out = run(tmp.path(), &["convert"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("light"));
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_scaffold_is_usable() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["init"]);
    assert!(out.status.success());
    assert!(tmp.path().join("zappgen.yaml").is_file());
    assert!(tmp.path().join("templates/index.ts.tera").is_file());

    write_icon(tmp.path(), "regular", "star", STAR);
    let out = run(tmp.path(), &["build", "--skip-refresh"]);
    assert!(out.status.success(), "build 失败: {}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("src/icons/star.tsx").is_file());
}
