//! 图标变体模块：
//! - 固定的五种变体及其规范顺序（light → regular → filled → duotone → duotone-line）
//! - 变体名解析与 `regular` 回退规则（与生成的 IconBase 保持一致）

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// 图标变体。声明顺序即规范顺序，`Ord` 依赖该顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Variant {
    Light,
    Regular,
    Filled,
    Duotone,
    DuotoneLine,
}

impl Variant {
    /// 规范顺序的全部变体
    pub(crate) const ALL: [Variant; 5] = [
        Variant::Light,
        Variant::Regular,
        Variant::Filled,
        Variant::Duotone,
        Variant::DuotoneLine,
    ];

    /// 未指定或无法识别时使用的变体
    pub(crate) const DEFAULT: Variant = Variant::Regular;

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Variant::Light => "light",
            Variant::Regular => "regular",
            Variant::Filled => "filled",
            Variant::Duotone => "duotone",
            Variant::DuotoneLine => "duotone-line",
        }
    }

    /// 组件 `variant` 属性 -> 变体；缺省或未知值回退到 regular。
    pub(crate) fn from_prop(requested: Option<&str>) -> Variant {
        requested
            .and_then(|s| s.parse().ok())
            .unwrap_or(Variant::DEFAULT)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("未知的图标变体: {}", s))
    }
}
