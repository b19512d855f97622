//! 内置规则与规则包
//! 进程内懒加载一次，之后只读

use baseline_guard_engine::{compile_wire_rules, FileKind, PackRegistry, Rule, WireRule};
use once_cell::sync::Lazy;

struct BuiltinDef {
    id: &'static str,
    feature_id: &'static str,
    files: &'static [FileKind],
    pattern: &'static str,
    message: &'static str,
    tags: &'static [&'static str],
    docs: Option<&'static str>,
}

const DEFS: &[BuiltinDef] = &[
    BuiltinDef {
        id: "css-has",
        feature_id: "has",
        files: &[FileKind::Css, FileKind::Js, FileKind::Ts, FileKind::Tsx],
        pattern: r":has\s*\(",
        message: "CSS :has() selector may not be in your baseline.",
        tags: &["css", "popular", "bug-prone"],
        docs: Some("https://developer.mozilla.org/docs/Web/CSS/:has"),
    },
    BuiltinDef {
        id: "css-container-queries",
        feature_id: "container-queries",
        files: &[FileKind::Css],
        pattern: r"@container\b",
        message: "CSS Container Queries may not be in your baseline.",
        tags: &["css", "popular"],
        docs: None,
    },
    BuiltinDef {
        id: "css-nesting",
        feature_id: "nesting",
        files: &[FileKind::Css],
        pattern: r"&[^{};]*\{",
        message: "CSS Nesting may not be in your baseline.",
        tags: &["css", "popular"],
        docs: None,
    },
    BuiltinDef {
        id: "html-dialog",
        feature_id: "dialog",
        files: &[FileKind::Html, FileKind::Js, FileKind::Ts, FileKind::Tsx],
        pattern: r"<dialog\b|\.showModal\s*\(",
        message: "<dialog> element or dialog API may not be safe.",
        tags: &["html", "bug-prone"],
        docs: None,
    },
    BuiltinDef {
        id: "webgpu",
        feature_id: "webgpu",
        files: &[FileKind::Js, FileKind::Ts, FileKind::Tsx],
        pattern: r"\bnavigator\.gpu\b",
        message: "WebGPU may not be in your baseline.",
        tags: &["js", "experimental", "bug-prone"],
        docs: None,
    },
];

impl BuiltinDef {
    fn to_wire(&self) -> WireRule {
        WireRule {
            id: self.id.to_string(),
            feature_id: self.feature_id.to_string(),
            files: self.files.to_vec(),
            pattern: self.pattern.to_string(),
            flags: Some("g".to_string()),
            message: self.message.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            docs: self.docs.map(str::to_string),
        }
    }
}

/// 内置规则（定义顺序）
pub static BUILTIN_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let wires: Vec<WireRule> = DEFS.iter().map(BuiltinDef::to_wire).collect();
    compile_wire_rules(&wires)
});

/// 内置规则包
pub static BUILTIN_PACKS: Lazy<PackRegistry> = Lazy::new(|| {
    PackRegistry::new()
        .with_pack("core", ["css-has", "css-container-queries", "html-dialog"])
        .with_pack("popular", ["css-has", "css-container-queries", "css-nesting"])
        .with_pack("risky", ["webgpu"])
        .with_pack("experimental", ["webgpu"])
});

pub fn builtin_rules() -> &'static [Rule] {
    &BUILTIN_RULES
}

pub fn builtin_packs() -> &'static PackRegistry {
    &BUILTIN_PACKS
}
