use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

/// 生成规则统一追加的标签，用于区分推断规则与人工维护规则
pub const GENERATED_TAG: &str = "generated";

/// 全局单例对象：接口名 → 代码中的访问路径（已是正则片段）
pub static SINGLETONS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("Document", "document"),
        ("Navigator", "navigator"),
        ("Window", "window"),
        ("Screen", "screen"),
        ("MediaDevices", r"navigator\.mediaDevices"),
        ("MediaSession", r"navigator\.mediaSession"),
        ("Clipboard", r"navigator\.clipboard"),
        ("Permissions", r"navigator\.permissions"),
        ("StorageManager", r"navigator\.storage"),
    ]
    .into_iter()
    .collect()
});

/// 手写模式（绕过兼容路径推断）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialPattern {
    pub pattern: &'static str,
    pub flags: &'static str,
}

/// 非 Web API 的 JS 语言特性：特性ID → 手写模式
/// 推断前优先查表
pub static JS_LANGUAGE_SPECIAL: Lazy<FxHashMap<&'static str, SpecialPattern>> = Lazy::new(|| {
    [
        ("js-regexp-lookbehind", r"\(\?<=|\(\?<!"),
        ("js-regexp-named-capture-groups", r"\(\?<[\w$]+"),
        ("js-regexp-unicode-sets", r"/[^/\n\\]*(?:\\.[^/\n\\]*)*/v"),
        ("js-regexp-has-indices", r"/[^/\n\\]*(?:\\.[^/\n\\]*)*/d"),
        ("string-matchall", r"\.\s*matchAll\s*\("),
        ("string-replaceall", r"\.\s*replaceAll\s*\("),
    ]
    .into_iter()
    .map(|(id, pattern)| (id, SpecialPattern { pattern, flags: "g" }))
    .collect()
});

/// 必须带参数的 CSS 伪类：生成的模式要求其后紧跟 `(`
/// `:dir` 不在表内，按普通伪类处理
pub static SELECTOR_WITH_PAREN: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "has",
        "is",
        "where",
        "not",
        "nth-child",
        "nth-last-child",
        "nth-of-type",
        "nth-last-of-type",
        "lang",
    ]
    .into_iter()
    .collect()
});
