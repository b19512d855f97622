//! 兼容路径 → 检测模式的推断策略表
//! 每条策略是（路径形态判定 → 模式构建）二元组，按表内顺序求值，首个命中者生效
//! 新增识别能力只需在 [`STRATEGIES`] 中插入条目

use regex_syntax::escape;

use super::constants::{SELECTOR_WITH_PAREN, SINGLETONS};
use crate::core::FileKind;

/// 特性所在的技术面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Css,
    Html,
    Js,
}

impl Surface {
    pub fn tag(self) -> &'static str {
        match self {
            Surface::Css => "css",
            Surface::Html => "html",
            Surface::Js => "js",
        }
    }

    pub fn files(self) -> Vec<FileKind> {
        match self {
            Surface::Css => vec![FileKind::Css],
            Surface::Html => vec![FileKind::Html],
            Surface::Js => FileKind::SCRIPT.to_vec(),
        }
    }

    /// 兼容路径的技术面；不属于任何已知前缀时返回 None
    pub fn of_token(token: &str) -> Option<Self> {
        if token.starts_with("css.") {
            Some(Surface::Css)
        } else if token.starts_with("html.") {
            Some(Surface::Html)
        } else if token.starts_with("api.") || token.starts_with("javascript.") || token.starts_with("js.") {
            Some(Surface::Js)
        } else {
            None
        }
    }

    /// 路径优先级：css < html < api < 通用 js（越小越优先）
    pub fn token_priority(token: &str) -> Option<u8> {
        if token.starts_with("css.") {
            Some(0)
        } else if token.starts_with("html.") {
            Some(1)
        } else if token.starts_with("api.") {
            Some(2)
        } else if token.starts_with("javascript.") || token.starts_with("js.") {
            Some(3)
        } else {
            None
        }
    }
}

/// 推断结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub surface: Surface,
    pub pattern: String,
    pub flags: &'static str,
}

impl Guess {
    fn new(surface: Surface, pattern: String) -> Self {
        Self {
            surface,
            pattern,
            flags: "g",
        }
    }
}

/// 单条推断策略
pub struct InferenceStrategy {
    pub name: &'static str,
    pub applies: fn(&[&str]) -> bool,
    pub build: fn(&[&str]) -> Option<Guess>,
}

impl std::fmt::Debug for InferenceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceStrategy").field("name", &self.name).finish()
    }
}

fn seg<'a>(parts: &[&'a str], idx: usize) -> Option<&'a str> {
    parts.get(idx).copied().filter(|s| !s.is_empty())
}

fn is_lowercase_initial(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

// ======================== CSS ========================

fn css_range_syntax(p: &[&str]) -> bool {
    p.first() == Some(&"css")
        && match (seg(p, 1), seg(p, 2), seg(p, 3)) {
            (Some("media"), Some("range-syntax"), _) => true,
            (Some("at-rules"), Some("media"), Some(sub)) => sub == "range_syntax" || sub == "range-syntax",
            _ => false,
        }
}

fn build_css_range_syntax(_: &[&str]) -> Option<Guess> {
    Some(Guess::new(
        Surface::Css,
        r"@media[^\{]*\([^)<>]*[<>]=?[^)]+\)".to_string(),
    ))
}

fn css_property(p: &[&str]) -> bool {
    p.first() == Some(&"css") && seg(p, 1) == Some("properties") && seg(p, 2).is_some()
}

fn build_css_property(p: &[&str]) -> Option<Guess> {
    let name = seg(p, 2)?;
    Some(Guess::new(Surface::Css, format!(r"\b{}\s*:", escape(name))))
}

fn css_at_rule(p: &[&str]) -> bool {
    p.first() == Some(&"css") && seg(p, 1) == Some("at-rules") && seg(p, 2).is_some()
}

fn build_css_at_rule(p: &[&str]) -> Option<Guess> {
    let name = seg(p, 2)?;
    Some(Guess::new(Surface::Css, format!(r"@{}\b", escape(name))))
}

fn css_selector(p: &[&str]) -> bool {
    p.first() == Some(&"css") && seg(p, 1) == Some("selectors") && seg(p, 2).is_some()
}

fn build_css_selector(p: &[&str]) -> Option<Guess> {
    let name = seg(p, 2)?;
    let pattern = if SELECTOR_WITH_PAREN.contains(name) {
        format!(r":{}\s*\(", escape(name))
    } else {
        format!(r":{}\b", escape(name))
    };
    Some(Guess::new(Surface::Css, pattern))
}

fn css_type_function(p: &[&str]) -> bool {
    p.first() == Some(&"css") && seg(p, 1) == Some("types") && seg(p, 2).is_some() && seg(p, 3).is_some()
}

fn build_css_type_function(p: &[&str]) -> Option<Guess> {
    let function = seg(p, 3)?;
    Some(Guess::new(Surface::Css, format!(r"\b{}\s*\(", escape(function))))
}

// ======================== HTML ========================

fn html_element(p: &[&str]) -> bool {
    p.first() == Some(&"html") && seg(p, 1) == Some("elements") && seg(p, 2).is_some() && seg(p, 3).is_none()
}

fn build_html_element(p: &[&str]) -> Option<Guess> {
    let tag = seg(p, 2)?;
    Some(Guess::new(Surface::Html, format!(r"<{}\b", escape(tag))))
}

fn html_global_attribute(p: &[&str]) -> bool {
    p.first() == Some(&"html") && seg(p, 1) == Some("global_attributes") && seg(p, 2).is_some()
}

fn build_html_global_attribute(p: &[&str]) -> Option<Guess> {
    let attr = seg(p, 2)?;
    Some(Guess::new(
        Surface::Html,
        format!(r#"\b{}\s*=\s*['"][^'"]+['"]"#, escape(attr)),
    ))
}

fn html_element_attribute(p: &[&str]) -> bool {
    p.first() == Some(&"html") && seg(p, 1) == Some("elements") && seg(p, 2).is_some() && seg(p, 3).is_some()
}

fn build_html_element_attribute(p: &[&str]) -> Option<Guess> {
    let (tag, attr) = (seg(p, 2)?, seg(p, 3)?);
    Some(Guess::new(
        Surface::Html,
        format!(r"<{}\b[^>]*\b{}\s*=", escape(tag), escape(attr)),
    ))
}

// ======================== Web API ========================

fn is_api(p: &[&str]) -> bool {
    p.first() == Some(&"api") && seg(p, 1).is_some()
}

fn api_constructor(p: &[&str]) -> bool {
    is_api(p) && seg(p, 2).is_some() && seg(p, 2) == seg(p, 1)
}

fn build_api_constructor(p: &[&str]) -> Option<Guess> {
    let interface = seg(p, 1)?;
    Some(Guess::new(Surface::Js, format!(r"\bnew\s+{}\s*\(", escape(interface))))
}

fn api_singleton_member(p: &[&str]) -> bool {
    is_api(p) && seg(p, 2).is_some() && seg(p, 1).is_some_and(|iface| SINGLETONS.contains_key(iface))
}

fn build_api_singleton_member(p: &[&str]) -> Option<Guess> {
    let singleton = SINGLETONS.get(seg(p, 1)?)?;
    let member = seg(p, 2)?;
    let pattern = if is_lowercase_initial(member) {
        format!(r"{}\.{}\s*\(", singleton, escape(member))
    } else {
        format!(r"{}\.{}\b", singleton, escape(member))
    };
    Some(Guess::new(Surface::Js, pattern))
}

fn api_instance_method(p: &[&str]) -> bool {
    is_api(p) && seg(p, 2).is_some_and(is_lowercase_initial)
}

fn build_member_call(p: &[&str]) -> Option<Guess> {
    let member = seg(p, 2)?;
    Some(Guess::new(Surface::Js, format!(r"\.{}\s*\(", escape(member))))
}

fn api_interface(p: &[&str]) -> bool {
    is_api(p)
}

fn build_bare_interface(p: &[&str]) -> Option<Guess> {
    let interface = seg(p, 1)?;
    Some(Guess::new(Surface::Js, format!(r"\b{}\b", escape(interface))))
}

// ======================== JS 内置对象 ========================

fn is_js_builtin(p: &[&str]) -> bool {
    matches!(p.first(), Some(&"javascript") | Some(&"js"))
        && seg(p, 1) == Some("builtins")
        && seg(p, 2).is_some()
}

fn js_builtin_constructor(p: &[&str]) -> bool {
    is_js_builtin(p) && seg(p, 3).is_some() && seg(p, 3) == seg(p, 2)
}

fn build_js_builtin_constructor(p: &[&str]) -> Option<Guess> {
    let object = seg(p, 2)?;
    Some(Guess::new(Surface::Js, format!(r"\bnew\s+{}\s*\(", escape(object))))
}

fn js_builtin_method(p: &[&str]) -> bool {
    is_js_builtin(p) && seg(p, 3).is_some_and(is_lowercase_initial)
}

fn build_js_builtin_method(p: &[&str]) -> Option<Guess> {
    let method = seg(p, 3)?;
    Some(Guess::new(Surface::Js, format!(r"\.{}\s*\(", escape(method))))
}

fn js_builtin_object(p: &[&str]) -> bool {
    is_js_builtin(p) && seg(p, 3).is_none()
}

fn build_js_builtin_object(p: &[&str]) -> Option<Guess> {
    let object = seg(p, 2)?;
    Some(Guess::new(Surface::Js, format!(r"\b{}\b", escape(object))))
}

/// 推断策略表（顺序即优先级）
pub static STRATEGIES: &[InferenceStrategy] = &[
    InferenceStrategy { name: "css-range-syntax", applies: css_range_syntax, build: build_css_range_syntax },
    InferenceStrategy { name: "css-property", applies: css_property, build: build_css_property },
    InferenceStrategy { name: "css-at-rule", applies: css_at_rule, build: build_css_at_rule },
    InferenceStrategy { name: "css-selector", applies: css_selector, build: build_css_selector },
    InferenceStrategy { name: "css-type-function", applies: css_type_function, build: build_css_type_function },
    InferenceStrategy { name: "html-element", applies: html_element, build: build_html_element },
    InferenceStrategy { name: "html-global-attribute", applies: html_global_attribute, build: build_html_global_attribute },
    InferenceStrategy { name: "html-element-attribute", applies: html_element_attribute, build: build_html_element_attribute },
    InferenceStrategy { name: "api-constructor", applies: api_constructor, build: build_api_constructor },
    InferenceStrategy { name: "api-singleton-member", applies: api_singleton_member, build: build_api_singleton_member },
    InferenceStrategy { name: "api-instance-method", applies: api_instance_method, build: build_member_call },
    InferenceStrategy { name: "api-interface", applies: api_interface, build: build_bare_interface },
    InferenceStrategy { name: "js-builtin-constructor", applies: js_builtin_constructor, build: build_js_builtin_constructor },
    InferenceStrategy { name: "js-builtin-method", applies: js_builtin_method, build: build_js_builtin_method },
    InferenceStrategy { name: "js-builtin-object", applies: js_builtin_object, build: build_js_builtin_object },
];

/// 对单个兼容路径求值策略表，首个命中的策略决定结果
pub fn infer_from_token(token: &str) -> Option<Guess> {
    let parts: Vec<&str> = token.split('.').collect();
    let strategy = STRATEGIES.iter().find(|s| (s.applies)(&parts))?;
    log::trace!("Token {} matched inference strategy {}", token, strategy.name);
    (strategy.build)(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compiled(token: &str) -> Regex {
        let guess = infer_from_token(token).unwrap_or_else(|| panic!("no guess for {}", token));
        Regex::new(&guess.pattern).unwrap()
    }

    #[test]
    fn test_css_property() {
        let guess = infer_from_token("css.properties.gap").unwrap();
        assert_eq!(guess.surface, Surface::Css);
        let re = compiled("css.properties.gap");
        assert!(re.is_match("display: grid; gap: 1rem;"));
        assert!(!re.is_match("gap"));
        assert!(compiled("css.properties.text-wrap").is_match("text-wrap : balance"));
    }

    #[test]
    fn test_css_at_rule_and_types() {
        assert!(compiled("css.at-rules.container").is_match("@container (min-width: 1px)"));
        assert!(!compiled("css.at-rules.container").is_match("@containers"));
        let re = compiled("css.types.color.color-mix");
        assert!(re.is_match("color: color-mix(in srgb, red, blue)"));
    }

    #[test]
    fn test_css_selector_paren_allow_list() {
        let has = compiled("css.selectors.has");
        assert!(has.is_match("a:has (img)"));
        assert!(!has.is_match("a:has img"));

        let dir = compiled("css.selectors.dir");
        assert!(dir.is_match(":dir(rtl)"));
        assert!(dir.is_match("p:dir "));
        assert_eq!(infer_from_token("css.selectors.dir").unwrap().pattern, r":dir\b");
    }

    #[test]
    fn test_css_range_syntax_special_case() {
        for token in ["css.media.range-syntax", "css.at-rules.media.range_syntax"] {
            let re = compiled(token);
            assert!(re.is_match("@media (width >= 600px) {"), "{}", token);
            assert!(!re.is_match("@media (min-width: 600px) {"), "{}", token);
        }
        assert!(compiled("css.at-rules.media").is_match("@media screen"));
    }

    #[test]
    fn test_html_shapes() {
        let dialog = compiled("html.elements.dialog");
        assert!(dialog.is_match("<dialog open>"));
        assert!(!dialog.is_match("<dialogs>"));

        let inert = compiled("html.global_attributes.inert");
        assert!(inert.is_match(r#"<div inert="true">"#));

        let loading = compiled("html.elements.img.loading");
        assert!(loading.is_match(r#"<img src="a.png" loading="lazy">"#));
        assert!(!loading.is_match(r#"<iframe loading="lazy">"#));
    }

    #[test]
    fn test_api_shapes() {
        assert!(compiled("api.URLPattern.URLPattern").is_match("const p = new URLPattern({})"));
        assert!(compiled("api.Clipboard.writeText").is_match("navigator.clipboard.writeText(x)"));
        assert!(!compiled("api.Clipboard.writeText").is_match("foo.writeText(x)"));
        assert!(compiled("api.Document.startViewTransition").is_match("document.startViewTransition ("));
        assert!(compiled("api.Navigator.GPU").is_match("navigator.GPU"));
        assert!(compiled("api.HTMLDialogElement.showModal").is_match("dlg.showModal()"));
        assert!(compiled("api.EyeDropper").is_match("if (EyeDropper) {}"));
    }

    #[test]
    fn test_js_builtins() {
        assert!(compiled("javascript.builtins.Array.at").is_match("arr.at(-1)"));
        assert!(compiled("javascript.builtins.WeakRef.WeakRef").is_match("new WeakRef(obj)"));
        assert!(compiled("javascript.builtins.Temporal").is_match("Temporal.Now"));
        assert!(infer_from_token("javascript.operators.optional_chaining").is_none());
    }

    #[test]
    fn test_unusable_tokens() {
        assert!(infer_from_token("css").is_none());
        assert!(infer_from_token("css.properties").is_none());
        assert!(infer_from_token("webextensions.api.tabs").is_none());
        assert!(infer_from_token("api").is_none());
    }

    #[test]
    fn test_metacharacters_escaped() {
        let guess = infer_from_token("css.properties.a+b").unwrap();
        let re = Regex::new(&guess.pattern).unwrap();
        assert!(re.is_match("a+b: 1"));
        assert!(!re.is_match("aab: 1"));
    }

    #[test]
    fn test_priority() {
        assert!(Surface::token_priority("css.x") < Surface::token_priority("html.x"));
        assert!(Surface::token_priority("api.x") < Surface::token_priority("javascript.x"));
        assert_eq!(Surface::token_priority("svg.x"), None);
    }
}
