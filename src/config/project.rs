//! 项目配置文件 `baseline.config.json` 的宽松解析与规则注入
//! 字段类型不符按缺失处理；JSON 损坏视为无配置

use baseline_guard_engine::WireRule;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{GuardError, GuardResult};
use baseline_guard_engine::utils::log_format::preview_compact;

pub const BASELINE_CONFIG_FILENAME: &str = "baseline.config.json";

/// 运行模式：`error` 模式下发现问题时以非零状态退出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Off,
    #[default]
    Warn,
    Error,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Warn => "warn",
            Mode::Error => "error",
        }
    }

    /// 宽松解析：非字符串或未知取值返回 None
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl FromStr for Mode {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Mode::Off),
            "warn" => Ok(Mode::Warn),
            "error" => Ok(Mode::Error),
            other => Err(GuardError::InvalidInput(format!("unknown mode \"{}\"", other))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已解析的项目配置
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineConfig {
    pub targets: Option<Vec<String>>,
    pub mode: Option<Mode>,
    /// 内联规则；无法解析为规则结构的条目已被丢弃
    pub rules: Option<Vec<WireRule>>,
}

impl BaselineConfig {
    pub fn from_value(value: &Value) -> Self {
        let targets = value.get("targets").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
        let mode = value.get("mode").and_then(Mode::from_value);
        let rules = value
            .get("rules")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(parse_wire_rule).collect());

        Self {
            targets,
            mode,
            rules,
        }
    }

    pub fn has_targets(&self) -> bool {
        self.targets.as_ref().is_some_and(|t| !t.is_empty())
    }
}

fn parse_wire_rule(value: &Value) -> Option<WireRule> {
    match serde_json::from_value::<WireRule>(value.clone()) {
        Ok(rule) => Some(rule),
        Err(e) => {
            let id = value.get("id").and_then(Value::as_str).unwrap_or("<unknown>");
            log::warn!(
                "Ignoring malformed inline rule \"{}\" in {}: {}",
                preview_compact(id, 60),
                BASELINE_CONFIG_FILENAME,
                e
            );
            None
        }
    }
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(BASELINE_CONFIG_FILENAME)
}

/// 读取项目配置；文件不存在或 JSON 损坏时返回 None
pub fn read_project_config(dir: &Path) -> Option<BaselineConfig> {
    let path = config_path(dir);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => {
            log::debug!("Loaded project config from {}", path.display());
            Some(BaselineConfig::from_value(&value))
        }
        Err(e) => {
            log::warn!("Malformed {} ignored: {}", path.display(), e);
            None
        }
    }
}

/// 将规则写入配置文件的 `rules[]`：同ID替换，否则追加；其余字段原样保留
/// 配置文件不存在时新建
pub fn inject_rule(dir: &Path, rule: &WireRule) -> GuardResult<PathBuf> {
    let path = config_path(dir);
    let mut root = if path.exists() {
        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(GuardError::ConfigError(format!(
                    "{} is not a JSON object",
                    path.display()
                )))
            }
            Err(e) => {
                return Err(GuardError::ConfigError(format!(
                    "{} is malformed: {}",
                    path.display(),
                    e
                )))
            }
        }
    } else {
        Map::new()
    };

    let entry = serde_json::to_value(rule)?;
    let rules = root
        .entry("rules")
        .or_insert_with(|| Value::Array(Vec::new()));
    if !rules.is_array() {
        *rules = Value::Array(Vec::new());
    }
    if let Value::Array(items) = rules {
        let existing = items
            .iter()
            .position(|item| item.get("id").and_then(Value::as_str) == Some(rule.id.as_str()));
        match existing {
            Some(pos) => items[pos] = entry,
            None => items.push(entry),
        }
    }

    let mut contents = serde_json::to_string_pretty(&Value::Object(root))?;
    contents.push('\n');
    fs::write(&path, contents)?;
    log::info!("Injected rule \"{}\" into {}", rule.id, path.display());
    Ok(path)
}
