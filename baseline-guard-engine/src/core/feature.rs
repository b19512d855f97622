use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Baseline 成熟度分级
/// `high`：广泛可用；`low`：新近可用。未跟踪/非标准用 `Option::None` 表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    High,
    Low,
}

impl Baseline {
    pub fn as_str(self) -> &'static str {
        match self {
            Baseline::High => "high",
            Baseline::Low => "low",
        }
    }
}

/// 知识库记录类型；`moved`/`split` 为重定向条目，不带兼容数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    #[default]
    Feature,
    Moved,
    Split,
    #[serde(other)]
    Other,
}

/// 特性状态块
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatus {
    /// 原始数据中为 `"high" | "low" | false`，false 与未知取值都归一为 None
    #[serde(
        default,
        deserialize_with = "deserialize_baseline",
        skip_serializing_if = "Option::is_none"
    )]
    pub baseline: Option<Baseline>,
    /// 知识库 agent 名称 → 最低版本字符串（如 `"17"`、`"17.1-17.4"`、`"≤79"`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<FxHashMap<String, String>>,
}

/// 知识库中的单条特性记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default)]
    pub kind: FeatureKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<FeatureStatus>,
    /// 原始兼容数据路径，仅供规则推断使用
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub compat_features: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub group: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub snapshot: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub caniuse: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discouraged: Option<serde_json::Value>,
}

impl FeatureRecord {
    /// 展示名称，缺失时回退到特性ID
    pub fn display_name<'a>(&'a self, feature_id: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(feature_id)
    }

    pub fn baseline(&self) -> Option<Baseline> {
        self.status.as_ref().and_then(|status| status.baseline)
    }

    /// 状态块中的 support 映射；None 表示整块缺失（区别于“块存在但某浏览器缺失”）
    pub fn support(&self) -> Option<&FxHashMap<String, String>> {
        self.status.as_ref().and_then(|status| status.support.as_ref())
    }
}

/// 知识库索引：特性ID → 记录，外加有序ID列表
/// 进程内构建一次，之后只读
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    by_id: FxHashMap<String, FeatureRecord>,
    all_ids: Vec<String>,
}

impl FeatureIndex {
    /// 从 (ID, 记录) 序列构建索引，保持输入顺序；重复ID直接报错
    pub fn from_records<I>(records: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (String, FeatureRecord)>,
    {
        let records = records.into_iter();
        let (lower, _) = records.size_hint();
        let mut by_id = FxHashMap::with_capacity_and_hasher(lower, Default::default());
        let mut all_ids = Vec::with_capacity(lower);

        for (id, record) in records {
            if by_id.contains_key(&id) {
                return Err(CoreError::DuplicateFeature(id));
            }
            all_ids.push(id.clone());
            by_id.insert(id, record);
        }

        log::debug!("Feature index built: {} records", all_ids.len());
        Ok(Self { by_id, all_ids })
    }

    pub fn get(&self, feature_id: &str) -> Option<&FeatureRecord> {
        self.by_id.get(feature_id)
    }

    pub fn contains(&self, feature_id: &str) -> bool {
        self.by_id.contains_key(feature_id)
    }

    /// 全部特性ID（构建顺序）
    pub fn ids(&self) -> &[String] {
        &self.all_ids
    }

    /// 按构建顺序遍历全部记录
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureRecord)> + '_ {
        self.all_ids
            .iter()
            .filter_map(move |id| self.by_id.get(id).map(|record| (id.as_str(), record)))
    }

    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }
}

fn deserialize_baseline<'de, D>(deserializer: D) -> Result<Option<Baseline>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw.as_ref().and_then(Value::as_str) {
        Some("high") => Some(Baseline::High),
        Some("low") => Some(Baseline::Low),
        _ => None,
    })
}

// 兼容单字符串/数组两种格式
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
