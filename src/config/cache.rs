//! 项目配置缓存
//! 按项目目录缓存解析结果（包括“无配置”），首次读取后不再失效
//! 由调用方显式持有并传递，测试可各自构建独立实例

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use super::project::{read_project_config, BaselineConfig};

#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: RwLock<FxHashMap<PathBuf, Option<Arc<BaselineConfig>>>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取项目配置（命中缓存则直接返回）
    pub fn get_or_load(&self, dir: &Path) -> Option<Arc<BaselineConfig>> {
        // 1. 读锁查询缓存
        {
            let cache_read = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache_read.get(dir) {
                return cached.clone();
            }
        }

        // 2. 写锁加载并插入（并发加载时以先写入者为准）
        let mut cache_write = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        cache_write
            .entry(dir.to_path_buf())
            .or_insert_with(|| read_project_config(dir).map(Arc::new))
            .clone()
    }

    /// 已缓存的项目目录数
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
