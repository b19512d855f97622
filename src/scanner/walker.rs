//! 项目文件收集

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::GuardOptions;

fn is_ignored(entry: &DirEntry, options: &GuardOptions) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| options.is_ignored_dir(name))
}

/// 递归收集待扫描文件（按路径排序），跳过忽略目录
pub fn collect_files(root: &Path, options: &GuardOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry, options));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && options.accepts_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => log::warn!("Skipping unreadable path during walk: {}", e),
        }
    }

    log::debug!("Collected {} files under {}", files.len(), root.display());
    files
}

/// 相对项目根目录的展示路径（统一使用 `/` 分隔）
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for path in [
            "src/app.tsx",
            "src/styles/main.css",
            "src/readme.md",
            "index.html",
            "node_modules/pkg/index.js",
            "dist/bundle.js",
            "build/out.css",
            "legacy.jsx",
        ] {
            let full = root.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, "").unwrap();
        }

        let files = collect_files(root, &GuardOptions::default());
        let shown: Vec<String> = files.iter().map(|f| display_path(root, f)).collect();
        assert_eq!(
            shown,
            vec!["index.html", "legacy.jsx", "src/app.tsx", "src/styles/main.css"]
        );
    }
}
