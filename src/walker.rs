use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{RuntimeConfig, DEFAULT_MAX_DEPTH};
use crate::scoring::{score_directory, score_directory_target, score_file_terms};
use crate::terms::TermSetExt;
use crate::types::{extension_of, Entry, Metadata, ScoredEntry, SearchTerm, TermKind};

/// 遍历预算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub max_depth: usize,
    pub time_budget: Option<Duration>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: None,
        }
    }
}

impl From<&RuntimeConfig> for WalkOptions {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            time_budget: config.time_budget,
        }
    }
}

/// 并行遍历所有根目录，按根目录顺序合并结果
pub fn walk_roots(roots: &[PathBuf], terms: &[SearchTerm], options: &WalkOptions) -> Vec<ScoredEntry> {
    roots
        .par_iter()
        .map(|root| walk_root(root, terms, options))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// 遍历单个根目录，返回本子树内得分为正的条目
pub fn walk_root(root: &Path, terms: &[SearchTerm], options: &WalkOptions) -> Vec<ScoredEntry> {
    if !root.is_dir() {
        debug!("跳过不存在的搜索路径: {}", root.display());
        return Vec::new();
    }

    let dir_terms = terms.of_kind(TermKind::Directory);
    let file_terms: Vec<&SearchTerm> = terms
        .iter()
        .filter(|t| matches!(t.kind, TermKind::Content | TermKind::FileType))
        .collect();
    // 只有目录词时，命中的目录就是结果本身，不再深入
    let descend_into_matches = !file_terms.is_empty();

    let started = Instant::now();
    let mut results = Vec::new();
    let mut visited = 0usize;

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(options.max_depth)
        .follow_links(false)
        .into_iter();

    while let Some(next) = walker.next() {
        if let Some(budget) = options.time_budget {
            if started.elapsed() >= budget {
                warn!(
                    "遍历 {} 超出时间预算 {:?}，已访问 {} 项，保留现有结果",
                    root.display(),
                    budget,
                    visited
                );
                break;
            }
        }

        let dent = match next {
            Ok(e) => e,
            Err(e) => {
                // 无权限或已被删除的子树不贡献结果
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!("无法读取 {}: {}", path, e);
                continue;
            }
        };
        visited += 1;

        let name = dent.file_name().to_string_lossy().to_string();
        let is_dir = dent.file_type().is_dir();

        let score = if is_dir {
            let best = dir_terms
                .iter()
                .map(|t| score_directory_target(&name, t))
                .max()
                .unwrap_or(0);
            if best > 0 && !descend_into_matches {
                walker.skip_current_dir();
            }
            best
        } else if file_terms.is_empty() || !inside_directory_terms(root, dent.path(), &dir_terms) {
            0
        } else {
            score_file_terms(&name, &extension_of(dent.path()), &file_terms)
        };

        if score == 0 {
            continue;
        }

        let metadata = match dent.metadata() {
            Ok(m) => Metadata::from(&m),
            Err(e) => {
                warn!("读取元数据失败，跳过 {}: {}", dent.path().display(), e);
                continue;
            }
        };

        results.push(ScoredEntry::new(
            Entry::new(dent.path(), is_dir, metadata),
            score,
        ));
    }

    info!(
        "根目录 {} 遍历完成: 访问 {} 项，候选 {} 个，用时 {}ms",
        root.display(),
        visited,
        results.len(),
        started.elapsed().as_millis()
    );
    results
}

/// 混合查询时，文件所在目录（含根目录名）必须命中至少一个目录词
///
/// 根目录名也参与匹配：以 `~/Documents` 为根时，`dir:doc` 会放行其下所有文件。
fn inside_directory_terms(root: &Path, file: &Path, dir_terms: &[&SearchTerm]) -> bool {
    if dir_terms.is_empty() {
        return true;
    }
    let parent = file.parent().unwrap_or(root);
    let relative = parent.strip_prefix(root).unwrap_or(parent);
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let dir_path = format!("{}/{}", root_name, relative.to_string_lossy());

    dir_terms
        .iter()
        .any(|t| score_directory(&dir_path, &t.value) > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::parse_terms;
    use std::fs;
    use tempfile::TempDir;

    fn tree(paths: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for p in paths {
            let full = dir.path().join(p);
            if p.ends_with('/') {
                fs::create_dir_all(&full).unwrap();
            } else {
                fs::create_dir_all(full.parent().unwrap()).unwrap();
                fs::write(&full, b"x").unwrap();
            }
        }
        dir
    }

    fn names(results: &[ScoredEntry]) -> Vec<String> {
        let mut names: Vec<String> = results.iter().map(|r| r.entry.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn files_scored_directories_traversed() {
        let dir = tree(&["docs/resume.pdf", "docs/deep/er/resume_old.txt", "docs/notes.md"]);
        let terms = parse_terms("resume");
        let results = walk_root(dir.path(), &terms, &WalkOptions::default());
        assert_eq!(names(&results), vec!["resume.pdf", "resume_old.txt"]);
        assert!(results.iter().all(|r| !r.is_dir()));
    }

    #[test]
    fn matched_directory_not_descended_for_directory_only_query() {
        let dir = tree(&["projects/", "projects/projects/", "work/projects/"]);
        let terms = parse_terms("dir:projects");
        let results = walk_root(dir.path(), &terms, &WalkOptions::default());

        let paths: Vec<PathBuf> = results.iter().map(|r| r.path().to_path_buf()).collect();
        assert!(paths.contains(&dir.path().join("projects")));
        assert!(paths.contains(&dir.path().join("work/projects")));
        assert!(!paths.contains(&dir.path().join("projects/projects")));
        assert!(results.iter().all(|r| r.is_dir() && r.score == 6));
    }

    #[test]
    fn mixed_query_descends_and_constrains_files() {
        let dir = tree(&["projects/resume.pdf", "other/resume.pdf"]);
        let terms = parse_terms("dir:projects,resume");
        let results = walk_root(dir.path(), &terms, &WalkOptions::default());

        let files: Vec<&ScoredEntry> = results.iter().filter(|r| !r.is_dir()).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path(), dir.path().join("projects/resume.pdf"));
        assert!(results.iter().any(|r| r.is_dir() && r.entry.name == "projects"));
    }

    #[test]
    fn depth_budget_limits_walk() {
        let dir = tree(&["a/b/c/report.pdf", "report.pdf"]);
        let terms = parse_terms("report");
        let options = WalkOptions { max_depth: 2, time_budget: None };
        let results = walk_root(dir.path(), &terms, &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path(), dir.path().join("report.pdf"));
    }

    #[test]
    fn missing_roots_contribute_nothing() {
        let dir = tree(&["invoice.pdf"]);
        let roots = vec![dir.path().join("nope"), dir.path().to_path_buf()];
        let results = walk_roots(&roots, &parse_terms("invoice"), &WalkOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.metadata.size, 1);
    }

    #[test]
    fn exhausted_time_budget_stops_walk() {
        let dir = tree(&["report.pdf", "a/report_a.pdf", "b/report_b.pdf"]);
        let terms = parse_terms("report");
        assert_eq!(walk_root(dir.path(), &terms, &WalkOptions::default()).len(), 3);

        let options = WalkOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: Some(Duration::ZERO),
        };
        assert!(walk_root(dir.path(), &terms, &options).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subtree_does_not_abort_walk() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tree(&["locked/report_a.pdf", "open/report_b.pdf"]);
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let results = walk_root(dir.path(), &parse_terms("report"), &WalkOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // root 用户仍可读取 locked，只要求兄弟子树的结果照常返回
        assert!(results
            .iter()
            .any(|r| r.path() == dir.path().join("open/report_b.pdf")));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = tree(&["real/report.pdf"]);
        std::os::unix::fs::symlink(dir.path(), dir.path().join("real/loop")).unwrap();
        let results = walk_root(dir.path(), &parse_terms("report"), &WalkOptions::default());
        assert_eq!(results.len(), 1);
    }
}
