use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local};
use llfs::filter::filter_results;
use llfs::scoring::score_file_base;
use llfs::terms::parse_terms;
use llfs::walker::walk_root;
use llfs::{search, search_with, Metadata, ScoredEntry, WalkOptions};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"content").unwrap();
    path
}

fn mkdir(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(&path).unwrap();
    path
}

fn roots(dir: &TempDir) -> Vec<PathBuf> {
    vec![dir.path().to_path_buf()]
}

#[test]
fn resume_as_pdf_only_returns_pdf() {
    let dir = TempDir::new().unwrap();
    let pdf = touch(dir.path(), "cv/john_smith_resume.pdf");
    touch(dir.path(), "cv/resume_notes.txt");
    let taxes = touch(dir.path(), "cv/quarterly_taxes.pdf");

    let results = search(&roots(&dir), "resume,filetype:pdf");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path(), pdf);
    assert_eq!(results[0].score, 6);
    assert!(!results[0].is_dir());

    // 不带内容词时，类型匹配的文件都返回
    let all_pdfs = search(&roots(&dir), "filetype:pdf");
    let mut paths: Vec<PathBuf> = all_pdfs.iter().map(|r| r.path().to_path_buf()).collect();
    paths.sort();
    assert_eq!(paths, vec![pdf, taxes]);
}

#[test]
fn exact_directory_match_ranks_first() {
    let dir = TempDir::new().unwrap();
    let projects = mkdir(dir.path(), "home/user/projects");
    let backup = mkdir(dir.path(), "home/user/old_projects_backup");
    touch(dir.path(), "home/user/projects/readme.md");

    let results = search(&roots(&dir), "dir:projects");
    assert!(results.iter().all(|r| r.is_dir()));
    assert_eq!(results[0].path(), projects);
    assert_eq!(results[0].score, 6);

    // 子串命中 5 分，backup 扣 1 分，仍高于下限但排在完全匹配之后
    let partial = results.iter().find(|r| r.path() == backup).unwrap();
    assert_eq!(partial.score, 4);
}

#[test]
fn todays_screenshot_is_found_and_old_one_filtered() {
    let dir = TempDir::new().unwrap();
    let fresh = touch(dir.path(), "Pictures/screenshot_1.png");
    let old = touch(dir.path(), "Pictures/screenshot_2.png");

    let results = search(&roots(&dir), "screenshot,time:today");
    assert!(results.iter().any(|r| r.path() == fresh));

    // 把第二个文件的时间改成三天前再过滤
    let terms = parse_terms("screenshot,time:today");
    let three_days_ago = Local::now() - Duration::days(3);
    let candidates: Vec<ScoredEntry> = walk_root(dir.path(), &terms, &WalkOptions::default())
        .into_iter()
        .map(|mut r| {
            if r.path() == old {
                r.entry.metadata = Metadata {
                    created: Some(three_days_ago),
                    modified: Some(three_days_ago),
                    accessed: None,
                    size: r.entry.metadata.size,
                };
            }
            r
        })
        .collect();
    let filtered = filter_results(candidates, &terms, 50);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].path(), fresh);
}

#[test]
fn empty_term_string_returns_nothing() {
    let missing = vec![PathBuf::from("/no/such/root/anywhere")];
    assert!(search(&missing, "").is_empty());
}

#[test]
fn multi_content_terms_require_every_term() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "tax_return_2023.pdf");
    touch(dir.path(), "2023_return.pdf");
    touch(dir.path(), "tax_notes.pdf");

    let results = search(&roots(&dir), "tax,return");
    assert_eq!(results.len(), 1);
    for r in &results {
        for term in ["tax", "return"] {
            assert!(score_file_base(&r.entry.stem(), term) > 0);
        }
    }
}

#[test]
fn results_are_capped_and_sorted() {
    let dir = TempDir::new().unwrap();
    for i in 0..70 {
        touch(dir.path(), &format!("batch/holiday_{i:03}.jpg"));
    }
    touch(dir.path(), "holiday.jpg");

    let results = search(&roots(&dir), "holiday");
    assert_eq!(results.len(), 50);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(results[0].path(), dir.path().join("holiday.jpg"));
    assert_eq!(results[0].score, 6);
    assert_eq!(results[1].score, 5);

    let capped = search_with(&roots(&dir), "holiday", 5, &WalkOptions::default());
    assert_eq!(capped.len(), 5);
}

#[test]
fn no_nested_matches_under_matched_directory() {
    let dir = TempDir::new().unwrap();
    let top = mkdir(dir.path(), "photos");
    mkdir(dir.path(), "photos/2023/photos");

    let results = search(&roots(&dir), "dir:photos");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path(), top);
}

#[test]
fn overlapping_roots_are_deduplicated() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "docs/invoice.pdf");
    let both = vec![dir.path().to_path_buf(), dir.path().join("docs")];

    let results = search(&both, "invoice");
    assert_eq!(results.len(), 1);
}

#[test]
fn filtering_twice_is_stable() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a/invoice_march.pdf");
    touch(dir.path(), "b/invoice.txt");
    touch(dir.path(), "c/old_invoice_backup.pdf");

    let terms = parse_terms("invoice,filetype:pdf");
    let candidates = walk_root(dir.path(), &terms, &WalkOptions::default());
    let once = filter_results(candidates, &terms, 50);
    let twice = filter_results(once.clone(), &terms, 50);
    assert_eq!(once, twice);
    assert!(!once.is_empty());
}

#[test]
fn only_filler_words_is_empty() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "find.txt");
    assert!(search(&roots(&dir), "find,files,named").is_empty());
}
