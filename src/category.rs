//! 文件类型分类表：自然语言词 -> 扩展名集合，只用于打分加成。

use once_cell::sync::Lazy;
use tracing::error;

use crate::error::CategoryError;

#[derive(Debug)]
pub struct FileTypeCategory {
    pub name: &'static str,
    pub terms: &'static [&'static str],
    pub formats: &'static [&'static str],
    /// 词 -> 同义变体
    pub variations: &'static [(&'static str, &'static [&'static str])],
}

impl FileTypeCategory {
    pub fn has_term(&self, term: &str) -> bool {
        self.terms.contains(&term)
    }

    pub fn has_format(&self, ext: &str) -> bool {
        self.formats.contains(&ext)
    }

    pub fn variations_of(&self, term: &str) -> &'static [&'static str] {
        self.variations
            .iter()
            .find(|(key, _)| *key == term)
            .map(|(_, vars)| *vars)
            .unwrap_or(&[])
    }

    fn validate(&self) -> Result<(), CategoryError> {
        if self.terms.is_empty() {
            return Err(CategoryError::NoTerms(self.name));
        }
        if self.formats.is_empty() {
            return Err(CategoryError::NoFormats(self.name));
        }
        if let Some(&format) = self
            .formats
            .iter()
            .find(|f| f.is_empty() || f.starts_with('.') || f.to_lowercase() != **f)
        {
            return Err(CategoryError::BadFormat { category: self.name, format });
        }
        if self.variations.iter().any(|(key, _)| key.is_empty()) {
            return Err(CategoryError::EmptyVariationKey(self.name));
        }
        Ok(())
    }
}

const TABLE: &[FileTypeCategory] = &[
    FileTypeCategory {
        name: "document",
        terms: &["resume", "cv", "report", "paper", "doc", "document", "letter", "invoice", "contract"],
        formats: &["pdf", "doc", "docx", "txt", "rtf", "odt", "pages", "md", "tex"],
        variations: &[
            ("resume", &["curriculum", "vitae", "cv"]),
            ("cv", &["curriculum", "vitae", "resume"]),
            ("document", &["doc", "documentation"]),
            ("letter", &["cover", "recommendation"]),
        ],
    },
    FileTypeCategory {
        name: "spreadsheet",
        terms: &["spreadsheet", "excel", "sheet", "table", "data"],
        formats: &["xlsx", "xls", "csv", "numbers", "ods"],
        variations: &[],
    },
    FileTypeCategory {
        name: "presentation",
        terms: &["presentation", "slides", "deck", "powerpoint"],
        formats: &["ppt", "pptx", "key", "odp"],
        variations: &[],
    },
    FileTypeCategory {
        name: "image",
        terms: &["photo", "image", "picture", "pic", "screenshot", "scan"],
        formats: &["jpg", "jpeg", "png", "gif", "webp", "svg", "tiff", "raw", "bmp", "heic"],
        variations: &[
            ("photo", &["image", "picture", "pic"]),
            ("screenshot", &["screen", "capture"]),
        ],
    },
    FileTypeCategory {
        name: "video",
        terms: &["video", "movie", "film", "recording", "clip"],
        formats: &["mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v"],
        variations: &[],
    },
    FileTypeCategory {
        name: "audio",
        terms: &["audio", "sound", "music", "song", "podcast"],
        formats: &["mp3", "wav", "aac", "m4a", "flac", "ogg", "wma"],
        variations: &[],
    },
    FileTypeCategory {
        name: "archive",
        terms: &["archive", "backup", "compressed", "zip"],
        formats: &["zip", "rar", "7z", "tar", "gz", "bz2"],
        variations: &[],
    },
    FileTypeCategory {
        name: "code",
        terms: &["code", "source", "script", "program"],
        formats: &[
            "js", "py", "java", "cpp", "ts", "html", "css", "php", "rb", "swift", "go", "rs",
            "sql", "sh", "bat",
        ],
        variations: &[
            ("javascript", &["js", "typescript", "ts"]),
            ("python", &["py", "ipynb"]),
            ("shell", &["bash", "sh", "zsh"]),
        ],
    },
];

/// 启动时校验一次；校验失败时整张表不参与加成
static CATEGORIES: Lazy<&'static [FileTypeCategory]> = Lazy::new(|| match validate(TABLE) {
    Ok(()) => TABLE,
    Err(e) => {
        error!("文件类型分类表无效，已禁用类型加成: {}", e);
        &[]
    }
});

pub fn validate(table: &[FileTypeCategory]) -> Result<(), CategoryError> {
    table.iter().try_for_each(FileTypeCategory::validate)
}

pub fn categories() -> &'static [FileTypeCategory] {
    *CATEGORIES
}

/// 按自然语言词查找分类（取第一个命中的）
pub fn category_for_term(term: &str) -> Option<&'static FileTypeCategory> {
    categories().iter().find(|c| c.has_term(term))
}

/// 所有分类中该词的同义变体
pub fn variations_for(term: &str) -> impl Iterator<Item = &'static str> + '_ {
    categories()
        .iter()
        .flat_map(move |c| c.variations_of(term).iter().copied())
}
