use thiserror::Error;

/// 运行时配置错误（环境变量取值非法等）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("环境变量 {name} 的取值无效: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("环境变量 {name} 未提供任何搜索路径")]
    EmptyPathList { name: &'static str },
}

/// 文件类型分类表校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("分类 {0} 缺少自然语言词条")]
    NoTerms(&'static str),

    #[error("分类 {0} 缺少扩展名")]
    NoFormats(&'static str),

    #[error("分类 {category} 的扩展名 {format:?} 必须为小写且不带点")]
    BadFormat {
        category: &'static str,
        format: &'static str,
    },

    #[error("分类 {0} 含有空的变体键")]
    EmptyVariationKey(&'static str),
}
