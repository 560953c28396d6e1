//! 定义了整个库的错误类型 `AppleMusicError`。

use std::io;

use thiserror::Error;

use crate::converter::types::ConvertError;

/// 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum AppleMusicError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// XML 解析失败 (源自 `roxmltree::Error`)
    #[error("XML 解析失败: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 通用的歌词解析错误
    #[error("歌词解析失败: {0}")]
    Parser(String),

    /// 在数据源中找不到歌词内容
    #[error("在源中未找到歌词内容")]
    LyricNotFound,

    /// API 返回错误或空数据
    #[error("API 为 `{0}` 返回了错误或空数据")]
    ApiError(String),

    /// 更通用的网络层错误
    #[error("网络错误: {0}")]
    Network(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

/// `AppleMusicError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, AppleMusicError>;

impl From<ConvertError> for AppleMusicError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Xml(e) => Self::XmlParse(e),
            ConvertError::MissingBody => Self::Parser(err.to_string()),
            ConvertError::InvalidTime(s) => Self::Parser(s),
            ConvertError::Format(e) => Self::Internal(e.to_string()),
            ConvertError::Internal(s) => Self::Internal(s),
        }
    }
}
