//! 歌词转码核心模块
//!
//! 纯粹的字符串到字符串变换：原始 TTML 文本经解析器产出有序事件序列，
//! 再由生成器渲染为 LRC 或纯文本转写。全程不做 I/O，不跨调用缓存，
//! 每次调用对输入字符串都是纯函数，可在并发宿主中独立调用而无需同步。

pub mod generators;
pub mod parsers;
pub mod timecode;
pub mod types;

pub use types::{ConvertError, LyricDocument, LyricEvent, TimeValue, TimingMode};

use tracing::warn;

/// 将 TTML 格式歌词转写为 LRC 格式或纯文本歌词。
///
/// 空输入直接返回空字符串，与上游"没有歌词"的语义保持一致。
/// 解析中被跳过的无效行以警告日志的形式报告，不中断整体转换。
///
/// # 错误
/// 输入非空但不是格式良好的 TTML，或缺少 body 标签时返回错误。
pub fn ttml_to_lrc(ttml: &str) -> Result<String, ConvertError> {
    if ttml.trim().is_empty() {
        return Ok(String::new());
    }

    let document = parsers::ttml_parser::parse_ttml(ttml)?;
    for warning in &document.warnings {
        warn!("[TTML] {warning}");
    }

    generators::lrc_generator::generate_lrc(&document)
}
