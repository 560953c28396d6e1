//! LRC 格式生成器
//!
//! 消费解析产出的歌词事件序列，按文档模式渲染最终的转写文本。

use std::fmt::Write as FmtWrite;

use crate::converter::types::{ConvertError, LyricDocument, LyricEvent, TimingMode};

/// 无时间标记转写文本的前缀标志。
pub const PLAIN_TEXT_MARKER: &str = "[!text]";

/// LRC 生成的主入口函数。
///
/// 带时间标记的文档逐事件输出 `[label]` 或 `[MM:SS.fff]text` 行；
/// 无时间标记的文档输出 [`PLAIN_TEXT_MARKER`] 前缀加换行连接的纯文本。
pub fn generate_lrc(document: &LyricDocument) -> Result<String, ConvertError> {
    match document.mode {
        TimingMode::Untimed => generate_plain_text(document),
        TimingMode::Timed => generate_timed_lrc(document),
    }
}

/// 渲染无时间标记的纯文本转写，行间以单个换行连接，无尾随换行。
fn generate_plain_text(document: &LyricDocument) -> Result<String, ConvertError> {
    let lines: Vec<&str> = document
        .events
        .iter()
        .filter_map(|event| match event {
            LyricEvent::PlainLine { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    Ok(format!("{PLAIN_TEXT_MARKER}{}", lines.join("\n")))
}

/// 渲染带时间标记的 LRC 文本，每个事件恰好一行。
///
/// 只输出 begin，end 保留在数据模型中供调用方自行使用。
fn generate_timed_lrc(document: &LyricDocument) -> Result<String, ConvertError> {
    let mut output = String::with_capacity(document.events.len() * 24);

    for event in &document.events {
        match event {
            LyricEvent::SectionMarker { label } => writeln!(output, "[{label}]")?,
            LyricEvent::TimedLine { begin, text, .. } => writeln!(output, "[{begin}]{text}")?,
            LyricEvent::PlainLine { text } => writeln!(output, "{text}")?,
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::types::TimeValue;

    // 段落标记渲染为方括号标签行，歌词行只输出 begin
    #[test]
    fn test_generate_timed_lrc() {
        let document = LyricDocument {
            mode: TimingMode::Timed,
            events: vec![
                LyricEvent::SectionMarker {
                    label: "Verse".to_string(),
                },
                LyricEvent::TimedLine {
                    begin: TimeValue::new(0, 1, 0),
                    end: TimeValue::new(0, 2, 0),
                    text: "hello".to_string(),
                },
            ],
            warnings: vec![],
        };

        assert_eq!(
            generate_lrc(&document).unwrap(),
            "[Verse]\n[00:01.000]hello\n"
        );
    }

    // 无时间标记模式：前缀标志加换行连接的行，无时间戳语法
    #[test]
    fn test_generate_plain_text_transcript() {
        let document = LyricDocument {
            mode: TimingMode::Untimed,
            events: vec![
                LyricEvent::PlainLine {
                    text: "a".to_string(),
                },
                LyricEvent::PlainLine {
                    text: "b".to_string(),
                },
            ],
            warnings: vec![],
        };

        assert_eq!(generate_lrc(&document).unwrap(), "[!text]a\nb");
    }

    // 空文档渲染为空字符串（带时间模式）或仅前缀（无时间模式）
    #[test]
    fn test_generate_empty_document() {
        let timed = LyricDocument {
            mode: TimingMode::Timed,
            events: vec![],
            warnings: vec![],
        };
        assert_eq!(generate_lrc(&timed).unwrap(), "");

        let untimed = LyricDocument {
            mode: TimingMode::Untimed,
            events: vec![],
            warnings: vec![],
        };
        assert_eq!(generate_lrc(&untimed).unwrap(), "[!text]");
    }

    // 文本为空的歌词行仍输出时间戳
    #[test]
    fn test_generate_keeps_empty_text_line() {
        let document = LyricDocument {
            mode: TimingMode::Timed,
            events: vec![LyricEvent::TimedLine {
                begin: TimeValue::new(1, 15, 0),
                end: TimeValue::new(1, 16, 0),
                text: String::new(),
            }],
            warnings: vec![],
        };

        assert_eq!(generate_lrc(&document).unwrap(), "[01:15.000]\n");
    }
}
