//! # TTML 歌词解析器
//!
//! 对 Apple Music 返回的 TTML 文档做容错的树遍历，
//! 按文档顺序产出段落标记与歌词行事件。
//!
//! 查找元素时先用命名空间限定名，结果为空再按本地名回退，
//! 以兼容命名空间声明不一致的文档。

use roxmltree::{Document, Node};

use crate::converter::{
    timecode,
    types::{ConvertError, LyricDocument, LyricEvent, TimingMode},
};

/// TTML 核心命名空间。
pub const TTML_NS: &str = "http://www.w3.org/ns/ttml";
/// Apple 私有扩展命名空间，承载 `timing` 与 `songPart` 属性。
pub const ITUNES_NS: &str = "http://music.apple.com/lyric-ttml-internal";

/// 无时间标记文档的字面判定标志。
const UNTIMED_MARKER: &str = r#"itunes:timing="None""#;

/// 将 TTML 文本解析为有序的歌词事件文档。
///
/// # 错误
/// - [`ConvertError::Xml`] - 输入不是格式良好的 XML。
/// - [`ConvertError::MissingBody`] - 限定名与非限定名查找都找不到 body。
pub fn parse_ttml(content: &str) -> Result<LyricDocument, ConvertError> {
    let tree = Document::parse(content)?;
    let root = tree.root_element();

    let body = find_first(root, "body").ok_or(ConvertError::MissingBody)?;

    let mode = if content.contains(UNTIMED_MARKER) {
        TimingMode::Untimed
    } else {
        TimingMode::Timed
    };

    let mut events = Vec::new();
    let mut warnings = Vec::new();

    // body 下没有任何 div 时产出一个空的有效文档，而不是报错
    for division in find_all(body, "div") {
        match mode {
            TimingMode::Untimed => collect_plain_lines(division, &mut events),
            TimingMode::Timed => collect_timed_lines(division, &mut events, &mut warnings),
        }
    }

    Ok(LyricDocument {
        mode,
        events,
        warnings,
    })
}

/// 收集无时间标记模式下的一组纯文本行，空行被丢弃。
fn collect_plain_lines(division: Node<'_, '_>, events: &mut Vec<LyricEvent>) {
    for line in find_all(division, "p") {
        let text = line_text(line);
        if !text.is_empty() {
            events.push(LyricEvent::PlainLine { text });
        }
    }
}

/// 收集带时间标记模式下的一组歌词行，段落标记先于该组的所有行。
///
/// 文本为空的行照常产出，保留行级时间；
/// begin/end 无法规范化的行被跳过并记录警告，不影响文档其余部分。
fn collect_timed_lines(
    division: Node<'_, '_>,
    events: &mut Vec<LyricEvent>,
    warnings: &mut Vec<String>,
) {
    if let Some(label) = section_part(division) {
        events.push(LyricEvent::SectionMarker {
            label: label.to_string(),
        });
    }

    for line in find_all(division, "p") {
        let begin = match timecode::normalize(line.attribute("begin").unwrap_or_default()) {
            Ok(time) => time,
            Err(e) => {
                warnings.push(format!("已跳过 begin 属性无效的歌词行: {e}"));
                continue;
            }
        };
        let end = match timecode::normalize(line.attribute("end").unwrap_or_default()) {
            Ok(time) => time,
            Err(e) => {
                warnings.push(format!("已跳过 end 属性无效的歌词行: {e}"));
                continue;
            }
        };

        events.push(LyricEvent::TimedLine {
            begin,
            end,
            text: line_text(line),
        });
    }
}

/// 读取 div 上的段落标记属性。
///
/// 先查命名空间限定的 `songPart`，再退回非限定的同名属性。
fn section_part<'a>(division: Node<'a, '_>) -> Option<&'a str> {
    division
        .attribute((ITUNES_NS, "songPart"))
        .or_else(|| division.attribute("songPart"))
}

/// 提取一行的完整文本。
///
/// 行内存在嵌套 span 时拼接所有后代文本（span 自身的时间被丢弃），
/// 否则取元素的直接文本，结果去除首尾空白。
fn line_text(line: Node<'_, '_>) -> String {
    let text = if find_all(line, "span").is_empty() {
        line.text().unwrap_or_default().to_string()
    } else {
        line.descendants()
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect::<String>()
    };
    text.trim().to_string()
}

/// 在子树内查找指定本地名的所有元素。
///
/// 先按 TTML 命名空间限定名查找，零结果时再忽略命名空间按本地名重查，
/// 两者都为空才视为"不存在"。
fn find_all<'a, 'input>(parent: Node<'a, 'input>, local_name: &str) -> Vec<Node<'a, 'input>> {
    let qualified: Vec<Node<'a, 'input>> = parent
        .descendants()
        .filter(|node| node.has_tag_name((TTML_NS, local_name)))
        .collect();
    if !qualified.is_empty() {
        return qualified;
    }

    parent
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == local_name)
        .collect()
}

/// [`find_all`] 的单元素版本，用于 body 查找。
fn find_first<'a, 'input>(parent: Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    find_all(parent, local_name).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::types::TimeValue;

    // 带命名空间的常规文档：段落标记在行之前，行时间被规范化
    #[test]
    fn test_parse_timed_document_with_section_marker() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:itunes="http://music.apple.com/lyric-ttml-internal"><body><div itunes:songPart="Verse"><p begin="0:01.0" end="0:02.0">hello</p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(document.mode, TimingMode::Timed);
        assert!(document.warnings.is_empty());
        assert_eq!(
            document.events,
            vec![
                LyricEvent::SectionMarker {
                    label: "Verse".to_string()
                },
                LyricEvent::TimedLine {
                    begin: TimeValue::new(0, 1, 0),
                    end: TimeValue::new(0, 2, 0),
                    text: "hello".to_string()
                },
            ]
        );
    }

    // 无命名空间声明的文档通过本地名回退查找照常解析
    #[test]
    fn test_parse_unqualified_document_via_fallback() {
        let ttml =
            r#"<tt><body><div><p begin="47.243" end="49.0">fallback line</p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(document.events.len(), 1);
        assert_eq!(
            document.events[0],
            LyricEvent::TimedLine {
                begin: TimeValue::new(0, 47, 243),
                end: TimeValue::new(0, 49, 0),
                text: "fallback line".to_string()
            }
        );
    }

    // 嵌套 span 的文本全部拼接，span 自身的时间被丢弃
    #[test]
    fn test_parse_nested_spans_concatenated() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body><div><p begin="0:01.0" end="0:03.0"><span begin="0:01.0" end="0:02.0">he</span><span begin="0:02.0" end="0:03.0">llo</span> world</p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(
            document.events,
            vec![LyricEvent::TimedLine {
                begin: TimeValue::new(0, 1, 0),
                end: TimeValue::new(0, 3, 0),
                text: "hello world".to_string()
            }]
        );
    }

    // 文本为空的行保留行级时间，照常产出
    #[test]
    fn test_parse_empty_text_line_is_kept() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body><div><p begin="0:05.0" end="0:06.0"></p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(
            document.events,
            vec![LyricEvent::TimedLine {
                begin: TimeValue::new(0, 5, 0),
                end: TimeValue::new(0, 6, 0),
                text: String::new()
            }]
        );
    }

    // 无时间标记文档：空行被丢弃，其余按顺序保留
    #[test]
    fn test_parse_untimed_document() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:itunes="http://music.apple.com/lyric-ttml-internal" itunes:timing="None"><body><div><p>a</p><p>  </p><p>b</p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(document.mode, TimingMode::Untimed);
        assert_eq!(
            document.events,
            vec![
                LyricEvent::PlainLine {
                    text: "a".to_string()
                },
                LyricEvent::PlainLine {
                    text: "b".to_string()
                },
            ]
        );
    }

    // begin 无效的行被跳过并记录警告，文档其余部分不受影响
    #[test]
    fn test_parse_skips_line_with_invalid_timecode() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body><div><p begin="1:2:3:4" end="0:02.0">bad</p><p begin="0:03.0" end="0:04.0">good</p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(document.warnings.len(), 1);
        assert_eq!(
            document.events,
            vec![LyricEvent::TimedLine {
                begin: TimeValue::new(0, 3, 0),
                end: TimeValue::new(0, 4, 0),
                text: "good".to_string()
            }]
        );
    }

    // 没有 body 是硬性错误，绝不静默返回空文档
    #[test]
    fn test_parse_missing_body_is_an_error() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><head></head></tt>"#;

        assert!(matches!(parse_ttml(ttml), Err(ConvertError::MissingBody)));
    }

    // 不是格式良好的 XML 时整体失败，没有部分结果
    #[test]
    fn test_parse_malformed_markup_is_an_error() {
        assert!(matches!(
            parse_ttml("<tt><body>"),
            Err(ConvertError::Xml(_))
        ));
    }

    // body 存在但没有任何 div 时是空的有效文档
    #[test]
    fn test_parse_empty_body_yields_empty_document() {
        let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert!(document.events.is_empty());
        assert!(document.warnings.is_empty());
    }

    // 非限定的 songPart 属性别名同样被识别
    #[test]
    fn test_parse_unqualified_song_part_attribute() {
        let ttml = r#"<tt><body><div songPart="Chorus"><p begin="0:10.0" end="0:12.0">x</p></div></body></tt>"#;

        let document = parse_ttml(ttml).unwrap();

        assert_eq!(
            document.events[0],
            LyricEvent::SectionMarker {
                label: "Chorus".to_string()
            }
        );
    }
}
