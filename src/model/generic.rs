//! 定义了整个库通用的核心数据模型。
//!
//! 这些结构体（`Song`, `Album`, `Artist`, `Playlist`）是原始 API 响应
//! 整理之后的标准格式，歌词字段已完成 TTML 到 LRC 的转码。

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 代表一首歌曲的标准化模型。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Song {
    /// 歌曲在目录中的唯一 ID。
    pub id: String,
    /// 歌曲名。
    pub title: String,
    /// 歌曲所属专辑名。
    pub album: String,
    /// 关联专辑的 ID 列表。
    pub album_ids: Vec<String>,
    /// 艺术家名（目录返回的聚合字符串）。
    pub artists: String,
    /// 关联艺术家的 ID 列表。
    pub artist_ids: Vec<String>,
    /// 作曲家名。
    pub composer_name: String,
    /// 封面 URL 模板，含 `{w}`/`{h}`/`{f}` 占位符。
    pub cover_format: String,
    /// 按原始尺寸展开后的封面 URL。
    pub cover_url: String,
    /// 歌曲时长。
    pub duration: Option<Duration>,
    /// 音频语言代码。
    pub audio_locale: String,
    /// 国际标准录音代码。
    pub isrc: String,
    /// 碟片号。
    pub disc_number: u32,
    /// 曲目号。
    pub track_number: u32,
    /// 流派列表。
    pub genre_names: Vec<String>,
    /// 发行日期。
    pub release_date: String,
    /// 逐字歌词资源的请求路径。
    pub lyric_path: String,
    /// 原始 TTML 歌词文本。
    pub lyrics_ttml: String,
    /// 转码后的 LRC（或纯文本）歌词。
    pub lyrics_lrc: String,
    /// 本条记录的整理时间。
    pub update_time: DateTime<Utc>,
}

/// 代表一张专辑的标准化模型。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    /// 专辑在目录中的唯一 ID。
    pub id: String,
    /// 专辑名。
    pub name: String,
    /// 艺术家名。
    pub artists: String,
    /// 关联艺术家的 ID 列表。
    pub artist_ids: Vec<String>,
    /// 封面 URL 模板。
    pub cover_format: String,
    /// 展开后的封面 URL。
    pub cover_url: String,
    /// 专辑包含的曲目数。
    pub track_count: u32,
    /// 发行日期。
    pub release_date: String,
    /// 流派列表。
    pub genre_names: Vec<String>,
    /// 本条记录的整理时间。
    pub update_time: DateTime<Utc>,
}

/// 代表一位艺术家的标准化模型。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    /// 艺术家在目录中的唯一 ID。
    pub id: String,
    /// 艺术家姓名。
    pub name: String,
    /// 封面 URL 模板。
    pub cover_format: String,
    /// 展开后的封面 URL。
    pub cover_url: String,
    /// 流派列表。
    pub genre_names: Vec<String>,
    /// 本条记录的整理时间。
    pub update_time: DateTime<Utc>,
}

/// 代表一个播放列表的标准化模型。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    /// 目录中的播放列表 ID。
    pub id: String,
    /// 播放列表名。
    pub name: String,
    /// 策展方名。
    pub curator_name: String,
    /// 封面 URL 模板。
    pub cover_format: String,
    /// 展开后的封面 URL。
    pub cover_url: String,
    /// 曲目总数。
    pub track_count: u32,
    /// 曲目的歌曲 ID 列表，按播放列表顺序排列。
    pub track_ids: Vec<String>,
    /// 最近修改日期。
    pub last_modified_date: String,
    /// 记录的整理时间。
    pub update_time: DateTime<Utc>,
}

/// 综合搜索返回的条目，歌曲、专辑、艺术家三者之一。
///
/// 封闭的和类型，序列化时以 `object_type` 字段区分。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_type", rename_all = "snake_case")]
pub enum CatalogEntry {
    /// 一首歌曲。
    Song(Song),
    /// 一张专辑。
    Album(Album),
    /// 一位艺术家。
    Artist(Artist),
}

impl CatalogEntry {
    /// 返回条目在目录中的唯一 ID。
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            CatalogEntry::Song(song) => &song.id,
            CatalogEntry::Album(album) => &album.id,
            CatalogEntry::Artist(artist) => &artist.id,
        }
    }
}
