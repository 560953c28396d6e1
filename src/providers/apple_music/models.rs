//! 此模块定义了所有用于反序列化 Apple Music AMP API 响应的 `struct` 数据结构。

use std::collections::HashMap;

use serde::Deserialize;

// =================================================================
// 搜索接口 (`/v1/catalog/{storefront}/search`) 的模型
// =================================================================

/// 搜索 API 的顶层响应结构。
///
/// `format[resources]=map` 形式的请求把资源放在 `resources` 映射里，
/// 综合搜索的排序结果则在 `results.top` 中以引用列表出现。
#[derive(Debug, Deserialize, Default)]
pub struct SearchResponse {
    /// 以资源类型和 ID 索引的资源映射。
    #[serde(default)]
    pub resources: Resources,
    /// 排序后的搜索结果区块。
    #[serde(default)]
    pub results: SearchResults,
}

/// 搜索响应中的资源映射部分。
#[derive(Debug, Deserialize, Default)]
pub struct Resources {
    /// 匹配到的歌曲，以歌曲 ID 为键。
    #[serde(default)]
    pub songs: HashMap<String, ResourceData>,
}

/// 搜索响应中的排序结果部分。
#[derive(Debug, Deserialize, Default)]
pub struct SearchResults {
    /// 综合排序的最佳结果区块。
    #[serde(default)]
    pub top: TopResults,
}

/// 综合搜索的最佳结果列表。
#[derive(Debug, Deserialize, Default)]
pub struct TopResults {
    /// 按相关度排序的资源引用。
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

/// 指向某个资源的轻量引用，只有 ID 和类型。
#[derive(Debug, Deserialize, Clone)]
pub struct ResourceRef {
    /// 资源 ID。
    #[serde(default)]
    pub id: String,
    /// 资源类型，例如 `songs`、`albums`、`artists`。
    #[serde(rename = "type", default)]
    pub kind: String,
}

// =================================================================
// 详情接口 (`/v1/catalog/{storefront}/{songs,albums,artists}/{id}`) 的模型
// =================================================================

/// 详情接口的顶层响应结构。
#[derive(Debug, Deserialize, Default)]
pub struct DetailResponse {
    /// 命中的资源列表，通常只有一个元素。
    #[serde(default)]
    pub data: Vec<ResourceData>,
}

/// 一个完整的目录资源对象。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ResourceData {
    /// 资源 ID。
    #[serde(default)]
    pub id: String,
    /// 资源类型。
    #[serde(rename = "type", default)]
    pub kind: String,
    /// 资源属性。
    #[serde(default)]
    pub attributes: Attributes,
    /// 资源关联关系。
    #[serde(default)]
    pub relationships: Relationships,
}

/// 歌曲、专辑、艺术家、播放列表共用的属性集合，缺失字段取默认值。
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    /// 资源名（歌曲名、专辑名或艺术家名）。
    pub name: String,
    /// 歌曲所属专辑名。
    pub album_name: String,
    /// 艺术家名（聚合字符串）。
    pub artist_name: String,
    /// 作曲家名。
    pub composer_name: String,
    /// 封面信息。
    pub artwork: Artwork,
    /// 歌曲时长（毫秒）。
    pub duration_in_millis: u64,
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
    /// 专辑或播放列表包含的曲目数。
    pub track_count: u32,
    /// 播放列表的策展方名。
    pub curator_name: String,
    /// 播放列表的最近修改日期。
    pub last_modified_date: String,
}

/// 封面图片信息，URL 是含 `{w}`/`{h}`/`{f}` 占位符的模板。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Artwork {
    /// 封面 URL 模板。
    #[serde(default)]
    pub url: String,
    /// 原始宽度。
    #[serde(default)]
    pub width: Option<u32>,
    /// 原始高度。
    #[serde(default)]
    pub height: Option<u32>,
}

impl Artwork {
    /// 默认的封面展开尺寸，原始尺寸缺失时使用。
    pub const DEFAULT_SIZE: u32 = 2000;

    /// 将 URL 模板展开为具体的 JPEG 封面地址。
    ///
    /// 模板为空时返回空字符串。
    #[must_use]
    pub fn expanded_url(&self) -> String {
        if self.url.is_empty() {
            return String::new();
        }
        let width = self.width.unwrap_or(Self::DEFAULT_SIZE);
        let height = self.height.unwrap_or(Self::DEFAULT_SIZE);
        self.url
            .replace("{w}", &width.to_string())
            .replace("{h}", &height.to_string())
            .replace("{f}", "jpg")
    }
}

/// 资源的关联关系集合。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Relationships {
    /// 关联的艺术家。
    #[serde(default)]
    pub artists: RelationshipData,
    /// 关联的专辑。
    #[serde(default)]
    pub albums: RelationshipData,
    /// 播放列表关联的曲目。
    #[serde(default)]
    pub tracks: RelationshipData,
    /// 逐字歌词关系，`href` 供需要时单独请求。
    #[serde(rename = "syllable-lyrics", default)]
    pub syllable_lyrics: SyllableLyrics,
}

/// 一条普通关联关系的数据载荷。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RelationshipData {
    /// 被关联资源的引用列表。
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

impl RelationshipData {
    /// 收集被关联资源的 ID 列表，空 ID 被丢弃。
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.data
            .iter()
            .filter(|entry| !entry.id.is_empty())
            .map(|entry| entry.id.clone())
            .collect()
    }
}

/// 逐字歌词关系：请求路径加可能内嵌的歌词数据。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SyllableLyrics {
    /// 歌词资源的请求路径。
    #[serde(default)]
    pub href: String,
    /// 内嵌的歌词资源，搜索响应中偶尔直接携带。
    #[serde(default)]
    pub data: Vec<LyricResource>,
}

impl SyllableLyrics {
    /// 返回内嵌的 TTML 文本（如果响应直接携带了的话）。
    #[must_use]
    pub fn embedded_ttml(&self) -> Option<&str> {
        self.data
            .first()
            .map(|resource| resource.attributes.ttml.as_str())
            .filter(|ttml| !ttml.is_empty())
    }
}

// =================================================================
// 歌词接口 (`syllable-lyrics` 的 `href`) 的模型
// =================================================================

/// 歌词接口的顶层响应结构。
#[derive(Debug, Deserialize, Default)]
pub struct LyricResponse {
    /// 歌词资源列表，通常只有一个元素。
    #[serde(default)]
    pub data: Vec<LyricResource>,
}

/// 单个歌词资源。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LyricResource {
    /// 歌词资源属性。
    #[serde(default)]
    pub attributes: LyricAttributes,
}

/// 歌词资源的属性。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LyricAttributes {
    /// TTML 格式的歌词文本。
    #[serde(default)]
    pub ttml: String,
}
