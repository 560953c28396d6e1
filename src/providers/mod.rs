//! 提供商模块
//!
//! 该模块定义了与音乐目录提供商进行交互的核心抽象。

use async_trait::async_trait;

use crate::{
    error::Result,
    model::{
        generic::{Album, Artist, Playlist, Song},
        track::Track,
    },
};

pub mod apple_music;

/// 定义了音乐目录提供商需要实现的通用接口。
#[async_trait]
pub trait Provider: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"apple-music"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 根据歌曲信息（标题、艺术家、专辑）搜索歌曲。
    ///
    /// # 参数
    /// * `track` - 一个包含搜索关键词的 `Track` 引用。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含整理后的 `Vec<Song>`，歌词已随记录取回并转码。
    ///
    async fn search_songs(&self, track: &Track<'_>) -> Result<Vec<Song>>;

    ///
    /// 根据歌曲 ID 获取单首歌曲的详细信息。
    ///
    /// # 参数
    /// * `song_id` - 特定于该提供商的歌曲 ID。
    ///
    async fn get_song(&self, song_id: &str) -> Result<Song>;

    ///
    /// 根据专辑 ID 获取专辑的详细信息。
    ///
    /// # 参数
    /// * `album_id` - 特定于该提供商的专辑 ID。
    ///
    async fn get_album(&self, album_id: &str) -> Result<Album>;

    ///
    /// 根据艺术家 ID 获取艺术家的详细信息。
    ///
    /// # 参数
    /// * `artist_id` - 特定于该提供商的艺术家 ID。
    ///
    async fn get_artist(&self, artist_id: &str) -> Result<Artist>;

    ///
    /// 根据播放列表 ID 获取播放列表的详细信息。
    ///
    /// # 参数
    /// * `playlist_id` - 特定于该提供商的播放列表 ID。
    ///
    async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist>;

    ///
    /// 根据歌词资源路径获取原始 TTML 歌词文本。
    ///
    /// # 参数
    /// * `lyric_path` - 歌曲记录中携带的逐字歌词请求路径。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含非空的 TTML 文本；
    /// 源中没有歌词时返回 [`crate::error::AppleMusicError::LyricNotFound`]。
    ///
    async fn get_lyric(&self, lyric_path: &str) -> Result<String>;
}
