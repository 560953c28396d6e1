#![warn(missing_docs)]
//! # Apple Music API
//!
//! 一个用于访问 Apple Music 目录并把逐字歌词 (TTML) 转码为 LRC 的 Rust 库。
//!
//! ## 功能
//!
//! - **歌词转码**: 将 Apple Music 的 TTML 歌词转写为标准 LRC，
//!   没有时间轴的歌词以纯文本形式输出。
//! - **目录访问**: 搜索歌曲并获取歌曲、专辑、艺术家的详细信息，
//!   逐字歌词随歌曲记录一并取回并转码。
//! - **综合搜索**: 一次搜索返回歌曲、专辑、艺术家混排的结果，
//!   保持目录服务给出的相关度顺序。
//!
//! ## 示例: 转码一段 TTML 歌词
//!
//! ```rust
//! use apple_music_api_rs::ttml_to_lrc;
//!
//! let ttml = r#"<tt xmlns="http://www.w3.org/ns/ttml">
//!   <body><div>
//!     <p begin="0:01.0" end="0:02.5">第一行</p>
//!   </div></body>
//! </tt>"#;
//!
//! let lrc = ttml_to_lrc(ttml).unwrap();
//! assert_eq!(lrc, "[00:01.000]第一行\n");
//! ```
//!
//! ## 示例: 搜索歌曲
//!
//! ```rust,no_run
//! use apple_music_api_rs::{AppleMusicClient, AppleMusicConfig, Track};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AppleMusicClient::new(AppleMusicConfig::default())?;
//! let track = Track {
//!     title: Some("シャルル"),
//!     artist: Some("バルーン"),
//!     album: None,
//! };
//! for song in client.search_songs(&track).await? {
//!     println!("{} - {}\n{}", song.title, song.artists, song.lyrics_lrc);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod model;
pub mod providers;
pub mod search;

pub use config::AppleMusicConfig;
pub use converter::ttml_to_lrc;
pub use error::{AppleMusicError, Result};
pub use model::generic::{Album, Artist, CatalogEntry, Playlist, Song};
pub use model::track::Track;
pub use providers::Provider;
pub use providers::apple_music::{AppleMusicClient, LyricCache};
pub use search::search;
