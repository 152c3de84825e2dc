use super::{ApiConfig, Config, PathsConfig, PlayerConfig};

pub const BASE_URL: &str = "https://api.are.na/v2";
pub const PLAYLIST_CHANNEL: &str = "tiny-player-playlists";
pub const PER_PAGE: usize = 20;
pub const VOLUME: u8 = 80;

pub fn defaults() -> Config {
    Config {
        api: ApiConfig::default(),
        player: PlayerConfig::default(),
        paths: PathsConfig::default(),
    }
}
