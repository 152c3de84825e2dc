use crate::arena::models::{Playlist, PlaylistSummary};

#[derive(Debug, Clone)]
pub enum Event {
    Input(String),
    Engine(EngineEvent),
    Network(NetworkEvent),
}

/// Lifecycle signals reported by the playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Ready,
    Start,
    Play,
    Buffer,
    Progress { seconds: f64 },
    Duration { seconds: f64 },
    Ended,
    Error(String),
}

/// Completed gateway requests. Each carries the target it was issued for.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    CatalogLoaded { count: usize, playlists: Vec<PlaylistSummary> },
    CatalogFailed { error: String },
    PageLoaded { page: usize, playlists: Vec<PlaylistSummary> },
    PageFailed { page: usize, error: String },
    PlaylistLoaded { slug: String, playlist: Playlist },
    PlaylistFailed { slug: String, error: String },
}
