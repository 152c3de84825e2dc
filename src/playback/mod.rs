use crate::arena::models::{Playlist, Track};
use std::collections::VecDeque;
use std::sync::Arc;

/// Status as last reported by the engine. Evidence, not a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Buffering,
    Playing,
    Errored,
}

impl PlayerStatus {
    pub fn label(self) -> &'static str {
        match self {
            PlayerStatus::Idle => "idle",
            PlayerStatus::Buffering => "buffering",
            PlayerStatus::Playing => "playing",
            PlayerStatus::Errored => "errored",
        }
    }
}

/// Which view the presentation layer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    BrowsingList,
    ViewingPlaylistDetail,
    Other,
}

/// Work for the playback engine, drained by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Load(Track),
    Play,
    Pause,
    SeekTo(f64),
    Stop,
}

/// Outcome of applying a finished playlist fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Applied,
    Stale,
}

/// Playback and navigation state. The only writer of `current_track`,
/// `track_playlist`, `open_playlist` and the player status.
#[derive(Debug, Default)]
pub struct Navigator {
    status: PlayerStatus,
    is_playing: bool,
    current_track: Option<Track>,
    current_index: usize,
    track_playlist: Option<Arc<Playlist>>,
    open_playlist: Option<Arc<Playlist>>,
    track_belongs_to_open: bool,
    open_target: Option<String>,
    open_loaded: bool,
    progress_secs: f64,
    duration_secs: f64,
    // The last track ran out; resuming has to load it again.
    finished: bool,
    commands: VecDeque<EngineCommand>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            track_belongs_to_open: true,
            ..Self::default()
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn track_playlist(&self) -> Option<&Playlist> {
        self.track_playlist.as_deref()
    }

    pub fn open_playlist(&self) -> Option<&Playlist> {
        self.open_playlist.as_deref()
    }

    pub fn track_belongs_to_open_playlist(&self) -> bool {
        self.track_belongs_to_open
    }

    pub fn is_open_playlist_loaded(&self) -> bool {
        self.open_loaded
    }

    /// Slug of the playlist fetch currently awaited, if any.
    pub fn open_target(&self) -> Option<&str> {
        self.open_target.as_deref()
    }

    pub fn progress_secs(&self) -> f64 {
        self.progress_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Next piece of engine work queued by the operations, oldest first.
    pub fn next_command(&mut self) -> Option<EngineCommand> {
        self.commands.pop_front()
    }

    #[cfg(test)]
    pub fn drain_commands(&mut self) -> Vec<EngineCommand> {
        self.commands.drain(..).collect()
    }

    /// Play `track` at `index` of the open playlist.
    ///
    /// The open playlist becomes the track playlist. Ignored when `index`
    /// does not address a track of the open playlist, or while the playlist
    /// the user navigated to is still being fetched.
    pub fn select_track(&mut self, track: Track, index: usize) {
        if let Some(target) = &self.open_target {
            tracing::warn!(%target, index, "select_track: open playlist still loading");
            return;
        }
        if let Some(open) = &self.open_playlist
            && index >= open.len()
        {
            tracing::warn!(index, len = open.len(), "select_track: index out of range");
            return;
        }
        self.track_playlist = self.open_playlist.clone();
        self.track_belongs_to_open = true;
        self.load(track, index);
        self.resume();
    }

    pub fn resume(&mut self) {
        if self.finished
            && let Some(track) = self.current_track.clone()
        {
            self.load(track, self.current_index);
        }
        self.is_playing = true;
        self.commands.push_back(EngineCommand::Play);
    }

    pub fn pause_track(&mut self) {
        self.is_playing = false;
        self.status = PlayerStatus::Idle;
        self.commands.push_back(EngineCommand::Pause);
    }

    /// Single-button play control.
    ///
    /// With nothing loaded and a playlist detail on screen, starts that
    /// playlist from its first track. Otherwise pauses or resumes.
    pub fn toggle_playback(&mut self, view: View) {
        let in_detail = view == View::ViewingPlaylistDetail;
        if in_detail && self.current_track.is_none() {
            let first = self
                .open_playlist
                .as_ref()
                .and_then(|p| p.track(0).cloned());
            if let Some(track) = first {
                self.select_track(track, 0);
            }
            return;
        }
        if self.current_track.is_none() {
            return;
        }
        if self.is_playing {
            self.pause_track();
        } else {
            self.resume();
        }
    }

    /// Move to the next track of the track playlist. No-op on the last track.
    pub fn advance_track(&mut self) {
        let Some(playlist) = self.track_playlist.clone() else {
            return;
        };
        let next = self.current_index + 1;
        if let Some(track) = playlist.track(next).cloned() {
            self.play_from_track_playlist(track, next);
        }
    }

    /// Move to the previous track, or restart the current one at index 0.
    pub fn retreat_track(&mut self) {
        let Some(playlist) = self.track_playlist.clone() else {
            return;
        };
        if self.current_index == 0 {
            if self.current_track.is_some() {
                self.commands.push_back(EngineCommand::SeekTo(0.0));
            }
            return;
        }
        let prev = self.current_index - 1;
        if let Some(track) = playlist.track(prev).cloned() {
            self.play_from_track_playlist(track, prev);
        }
    }

    /// Replace the browsed playlist. Playback is untouched.
    pub fn open_playlist_now(&mut self, playlist: Arc<Playlist>) {
        tracing::info!(slug = %playlist.slug, tracks = playlist.len(), "open playlist");
        self.open_playlist = Some(playlist);
        self.open_loaded = true;
        self.recompute_belongs();
    }

    /// Record `slug` as the playlist the user navigated to; its fetch is now in flight.
    pub fn begin_open(&mut self, slug: &str) {
        self.open_target = Some(slug.to_string());
        self.open_loaded = false;
    }

    /// Apply a finished fetch unless the user has navigated elsewhere since.
    pub fn complete_open(&mut self, slug: &str, playlist: Playlist) -> OpenOutcome {
        if self.open_target.as_deref() != Some(slug) {
            tracing::warn!(%slug, target = ?self.open_target, "discarding stale playlist response");
            return OpenOutcome::Stale;
        }
        self.open_target = None;
        self.open_playlist_now(self.shared(playlist));
        OpenOutcome::Applied
    }

    /// A fetch failed; the open playlist stays as it was.
    pub fn fail_open(&mut self, slug: &str) {
        if self.open_target.as_deref() == Some(slug) {
            self.open_target = None;
            self.open_loaded = self.open_playlist.is_some();
        }
    }

    pub fn on_engine_ready(&mut self) {
        tracing::debug!("engine ready");
    }

    pub fn on_engine_start(&mut self) {
        tracing::debug!("engine start");
    }

    pub fn on_engine_buffering(&mut self) {
        self.status = PlayerStatus::Buffering;
    }

    pub fn on_engine_playing(&mut self) {
        self.status = PlayerStatus::Playing;
    }

    /// Skip the failing track. There is no cap on consecutive skips.
    pub fn on_engine_error(&mut self) {
        self.status = PlayerStatus::Errored;
        self.advance_track();
    }

    /// The engine could not take the track just loaded. Work queued behind
    /// that load is dropped and the engine stops before the skip.
    pub fn on_load_failed(&mut self) {
        self.commands.clear();
        self.commands.push_back(EngineCommand::Stop);
        self.on_engine_error();
    }

    /// Natural end of a track. After the last one the engine is idle, so
    /// playback counts as paused until the user resumes.
    pub fn on_engine_ended(&mut self) {
        let has_next = self
            .track_playlist
            .as_ref()
            .is_some_and(|p| self.current_index + 1 < p.len());
        if has_next {
            self.advance_track();
            return;
        }
        tracing::info!("end of playlist");
        self.is_playing = false;
        self.status = PlayerStatus::Idle;
        self.finished = true;
    }

    pub fn on_engine_progress(&mut self, seconds: f64) {
        self.progress_secs = seconds;
    }

    pub fn on_engine_duration(&mut self, seconds: f64) {
        self.duration_secs = seconds;
    }

    fn play_from_track_playlist(&mut self, track: Track, index: usize) {
        self.load(track, index);
        self.recompute_belongs();
        self.resume();
    }

    fn load(&mut self, track: Track, index: usize) {
        tracing::info!(index, title = %track.title, "load track");
        self.current_index = index;
        self.current_track = Some(track.clone());
        self.progress_secs = 0.0;
        self.duration_secs = 0.0;
        self.finished = false;
        self.commands.push_back(EngineCommand::Load(track));
    }

    fn recompute_belongs(&mut self) {
        self.track_belongs_to_open = match (&self.track_playlist, &self.open_playlist) {
            (Some(t), Some(o)) => t.id == o.id,
            _ => true,
        };
    }

    // Reuse the track playlist's allocation when the same playlist comes back.
    fn shared(&self, playlist: Playlist) -> Arc<Playlist> {
        match &self.track_playlist {
            Some(t) if **t == playlist => t.clone(),
            _ => Arc::new(playlist),
        }
    }
}
