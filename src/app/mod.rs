pub mod actions;
pub mod events;
pub mod state;

use crate::arena::api::ArenaClient;
use crate::config::Config;
use crate::input;
use crate::playback::{EngineCommand, OpenOutcome, View};
use crate::player::mpv::MpvHandle;
use crate::view;
use actions::Action;
use anyhow::Context;
use events::{EngineEvent, Event, NetworkEvent};
use state::AppState;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    client: ArenaClient,
    mpv: Option<MpvHandle>,
}

impl App {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let client = ArenaClient::new(&cfg.api.base_url, &cfg.api.playlist_channel)?;
        let state = AppState::new(cfg.api.per_page, cfg.player.volume);
        Ok(Self {
            cfg,
            state,
            client,
            mpv: None,
        })
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        // The engine is best-effort: without it, every load is reported as failed.
        let mpv_log = self.cfg.paths.data_dir.join("mpv.log");
        match MpvHandle::spawn(
            tx.clone(),
            self.cfg.player.audio_device.as_deref(),
            Some(&mpv_log),
        )
        .await
        {
            Ok(h) => {
                if let Err(e) = h.set_volume(self.state.volume).await {
                    tracing::warn!("set volume: {e:#}");
                }
                self.mpv = Some(h);
            }
            Err(e) => {
                tracing::warn!("mpv disabled: {e:#}");
                self.mpv = None;
            }
        }

        input::spawn_input_task(tx.clone());
        view::print_help();
        self.spawn_load_catalog(&tx);

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(line) => {
                    if let Some(action) = input::map_line_to_action(&self.state, &line) {
                        self.handle_action(action, &tx);
                    }
                }
                Event::Engine(ee) => self.handle_engine(ee),
                Event::Network(ne) => self.handle_network(ne),
            }

            self.flush_engine().await;

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        let before = view::status_line(&self.state);
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Help => {
                self.state.view = View::Other;
                view::print_help();
            }
            Action::ShowList => self.print_current_view(),
            Action::ShowStatus => {
                let nav = &self.state.nav;
                println!(
                    "{}  {}/{}",
                    view::status_line(&self.state),
                    view::format_clock(nav.progress_secs()),
                    view::format_clock(nav.duration_secs())
                );
            }
            Action::OpenPlaylist(slug) => self.spawn_open_playlist(slug, tx),
            Action::OpenListed(n) => {
                match self.state.browse.visible().get(n).map(|p| p.slug.clone()) {
                    Some(slug) => self.spawn_open_playlist(slug, tx),
                    None => println!("no playlist #{}", n + 1),
                }
            }
            Action::Back => {
                self.state.view = View::BrowsingList;
                view::print_browse(&self.state.browse);
            }
            Action::Search(query) => {
                self.state.view = View::BrowsingList;
                self.state.browse.apply_search(&query);
                view::print_browse(&self.state.browse);
            }
            Action::Page(intent) => {
                self.state.view = View::BrowsingList;
                let page = self.state.browse.begin_page(intent);
                self.spawn_load_page(page, tx);
            }
            Action::SelectTrack(n) => {
                let nav = &self.state.nav;
                let track = nav.open_playlist().and_then(|p| p.track(n).cloned());
                match (nav.open_target(), track) {
                    (Some(slug), _) => println!("(loading {slug})"),
                    (None, Some(track)) => self.state.nav.select_track(track, n),
                    (None, None) => println!("no track #{}", n + 1),
                }
            }
            Action::TogglePlayback => self.state.nav.toggle_playback(self.state.view),
            Action::NextTrack => self.state.nav.advance_track(),
            Action::PrevTrack => self.state.nav.retreat_track(),
        }
        self.print_status_if_changed(&before);
    }

    fn handle_engine(&mut self, ee: EngineEvent) {
        let before = view::status_line(&self.state);
        let nav = &mut self.state.nav;
        match ee {
            EngineEvent::Ready => nav.on_engine_ready(),
            EngineEvent::Start => nav.on_engine_start(),
            // mpv reports "unpaused" while idle, and a cache refill can land after a pause.
            EngineEvent::Play | EngineEvent::Buffer
                if nav.current_track().is_none() || !nav.is_playing() => {}
            EngineEvent::Play => nav.on_engine_playing(),
            EngineEvent::Buffer => nav.on_engine_buffering(),
            EngineEvent::Progress { seconds } => nav.on_engine_progress(seconds),
            EngineEvent::Duration { seconds } => nav.on_engine_duration(seconds),
            EngineEvent::Ended => nav.on_engine_ended(),
            EngineEvent::Error(e) => {
                tracing::warn!("playback error, skipping: {e}");
                nav.on_engine_error();
            }
        }
        self.print_status_if_changed(&before);
    }

    fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::CatalogLoaded { count, playlists } => {
                tracing::info!(count, listed = playlists.len(), "playlists loaded");
                self.state.browse.set_catalog(count, playlists);
                if self.state.view == View::BrowsingList {
                    view::print_browse(&self.state.browse);
                }
            }
            NetworkEvent::CatalogFailed { error } => {
                tracing::warn!("load playlists: {error}");
            }
            NetworkEvent::PageLoaded { page, playlists } => {
                if self.state.browse.complete_page(page, playlists)
                    && self.state.view == View::BrowsingList
                {
                    view::print_browse(&self.state.browse);
                }
            }
            NetworkEvent::PageFailed { page, error } => {
                tracing::warn!(page, "load page: {error}");
                self.state.browse.fail_page(page);
            }
            NetworkEvent::PlaylistLoaded { slug, playlist } => {
                if self.state.nav.complete_open(&slug, playlist) == OpenOutcome::Applied
                    && self.state.view == View::ViewingPlaylistDetail
                {
                    self.print_current_view();
                }
            }
            NetworkEvent::PlaylistFailed { slug, error } => {
                tracing::warn!(%slug, "open playlist: {error}");
                self.state.nav.fail_open(&slug);
            }
        }
    }

    /// Forward queued navigator work to the engine. A load the engine cannot
    /// take is a playback failure, which drops the work queued behind it.
    async fn flush_engine(&mut self) {
        while let Some(cmd) = self.state.nav.next_command() {
            let is_load = matches!(cmd, EngineCommand::Load(_));
            let Err(e) = self.apply_engine_command(cmd).await else {
                continue;
            };
            if is_load {
                let before = view::status_line(&self.state);
                tracing::warn!("playback error, skipping: {e:#}");
                self.state.nav.on_load_failed();
                self.print_status_if_changed(&before);
            } else {
                tracing::warn!("engine command: {e:#}");
            }
        }
    }

    async fn apply_engine_command(&self, cmd: EngineCommand) -> anyhow::Result<()> {
        match cmd {
            EngineCommand::Load(track) => {
                let url = track
                    .url
                    .with_context(|| format!("\"{}\" has no playable source", track.title))?;
                let mpv = self.mpv.as_ref().context("no playback engine")?;
                mpv.load_url(&url).await.context("load track")?;
            }
            EngineCommand::Play => {
                if let Some(mpv) = &self.mpv {
                    mpv.set_pause(false).await.context("resume")?;
                }
            }
            EngineCommand::Pause => {
                if let Some(mpv) = &self.mpv {
                    mpv.set_pause(true).await.context("pause")?;
                }
            }
            EngineCommand::SeekTo(seconds) => {
                if let Some(mpv) = &self.mpv {
                    mpv.seek_absolute(seconds).await.context("seek")?;
                }
            }
            EngineCommand::Stop => {
                if let Some(mpv) = &self.mpv {
                    mpv.stop().await.context("stop")?;
                }
            }
        }
        Ok(())
    }

    fn spawn_load_catalog(&mut self, tx: &mpsc::Sender<Event>) {
        let client = self.client.clone();
        let per = self.state.browse.per_page;
        let page = self.state.browse.begin_page(crate::browse::PageIntent::Page(1));
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match tokio::try_join!(client.get_item_count(), client.get_channel_contents(None)) {
                Ok((count, playlists)) => NetworkEvent::CatalogLoaded { count, playlists },
                Err(e) => NetworkEvent::CatalogFailed { error: format!("{e:#}") },
            };
            let _ = tx.send(Event::Network(ev)).await;

            let slug = client.playlist_channel().to_string();
            let ev = match client.get_paginated_contents(&slug, page, per).await {
                Ok(playlists) => NetworkEvent::PageLoaded { page, playlists },
                Err(e) => NetworkEvent::PageFailed { page, error: format!("{e:#}") },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_load_page(&mut self, page: usize, tx: &mpsc::Sender<Event>) {
        let client = self.client.clone();
        let per = self.state.browse.per_page;
        let tx = tx.clone();
        tokio::spawn(async move {
            let slug = client.playlist_channel().to_string();
            let ev = match client.get_paginated_contents(&slug, page, per).await {
                Ok(playlists) => NetworkEvent::PageLoaded { page, playlists },
                Err(e) => NetworkEvent::PageFailed { page, error: format!("{e:#}") },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_open_playlist(&mut self, slug: String, tx: &mpsc::Sender<Event>) {
        self.state.view = View::ViewingPlaylistDetail;
        self.state.nav.begin_open(&slug);
        println!("loading {slug}...");

        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match client.get_full_channel(&slug).await {
                Ok(playlist) => NetworkEvent::PlaylistLoaded { slug, playlist },
                Err(e) => NetworkEvent::PlaylistFailed { slug, error: format!("{e:#}") },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn print_current_view(&self) {
        match self.state.view {
            View::ViewingPlaylistDetail => {
                let nav = &self.state.nav;
                match nav.open_playlist() {
                    Some(p) if nav.is_open_playlist_loaded() => {
                        let playing = (nav.track_belongs_to_open_playlist()
                            && nav.current_track().is_some())
                        .then_some(nav.current_index());
                        view::print_tracks(p, playing);
                    }
                    _ => println!("(loading {})", nav.open_target().unwrap_or("playlist")),
                }
            }
            View::BrowsingList | View::Other => view::print_browse(&self.state.browse),
        }
    }

    fn print_status_if_changed(&self, before: &str) {
        let now = view::status_line(&self.state);
        if now != before {
            println!("{now}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::models::{Playlist, PlaylistSummary, Track};
    use crate::playback::PlayerStatus;

    fn app() -> App {
        let mut cfg = crate::config::defaults::defaults();
        cfg.api.base_url = "http://127.0.0.1:9".to_string();
        App::new(cfg).unwrap()
    }

    fn playlist(id: u64, slug: &str, urls: &[Option<&str>]) -> Playlist {
        Playlist {
            id,
            slug: slug.to_string(),
            title: slug.to_string(),
            tracks: urls
                .iter()
                .enumerate()
                .map(|(i, u)| Track {
                    id: id * 100 + i as u64,
                    title: format!("{slug}-{i}"),
                    owner: String::new(),
                    url: u.map(str::to_string),
                })
                .collect(),
        }
    }

    fn loaded(app: &mut App, slug: &str, pl: Playlist) {
        app.state.view = View::ViewingPlaylistDetail;
        app.state.nav.begin_open(slug);
        app.handle_network(NetworkEvent::PlaylistLoaded {
            slug: slug.to_string(),
            playlist: pl,
        });
    }

    #[tokio::test]
    async fn slow_playlist_response_is_ignored() {
        let mut app = app();
        app.state.nav.begin_open("first");
        app.state.nav.begin_open("second");
        app.handle_network(NetworkEvent::PlaylistLoaded {
            slug: "second".into(),
            playlist: playlist(2, "second", &[Some("u")]),
        });
        app.handle_network(NetworkEvent::PlaylistLoaded {
            slug: "first".into(),
            playlist: playlist(1, "first", &[Some("u")]),
        });
        assert_eq!(app.state.nav.open_playlist().unwrap().id, 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state() {
        let mut app = app();
        loaded(&mut app, "a", playlist(1, "a", &[Some("u")]));
        app.state.nav.begin_open("b");
        app.handle_network(NetworkEvent::PlaylistFailed {
            slug: "b".into(),
            error: "boom".into(),
        });
        assert_eq!(app.state.nav.open_playlist().unwrap().id, 1);

        app.handle_network(NetworkEvent::CatalogFailed { error: "boom".into() });
        assert!(!app.state.browse.loaded);
    }

    #[tokio::test]
    async fn catalog_and_page_events_fill_browse_state() {
        let mut app = app();
        let summary = |id: u64| PlaylistSummary {
            id,
            slug: format!("s{id}"),
            title: format!("t{id}"),
            owner: "o".into(),
            length: 1,
        };
        app.handle_network(NetworkEvent::CatalogLoaded {
            count: 2,
            playlists: vec![summary(1), summary(2)],
        });
        assert_eq!(app.state.browse.playlists[0].id, 2);

        let page = app.state.browse.begin_page(crate::browse::PageIntent::Page(1));
        app.handle_network(NetworkEvent::PageLoaded { page, playlists: vec![summary(1)] });
        assert_eq!(app.state.browse.visible().len(), 1);
    }

    #[tokio::test]
    async fn unplayable_tracks_are_skipped_without_engine() {
        let mut app = app();
        loaded(&mut app, "a", playlist(1, "a", &[None, None, None]));
        let (tx, _rx) = mpsc::channel(8);
        app.handle_action(Action::SelectTrack(0), &tx);
        app.flush_engine().await;
        assert_eq!(app.state.nav.current_index(), 2);
        assert_eq!(app.state.nav.status(), PlayerStatus::Errored);
        assert!(app.state.nav.drain_commands().is_empty());
    }

    #[tokio::test]
    async fn toggle_uses_current_view() {
        let mut app = app();
        loaded(&mut app, "a", playlist(1, "a", &[Some("u1"), Some("u2")]));
        let (tx, _rx) = mpsc::channel(8);

        app.state.view = View::BrowsingList;
        app.handle_action(Action::TogglePlayback, &tx);
        assert!(app.state.nav.current_track().is_none());

        app.state.view = View::ViewingPlaylistDetail;
        app.handle_action(Action::TogglePlayback, &tx);
        assert_eq!(app.state.nav.current_index(), 0);
        assert!(app.state.nav.is_playing());
    }

    #[tokio::test]
    async fn idle_engine_play_report_is_ignored() {
        let mut app = app();
        app.handle_engine(EngineEvent::Play);
        app.handle_engine(EngineEvent::Buffer);
        assert_eq!(app.state.nav.status(), PlayerStatus::Idle);
    }

    #[tokio::test]
    async fn cache_refill_after_pause_keeps_idle() {
        let mut app = app();
        loaded(&mut app, "a", playlist(1, "a", &[Some("u1")]));
        let (tx, _rx) = mpsc::channel(8);
        app.handle_action(Action::SelectTrack(0), &tx);
        app.handle_engine(EngineEvent::Buffer);
        assert_eq!(app.state.nav.status(), PlayerStatus::Buffering);
        app.handle_engine(EngineEvent::Play);
        assert_eq!(app.state.nav.status(), PlayerStatus::Playing);

        app.handle_action(Action::TogglePlayback, &tx);
        app.handle_engine(EngineEvent::Play);
        assert_eq!(app.state.nav.status(), PlayerStatus::Idle);
    }

    #[tokio::test]
    async fn unplayable_last_track_leaves_nothing_queued() {
        let mut app = app();
        loaded(&mut app, "a", playlist(1, "a", &[Some("u1"), None]));
        let (tx, _rx) = mpsc::channel(8);
        app.handle_action(Action::SelectTrack(1), &tx);
        app.flush_engine().await;
        assert_eq!(app.state.nav.current_index(), 1);
        assert_eq!(app.state.nav.status(), PlayerStatus::Errored);
        assert!(app.state.nav.next_command().is_none());
    }

    #[tokio::test]
    async fn selection_while_loading_is_ignored() {
        let mut app = app();
        loaded(&mut app, "a", playlist(1, "a", &[Some("u1"), Some("u2")]));
        let (tx, _rx) = mpsc::channel(8);
        app.handle_action(Action::OpenPlaylist("b".into()), &tx);
        app.handle_action(Action::SelectTrack(1), &tx);
        app.handle_action(Action::TogglePlayback, &tx);
        assert!(app.state.nav.current_track().is_none());
        assert!(app.state.nav.track_playlist().is_none());
        assert_eq!(app.state.nav.open_target(), Some("b"));
    }

    #[tokio::test]
    async fn open_listed_out_of_range_is_harmless() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel(8);
        app.handle_action(Action::OpenListed(4), &tx);
        assert_eq!(app.state.view, View::BrowsingList);
        assert!(app.state.nav.open_target().is_none());
    }
}
