//! Plain-text rendering of the player state to stdout.

use crate::app::state::{AppState, BrowseState};
use crate::arena::models::{Playlist, PlaylistSummary};
use crate::browse::entities;

pub fn playlist_label(p: &PlaylistSummary) -> String {
    entities::decode(&format!("{} / {}", p.owner, p.title))
}

pub fn print_playlists(items: &[PlaylistSummary]) {
    for (i, p) in items.iter().enumerate() {
        println!(
            "{:02}. {}  ({} items, slug={}, id={})",
            i + 1,
            playlist_label(p),
            p.length,
            p.slug,
            p.id
        );
    }
}

pub fn print_browse(browse: &BrowseState) {
    if !browse.loaded {
        println!("(playlists not loaded)");
        return;
    }
    print_playlists(browse.visible());
    if browse.search_query.is_empty() {
        println!("-- page {}/{} --", browse.active_page, browse.page_count());
    } else {
        println!(
            "-- {} match(es) for \"{}\" --",
            browse.visible().len(),
            browse.search_query
        );
    }
}

/// Tracks of a playlist; `playing` marks the row of the current track.
pub fn print_tracks(playlist: &Playlist, playing: Option<usize>) {
    println!("{}", entities::decode(&playlist.title));
    if playlist.is_empty() {
        println!("(empty playlist)");
        return;
    }
    for (i, t) in playlist.tracks.iter().enumerate() {
        let marker = if playing == Some(i) { ">" } else { " " };
        let owner = if t.owner.is_empty() {
            String::new()
        } else {
            format!(" - {}", entities::decode(&t.owner))
        };
        let source = t.url.as_deref().unwrap_or("(not playable)");
        println!(
            "{marker}{:02}. {}{}  [{}] (id={})",
            i + 1,
            entities::decode(&t.title),
            owner,
            source,
            t.id
        );
    }
}

pub fn status_line(state: &AppState) -> String {
    let nav = &state.nav;
    let Some(track) = nav.current_track() else {
        return format!("[{}] nothing loaded", nav.status().label());
    };
    let playing = if nav.is_playing() { "play" } else { "pause" };
    let elsewhere = match nav.track_playlist() {
        Some(p) if !nav.track_belongs_to_open_playlist() => {
            format!(" (from {})", entities::decode(&p.title))
        }
        _ => String::new(),
    };
    format!(
        "[{}/{}] #{} {}{}",
        nav.status().label(),
        playing,
        nav.current_index() + 1,
        entities::decode(&track.title),
        elsewhere
    )
}

pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn print_help() {
    println!(
        "commands: ls | open <n|slug> | back | <n> | t (or space) | n | p | /<search> | ] | [ | page <n> | status | q"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::models::Track;
    use std::sync::Arc;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(61.9), "1:01");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn status_mentions_foreign_playlist() {
        let mut s = AppState::new(20, 80);
        assert_eq!(status_line(&s), "[idle] nothing loaded");

        let pl = Playlist {
            id: 1,
            slug: "a".into(),
            title: "A".into(),
            tracks: vec![Track { id: 5, title: "Rock &amp; Roll".into(), owner: String::new(), url: None }],
        };
        s.nav.open_playlist_now(Arc::new(pl.clone()));
        s.nav.select_track(pl.tracks[0].clone(), 0);
        assert_eq!(status_line(&s), "[idle/play] #1 Rock & Roll");

        s.nav.open_playlist_now(Arc::new(Playlist { id: 2, ..pl }));
        assert!(status_line(&s).ends_with("(from A)"));
    }
}
