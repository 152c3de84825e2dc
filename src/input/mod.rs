use crate::app::actions::Action;
use crate::app::events::Event;
use crate::app::state::AppState;
use crate::browse::PageIntent;
use crate::playback::View;
use std::io::BufRead;
use tokio::sync::mpsc;

/// Forward stdin lines into the event loop until stdin closes or the loop stops.
pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.blocking_send(Event::Input(line)).is_err() {
                break;
            }
        }
        let _ = tx.blocking_send(Event::Input("q".to_string()));
    });
}

pub fn map_line_to_action(state: &AppState, line: &str) -> Option<Action> {
    // Search keeps its text verbatim, including spaces.
    if let Some(query) = line.trim_start().strip_prefix('/') {
        return Some(Action::Search(query.trim_end().to_string()));
    }
    if line == " " {
        return Some(Action::TogglePlayback);
    }

    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    match cmd {
        "q" | "quit" | "exit" => Some(Action::Quit),
        "h" | "help" | "?" => Some(Action::Help),
        "ls" | "list" => Some(Action::ShowList),
        "s" | "status" => Some(Action::ShowStatus),
        "t" | "toggle" | "play" | "pause" => Some(Action::TogglePlayback),
        "n" | "next" => Some(Action::NextTrack),
        "p" | "prev" => Some(Action::PrevTrack),
        "b" | "back" => Some(Action::Back),
        "]" => Some(Action::Page(PageIntent::Next)),
        "[" => Some(Action::Page(PageIntent::Prev)),
        "page" => arg.parse().ok().map(|n| Action::Page(PageIntent::Page(n))),
        "o" | "open" if !arg.is_empty() => Some(match arg.parse::<usize>() {
            Ok(n) => Action::OpenListed(n.saturating_sub(1)),
            Err(_) => Action::OpenPlaylist(arg.to_string()),
        }),
        _ => {
            // A bare number picks from whatever is on screen.
            let n = cmd.parse::<usize>().ok()?.checked_sub(1)?;
            match state.view {
                View::ViewingPlaylistDetail => Some(Action::SelectTrack(n)),
                View::BrowsingList => Some(Action::OpenListed(n)),
                View::Other => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(view: View) -> AppState {
        let mut s = AppState::new(20, 80);
        s.view = view;
        s
    }

    #[test]
    fn playback_commands() {
        let s = state(View::BrowsingList);
        assert_eq!(map_line_to_action(&s, " "), Some(Action::TogglePlayback));
        assert_eq!(map_line_to_action(&s, "t"), Some(Action::TogglePlayback));
        assert_eq!(map_line_to_action(&s, "next"), Some(Action::NextTrack));
        assert_eq!(map_line_to_action(&s, "  p "), Some(Action::PrevTrack));
        assert_eq!(map_line_to_action(&s, "q"), Some(Action::Quit));
    }

    #[test]
    fn search_keeps_inner_spaces() {
        let s = state(View::BrowsingList);
        assert_eq!(
            map_line_to_action(&s, "/ada / night"),
            Some(Action::Search("ada / night".to_string()))
        );
        assert_eq!(map_line_to_action(&s, "/"), Some(Action::Search(String::new())));
    }

    #[test]
    fn numbers_depend_on_view() {
        assert_eq!(
            map_line_to_action(&state(View::BrowsingList), "3"),
            Some(Action::OpenListed(2))
        );
        assert_eq!(
            map_line_to_action(&state(View::ViewingPlaylistDetail), "3"),
            Some(Action::SelectTrack(2))
        );
        assert_eq!(map_line_to_action(&state(View::Other), "3"), None);
        assert_eq!(map_line_to_action(&state(View::ViewingPlaylistDetail), "0"), None);
    }

    #[test]
    fn open_and_paging() {
        let s = state(View::BrowsingList);
        assert_eq!(
            map_line_to_action(&s, "open late-night-mix"),
            Some(Action::OpenPlaylist("late-night-mix".to_string()))
        );
        assert_eq!(map_line_to_action(&s, "o 2"), Some(Action::OpenListed(1)));
        assert_eq!(map_line_to_action(&s, "open"), None);
        assert_eq!(map_line_to_action(&s, "]"), Some(Action::Page(PageIntent::Next)));
        assert_eq!(map_line_to_action(&s, "["), Some(Action::Page(PageIntent::Prev)));
        assert_eq!(map_line_to_action(&s, "page 4"), Some(Action::Page(PageIntent::Page(4))));
        assert_eq!(map_line_to_action(&s, "page x"), None);
        assert_eq!(map_line_to_action(&s, "gibberish"), None);
    }
}
