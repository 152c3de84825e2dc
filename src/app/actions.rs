use crate::browse::PageIntent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    ShowList,
    ShowStatus,

    // Browsing
    OpenPlaylist(String),
    OpenListed(usize),
    Back,
    Search(String),
    Page(PageIntent),

    // Playback
    SelectTrack(usize),
    TogglePlayback,
    NextTrack,
    PrevTrack,
}
