use serde::Deserialize;

/// One entry of the playlist channel: a playlist as listed, not yet opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub owner: String,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub owner: String,
    /// Playable source, if the block classifies as audio-capable.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }
}

// Wire shapes as returned by the channel API.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub user: RawUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: u64,
    pub title: Option<String>,
    pub generated_title: Option<String>,
    pub class: Option<String>,
    pub source: Option<RawSource>,
    pub attachment: Option<RawSource>,
    pub user: Option<RawUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContents<T> {
    #[serde(default = "Vec::new")]
    pub contents: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawChannel {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contents: Vec<RawBlock>,
}

impl From<RawSummary> for PlaylistSummary {
    fn from(r: RawSummary) -> Self {
        Self {
            id: r.id,
            slug: r.slug,
            title: r.title,
            owner: r.user.full_name,
            length: r.length,
        }
    }
}

impl From<RawBlock> for Track {
    fn from(b: RawBlock) -> Self {
        let url = super::classify::classify_item_url(&b);
        let title = b
            .title
            .filter(|t| !t.trim().is_empty())
            .or(b.generated_title)
            .unwrap_or_else(|| "Untitled".to_string());
        Self {
            id: b.id,
            title,
            owner: b.user.map(|u| u.full_name).unwrap_or_default(),
            url,
        }
    }
}

impl From<RawChannel> for Playlist {
    fn from(c: RawChannel) -> Self {
        Self {
            id: c.id,
            slug: c.slug,
            title: c.title,
            tracks: c.contents.into_iter().map(Track::from).collect(),
        }
    }
}
