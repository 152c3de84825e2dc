use crate::arena::models::{Playlist, PlaylistSummary, RawChannel, RawContents, RawSummary};
use anyhow::Context;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
    playlist_channel: String,
}

/// Read-only client for the channel API. Every call is one GET with no retry.
#[derive(Debug, Clone)]
pub struct ArenaClient {
    inner: Arc<Inner>,
}

impl ArenaClient {
    pub fn new(base_url: &str, playlist_channel: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("tiny-player/0.1.0"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                playlist_channel: playlist_channel.to_string(),
            }),
        })
    }

    pub fn playlist_channel(&self) -> &str {
        &self.inner.playlist_channel
    }

    /// Number of playlists in the playlist channel.
    pub async fn get_item_count(&self) -> anyhow::Result<usize> {
        let path = format!("channels/{}/thumb", urlencoding::encode(self.playlist_channel()));
        let v = self.get_json(&path, "item count").await?;
        parse_item_count(&v)
    }

    /// Full contents of a channel; defaults to the playlist channel.
    pub async fn get_channel_contents(
        &self,
        slug: Option<&str>,
    ) -> anyhow::Result<Vec<PlaylistSummary>> {
        let slug = slug.unwrap_or(self.playlist_channel());
        let path = format!("channels/{}/contents", urlencoding::encode(slug));
        parse_contents(self.get_json(&path, "channel contents").await?)
    }

    pub async fn get_paginated_contents(
        &self,
        slug: &str,
        page: usize,
        per: usize,
    ) -> anyhow::Result<Vec<PlaylistSummary>> {
        let path = format!(
            "channels/{}/contents?page={page}&per={per}",
            urlencoding::encode(slug)
        );
        parse_contents(self.get_json(&path, "paginated contents").await?)
    }

    pub async fn get_full_channel(&self, slug: &str) -> anyhow::Result<Playlist> {
        let path = format!("channels/{}", urlencoding::encode(slug));
        parse_channel(self.get_json(&path, "full channel").await?)
    }

    /// Raw contents of a channel, for debugging the wire shape.
    pub async fn get_channel_raw(&self, slug: &str) -> anyhow::Result<serde_json::Value> {
        let path = format!("channels/{}", urlencoding::encode(slug));
        self.get_json(&path, "raw channel").await
    }

    async fn get_json(&self, path: &str, what: &str) -> anyhow::Result<serde_json::Value> {
        let url = format!("{}/{}", self.inner.base_url, path);
        tracing::debug!(%url, "GET");
        let v = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("send {what} request"))?
            .error_for_status()
            .with_context(|| format!("{what} http status"))?
            .json::<serde_json::Value>()
            .await
            .with_context(|| format!("parse {what} json"))?;
        Ok(v)
    }
}

/// The count endpoint answers either `{ "length": n }` or a bare array.
pub fn parse_item_count(v: &serde_json::Value) -> anyhow::Result<usize> {
    if let Some(items) = v.as_array() {
        return Ok(items.len());
    }
    let n = v
        .get("length")
        .and_then(|l| l.as_u64())
        .context("item count response has no length")?;
    Ok(n as usize)
}

pub fn parse_channel(v: serde_json::Value) -> anyhow::Result<Playlist> {
    let raw: RawChannel = serde_json::from_value(v).context("decode channel")?;
    Ok(Playlist::from(raw))
}

pub fn parse_contents(v: serde_json::Value) -> anyhow::Result<Vec<PlaylistSummary>> {
    let raw: RawContents<RawSummary> = serde_json::from_value(v).context("decode contents")?;
    Ok(raw.contents.into_iter().map(PlaylistSummary::from).collect())
}
