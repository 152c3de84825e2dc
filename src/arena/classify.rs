use super::models::RawBlock;

/// Pick the playable URL for a channel block.
///
/// Uploaded files play from their attachment; embedded media and links play
/// from their source. Text, images and nested channels have nothing to play.
pub fn classify_item_url(block: &RawBlock) -> Option<String> {
    let url = match block.class.as_deref()? {
        "Attachment" => block.attachment.as_ref()?.url.as_deref(),
        "Media" | "Link" => block.source.as_ref()?.url.as_deref(),
        _ => None,
    }?;
    let url = url.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(v: serde_json::Value) -> RawBlock {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn attachment_uses_attachment_url() {
        let b = block(json!({
            "id": 1,
            "class": "Attachment",
            "attachment": { "url": "https://files.example/a.mp3" },
            "source": { "url": "https://ignored.example" }
        }));
        assert_eq!(classify_item_url(&b).as_deref(), Some("https://files.example/a.mp3"));
    }

    #[test]
    fn media_and_link_use_source_url() {
        let media = block(json!({"id": 2, "class": "Media", "source": {"url": "https://soundcloud.com/x/y"}}));
        let link = block(json!({"id": 3, "class": "Link", "source": {"url": " https://example.com/z.ogg "}}));
        assert_eq!(classify_item_url(&media).as_deref(), Some("https://soundcloud.com/x/y"));
        assert_eq!(classify_item_url(&link).as_deref(), Some("https://example.com/z.ogg"));
    }

    #[test]
    fn unplayable_blocks_have_no_url() {
        let text = block(json!({"id": 4, "class": "Text"}));
        let no_source = block(json!({"id": 5, "class": "Media", "source": null}));
        let empty = block(json!({"id": 6, "class": "Link", "source": {"url": ""}}));
        let unclassed = block(json!({"id": 7}));
        assert!(classify_item_url(&text).is_none());
        assert!(classify_item_url(&no_source).is_none());
        assert!(classify_item_url(&empty).is_none());
        assert!(classify_item_url(&unclassed).is_none());
    }
}
