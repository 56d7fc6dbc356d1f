//! Webhook payload types and the embed builder

use crate::links::fix_links;
use crate::models::TournamentInfo;
use serde::{Deserialize, Serialize};

pub const EMBED_TITLE: &str = "New Tournament Detected";
pub const NO_TITLE: &str = "No Title Provided";
pub const NO_INFORMATION: &str = "No information provided.";
pub const NO_DETAILS: &str = "No details provided.";

/// Body posted to the webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Mention string pinging the configured user or role
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub fields: Vec<EmbedField>,
    pub thumbnail: EmbedMedia,
    pub image: EmbedMedia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedMedia {
    pub url: String,
}

impl NotificationPayload {
    pub fn new(mention: impl Into<String>, embed: Embed) -> Self {
        Self { content: mention.into(), embeds: vec![embed] }
    }
}

impl EmbedField {
    fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into(), inline: false }
    }
}

/// First non-empty of `title_line_1`, `short_format_title`, `title_line_2`
pub fn resolve_main_title(info: &TournamentInfo) -> &str {
    [&info.title_line_1, &info.short_format_title, &info.title_line_2]
        .into_iter()
        .filter_map(|title| title.as_deref())
        .find(|title| !title.is_empty())
        .unwrap_or(NO_TITLE)
}

/// `title_line_2` → `Title Line 2`
fn field_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Build the embed announcing one tournament
pub fn build_embed(info: &TournamentInfo) -> Embed {
    let main_title = resolve_main_title(info);

    let mut fields = vec![EmbedField::block("Main Title", main_title)];

    for (key, value) in [
        ("short_format_title", &info.short_format_title),
        ("title_line_2", &info.title_line_2),
    ] {
        if let Some(value) = value.as_deref() {
            if !value.is_empty() && value != main_title {
                fields.push(EmbedField::block(field_label(key), value));
            }
        }
    }

    let flavor = info.flavor_description.as_deref().unwrap_or(NO_INFORMATION);
    let details = info.details_description.as_deref().unwrap_or(NO_DETAILS);
    fields.push(EmbedField::block("Informations", fix_links(flavor)));
    fields.push(EmbedField::block("Details", fix_links(details)));

    Embed {
        title: EMBED_TITLE.to_string(),
        fields,
        thumbnail: EmbedMedia { url: info.poster_front_image.clone().unwrap_or_default() },
        image: EmbedMedia { url: info.loading_screen_image.clone().unwrap_or_default() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(value: serde_json::Value) -> TournamentInfo {
        TournamentInfo::from_record(&json!({ "tournament_info": value }))
    }

    fn names(embed: &Embed) -> Vec<&str> {
        embed.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_empty_title_line_falls_through() {
        let info = info(json!({
            "title_line_1": "",
            "short_format_title": "B",
            "title_line_2": "C"
        }));

        assert_eq!(resolve_main_title(&info), "B");

        let embed = build_embed(&info);
        assert_eq!(names(&embed), vec!["Main Title", "Title Line 2", "Informations", "Details"]);
        assert_eq!(embed.fields[0].value, "B");
        assert_eq!(embed.fields[1].value, "C");
    }

    #[test]
    fn test_all_titles_distinct_gives_five_fields() {
        let embed = build_embed(&info(json!({
            "title_line_1": "Duos Cash Cup",
            "short_format_title": "Duos CC",
            "title_line_2": "Europe"
        })));

        assert_eq!(
            names(&embed),
            vec!["Main Title", "Short Format Title", "Title Line 2", "Informations", "Details"]
        );
        assert!(embed.fields.iter().all(|f| !f.inline));
    }

    #[test]
    fn test_defaults_when_everything_missing() {
        let embed = build_embed(&TournamentInfo::default());

        assert_eq!(embed.title, EMBED_TITLE);
        assert_eq!(names(&embed), vec!["Main Title", "Informations", "Details"]);
        assert_eq!(embed.fields[0].value, NO_TITLE);
        assert_eq!(embed.fields[1].value, NO_INFORMATION);
        assert_eq!(embed.fields[2].value, NO_DETAILS);
        assert_eq!(embed.thumbnail.url, "");
        assert_eq!(embed.image.url, "");
    }

    #[test]
    fn test_duplicate_titles_not_repeated() {
        let embed = build_embed(&info(json!({
            "short_format_title": "Solo Cup",
            "title_line_2": "Solo Cup"
        })));

        assert_eq!(names(&embed), vec!["Main Title", "Informations", "Details"]);
        assert_eq!(embed.fields[0].value, "Solo Cup");
    }

    #[test]
    fn test_descriptions_get_links_fixed() {
        let embed = build_embed(&info(json!({
            "title_line_1": "Cup",
            "flavor_description": "Rules at www.example.com/rules",
            "details_description": "",
            "poster_front_image": "https://cdn.example.com/poster.png",
            "loading_screen_image": "https://cdn.example.com/loading.png"
        })));

        assert_eq!(embed.fields[1].value, "Rules at https://www.example.com/rules");
        assert_eq!(embed.fields[2].value, "");
        assert_eq!(embed.thumbnail.url, "https://cdn.example.com/poster.png");
        assert_eq!(embed.image.url, "https://cdn.example.com/loading.png");
    }

    #[test]
    fn test_payload_wire_shape() {
        let embed = build_embed(&info(json!({"title_line_1": "Cup"})));
        let payload = NotificationPayload::new("<@42>", embed);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "content": "<@42>",
                "embeds": [{
                    "title": "New Tournament Detected",
                    "fields": [
                        {"name": "Main Title", "value": "Cup", "inline": false},
                        {"name": "Informations", "value": "No information provided.", "inline": false},
                        {"name": "Details", "value": "No details provided.", "inline": false}
                    ],
                    "thumbnail": {"url": ""},
                    "image": {"url": ""}
                }]
            })
        );
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("title_line_2"), "Title Line 2");
        assert_eq!(field_label("short_format_title"), "Short Format Title");
    }
}
