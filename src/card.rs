use serde::Serialize;

use crate::xkcd::ComicMetadata;

const XKCD_BASE_LINK: &str = "https://xkcd.com/";
const EXPLAIN_BASE_LINK: &str = "https://www.explainxkcd.com/wiki/index.php/";
const LOGO_URL: &str = "https://www.userlogos.org/files/logos/signify/xkcd.png";

const HELP_TABLE: &str = "<b>Commands</b><br>\
<table>\
<tr><td><b>latest</b></td><td>Show the most recent xkcd</td></tr>\
<tr><td><b>random</b></td><td>Show a random xkcd</td></tr>\
<tr><td><b>&lt;number&gt;</b></td><td>Show the xkcd with that number, e.g. <i>327</i></td></tr>\
<tr><td><b>help</b></td><td>Show this list of commands</td></tr>\
</table>";

/// What the webhook answers with. Serializes to a card message,
/// a `{"text": ...}` message, or `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Card(CardMessage),
    Text(TextMessage),
    Empty(EmptyMessage),
}

impl Response {
    pub fn empty() -> Self {
        Response::Empty(EmptyMessage {})
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMessage {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyMessage {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardMessage {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub widgets: Vec<Widget>,
}

/// Serialized externally tagged, e.g. `{"keyValue": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    KeyValue(KeyValue),
    Image(Image),
    Buttons(Vec<Button>),
    TextParagraph(TextParagraph),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub top_label: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_url: String,
    pub on_click: OnClick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Button {
    TextButton(TextButton),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextButton {
    pub text: String,
    pub on_click: OnClick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextParagraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnClick {
    pub open_link: OpenLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenLink {
    pub url: String,
}

impl OnClick {
    fn open(url: String) -> Self {
        Self {
            open_link: OpenLink { url },
        }
    }
}

/// Card for one comic: header, publication date, clickable image, and an
/// EXPLAIN button.
pub fn build_comic_card(meta: &ComicMetadata) -> Response {
    let number = meta.number;
    // e.g. "November 05,2008"; no space after the comma.
    let added_on = meta.published.format("%B %d,%Y").to_string();

    let card = Card {
        header: Some(CardHeader {
            title: meta.title.clone(),
            subtitle: format!("xkcd No. {}", number),
            image_url: LOGO_URL.to_string(),
        }),
        sections: vec![
            Section {
                widgets: vec![Widget::KeyValue(KeyValue {
                    top_label: "Added on:".to_string(),
                    content: added_on,
                })],
            },
            Section {
                widgets: vec![Widget::Image(Image {
                    image_url: meta.image_url.clone(),
                    on_click: OnClick::open(format!("{}{}", XKCD_BASE_LINK, number)),
                })],
            },
            Section {
                widgets: vec![Widget::Buttons(vec![Button::TextButton(TextButton {
                    text: "EXPLAIN".to_string(),
                    on_click: OnClick::open(format!("{}{}", EXPLAIN_BASE_LINK, number)),
                })])],
            },
        ],
    };

    Response::Card(CardMessage { cards: vec![card] })
}

pub fn build_help_card() -> Response {
    let card = Card {
        header: None,
        sections: vec![Section {
            widgets: vec![Widget::TextParagraph(TextParagraph {
                text: HELP_TABLE.to_string(),
            })],
        }],
    };

    Response::Card(CardMessage { cards: vec![card] })
}

pub fn build_plain_text(text: impl Into<String>) -> Response {
    Response::Text(TextMessage { text: text.into() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn election() -> ComicMetadata {
        ComicMetadata {
            number: 500,
            title: "Election".to_string(),
            image_url: "https://imgs.xkcd.com/comics/election.png".to_string(),
            published: NaiveDate::from_ymd_opt(2008, 11, 5).unwrap(),
        }
    }

    fn to_json(response: &Response) -> Value {
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_comic_card_shape() {
        let card = to_json(&build_comic_card(&election()));
        let expected = json!({
            "cards": [{
                "header": {
                    "title": "Election",
                    "subtitle": "xkcd No. 500",
                    "imageUrl": "https://www.userlogos.org/files/logos/signify/xkcd.png"
                },
                "sections": [
                    {"widgets": [{"keyValue": {"topLabel": "Added on:", "content": "November 05,2008"}}]},
                    {"widgets": [{"image": {
                        "imageUrl": "https://imgs.xkcd.com/comics/election.png",
                        "onClick": {"openLink": {"url": "https://xkcd.com/500"}}
                    }}]},
                    {"widgets": [{"buttons": [{"textButton": {
                        "text": "EXPLAIN",
                        "onClick": {"openLink": {"url": "https://www.explainxkcd.com/wiki/index.php/500"}}
                    }}]}]}
                ]
            }]
        });
        assert_eq!(card, expected);
    }

    #[test]
    fn test_comic_card_is_deterministic() {
        let first = serde_json::to_string(&build_comic_card(&election())).unwrap();
        let second = serde_json::to_string(&build_comic_card(&election())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_date_format_pads_day() {
        let mut meta = election();
        meta.published = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let card = to_json(&build_comic_card(&meta));
        assert_eq!(
            card["cards"][0]["sections"][0]["widgets"][0]["keyValue"]["content"],
            "March 01,2024"
        );
    }

    #[test]
    fn test_help_card_lists_commands() {
        let card = to_json(&build_help_card());
        let sections = card["cards"][0]["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert!(card["cards"][0].get("header").is_none());

        let text = sections[0]["widgets"][0]["textParagraph"]["text"]
            .as_str()
            .unwrap();
        for command in ["latest", "random", "&lt;number&gt;", "help"] {
            assert!(text.contains(command), "missing {}", command);
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(to_json(&build_plain_text("hi")), json!({"text": "hi"}));
    }

    #[test]
    fn test_empty_serializes_to_object() {
        assert_eq!(serde_json::to_string(&Response::empty()).unwrap(), "{}");
    }
}
