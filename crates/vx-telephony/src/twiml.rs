//! TwiML voice responses
//!
//! The provider-defined markup the webhook answers with. Only the two verbs
//! this gateway emits are modeled: `Play` (fetch and play a URL) and `Say`
//! (speak a fixed text). Documents are rendered by hand; the vocabulary is
//! too small to warrant an XML dependency.

/// Content type for TwiML response bodies
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Verb {
    Play(String),
    Say(String),
}

/// Builder for a TwiML `<Response>` document
#[derive(Debug, Clone, Default)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instruct the provider to fetch and play an audio URL
    pub fn play(mut self, url: impl Into<String>) -> Self {
        self.verbs.push(Verb::Play(url.into()));
        self
    }

    /// Instruct the provider to speak a text
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say(text.into()));
        self
    }

    /// Render the document, XML declaration included
    pub fn to_xml(&self) -> String {
        let mut body = String::new();
        for verb in &self.verbs {
            match verb {
                Verb::Play(url) => {
                    body.push_str(&format!("<Play>{}</Play>", escape_xml(url)));
                }
                Verb::Say(text) => {
                    body.push_str(&format!("<Say>{}</Say>", escape_xml(text)));
                }
            }
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>{}</Response>",
            body
        )
    }
}

/// Escape text for use inside an XML element
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
