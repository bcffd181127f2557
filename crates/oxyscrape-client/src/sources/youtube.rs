use oxyscrape_core::{ContextEntry, Source};
use serde::Serialize;

use super::{Context, payload};
use crate::client::{CallOptions, Dispatch};

/// Which transcript track to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptOrigin {
    AutoGenerated,
    UploaderProvided,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct YoutubeTranscriptOptions {
    pub callback_url: Option<String>,
    /// Transcript language, e.g. `en`.
    #[serde(skip)]
    pub language_code: Option<String>,
    #[serde(skip)]
    pub transcript_origin: Option<TranscriptOrigin>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

pub struct YoutubeTranscript<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> YoutubeTranscript<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    /// Transcript of a video by its id (the `v=` part of a watch URL).
    pub fn scrape_transcript(
        &self,
        video_id: &str,
        options: &YoutubeTranscriptOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let context = Context::new()
            .with("language_code", options.language_code.clone())
            .with("transcript_origin", options.transcript_origin)
            .finish(&options.context);
        let payload = payload(
            Source::YoutubeTranscript,
            ("query", video_id),
            options,
            context,
            call,
        );
        self.client.dispatch(payload, call)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sources::capture::Capture;

    #[test]
    fn test_transcript_origin_wire_names() {
        assert_eq!(
            serde_json::to_value(TranscriptOrigin::AutoGenerated).unwrap(),
            json!("auto_generated")
        );
        assert_eq!(
            serde_json::to_value(TranscriptOrigin::UploaderProvided).unwrap(),
            json!("uploader_provided")
        );
    }

    #[test]
    fn test_transcript_context() {
        let options = YoutubeTranscriptOptions {
            language_code: Some("en".into()),
            transcript_origin: Some(TranscriptOrigin::UploaderProvided),
            ..Default::default()
        };
        let body = YoutubeTranscript::new(&Capture)
            .scrape_transcript("SLoqvcnwwN4", &options, &CallOptions::new())
            .unwrap();

        assert_eq!(
            body,
            json!({
                "source": "youtube_transcript",
                "query": "SLoqvcnwwN4",
                "context": [
                    {"key": "language_code", "value": "en"},
                    {"key": "transcript_origin", "value": "uploader_provided"}
                ]
            })
        );
    }
}
