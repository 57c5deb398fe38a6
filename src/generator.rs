//! End-to-end audio generation for a post.
//!
//! [`AudioGenerator`] ties the pieces together:
//!
//! 1. load [`Settings`] and the usage ledger from the [`OptionStore`]
//! 2. normalize `"{title}. {content}"` into speech text
//! 3. refuse if the month's character budget would be exceeded
//! 4. build the synthesis request and call the [`SpeechSynthesizer`]
//! 5. decode and validate the returned audio
//! 6. persist it through the [`MediaStore`] and link it to the post
//! 7. record the characters used
//!
//! Usage is only recorded once the audio is stored, so a failed request
//! never costs budget.

use crate::audio::{self, AudioFormat};
use crate::config::{self, Settings};
use crate::media::{self, MediaStore, StoredMedia};
use crate::store::{keys, OptionStore};
use crate::text::{ShortcodePolicy, TextNormalizer};
use crate::tts::{self, SpeechRequestBuilder, SpeechSynthesizer, TtsClient};
use crate::usage::{MonthKey, UsageStats, UsageTracker};
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::sync::Arc;

/// The parts of a post that are spoken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub id: u64,
    pub title: String,
    /// Rendered post body, HTML.
    pub content_html: String,
}

impl PostContent {
    pub fn new(id: u64, title: impl Into<String>, content_html: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content_html: content_html.into(),
        }
    }

    /// Title and body joined by a sentence break. Blank parts are skipped.
    fn speech_source(&self) -> String {
        let title = self.title.trim();
        let body = self.content_html.trim();
        match (title.is_empty(), body.is_empty()) {
            (true, _) => body.to_string(),
            (false, true) => title.to_string(),
            (false, false) => format!("{}. {}", title, body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedAudio {
    pub attachment_id: u64,
    pub url: String,
    pub file_size: u64,
    pub file_size_formatted: String,
    pub format: AudioFormat,
    /// Bytes of normalized text sent for synthesis.
    pub characters: u64,
    /// Month usage against the limit after this request, two decimals.
    pub usage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStatus {
    pub post_id: u64,
    pub has_audio: bool,
    pub attachment_id: Option<u64>,
    pub url: Option<String>,
}

pub struct AudioGenerator {
    options: Arc<dyn OptionStore>,
    media: Arc<dyn MediaStore>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    tts_base_url: Option<String>,
    shortcodes: ShortcodePolicy,
}

impl AudioGenerator {
    /// Generator that calls Google Cloud TTS with the stored API key.
    pub fn new(options: Arc<dyn OptionStore>, media: Arc<dyn MediaStore>) -> Self {
        Self {
            options,
            media,
            synthesizer: None,
            tts_base_url: None,
            shortcodes: ShortcodePolicy::default(),
        }
    }

    /// Uses `synthesizer` instead of building a [`TtsClient`] per request.
    ///
    /// The stored API key is still required.
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Overrides the synthesis service base URL.
    pub fn with_tts_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.tts_base_url = Some(base_url.into());
        self
    }

    pub fn with_shortcodes(mut self, policy: ShortcodePolicy) -> Self {
        self.shortcodes = policy;
        self
    }

    fn synthesizer_for(&self, api_key: &str) -> Result<Arc<dyn SpeechSynthesizer>> {
        if let Some(synthesizer) = &self.synthesizer {
            return Ok(Arc::clone(synthesizer));
        }
        let mut builder = TtsClient::builder().api_key(api_key);
        if let Some(base_url) = &self.tts_base_url {
            builder = builder.base_url(base_url.clone());
        }
        let client: Arc<dyn SpeechSynthesizer> = Arc::new(builder.build()?);
        Ok(client)
    }

    /// Generates, stores and links audio for `post`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingApiKey`] when no API key is stored
    /// - [`Error::EmptyText`] when the post has nothing to speak
    /// - [`Error::UsageLimitExceeded`] when the month's budget would be exceeded
    /// - remote, decoding, validation and storage failures as they occur
    pub async fn generate(&self, post: &PostContent) -> Result<GeneratedAudio> {
        let settings = Settings::load(self.options.as_ref()).await?;
        let api_key = settings.api_key.clone().ok_or(Error::MissingApiKey)?;

        let source = post.speech_source();
        if source.is_empty() {
            return Err(Error::EmptyText);
        }
        let text = TextNormalizer::for_encoding(&settings.charset)
            .with_shortcodes(self.shortcodes.clone())
            .normalize(&source);
        if !text.chars().any(char::is_alphanumeric) {
            return Err(Error::EmptyText);
        }
        let characters = text.len() as u64;

        let month = MonthKey::current();
        let tracker = UsageTracker::new(settings.usage_limit);
        let ledger = config::load_ledger(self.options.as_ref()).await?;
        tracker.ensure_within_limit(&ledger, month, characters)?;

        let request = SpeechRequestBuilder::new(settings.language_code.as_str())
            .voice_override(settings.voice_name.as_str())
            .style(settings.speaking_style)
            .build(text);
        tracing::info!(
            post_id = post.id,
            characters,
            voice = %request.voice.name,
            style = %settings.speaking_style,
            "generating audio"
        );

        let encoded = self.synthesizer_for(&api_key)?.synthesize(&request).await?;
        let bytes = tts::decode_audio_content(&encoded)?;
        let format = audio::validate(&bytes)?;
        let expected = request.audio_config.audio_encoding.expected_format();
        if format != expected {
            tracing::warn!(
                post_id = post.id,
                %format,
                %expected,
                "service returned an unexpected container"
            );
        }

        let file_name = media::audio_file_name(&post.title, chrono::Utc::now().timestamp(), format);
        let stored = self.media.store(&bytes, &file_name, format).await?;
        self.link(post.id, &stored).await?;

        let ledger = tracker.track(ledger, month, characters);
        config::save_ledger(self.options.as_ref(), &ledger).await?;

        let stats = tracker.stats(&ledger, month);
        Ok(GeneratedAudio {
            attachment_id: stored.id,
            url: stored.url,
            file_size: stored.file_size,
            file_size_formatted: media::format_file_size(stored.file_size),
            format,
            characters,
            usage_percentage: percentage(stats.monthly_usage, stats.usage_limit),
        })
    }

    /// Points the post at `stored`, then removes audio it pointed at before.
    ///
    /// The new link is written first so a failed write leaves the old audio in place.
    async fn link(&self, post_id: u64, stored: &StoredMedia) -> Result<()> {
        let previous = self.linked_attachment(post_id).await?;
        self.options
            .set(&keys::post_audio(post_id), &stored.id.to_string())
            .await?;
        if let Some(previous) = previous.filter(|id| *id != stored.id) {
            if self.media.delete(previous).await? {
                tracing::info!(post_id, attachment_id = previous, "replaced previous audio");
            }
        }
        Ok(())
    }

    /// Links media already in the store to `post_id`.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when `media_id` is not in the store
    /// - [`Error::UnrecognizedAudioFormat`] when its MIME type or extension is not allowed
    pub async fn attach(&self, post_id: u64, media_id: u64) -> Result<AudioStatus> {
        let stored = self.media.get(media_id).await?.ok_or_else(|| {
            Error::validation_with_context(
                format!("No media with id {}", media_id),
                ErrorContext::new().with_field_path("media_id"),
            )
        })?;
        let file_name = stored.path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !audio::is_allowed_mime_type(stored.format.mime_type())
            || !audio::is_allowed_extension(file_name)
        {
            return Err(Error::UnrecognizedAudioFormat);
        }
        self.link(post_id, &stored).await?;
        tracing::info!(post_id, attachment_id = media_id, "attached existing audio");
        self.status(post_id).await
    }

    /// Stores an uploaded audio file and links it to `post_id`.
    ///
    /// The declared MIME type and the file extension must both be on the allow-lists,
    /// and the bytes must carry a recognized audio signature. Uploads do not count
    /// against the synthesis budget.
    pub async fn upload(
        &self,
        post_id: u64,
        file_name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<AudioStatus> {
        if !audio::is_allowed_mime_type(mime_type) || !audio::is_allowed_extension(file_name) {
            return Err(Error::UnrecognizedAudioFormat);
        }
        let declared = AudioFormat::from_mime_type(mime_type).ok_or(Error::UnrecognizedAudioFormat)?;
        let format = audio::validate(bytes)?;
        if format != declared {
            tracing::debug!(post_id, %declared, %format, "upload content differs from its MIME type");
        }
        let stored = self.media.store(bytes, file_name, format).await?;
        self.link(post_id, &stored).await?;
        self.status(post_id).await
    }

    async fn linked_attachment(&self, post_id: u64) -> Result<Option<u64>> {
        let raw = self.options.get(&keys::post_audio(post_id)).await?;
        Ok(raw.and_then(|v| v.trim().parse().ok()).filter(|id| *id > 0))
    }

    /// Deletes the audio linked to `post_id`.
    ///
    /// # Errors
    ///
    /// [`Error::NoAudio`] when the post has no linked audio.
    pub async fn delete(&self, post_id: u64) -> Result<()> {
        let attachment_id = self
            .linked_attachment(post_id)
            .await?
            .ok_or(Error::NoAudio { post_id })?;
        if !self.media.delete(attachment_id).await? {
            tracing::warn!(post_id, attachment_id, "linked audio was already missing");
        }
        self.options.delete(&keys::post_audio(post_id)).await?;
        Ok(())
    }

    pub async fn status(&self, post_id: u64) -> Result<AudioStatus> {
        let media = match self.linked_attachment(post_id).await? {
            Some(id) => self.media.get(id).await?,
            None => None,
        };
        Ok(AudioStatus {
            post_id,
            has_audio: media.is_some(),
            attachment_id: media.as_ref().map(|m| m.id),
            url: media.map(|m| m.url),
        })
    }

    /// Usage for the current month against the stored limit.
    pub async fn usage_stats(&self) -> Result<UsageStats> {
        let settings = Settings::load(self.options.as_ref()).await?;
        let ledger = config::load_ledger(self.options.as_ref()).await?;
        Ok(UsageTracker::new(settings.usage_limit).stats(&ledger, MonthKey::current()))
    }
}

fn percentage(usage: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    (usage as f64 / limit as f64 * 10_000.0).round() / 100.0
}
