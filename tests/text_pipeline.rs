//! Behaviour of the public text, usage, validation and request-building API.

use post_tts::audio::{self, AudioFormat};
use post_tts::text::{normalize, ShortcodePolicy, TextNormalizer, MAX_TEXT_BYTES};
use post_tts::tts::build;
use post_tts::usage::{check_limit, get_stats, track_usage, LimitCheck, MonthKey, UsageLedger};

#[test]
fn test_documented_normalization_examples() {
    let cases = [
        ("He said &quot;Hello&quot; and then left.", "He said Hello and then left."),
        (
            "Don't get me wrong. I don't think you need more persuasion.",
            "Don't get me wrong. I don't think you need more persuasion.",
        ),
        ("Time: 10:00; ready?", "Time. 10:00. ready?"),
        (
            "Left > IAM & Admin > Create a Project.",
            "Left > IAM and Admin > Create a Project.",
        ),
    ];
    for (input, expected) in cases {
        assert_eq!(normalize(input, "UTF-8"), expected, "input: {input}");
    }
}

#[test]
fn test_realistic_post_body() {
    let html = r#"<h2>Before you begin</h2>
<p>Go to <a href="https://console.cloud.google.com">Google Cloud</a> &gt; <em>APIs</em>.</p>
<figure><img src="shot.png" alt="Console screenshot"><figcaption>The console</figcaption></figure>
<ul><li>Step one</li><li>Step two</li></ul>
[contact-form id="3"]
<script>alert("x")</script>"#;
    let out = normalize(html, "utf-8");
    assert_eq!(
        out,
        "Before you begin. Go to Google Cloud > APIs. Console screenshot. The console. Step one. Step two."
    );
}

#[test]
fn test_editorial_brackets_survive_default_policy() {
    let out = normalize("<p>[Update: prices changed] See [table id=\"4\"] below.</p>", "UTF-8");
    assert_eq!(out, "Update. prices changed See below.");
}

#[test]
fn test_registered_shortcodes_only() {
    let normalizer = TextNormalizer::for_encoding("UTF-8")
        .with_shortcodes(ShortcodePolicy::registered(["gallery"]));
    assert_eq!(normalizer.normalize("See [gallery ids=\"1,2\"] and [note]"), "See and note");
}

#[test]
fn test_output_is_bounded_and_idempotent() {
    let long = "<p>Sentence number one; another: part.</p>".repeat(500);
    let out = normalize(&long, "UTF-8");
    assert!(out.len() <= MAX_TEXT_BYTES);
    assert_eq!(normalize(&out, "UTF-8"), out);

    // The cut lands right after "10:".
    let filler = "x".repeat(MAX_TEXT_BYTES - 19);
    let at_boundary = format!("<p>{}</p><p>Doors open at 10:30 sharp.</p>", filler);
    let out = normalize(&at_boundary, "UTF-8");
    assert!(out.ends_with("Doors open at 10."));
    assert_eq!(normalize(&out, "UTF-8"), out);

    let multibyte = "\u{00e9}".repeat(MAX_TEXT_BYTES);
    let out = normalize(&multibyte, "UTF-8");
    assert!(out.len() <= MAX_TEXT_BYTES);
    assert!(out.chars().all(|c| c == '\u{00e9}'));
}

#[test]
fn test_limit_boundary() {
    assert_eq!(check_limit(10, 990, 1000), LimitCheck::Allowed);
    assert_eq!(
        check_limit(11, 990, 1000),
        LimitCheck::Exceeded {
            current_usage: 990,
            limit: 1000
        }
    );
}

#[test]
fn test_thirteen_months_keep_twelve() {
    let start = MonthKey::new(2024, 1).unwrap();
    let mut month = start;
    let mut ledger = UsageLedger::new();
    for _ in 0..13 {
        ledger = track_usage(ledger, month, 100);
        month = month.next();
    }
    assert_eq!(ledger.len(), 12);
    assert_eq!(ledger.usage_for(start), 0);
    assert_eq!(ledger.months().next().map(|(m, _)| m), Some(start.next()));

    let last = month.previous();
    let stats = get_stats(&ledger, last, 400);
    assert_eq!(stats.monthly_usage, 100);
    assert_eq!(stats.usage_percent, 25.0);
    assert_eq!(stats.remaining, 300);
}

#[test]
fn test_audio_validation() {
    let mut wav = b"RIFF".to_vec();
    wav.resize(44, 0);
    assert_eq!(audio::validate(&wav).unwrap(), AudioFormat::Wav);
    assert!(audio::validate(b"RIFF").is_err());
    assert!(audio::validate(&[0x42; 32]).is_err());
}

#[test]
fn test_request_for_excited_english() {
    let req = build("en-US", "fr-FR-Wavenet-A", "excited", "Hi.");
    assert_eq!(req.voice.name, "en-US-Wavenet-D");
    assert_eq!(req.audio_config.speaking_rate, 1.15);
    assert_eq!(req.audio_config.pitch, 2.0);
}
