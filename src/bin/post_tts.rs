//! post-tts: generate post audio, inspect usage and voices from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use post_tts::audio::AudioFormat;
use post_tts::generator::{AudioGenerator, PostContent};
use post_tts::media::LocalMediaStore;
use post_tts::store::{JsonFileOptionStore, OptionStore};
use post_tts::text::TextNormalizer;
use post_tts::tts::voices;
use post_tts::{Settings, SettingsUpdate};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "post-tts")]
#[command(about = "Turn blog post HTML into speech with Google Cloud Text-to-Speech")]
#[command(version)]
struct Args {
    /// JSON file holding settings and usage data
    #[arg(long, global = true, default_value = "post-tts-options.json")]
    options: PathBuf,

    /// Directory generated audio is written to
    #[arg(long, global = true, default_value = "audio")]
    media_dir: PathBuf,

    /// Public URL the media directory is served under
    #[arg(long, global = true, default_value = "http://localhost/audio")]
    media_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate audio for a post
    Speak {
        /// Post id the audio is linked to
        #[arg(long)]
        post_id: u64,
        /// Post title, spoken first
        #[arg(long, default_value = "")]
        title: String,
        /// HTML file with the post body; stdin when omitted
        file: Option<PathBuf>,
        /// Synthesis service base URL
        #[arg(long)]
        tts_base_url: Option<String>,
    },
    /// Delete a post's audio
    Delete {
        #[arg(long)]
        post_id: u64,
    },
    /// Link audio already in the media directory to a post
    Attach {
        #[arg(long)]
        post_id: u64,
        #[arg(long)]
        media_id: u64,
    },
    /// Store an audio file and link it to a post
    Upload {
        #[arg(long)]
        post_id: u64,
        file: PathBuf,
        /// MIME type; guessed from the extension when omitted
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Show whether a post has audio
    Status {
        #[arg(long)]
        post_id: u64,
    },
    /// Print the speech text for an HTML file (stdin when omitted)
    Normalize {
        file: Option<PathBuf>,
        /// Character encoding label, e.g. UTF-8 or ISO-8859-1
        #[arg(long)]
        charset: Option<String>,
    },
    /// Show this month's character usage
    Usage,
    /// List voices for a language
    Voices {
        #[arg(default_value = "en-US")]
        language: String,
    },
    /// List supported languages
    Languages,
    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current settings
    Show,
    /// Update settings; invalid values are ignored
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        voice: Option<String>,
        #[arg(long)]
        usage_limit: Option<i64>,
        #[arg(long)]
        speaking_style: Option<String>,
        #[arg(long)]
        player_style: Option<String>,
    },
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn generator(args: &Args, options: Arc<JsonFileOptionStore>) -> Result<AudioGenerator> {
    let media = LocalMediaStore::open(&args.media_dir, args.media_url.as_str())
        .await
        .context("Failed to open media directory")?;
    Ok(AudioGenerator::new(options, Arc::new(media)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = Arc::new(JsonFileOptionStore::new(&args.options));

    match &args.command {
        Commands::Speak {
            post_id,
            title,
            file,
            tts_base_url,
        } => {
            let html = read_input(file.as_ref())?;
            let mut generator = generator(&args, options.clone()).await?;
            if let Some(url) = tts_base_url {
                generator = generator.with_tts_base_url(url.as_str());
            }
            let audio = generator
                .generate(&PostContent::new(*post_id, title.as_str(), html))
                .await
                .with_context(|| format!("Audio generation failed for post {}", post_id))?;
            println!("{}", serde_json::to_string_pretty(&audio)?);
        }
        Commands::Delete { post_id } => {
            generator(&args, options.clone()).await?.delete(*post_id).await?;
            println!("Audio deleted for post {}.", post_id);
        }
        Commands::Attach { post_id, media_id } => {
            let status = generator(&args, options.clone())
                .await?
                .attach(*post_id, *media_id)
                .await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Upload {
            post_id,
            file,
            mime_type,
        } => {
            let bytes = std::fs::read(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("Upload path has no usable file name")?;
            let mime_type = match mime_type {
                Some(mime) => mime.clone(),
                None => file
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(AudioFormat::from_extension)
                    .map(|format| format.mime_type().to_string())
                    .with_context(|| format!("Cannot tell the audio type of {}", file.display()))?,
            };
            let status = generator(&args, options.clone())
                .await?
                .upload(*post_id, file_name, &mime_type, &bytes)
                .await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Status { post_id } => {
            let status = generator(&args, options.clone()).await?.status(*post_id).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Normalize { file, charset } => {
            let html = read_input(file.as_ref())?;
            let charset = match charset {
                Some(label) => label.clone(),
                None => Settings::load(options.as_ref()).await?.charset,
            };
            println!("{}", TextNormalizer::for_encoding(&charset).normalize(&html));
        }
        Commands::Usage => {
            let stats = generator(&args, options.clone()).await?.usage_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Voices { language } => {
            if voices::language(language).is_none() {
                bail!("Unknown language code: {}", language);
            }
            println!("{} ({})", voices::language_name(language), language);
            for voice in voices::voices_for_language(language) {
                println!("  {:<24} {}", voice.name, voice.label);
            }
        }
        Commands::Languages => {
            for lang in voices::languages() {
                println!("{:<8} {:<32} {}", lang.code, lang.name, lang.default_voice);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let settings = Settings::load(options.as_ref()).await?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
                println!(
                    "api key: {}",
                    if settings.has_api_key() { "set" } else { "not set" }
                );
            }
            ConfigAction::Set {
                api_key,
                language,
                voice,
                usage_limit,
                speaking_style,
                player_style,
            } => {
                let update = SettingsUpdate {
                    api_key: api_key.clone(),
                    language_code: language.clone(),
                    voice_name: voice.clone(),
                    usage_limit: *usage_limit,
                    speaking_style: speaking_style.clone(),
                    player_style: player_style.clone(),
                };
                let written = update.apply(options.as_ref() as &dyn OptionStore).await?;
                if written.is_empty() {
                    println!("Nothing saved.");
                } else {
                    println!("Saved: {}", written.join(", "));
                }
            }
        },
    }
    Ok(())
}
