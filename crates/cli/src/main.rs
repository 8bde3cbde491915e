//! tagstream CLI — the main entry point.
//!
//! Commands:
//! - `render`  — Replay a buffer through a streaming session and print the
//!               final rendered HTML
//! - `inspect` — Print the parsed artifact structure as JSON

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use tagstream_core::error::StoreError;
use tagstream_core::{MessageStore, Theme};
use tagstream_engine::{ArtifactRegistry, ArtifactRenderer};
use tagstream_markdown::MarkdownRenderer;
use tagstream_session::{SessionError, StreamSession};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "tagstream",
    about = "tagstream — streaming artifact extraction & rendering for LLM responses",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a buffer through a streaming session and print the rendered HTML
    Render {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Presentation theme
        #[arg(short, long, value_enum, default_value_t = ThemeArg::Light)]
        theme: ThemeArg,

        /// Replay the buffer in chunks of this many bytes to exercise the
        /// streaming path (0 = single chunk)
        #[arg(short, long, default_value_t = 0)]
        chunk_size: usize,
    },

    /// Print the parsed artifact structure as JSON
    Inspect {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// The CLI has nowhere to persist finished buffers; log and drop.
struct NullStore;

#[async_trait]
impl MessageStore for NullStore {
    async fn persist(&self, buffer: &str) -> Result<(), StoreError> {
        debug!(buffer_len = buffer.len(), "Discarding finished buffer");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { file, theme, chunk_size } => {
            let buffer = read_input(file.as_deref())?;
            let html = render(&buffer, theme.into(), chunk_size).await?;
            println!("{html}");
        }
        Commands::Inspect { file } => {
            let buffer = read_input(file.as_deref())?;
            let registry = ArtifactRegistry::builtin()?;
            let renderer = ArtifactRenderer::new(&registry, &buffer);
            println!("{}", serde_json::to_string_pretty(renderer.parsed())?);
        }
    }

    Ok(())
}

fn read_input(file: Option<&std::path::Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

async fn render(buffer: &str, theme: Theme, chunk_size: usize) -> anyhow::Result<String> {
    let registry = Arc::new(ArtifactRegistry::builtin()?);
    let mut session = StreamSession::new(registry, Arc::new(MarkdownRenderer::new()), theme);
    let updates = session.subscribe();

    let chunks: Vec<Result<String, SessionError>> = if chunk_size == 0 {
        vec![Ok(buffer.to_string())]
    } else {
        split_chunks(buffer, chunk_size).into_iter().map(Ok).collect()
    };

    session.run(tokio_stream::iter(chunks), &NullStore).await?;
    let html = updates.borrow().html.clone();
    Ok(html)
}

/// Split on char boundaries into chunks of roughly `size` bytes.
fn split_chunks(buffer: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for c in buffer.chars() {
        current.push(c);
        if current.len() >= size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_chunks_covers_whole_buffer() {
        let chunks = split_chunks("<thinking>abc</thinking>", 7);
        assert_eq!(chunks.concat(), "<thinking>abc</thinking>");
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn split_chunks_respects_char_boundaries() {
        let chunks = split_chunks("héllo wörld", 2);
        assert_eq!(chunks.concat(), "héllo wörld");
    }

    #[tokio::test]
    async fn render_replays_identically_regardless_of_chunking() {
        let buffer = "<thinking>A</thinking>mid<code language=\"rust\">B</code>end";
        let whole = render(buffer, Theme::Light, 0).await.unwrap();
        let chunked = render(buffer, Theme::Light, 3).await.unwrap();
        assert_eq!(whole, chunked);
        assert!(whole.contains("RUST"));
    }
}
