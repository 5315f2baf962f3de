use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotgrab::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert a playlist file and download the tracks
    Run(RunOptions),

    /// Convert song titles into Spotify track URLs
    Convert(ConvertOptions),

    /// Download the tracks of an existing result file
    Download(DownloadCommandOptions),

    /// Read song titles off a playlist screenshot
    Extract(ExtractOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertOptions {
    /// Text file with one song per line
    #[clap(long, default_value = "my-playlist.txt")]
    pub input: PathBuf,

    /// File receiving one Spotify URL or "# NOT FOUND" line per song
    #[clap(long, default_value = "spotify-urls.txt")]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct FormatOptions {
    /// Output format: 1/m4a or 2/mp3 (anything else means m4a)
    #[clap(long)]
    pub format: Option<String>,

    /// Directory the downloader writes into
    #[clap(long)]
    pub work_dir: Option<PathBuf>,

    /// Root folder for the dated download folders
    #[clap(long)]
    pub music_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    #[clap(flatten)]
    pub convert: ConvertOptions,

    #[clap(flatten)]
    pub download: FormatOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadCommandOptions {
    /// Result file produced by `convert`
    #[clap(long, default_value = "spotify-urls.txt")]
    pub urls: PathBuf,

    #[clap(flatten)]
    pub download: FormatOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractOptions {
    /// Screenshot of the playlist (png, jpg, gif or webp)
    pub image: PathBuf,

    /// Song list to write, usable as `convert --input`
    #[clap(long, default_value = "playlist-songs.txt")]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

impl From<FormatOptions> for cli::DownloadOptions {
    fn from(opt: FormatOptions) -> Self {
        cli::DownloadOptions {
            format: opt.format,
            work_dir: opt.work_dir,
            music_dir: opt.music_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Run(opt) => {
            cli::run(opt.convert.input, opt.convert.output, opt.download.into()).await
        }
        Command::Convert(opt) => {
            cli::convert(opt.input, opt.output).await;
        }
        Command::Download(opt) => cli::download(opt.urls, opt.download.into()).await,
        Command::Extract(opt) => cli::extract(opt.image, opt.output).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
