use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use panels::config::{ApiConfig, ConfigError};
use panels::net::content::HttpContentStore;
use panels::net::files::HttpFileStore;
use panels::net::types::{NetworkError, UploadFile};
use panels::preview::PreviewRegistry;
use panels::session::AdminGate;
use panels::state::catalog::{self, PANEL_NAMES};
use panels::state::{EditField, EditableContentPanel, PanelView, SaveOutcome, UploadOutcome};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown panel `{0}`; run `panels list`")]
    UnknownPanel(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Network(#[from] NetworkError),
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("{0}")]
    Panel(String),
}

#[derive(Parser, Debug)]
#[command(name = "panels", about = "Inspect and edit marketing content panels")]
struct Cli {
    #[arg(long, env = "PANELS_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in panels.
    List,
    /// Load a panel and print what it renders.
    Show(ShowArgs),
    /// Edit a panel's text and save it.
    Edit(EditArgs),
    /// Replace the image behind one slot.
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    panel: String,
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct EditArgs {
    panel: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    paragraphs: Option<String>,
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct UploadArgs {
    panel: String,
    path: PathBuf,
    #[arg(long, default_value_t = 0)]
    slot: usize,
    #[arg(long)]
    admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }

    match cli.command {
        Command::List => {
            for name in PANEL_NAMES {
                println!("{name}");
            }
            Ok(())
        }
        Command::Show(args) => run_show(&config, args).await,
        Command::Edit(args) => run_edit(&config, args).await,
        Command::Upload(args) => run_upload(&config, args).await,
    }
}

fn build_panel(config: &ApiConfig, name: &str, admin: bool) -> Result<EditableContentPanel, CliError> {
    let spec = catalog::builtin(name).ok_or_else(|| CliError::UnknownPanel(name.to_owned()))?;
    let content = Arc::new(HttpContentStore::new(config)?);
    let files = Arc::new(HttpFileStore::new(config)?);
    Ok(EditableContentPanel::new(spec, AdminGate::new(admin), content, files, PreviewRegistry::new()))
}

async fn run_show(config: &ApiConfig, args: ShowArgs) -> Result<(), CliError> {
    let panel = build_panel(config, &args.panel, args.admin)?;
    panel.mount().await;
    print!("{}", render(&panel.view()));
    Ok(())
}

async fn run_edit(config: &ApiConfig, args: EditArgs) -> Result<(), CliError> {
    let panel = build_panel(config, &args.panel, args.admin)?;
    panel.mount().await;

    if !panel.begin_edit() {
        return Err(CliError::Panel(format!("panel `{}` is not editable by this session", args.panel)));
    }
    if let Some(title) = args.title {
        panel.change(EditField::Title, title);
    }
    if let Some(paragraphs) = args.paragraphs {
        panel.change(EditField::Paragraphs, paragraphs);
    }

    let outcome = panel.save().await;
    print!("{}", render(&panel.view()));
    match outcome {
        SaveOutcome::Saved => Ok(()),
        other => Err(CliError::Panel(format!("save did not complete: {other:?}"))),
    }
}

async fn run_upload(config: &ApiConfig, args: UploadArgs) -> Result<(), CliError> {
    let bytes = tokio::fs::read(&args.path)
        .await
        .map_err(|source| CliError::ReadFile { path: args.path.clone(), source })?;
    let file_name = args
        .path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    let mime_type = mime_guess::from_path(&args.path)
        .first_or_octet_stream()
        .essence_str()
        .to_owned();

    let panel = build_panel(config, &args.panel, args.admin)?;
    let outcome = panel
        .replace_image(args.slot, UploadFile { file_name, bytes, mime_type })
        .await;
    print!("{}", render(&panel.view()));
    match outcome {
        UploadOutcome::Replaced => Ok(()),
        other => Err(CliError::Panel(format!("upload did not complete: {other:?}"))),
    }
}

fn render(view: &PanelView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {:?}", view.name, view.mode);
    if let Some(title) = &view.title {
        let _ = writeln!(out, "title: {title}");
    }
    if let Some(paragraphs) = &view.paragraphs {
        for line in paragraphs.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    for image in &view.images {
        let _ = writeln!(out, "image {}: {}", image.slot, image.src);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }
    out
}
