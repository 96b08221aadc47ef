use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use subtitle_eraser::app::App;
use subtitle_eraser::models::{Config, ImageResource};
use subtitle_eraser::workflow::WorkflowState;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "subtitle-eraser")]
#[command(about = "Remove subtitles and captions from an image")]
struct CliArgs {
    /// Image file to clean.
    #[arg(value_name = "IMAGE")]
    input: PathBuf,

    /// Where to save the result. Defaults to the input's directory.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn resolve_output_dir(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subtitle_eraser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env()?;
    let mut app = App::from_config(&config);

    let image = ImageResource::load(&args.input).await?;
    if let WorkflowState::Idle {
        notice: Some(notice),
    } = app.select(image)
    {
        error!("{}", notice);
        std::process::exit(1);
    }

    let outcome = app.submit().await?.clone();
    match outcome {
        WorkflowState::Completed { .. } => {
            let output_dir = resolve_output_dir(&args.input, args.output_dir.as_deref());
            let path = app.export(&output_dir).await?;
            info!("Subtitles removed");
            println!("{}", path.display());
            Ok(())
        }
        WorkflowState::Failed { message, .. } => {
            error!("{}", message);
            std::process::exit(1);
        }
        other => {
            error!("Unexpected workflow state after submit: {}", other.phase());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_output_dir;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_output_dir_defaults_to_input_parent() {
        assert_eq!(
            resolve_output_dir(Path::new("shots/frame.png"), None),
            PathBuf::from("shots")
        );
    }

    #[test]
    fn test_output_dir_for_bare_file_name() {
        assert_eq!(
            resolve_output_dir(Path::new("frame.png"), None),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        assert_eq!(
            resolve_output_dir(Path::new("shots/frame.png"), Some(Path::new("out"))),
            PathBuf::from("out")
        );
    }
}
