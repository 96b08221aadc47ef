//! Application orchestration for a single subtitle-removal session.

use crate::ai::{EditService, GeminiEditClient};
use crate::encoder;
use crate::models::{Config, EditResult, ImageResource};
use crate::prompts;
use crate::workflow::{self, Effect, Event, WorkflowState};
use crate::{Error, Result};
use base64::Engine as _;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Prefix added to the original file name when saving a result.
pub const EXPORT_PREFIX: &str = "subtitle-removed-";

pub fn export_file_name(original_name: &str) -> String {
    format!("{}{}", EXPORT_PREFIX, original_name)
}

/// Owns the workflow state and runs the encode → edit pipeline when asked.
pub struct App {
    editor: Box<dyn EditService>,
    state: WorkflowState,
}

impl App {
    /// Build an app around any edit service.
    ///
    /// Tests and local harnesses inject mocks through this.
    pub fn with_service(editor: Box<dyn EditService>) -> Self {
        Self {
            editor,
            state: WorkflowState::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = GeminiEditClient::from_config(config);
        info!("Edit provider: Gemini (model: {})", client.model());
        Self::with_service(Box::new(client))
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    fn dispatch(&mut self, event: Event) -> Option<Effect> {
        let from = self.state.phase();
        let state = std::mem::take(&mut self.state);
        let transition = workflow::reduce(state, event);
        self.state = transition.state;

        match transition.rejection {
            Some(rejection) => warn!(
                "Event rejected in {} ({:?}); now {}",
                from,
                rejection,
                self.state.phase()
            ),
            None => info!("Workflow {} -> {}", from, self.state.phase()),
        }

        transition.effect
    }

    pub fn select(&mut self, image: ImageResource) -> &WorkflowState {
        self.dispatch(Event::Select(image));
        &self.state
    }

    pub fn reset(&mut self) -> &WorkflowState {
        self.dispatch(Event::Reset);
        &self.state
    }

    /// Run the pipeline for the selected image and record the outcome.
    pub async fn submit(&mut self) -> Result<&WorkflowState> {
        let phase = self.state.phase();
        let image = match self.dispatch(Event::Submit) {
            Some(Effect::Process(image)) => image,
            None => {
                return Err(Error::InvalidState(format!(
                    "cannot submit while {}",
                    phase
                )))
            }
        };

        let result = self.process(&image).await;
        self.dispatch(Event::Finished(result));
        Ok(&self.state)
    }

    async fn process(&self, image: &ImageResource) -> EditResult {
        info!("Processing {} ({})", image.name(), image.media_type());

        let encoded = match encoder::encode(image).await {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Encoding failed for {}: {}", image.name(), e);
                return EditResult::failure(e.to_string());
            }
        };

        match self
            .editor
            .submit_edit_request(encoded, prompts::REMOVE_SUBTITLES)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                error!("Edit request failed: {}", e);
                e.into()
            }
        }
    }

    /// Save the edited image into `output_dir`, named after the original.
    pub async fn export(&self, output_dir: &Path) -> Result<PathBuf> {
        let (image, image_data) = match &self.state {
            WorkflowState::Completed { image, image_data } => (image, image_data),
            other => {
                return Err(Error::InvalidState(format!(
                    "nothing to export while {}",
                    other.phase()
                )))
            }
        };

        let bytes = base64::engine::general_purpose::STANDARD.decode(image_data)?;
        let path = output_dir.join(export_file_name(image.name()));
        tokio::fs::write(&path, &bytes).await?;
        info!("Saved edited image ({} bytes) to {}", bytes.len(), path.display());

        Ok(path)
    }
}
