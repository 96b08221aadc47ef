//! Submission workflow state machine
//!
//! The front end's view state is a [`WorkflowState`] value. Every user action
//! or pipeline completion is an [`Event`], and [`reduce`] is the only place a
//! state changes. Running the pipeline is left to the caller, signalled by
//! [`Effect::Process`].

use crate::models::{EditResult, ImageResource};
use std::fmt;

pub const INVALID_FILE_MESSAGE: &str = "Please select a valid image file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing selected. `notice` holds a validation message, if any.
    Idle { notice: Option<String> },
    ImageSelected { image: ImageResource },
    Processing { image: ImageResource },
    Completed { image: ImageResource, image_data: String },
    Failed { image: ImageResource, message: String },
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::Idle { notice: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ImageSelected,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::ImageSelected => "image-selected",
            Phase::Processing => "processing",
            Phase::Completed => "completed",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

impl WorkflowState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle { .. } => Phase::Idle,
            Self::ImageSelected { .. } => Phase::ImageSelected,
            Self::Processing { .. } => Phase::Processing,
            Self::Completed { .. } => Phase::Completed,
            Self::Failed { .. } => Phase::Failed,
        }
    }

    /// The currently selected image, in every phase except `Idle`.
    pub fn image(&self) -> Option<&ImageResource> {
        match self {
            Self::Idle { .. } => None,
            Self::ImageSelected { image }
            | Self::Processing { image }
            | Self::Completed { image, .. }
            | Self::Failed { image, .. } => Some(image),
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, Self::ImageSelected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select(ImageResource),
    Submit,
    Finished(EditResult),
    Reset,
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Encode the image and send the edit request, then feed
    /// [`Event::Finished`] back in.
    Process(ImageResource),
}

/// Why an event left the state untouched or fell back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAnImage,
    Busy,
    NothingToSubmit,
    /// The result arrived after the user reset or moved on.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effect: Option<Effect>,
    pub rejection: Option<Rejection>,
}

impl Transition {
    fn to(state: WorkflowState) -> Self {
        Self {
            state,
            effect: None,
            rejection: None,
        }
    }

    fn rejected(state: WorkflowState, rejection: Rejection) -> Self {
        Self {
            state,
            effect: None,
            rejection: Some(rejection),
        }
    }
}

pub fn reduce(state: WorkflowState, event: Event) -> Transition {
    match (state, event) {
        (_, Event::Reset) => Transition::to(WorkflowState::default()),

        (state @ WorkflowState::Processing { .. }, Event::Select(_)) => {
            Transition::rejected(state, Rejection::Busy)
        }
        (_, Event::Select(image)) if !image.is_image() => Transition::rejected(
            WorkflowState::Idle {
                notice: Some(INVALID_FILE_MESSAGE.to_string()),
            },
            Rejection::NotAnImage,
        ),
        (_, Event::Select(image)) => Transition::to(WorkflowState::ImageSelected { image }),

        (WorkflowState::ImageSelected { image }, Event::Submit) => Transition {
            effect: Some(Effect::Process(image.clone())),
            state: WorkflowState::Processing { image },
            rejection: None,
        },
        (state @ WorkflowState::Processing { .. }, Event::Submit) => {
            Transition::rejected(state, Rejection::Busy)
        }
        (state, Event::Submit) => Transition::rejected(state, Rejection::NothingToSubmit),

        (WorkflowState::Processing { image }, Event::Finished(result)) => match result {
            EditResult::Success { image_data } => {
                Transition::to(WorkflowState::Completed { image, image_data })
            }
            EditResult::Failure { message } => {
                Transition::to(WorkflowState::Failed { image, message })
            }
        },
        (state, Event::Finished(_)) => Transition::rejected(state, Rejection::Stale),
    }
}
