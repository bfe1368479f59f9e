//! Wire encoding between the embedded context and the host.
//!
//! Embedded -> host: an [`Intent`] encoded as a tag digit immediately
//! followed by its data (if any), with no delimiter and no version marker.
//!
//! Host -> embedded: an [`EntryCall`] naming one of the registered entry
//! points, with at most one text argument.

use jsedit_common::ProtocolError;

/// Name of the signal the embedded context activates.
pub const CHANNEL_NAME: &str = "jse-interface";

pub const TAG_CONTENT_CHANGED: char = '0';
pub const TAG_OPEN: char = '1';
pub const TAG_SAVE: char = '2';
pub const TAG_SAVE_AS: char = '3';

pub const ENTRY_INITIALIZE: &str = "initialize";
pub const ENTRY_SET_CONTENT: &str = "setContent";
pub const ENTRY_DISABLE_CAN_SAVE: &str = "disableCanSave";

/// A user action originating in the embedded context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ContentChanged,
    OpenRequested,
    SaveRequested(String),
    SaveAsRequested(String),
}

impl Intent {
    pub fn tag(&self) -> char {
        match self {
            Self::ContentChanged => TAG_CONTENT_CHANGED,
            Self::OpenRequested => TAG_OPEN,
            Self::SaveRequested(_) => TAG_SAVE,
            Self::SaveAsRequested(_) => TAG_SAVE_AS,
        }
    }

    /// Data carried after the tag, if this variant has any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::SaveRequested(content) | Self::SaveAsRequested(content) => Some(content),
            Self::ContentChanged | Self::OpenRequested => None,
        }
    }

    pub fn encode(&self) -> String {
        let data = self.content().unwrap_or_default();
        let mut payload = String::with_capacity(1 + data.len());
        payload.push(self.tag());
        payload.push_str(data);
        payload
    }

    /// Decode a channel payload.
    ///
    /// The first character selects the variant. `0` and `1` must stand
    /// alone; `2` and `3` take everything after the tag verbatim, including
    /// an empty remainder.
    pub fn decode(payload: &str) -> Result<Self, ProtocolError> {
        let mut chars = payload.chars();
        let tag = chars.next().ok_or(ProtocolError::Empty)?;
        let rest = chars.as_str();

        match tag {
            TAG_CONTENT_CHANGED | TAG_OPEN if !rest.is_empty() => {
                Err(ProtocolError::UnexpectedData(tag))
            }
            TAG_CONTENT_CHANGED => Ok(Self::ContentChanged),
            TAG_OPEN => Ok(Self::OpenRequested),
            TAG_SAVE => Ok(Self::SaveRequested(rest.to_string())),
            TAG_SAVE_AS => Ok(Self::SaveAsRequested(rest.to_string())),
            other => Err(ProtocolError::UnknownTag(other)),
        }
    }
}

/// Whether `tag` starts a valid payload.
pub fn is_known_tag(tag: char) -> bool {
    matches!(tag, TAG_CONTENT_CHANGED | TAG_OPEN | TAG_SAVE | TAG_SAVE_AS)
}

/// A call from the host into one of the embedded context's entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCall {
    Initialize,
    SetContent(String),
    DisableCanSave,
}

impl EntryCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => ENTRY_INITIALIZE,
            Self::SetContent(_) => ENTRY_SET_CONTENT,
            Self::DisableCanSave => ENTRY_DISABLE_CAN_SAVE,
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::SetContent(text) => Some(text),
            Self::Initialize | Self::DisableCanSave => None,
        }
    }
}
