//! Note creation draft and its validation schema.

use crate::error::{DraftError, DraftErrors};
use crate::note::CreateNotePayload;
use crate::tag::NoteTag;
use serde::{Deserialize, Serialize};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;
pub const CONTENT_MAX_CHARS: usize = 500;

/// Editable fields of a draft, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftField {
    Title,
    Content,
    Tag,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Title, DraftField::Content, DraftField::Tag];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Content => "Content",
            DraftField::Tag => "Tag",
        }
    }

    pub fn next(&self) -> DraftField {
        match self {
            DraftField::Title => DraftField::Content,
            DraftField::Content => DraftField::Tag,
            DraftField::Tag => DraftField::Title,
        }
    }

    pub fn previous(&self) -> DraftField {
        match self {
            DraftField::Title => DraftField::Tag,
            DraftField::Content => DraftField::Title,
            DraftField::Tag => DraftField::Content,
        }
    }
}

/// Raw form values for a note that has not been created yet.
///
/// The tag is kept as text so that anything outside the fixed tag set is
/// rejected here rather than later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::default().as_str().to_string(),
        }
    }
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag: tag.into(),
        }
    }

    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Content => &self.content,
            DraftField::Tag => &self.tag,
        }
    }

    pub fn value_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Content => &mut self.content,
            DraftField::Tag => &mut self.tag,
        }
    }

    /// Check one field. The first failing rule wins.
    pub fn validate_field(&self, field: DraftField) -> Option<DraftError> {
        match field {
            DraftField::Title => {
                let len = self.title.chars().count();
                if len == 0 {
                    Some(DraftError::TitleRequired)
                } else if len < TITLE_MIN_CHARS {
                    Some(DraftError::TitleTooShort)
                } else if len > TITLE_MAX_CHARS {
                    Some(DraftError::TitleTooLong)
                } else {
                    None
                }
            }
            DraftField::Content => {
                (self.content.chars().count() > CONTENT_MAX_CHARS).then_some(DraftError::ContentTooLong)
            }
            DraftField::Tag => {
                if self.tag.is_empty() {
                    Some(DraftError::TagRequired)
                } else if self.parsed_tag().is_none() {
                    Some(DraftError::TagUnknown {
                        value: self.tag.clone(),
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Validate every field and build the request payload.
    pub fn validate(&self) -> Result<CreateNotePayload, DraftErrors> {
        let errors: Vec<DraftError> = DraftField::ALL
            .iter()
            .filter_map(|field| self.validate_field(*field))
            .collect();
        if !errors.is_empty() {
            return Err(DraftErrors(errors));
        }
        let tag = self.parsed_tag().ok_or_else(|| {
            DraftErrors(vec![DraftError::TagUnknown {
                value: self.tag.clone(),
            }])
        })?;
        Ok(CreateNotePayload {
            title: self.title.clone(),
            content: self.content.clone(),
            tag,
        })
    }

    // Only the exact option values are accepted, matching the select widget.
    fn parsed_tag(&self) -> Option<NoteTag> {
        NoteTag::ALL.into_iter().find(|t| t.as_str() == self.tag)
    }
}
