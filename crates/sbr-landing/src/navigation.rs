//! Landing page sections and scroll behaviour.

use serde::{Deserialize, Serialize};

use crate::error::LandingError;

/// Height of the fixed header, subtracted from scroll targets.
pub const HEADER_OFFSET_PX: f64 = 80.0;

/// Scroll distance past which the header switches to its compact style.
pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;

/// Anchored sections, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Waters,
    Origin,
    Source,
    Sustainability,
    Reseller,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Waters,
        Section::Origin,
        Section::Source,
        Section::Sustainability,
        Section::Reseller,
        Section::Contact,
    ];

    /// Element id of the section.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Waters => "waters",
            Section::Origin => "origin",
            Section::Source => "source",
            Section::Sustainability => "sustainability",
            Section::Reseller => "reseller",
            Section::Contact => "contact",
        }
    }

    pub fn anchor(&self) -> String {
        format!("#{}", self.id())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Waters => "Waters",
            Section::Origin => "Sign of the Mountain",
            Section::Source => "The Source",
            Section::Sustainability => "Active Sustainability",
            Section::Reseller => "Become Reseller",
            Section::Contact => "Contact",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Section::Waters => "Our Product Range",
            Section::Origin => "Our Origin Story",
            Section::Source => "Where We Come From",
            Section::Sustainability => "Our Commitment",
            Section::Reseller => "Partner With Us",
            Section::Contact => "Get In Touch",
        }
    }

    /// Look up a section by id, with or without the leading `#`.
    pub fn from_id(id: &str) -> Result<Self, LandingError> {
        let id = id.strip_prefix('#').unwrap_or(id);
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| LandingError::UnknownSection(id.to_string()))
    }
}

/// Absolute scroll position that brings a section just below the header.
///
/// `element_top` is the element's top relative to the viewport and
/// `page_offset` the current vertical scroll.
pub fn scroll_target(element_top: f64, page_offset: f64) -> f64 {
    element_top + page_offset - HEADER_OFFSET_PX
}

pub fn header_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD_PX
}
