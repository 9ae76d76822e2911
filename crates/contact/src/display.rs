//! Per-viewer contact presentation.

use crate::{format_phone, mask_email, mask_phone};
use serde::{Deserialize, Serialize};

/// Who is looking at a listing's contact details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewer {
    /// Not signed in
    #[default]
    Anonymous,
    /// Signed in; `revealed` once they asked to see the contact
    SignedIn {
        /// The viewer pressed "reveal"
        #[serde(default)]
        revealed: bool,
    },
    /// The person who posted the listing
    Owner,
}

impl Viewer {
    /// True if the viewer may ask to reveal masked details.
    pub fn can_reveal(&self) -> bool {
        matches!(self, Viewer::SignedIn { revealed: false })
    }

    /// The viewer after pressing "reveal". Anonymous viewers stay masked.
    #[must_use]
    pub fn reveal(self) -> Self {
        match self {
            Viewer::SignedIn { .. } => Viewer::SignedIn { revealed: true },
            other => other,
        }
    }

    /// True if contact details are shown in full.
    pub fn sees_full_contact(&self) -> bool {
        matches!(self, Viewer::Owner | Viewer::SignedIn { revealed: true })
    }
}

/// Contact details as shown to one viewer. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDisplay {
    /// Masked or formatted phone, if the listing has one
    pub phone: Option<String>,
    /// Masked or full email
    pub email: String,
    /// True when the values above are redacted
    pub masked: bool,
}

impl ContactDisplay {
    /// Build the view of `phone`/`email` for `viewer`.
    pub fn for_viewer(phone: Option<&str>, email: &str, viewer: Viewer) -> Self {
        let phone = phone.filter(|p| !p.trim().is_empty());

        if viewer.sees_full_contact() {
            Self {
                phone: phone.map(format_phone),
                email: email.to_string(),
                masked: false,
            }
        } else {
            Self {
                phone: phone.map(mask_phone),
                email: mask_email(email),
                masked: true,
            }
        }
    }
}
