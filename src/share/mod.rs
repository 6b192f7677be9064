//! Share cascade
//!
//! Produces a deterministic text summary of a record and delivers it through
//! an ordered list of outlet tiers (native share, clipboard, ...). A tier
//! failure falls through to the next tier; a user cancellation aborts the
//! cascade quietly; only exhausting every tier surfaces as an error.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::ShareError;
use crate::models::Cafe;

/// Share-sheet title for a record.
pub fn share_title(cafe: &Cafe) -> String {
    format!("CafeVibe: {}", cafe.name)
}

/// Deterministic share text from a record's name, address and note.
pub fn share_summary(cafe: &Cafe) -> String {
    let note = if cafe.item_note.trim().is_empty() {
        "無備註"
    } else {
        cafe.item_note.as_str()
    };
    format!(
        "☕ {}\n📍 {}\n📝 {}\n\n#CafeVibe #台灣跑咖",
        cafe.name, cafe.address, note
    )
}

/// One delivery tier.
#[async_trait]
pub trait ShareOutlet: Send + Sync {
    fn name(&self) -> &str;
    async fn deliver(&self, title: &str, text: &str) -> Result<(), ShareError>;
}

/// How a share attempt ended, short of full failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Delivered through the named outlet tier.
    Delivered { outlet: String },
    /// The user dismissed the share; nothing is surfaced.
    Cancelled,
}

/// Ordered fallback cascade over [`ShareOutlet`] tiers.
#[derive(Default)]
pub struct ShareCascade {
    outlets: Vec<Box<dyn ShareOutlet>>,
}

impl ShareCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outlet(mut self, outlet: Box<dyn ShareOutlet>) -> Self {
        self.outlets.push(outlet);
        self
    }

    /// Try each tier in order.
    pub async fn share(&self, cafe: &Cafe) -> Result<ShareOutcome, ShareError> {
        let title = share_title(cafe);
        let text = share_summary(cafe);

        for outlet in &self.outlets {
            match outlet.deliver(&title, &text).await {
                Ok(()) => {
                    return Ok(ShareOutcome::Delivered {
                        outlet: outlet.name().to_string(),
                    });
                }
                Err(ShareError::Cancelled) => return Ok(ShareOutcome::Cancelled),
                Err(e) => {
                    warn!(outlet = outlet.name(), error = %e, "share tier failed, falling through");
                }
            }
        }
        Err(ShareError::Exhausted)
    }
}

/// Terminal outlet that prints the summary to stdout; the CLI's stand-in
/// for a clipboard.
pub struct ConsoleOutlet;

#[async_trait]
impl ShareOutlet for ConsoleOutlet {
    fn name(&self) -> &str {
        "console"
    }

    async fn deliver(&self, _title: &str, text: &str) -> Result<(), ShareError> {
        println!("{text}");
        Ok(())
    }
}
