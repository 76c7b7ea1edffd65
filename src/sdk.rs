//! Collaborator boundaries: attribution SDK, UI display, share sheet.
//!
//! The deep-link layer never talks to the vendor SDK or engine UI directly;
//! it goes through these traits so test doubles can stand in for both.

use crate::RoomlinkResult;
use crate::events::EventChannel;
use crate::settings::AttributionSettings;

/// Which SDK callback delivered a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
	/// Install conversion data, delivered once after install.
	Conversion,
	/// Attribution data for an app-open via deep link.
	AttributionOpen,
}

/// A raw payload delivered by the attribution SDK.
#[derive(Debug, Clone)]
pub struct AttributionPayload {
	pub kind: PayloadKind,
	pub raw: String,
}

impl AttributionPayload {
	pub fn conversion(raw: impl Into<String>) -> Self {
		Self {
			kind: PayloadKind::Conversion,
			raw: raw.into(),
		}
	}

	pub fn attribution_open(raw: impl Into<String>) -> Self {
		Self {
			kind: PayloadKind::AttributionOpen,
			raw: raw.into(),
		}
	}
}

/// Success and failure delivery channels of the attribution SDK.
pub struct AttributionEvents {
	/// Conversion or attribution data, as a raw string payload.
	pub success: EventChannel<AttributionPayload>,
	/// Error descriptions for failed deliveries.
	pub failure: EventChannel<String>,
}

impl AttributionEvents {
	pub fn new() -> Self {
		Self {
			success: EventChannel::new(),
			failure: EventChannel::new(),
		}
	}
}

impl Default for AttributionEvents {
	fn default() -> Self {
		Self::new()
	}
}

/// The attribution SDK, abstracted from its process-wide singleton.
///
/// A real implementation wraps the vendor SDK: `initialize` forwards the
/// dev key, app id, out-of-store source and link domain; `start` begins
/// tracking; delivered callbacks are re-emitted on [`AttributionEvents`].
pub trait AttributionSdk: Send + Sync {
	/// Configure the SDK. Called once, before [`start`](Self::start).
	///
	/// # Errors
	///
	/// Returns `RoomlinkError::Sdk` if the vendor SDK rejects the
	/// configuration.
	fn initialize(&self, settings: &AttributionSettings) -> RoomlinkResult<()>;

	/// Begin attribution tracking.
	///
	/// # Errors
	///
	/// Returns `RoomlinkError::Sdk` if the vendor SDK fails to start.
	fn start(&self) -> RoomlinkResult<()>;

	/// The SDK's delivery channels.
	fn events(&self) -> &AttributionEvents;
}

/// A UI text element showing a room code.
pub trait RoomCodeDisplay: Send + Sync {
	fn set_text(&self, value: &str);
}

/// A clickable UI trigger, typically the share button.
///
/// Click listeners are added and removed through the channel's
/// subscribe/unsubscribe handles.
pub trait ShareTrigger: Send + Sync {
	fn clicks(&self) -> &EventChannel<()>;
}

/// The native share sheet.
pub trait ShareSink: Send + Sync {
	fn share(&self, subject: &str, body: &str);
}
