//! Deep link orchestration over the attribution SDK and UI collaborators.

use std::sync::{Arc, Weak};
use tracing::{debug, error, warn};

use crate::codec::{RoomCode, build_deep_link, extract_room_code};
use crate::events::SubscriptionHandle;
use crate::params::parse_parameters;
use crate::sdk::{
	AttributionPayload, AttributionSdk, PayloadKind, RoomCodeDisplay, ShareSink, ShareTrigger,
};
use crate::settings::AttributionSettings;
use crate::RoomlinkResult;

/// Subject line used when sharing a room code.
pub const SHARE_SUBJECT: &str = "Join My Game Room";

/// Conversion payloads are only parsed on the first launch.
const FIRST_LAUNCH_MARKER: &str = "\"is_first_launch\":true";

/// Wires the attribution SDK to the room code codec and UI collaborators.
///
/// Construction validates the settings, initializes and starts the SDK,
/// clears the received-code display, and subscribes to the SDK's delivery
/// channels and the optional share trigger. Dropping the manager
/// unsubscribes again.
///
/// Inbound flow: an SDK payload is parsed, a room code extracted, and the
/// received-code display updated. Outbound flow ([`share_room_code`]): a
/// fresh code is generated, shown on the generated-code display, embedded in
/// a deep link, and handed to the share sheet.
///
/// [`share_room_code`]: DeepLinkManager::share_room_code
pub struct DeepLinkManager {
	inner: Arc<ManagerInner>,
	success_handle: SubscriptionHandle,
	failure_handle: SubscriptionHandle,
	click_handle: Option<SubscriptionHandle>,
}

struct ManagerInner {
	settings: AttributionSettings,
	sdk: Arc<dyn AttributionSdk>,
	share_trigger: Option<Arc<dyn ShareTrigger>>,
	received_display: Arc<dyn RoomCodeDisplay>,
	generated_display: Arc<dyn RoomCodeDisplay>,
	share: Arc<dyn ShareSink>,
}

impl DeepLinkManager {
	/// Create the manager and wire it to its collaborators.
	///
	/// # Errors
	///
	/// Returns `RoomlinkError::MissingDevKey` if the dev key is empty —
	/// nothing is initialized or subscribed in that case — and propagates
	/// `RoomlinkError::Sdk` from the SDK collaborator.
	pub fn new(
		settings: AttributionSettings,
		sdk: Arc<dyn AttributionSdk>,
		share_trigger: Option<Arc<dyn ShareTrigger>>,
		received_display: Arc<dyn RoomCodeDisplay>,
		generated_display: Arc<dyn RoomCodeDisplay>,
		share: Arc<dyn ShareSink>,
	) -> RoomlinkResult<Self> {
		if let Err(err) = settings.validate() {
			error!("attribution settings rejected: {err}");
			return Err(err);
		}

		sdk.initialize(&settings)?;
		sdk.start()?;
		received_display.set_text("");

		let inner = Arc::new(ManagerInner {
			settings,
			sdk,
			share_trigger,
			received_display,
			generated_display,
			share,
		});

		// Listeners hold a weak reference; the channel must not keep the
		// manager alive after it is dropped.
		let subscriber = Arc::downgrade(&inner);
		let success_handle = inner.sdk.events().success.subscribe(move |payload| {
			if let Some(inner) = Weak::upgrade(&subscriber) {
				inner.handle_success(payload);
			}
		});

		let failure_handle = inner
			.sdk
			.events()
			.failure
			.subscribe(|err: &String| warn!("attribution delivery failed: {err}"));

		let subscriber = Arc::downgrade(&inner);
		let click_handle = inner.share_trigger.as_ref().map(|trigger| {
			trigger.clicks().subscribe(move |()| {
				if let Some(inner) = Weak::upgrade(&subscriber) {
					inner.share_room_code();
				}
			})
		});

		Ok(Self {
			inner,
			success_handle,
			failure_handle,
			click_handle,
		})
	}

	/// Parse a raw payload, extract a room code, and display it.
	///
	/// Returns `None` when no code is present; the display is left
	/// untouched in that case.
	pub fn on_payload(&self, raw: &str) -> Option<RoomCode> {
		self.inner.parse_and_display(raw)
	}

	/// Generate a room code, display it, and hand the deep link to the
	/// share sheet.
	///
	/// Also runs when the share trigger fires.
	pub fn share_room_code(&self) -> RoomCode {
		self.inner.share_room_code()
	}

	/// The settings this manager was constructed with.
	pub fn settings(&self) -> &AttributionSettings {
		&self.inner.settings
	}
}

impl Drop for DeepLinkManager {
	fn drop(&mut self) {
		let events = self.inner.sdk.events();
		events.success.unsubscribe(self.success_handle);
		events.failure.unsubscribe(self.failure_handle);

		if let (Some(trigger), Some(handle)) = (&self.inner.share_trigger, self.click_handle) {
			trigger.clicks().unsubscribe(handle);
		}
	}
}

impl ManagerInner {
	fn share_room_code(&self) -> RoomCode {
		let code = RoomCode::generate();
		self.generated_display.set_text(code.as_str());

		let link = build_deep_link(&self.settings, &code);
		let body = format!("Join my game room with code: {code}\n{link}");
		self.share.share(SHARE_SUBJECT, &body);

		code
	}

	fn handle_success(&self, payload: &AttributionPayload) {
		match payload.kind {
			PayloadKind::Conversion => {
				debug!(raw = %payload.raw, "conversion data received");
				// Conversion data arrives on every launch; only a first
				// launch carrying the join marker routes into a room.
				if payload.raw.contains(&self.settings.deep_link_value_param)
					&& payload.raw.contains(FIRST_LAUNCH_MARKER)
				{
					self.parse_and_display(&payload.raw);
				} else {
					debug!("no deep link data or not first launch");
				}
			}
			PayloadKind::AttributionOpen => {
				debug!(raw = %payload.raw, "app open attribution received");
				self.parse_and_display(&payload.raw);
			}
		}
	}

	fn parse_and_display(&self, raw: &str) -> Option<RoomCode> {
		let params = parse_parameters(raw);
		let code = extract_room_code(&params, &self.settings.recognized_params())?;

		self.received_display.set_text(code.as_str());
		debug!(code = %code, "room code received");
		Some(code)
	}
}
