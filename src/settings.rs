//! Attribution and deep-link configuration.

use serde::{Deserialize, Serialize};

use crate::error::RoomlinkError;

/// Configuration for the attribution SDK and deep link generation.
///
/// Supplied once at startup and treated as immutable for the session.
/// Defaults carry the conventional attribution parameter names; everything
/// can be overridden through [`AttributionSettings::builder`].
///
/// # Examples
///
/// ```
/// use roomlink::AttributionSettings;
///
/// let settings = AttributionSettings::builder()
///     .dev_key("abc123")
///     .base_link_url("https://game.onelink.me/abc")
///     .media_source("Facebook")
///     .campaign_name("spring_launch")
///     .build();
///
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.deep_link_sub_param, "deep_link_sub1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionSettings {
	/// Developer key from the attribution dashboard. Required.
	pub dev_key: String,
	/// Apple App ID for iOS builds.
	pub apple_app_id: String,
	/// Enable SDK debug logging.
	pub is_debug: bool,
	/// Source reported for non-store installations.
	pub out_of_store_source: String,

	/// Base URL for generated deep links.
	pub base_link_url: String,
	/// Traffic source reported as `pid` (e.g. `"Facebook"`).
	pub media_source: String,
	/// Campaign name reported as `c`.
	pub campaign_name: String,
	/// Fallback URL embedded in `af_dp` when deep linking fails.
	pub fallback_url: String,
	/// Custom domain for generated links.
	pub link_domain: String,

	/// Parameter marking the join-room action.
	pub deep_link_value_param: String,
	/// Sub-parameter carrying the room code; checked first on extraction.
	pub deep_link_sub_param: String,
	/// Custom room-code parameter; checked second on extraction.
	pub custom_room_code_param: String,
	/// Experience parameter name.
	pub experience_param: String,
	/// Experience parameter value.
	pub experience_value: String,
	/// URL scheme for the fallback link.
	pub fallback_scheme: String,
	/// Host for the fallback link.
	pub fallback_host: String,
}

impl Default for AttributionSettings {
	fn default() -> Self {
		Self {
			dev_key: String::new(),
			apple_app_id: String::new(),
			is_debug: true,
			out_of_store_source: "Dropbox".to_string(),
			base_link_url: String::new(),
			media_source: String::new(),
			campaign_name: String::new(),
			fallback_url: String::new(),
			link_domain: String::new(),
			deep_link_value_param: "joinroomcode".to_string(),
			deep_link_sub_param: "deep_link_sub1".to_string(),
			custom_room_code_param: "myroomcode".to_string(),
			experience_param: "af_xp".to_string(),
			experience_value: "custom".to_string(),
			fallback_scheme: "deeplinkwithoutgoogleplay".to_string(),
			fallback_host: "open".to_string(),
		}
	}
}

impl AttributionSettings {
	/// Start building settings from the defaults.
	pub fn builder() -> AttributionSettingsBuilder {
		AttributionSettingsBuilder {
			settings: Self::default(),
		}
	}

	/// Check that required fields are present.
	///
	/// # Errors
	///
	/// Returns `RoomlinkError::MissingDevKey` if the dev key is empty.
	pub fn validate(&self) -> Result<(), RoomlinkError> {
		if self.dev_key.is_empty() {
			return Err(RoomlinkError::MissingDevKey);
		}
		Ok(())
	}

	/// Parameter names recognized during room code extraction, in the order
	/// they are checked.
	pub fn recognized_params(&self) -> [&str; 2] {
		[&self.deep_link_sub_param, &self.custom_room_code_param]
	}
}

/// Builder for [`AttributionSettings`].
#[derive(Debug, Clone)]
pub struct AttributionSettingsBuilder {
	settings: AttributionSettings,
}

impl AttributionSettingsBuilder {
	/// Set the developer key.
	pub fn dev_key(mut self, value: impl Into<String>) -> Self {
		self.settings.dev_key = value.into();
		self
	}

	/// Set the Apple App ID.
	pub fn apple_app_id(mut self, value: impl Into<String>) -> Self {
		self.settings.apple_app_id = value.into();
		self
	}

	/// Enable or disable SDK debug logging.
	pub fn is_debug(mut self, value: bool) -> Self {
		self.settings.is_debug = value;
		self
	}

	/// Set the out-of-store installation source.
	pub fn out_of_store_source(mut self, value: impl Into<String>) -> Self {
		self.settings.out_of_store_source = value.into();
		self
	}

	/// Set the base URL for generated deep links.
	pub fn base_link_url(mut self, value: impl Into<String>) -> Self {
		self.settings.base_link_url = value.into();
		self
	}

	/// Set the media source (`pid`).
	pub fn media_source(mut self, value: impl Into<String>) -> Self {
		self.settings.media_source = value.into();
		self
	}

	/// Set the campaign name (`c`).
	pub fn campaign_name(mut self, value: impl Into<String>) -> Self {
		self.settings.campaign_name = value.into();
		self
	}

	/// Set the fallback URL embedded in `af_dp`.
	pub fn fallback_url(mut self, value: impl Into<String>) -> Self {
		self.settings.fallback_url = value.into();
		self
	}

	/// Set the custom link domain.
	pub fn link_domain(mut self, value: impl Into<String>) -> Self {
		self.settings.link_domain = value.into();
		self
	}

	/// Override the deep-link value parameter name.
	pub fn deep_link_value_param(mut self, value: impl Into<String>) -> Self {
		self.settings.deep_link_value_param = value.into();
		self
	}

	/// Override the deep-link sub parameter name.
	pub fn deep_link_sub_param(mut self, value: impl Into<String>) -> Self {
		self.settings.deep_link_sub_param = value.into();
		self
	}

	/// Override the custom room-code parameter name.
	pub fn custom_room_code_param(mut self, value: impl Into<String>) -> Self {
		self.settings.custom_room_code_param = value.into();
		self
	}

	/// Override the experience parameter name.
	pub fn experience_param(mut self, value: impl Into<String>) -> Self {
		self.settings.experience_param = value.into();
		self
	}

	/// Override the experience parameter value.
	pub fn experience_value(mut self, value: impl Into<String>) -> Self {
		self.settings.experience_value = value.into();
		self
	}

	/// Override the fallback URL scheme.
	pub fn fallback_scheme(mut self, value: impl Into<String>) -> Self {
		self.settings.fallback_scheme = value.into();
		self
	}

	/// Override the fallback URL host.
	pub fn fallback_host(mut self, value: impl Into<String>) -> Self {
		self.settings.fallback_host = value.into();
		self
	}

	/// Finish building.
	pub fn build(self) -> AttributionSettings {
		self.settings
	}
}
