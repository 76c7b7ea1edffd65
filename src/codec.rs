//! Room code extraction and deep link generation.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

use crate::error::RoomlinkError;
use crate::settings::AttributionSettings;

/// Room codes are exactly this many decimal digits.
pub const ROOM_CODE_LEN: usize = 6;

/// Escapes everything outside the RFC 3986 unreserved set.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// A 6-decimal-digit code identifying a multiplayer session.
///
/// The digit invariant is enforced at construction; a held `RoomCode` is
/// always valid.
///
/// # Examples
///
/// ```
/// use roomlink::RoomCode;
///
/// let code = RoomCode::new("482913").unwrap();
/// assert_eq!(code.as_str(), "482913");
///
/// assert!(RoomCode::new("12345").is_err());
/// assert!(RoomCode::new("12345a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
	/// Create a room code from a string, validating the 6-digit invariant.
	///
	/// # Errors
	///
	/// Returns `RoomlinkError::InvalidRoomCode` unless the input is exactly
	/// 6 ASCII decimal digits.
	pub fn new(value: impl Into<String>) -> Result<Self, RoomlinkError> {
		let value = value.into();
		if value.len() == ROOM_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
			Ok(Self(value))
		} else {
			Err(RoomlinkError::InvalidRoomCode(value))
		}
	}

	/// Generate a random room code, uniform over `100000..=999999`.
	pub fn generate() -> Self {
		Self::generate_with(&mut rand::thread_rng())
	}

	/// Generate a random room code from the given RNG.
	///
	/// The range has no values shorter than 6 digits, so the rendered
	/// string never needs padding.
	pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self(rng.gen_range(100_000..=999_999).to_string())
	}

	/// The code as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RoomCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for RoomCode {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<RoomCode> for String {
	fn from(code: RoomCode) -> Self {
		code.0
	}
}

/// Extract a room code from parsed attribution parameters.
///
/// Recognized keys are checked in the given order. For the first key present
/// in the map, the value is filtered to its decimal digits (original order
/// preserved, capped at 6); if exactly 6 digits remain they form the code,
/// otherwise the next key is tried. `None` means no code was present, which
/// is not an error.
///
/// Decorated values are tolerated: `"code_123456_ref"` yields `123456`.
///
/// # Examples
///
/// ```
/// use roomlink::extract_room_code;
/// use std::collections::HashMap;
///
/// let params: HashMap<_, _> =
///     [("deep_link_sub1".to_string(), "code99102233ref".to_string())].into();
/// let code = extract_room_code(&params, &["deep_link_sub1", "myroomcode"]).unwrap();
/// assert_eq!(code.as_str(), "991022");
/// ```
pub fn extract_room_code(
	params: &HashMap<String, String>,
	recognized: &[impl AsRef<str>],
) -> Option<RoomCode> {
	for key in recognized {
		let Some(value) = params.get(key.as_ref()) else {
			continue;
		};

		let digits: String = value
			.chars()
			.filter(char::is_ascii_digit)
			.take(ROOM_CODE_LEN)
			.collect();
		if digits.len() == ROOM_CODE_LEN {
			return Some(RoomCode(digits));
		}
	}

	None
}

/// Percent-encode a single query component.
pub fn escape_component(value: &str) -> String {
	utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Build a shareable deep link URL embedding the room code.
///
/// The query carries a fixed, ordered parameter set: the experience marker,
/// media source (`pid`), campaign (`c`), the deep-link value marker, the sub
/// parameter and custom room-code parameter both set to the code, a fallback
/// deep link (`af_dp`) embedding the fallback URL plus the code, and the
/// retargeting flag. Every key and value is percent-encoded; pairs are
/// joined with `&` and appended to the base URL after `?`.
///
/// The result round-trips: parsing it with [`parse_parameters`] and
/// extracting with the settings' recognized keys yields the same code.
///
/// [`parse_parameters`]: crate::parse_parameters
pub fn build_deep_link(settings: &AttributionSettings, code: &RoomCode) -> String {
	let fallback_link = format!("{}?roomcode={}", settings.fallback_url, code);
	let pairs: [(&str, &str); 8] = [
		(&settings.experience_param, &settings.experience_value),
		("pid", &settings.media_source),
		("c", &settings.campaign_name),
		(&settings.deep_link_value_param, &settings.deep_link_value_param),
		(&settings.deep_link_sub_param, code.as_str()),
		("af_dp", &fallback_link),
		(&settings.custom_room_code_param, code.as_str()),
		("is_retargeting", "true"),
	];

	let query = pairs
		.iter()
		.map(|(key, value)| format!("{}={}", escape_component(key), escape_component(value)))
		.collect::<Vec<_>>()
		.join("&");

	format!("{}?{}", settings.base_link_url, query)
}
