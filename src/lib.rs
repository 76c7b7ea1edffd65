//! Deep link handling for multiplayer room codes.
//!
//! This crate implements the deep-link layer of a game client sitting on an
//! attribution SDK:
//!
//! - **Payload parsing**: attribution callbacks deliver JSON-ish or
//!   URL-encoded strings; [`parse_parameters`] reduces both to a key/value
//!   map, skipping malformed segments.
//! - **Room codes**: [`RoomCode`] is a validated 6-digit session code,
//!   extracted from parsed payloads ([`extract_room_code`]) or generated
//!   randomly for sharing.
//! - **Deep link generation**: [`build_deep_link`] emits a percent-encoded
//!   share URL whose parameters round-trip through the parser.
//! - **Orchestration**: [`DeepLinkManager`] wires an [`AttributionSdk`]
//!   implementation to UI display and share-sheet collaborators.
//!
//! # Quick Start
//!
//! ```rust
//! use roomlink::{AttributionSettings, RoomCode, build_deep_link, extract_room_code,
//!     parse_parameters};
//!
//! let settings = AttributionSettings::builder()
//!     .dev_key("abc123")
//!     .base_link_url("https://game.onelink.me/abc")
//!     .media_source("Facebook")
//!     .campaign_name("spring_launch")
//!     .fallback_url("deeplinkwithoutgoogleplay://open")
//!     .build();
//!
//! // Outbound: embed a room code in a shareable link.
//! let code = RoomCode::new("482913").unwrap();
//! let link = build_deep_link(&settings, &code);
//! assert!(link.contains("deep_link_sub1=482913"));
//!
//! // Inbound: recover the code from the link's query string.
//! let params = parse_parameters(&link);
//! let received = extract_room_code(&params, &settings.recognized_params()).unwrap();
//! assert_eq!(received, code);
//! ```

pub mod codec;
pub mod error;
pub mod events;
pub mod manager;
pub mod params;
pub mod sdk;
pub mod settings;

// Re-export main types for convenience
pub use codec::{ROOM_CODE_LEN, RoomCode, build_deep_link, escape_component, extract_room_code};
pub use error::RoomlinkError;
pub use events::{EventChannel, SubscriptionHandle};
pub use manager::{DeepLinkManager, SHARE_SUBJECT};
pub use params::parse_parameters;
pub use sdk::{
	AttributionEvents, AttributionPayload, AttributionSdk, PayloadKind, RoomCodeDisplay, ShareSink,
	ShareTrigger,
};
pub use settings::{AttributionSettings, AttributionSettingsBuilder};

/// Result type for roomlink operations.
pub type RoomlinkResult<T> = Result<T, RoomlinkError>;
