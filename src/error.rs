//! Error types for attribution configuration and room code handling.

use thiserror::Error;

/// Errors that can occur during configuration and room code handling.
#[derive(Debug, Error)]
pub enum RoomlinkError {
	/// The attribution dev key is empty.
	///
	/// Initialization aborts before any SDK or UI wiring takes place.
	#[error("attribution dev key not set")]
	MissingDevKey,

	/// A room code must be exactly 6 ASCII decimal digits.
	#[error("invalid room code: {0:?}. Expected exactly 6 decimal digits")]
	InvalidRoomCode(String),

	/// The attribution SDK collaborator reported a failure during
	/// initialization or start.
	#[error("attribution SDK failure: {0}")]
	Sdk(String),
}
