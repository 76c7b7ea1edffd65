//! Manager orchestration tests
//!
//! Tests for DeepLinkManager covering:
//! - Happy path: construction wiring, payload handling, sharing
//! - Edge cases: missing dev key, SDK failure, non-first-launch gate
//! - Lifecycle: subscriptions released on drop

use fixtures::*;

use mockall::mock;
use mockall::predicate::eq;
use roomlink::{
	AttributionPayload, AttributionSdk, AttributionSettings, DeepLinkManager, RoomCodeDisplay,
	RoomlinkError, SHARE_SUBJECT, ShareSink, ShareTrigger,
};
use rstest::*;
use std::sync::Arc;

mock! {
	Display {}

	impl RoomCodeDisplay for Display {
		fn set_text(&self, value: &str);
	}
}

fn manager_with(
	settings: AttributionSettings,
	sdk: &Arc<FakeSdk>,
) -> (DeepLinkManager, Arc<RecordingDisplay>, Arc<RecordingDisplay>, Arc<RecordingShare>) {
	let received = RecordingDisplay::new();
	let generated = RecordingDisplay::new();
	let share = RecordingShare::new();
	let manager = DeepLinkManager::new(
		settings,
		Arc::clone(sdk) as Arc<dyn AttributionSdk>,
		None,
		Arc::clone(&received) as Arc<dyn RoomCodeDisplay>,
		Arc::clone(&generated) as Arc<dyn RoomCodeDisplay>,
		Arc::clone(&share) as Arc<dyn ShareSink>,
	)
	.unwrap();
	(manager, received, generated, share)
}

// ============================================================================
// Construction Tests
// ============================================================================

#[rstest]
fn test_construction_initializes_and_subscribes(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (_manager, received, _, _) = manager_with(settings, &sdk);

	assert!(sdk.initialized.load(std::sync::atomic::Ordering::SeqCst));
	assert!(sdk.started.load(std::sync::atomic::Ordering::SeqCst));
	assert_eq!(sdk.events().success.listener_count(), 1);
	assert_eq!(sdk.events().failure.listener_count(), 1);
	// The received-code display starts out cleared
	assert_eq!(received.last().as_deref(), Some(""));
}

#[rstest]
fn test_empty_dev_key_aborts_before_any_wiring() {
	let settings = AttributionSettings::default();
	let sdk = Arc::new(FakeSdk::new());

	let mut display = MockDisplay::new();
	display.expect_set_text().never();
	let display = Arc::new(display);

	let result = DeepLinkManager::new(
		settings,
		Arc::clone(&sdk) as Arc<dyn AttributionSdk>,
		None,
		Arc::clone(&display) as Arc<dyn RoomCodeDisplay>,
		display,
		RecordingShare::new(),
	);

	assert!(matches!(result, Err(RoomlinkError::MissingDevKey)));
	assert!(!sdk.initialized.load(std::sync::atomic::Ordering::SeqCst));
	assert_eq!(sdk.events().success.listener_count(), 0);
}

#[rstest]
fn test_sdk_initialization_failure_propagates(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::failing());
	let result = DeepLinkManager::new(
		settings,
		Arc::clone(&sdk) as Arc<dyn AttributionSdk>,
		None,
		RecordingDisplay::new(),
		RecordingDisplay::new(),
		RecordingShare::new(),
	);

	assert!(matches!(result, Err(RoomlinkError::Sdk(_))));
	assert_eq!(sdk.events().success.listener_count(), 0);
}

// ============================================================================
// Inbound Payload Tests
// ============================================================================

#[rstest]
fn test_conversion_payload_on_first_launch_displays_code(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (_manager, received, _, _) = manager_with(settings, &sdk);

	sdk.events().success.emit(&AttributionPayload::conversion(
		r#"{"af_status":"Non-organic","is_first_launch":true,"joinroomcode":"joinroomcode","deep_link_sub1":"482913"}"#,
	));

	assert_eq!(received.last().as_deref(), Some("482913"));
}

#[rstest]
#[case::not_first_launch(
	r#"{"af_status":"Non-organic","is_first_launch":false,"joinroomcode":"joinroomcode","deep_link_sub1":"482913"}"#
)]
#[case::no_join_marker(r#"{"af_status":"Organic","is_first_launch":true}"#)]
fn test_gated_conversion_payload_leaves_display_untouched(
	settings: AttributionSettings,
	#[case] raw: &str,
) {
	let sdk = Arc::new(FakeSdk::new());
	let (_manager, received, _, _) = manager_with(settings, &sdk);

	sdk.events().success.emit(&AttributionPayload::conversion(raw));

	// Only the initial clear was written
	assert_eq!(received.texts.lock().as_slice(), [String::new()]);
}

#[rstest]
fn test_attribution_open_payload_is_parsed_without_gate(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (_manager, received, _, _) = manager_with(settings, &sdk);

	sdk.events()
		.success
		.emit(&AttributionPayload::attribution_open(
			"pid=Facebook&deep_link_sub1=code99102233ref",
		));

	assert_eq!(received.last().as_deref(), Some("991022"));
}

#[rstest]
fn test_failure_payload_is_absorbed(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (_manager, received, _, _) = manager_with(settings, &sdk);

	sdk.events()
		.failure
		.emit(&"Conversion Data Failed: timeout".to_string());

	assert_eq!(received.texts.lock().len(), 1);
}

#[rstest]
fn test_on_payload_returns_extracted_code(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (manager, received, _, _) = manager_with(settings, &sdk);

	let code = manager.on_payload("myroomcode=555666").unwrap();
	assert_eq!(code.as_str(), "555666");
	assert_eq!(received.last().as_deref(), Some("555666"));

	assert!(manager.on_payload("pid=Facebook").is_none());
	assert_eq!(received.last().as_deref(), Some("555666"));
}

// ============================================================================
// Share Flow Tests
// ============================================================================

#[rstest]
fn test_share_room_code_displays_builds_and_shares(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (manager, _, generated, share) = manager_with(settings, &sdk);

	let code = manager.share_room_code();

	assert_eq!(generated.last().as_deref(), Some(code.as_str()));

	let shared = share.shared.lock();
	let (subject, body) = shared.first().unwrap();
	assert_eq!(subject, SHARE_SUBJECT);
	assert!(body.starts_with(&format!("Join my game room with code: {code}\n")));
	assert!(body.contains("https://game.onelink.me/abc?"));
	assert!(body.contains(&format!("deep_link_sub1={code}")));
}

#[rstest]
fn test_shared_link_round_trips_through_inbound_flow(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (manager, received, _, share) = manager_with(settings, &sdk);

	let code = manager.share_room_code();
	let shared = share.shared.lock();
	let (_, body) = shared.first().unwrap();
	let link = body.lines().nth(1).unwrap();

	let extracted = manager.on_payload(link).unwrap();
	assert_eq!(extracted, code);
	assert_eq!(received.last().as_deref(), Some(code.as_str()));
}

#[rstest]
fn test_share_trigger_click_runs_share_flow(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let button = FakeButton::new();
	let generated = RecordingDisplay::new();
	let share = RecordingShare::new();

	let trigger: Arc<dyn ShareTrigger> = Arc::clone(&button) as Arc<dyn ShareTrigger>;
	let manager = DeepLinkManager::new(
		settings,
		Arc::clone(&sdk) as Arc<dyn AttributionSdk>,
		Some(trigger),
		RecordingDisplay::new(),
		Arc::clone(&generated) as Arc<dyn RoomCodeDisplay>,
		Arc::clone(&share) as Arc<dyn ShareSink>,
	)
	.unwrap();

	assert_eq!(button.clicks().listener_count(), 1);
	button.click();

	let shared = share.shared.lock();
	assert_eq!(shared.len(), 1);
	let code = generated.last().unwrap();
	assert!(shared[0].1.contains(&code));

	drop(shared);
	drop(manager);
	assert_eq!(button.clicks().listener_count(), 0);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[rstest]
fn test_drop_unsubscribes_from_both_channels(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());
	let (manager, _, _, _) = manager_with(settings, &sdk);

	assert_eq!(sdk.events().success.listener_count(), 1);
	drop(manager);
	assert_eq!(sdk.events().success.listener_count(), 0);
	assert_eq!(sdk.events().failure.listener_count(), 0);
}

#[rstest]
fn test_clear_uses_exact_empty_string(settings: AttributionSettings) {
	let sdk = Arc::new(FakeSdk::new());

	let mut received = MockDisplay::new();
	received.expect_set_text().with(eq("")).times(1).return_const(());

	let _manager = DeepLinkManager::new(
		settings,
		Arc::clone(&sdk) as Arc<dyn AttributionSdk>,
		None,
		Arc::new(received),
		RecordingDisplay::new(),
		RecordingShare::new(),
	)
	.unwrap();
}
