//! Attribution payload parsing.
//!
//! Attribution callbacks deliver either a JSON-ish conversion blob or an
//! `&`-joined query string, depending on the install path. Both are reduced
//! to a flat key/value map; malformed segments are skipped rather than
//! failing the whole payload.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Parse a raw attribution payload into key/value pairs.
///
/// Inputs starting with `{` (after trimming) are treated as JSON-like;
/// everything else as URL-encoded `key=value` pairs. Never fails: segments
/// that do not split cleanly are dropped and parsing continues.
///
/// # Examples
///
/// ```
/// use roomlink::parse_parameters;
///
/// let params = parse_parameters("pid=Facebook&c=spring%20launch");
/// assert_eq!(params.get("pid").map(String::as_str), Some("Facebook"));
/// assert_eq!(params.get("c").map(String::as_str), Some("spring launch"));
/// ```
pub fn parse_parameters(raw: &str) -> HashMap<String, String> {
	let mut params = HashMap::new();

	if raw.trim_start().starts_with('{') {
		parse_json_format(raw, &mut params);
	} else {
		parse_url_format(raw, &mut params);
	}

	params
}

/// Parse a JSON-like conversion payload.
///
/// Not a JSON parser: conversion blobs are flat and unescaped apart from
/// `\/`, so they are split on `,` and `:`. A pair must split on `:` into
/// exactly two parts to be kept, which drops values containing a `:` (URLs,
/// timestamps). Pairs with a literal `null` value are dropped as well.
fn parse_json_format(raw: &str, params: &mut HashMap<String, String>) {
	let data = raw.replace("\\/", "/");
	let data = data.trim().trim_matches(['{', '}']);

	for pair in data.split(',') {
		let parts: Vec<&str> = pair.split(':').collect();
		if parts.len() != 2 {
			continue;
		}

		let key = parts[0].trim_matches(['"', ' ']);
		let value = parts[1].trim_matches(['"', ' ']);
		if value.eq_ignore_ascii_case("null") {
			continue;
		}

		params.insert(key.to_string(), value.to_string());
	}
}

/// Parse an URL-encoded payload (`a=1&b=2`).
///
/// A pair must split on `=` into exactly two parts to be kept; both sides
/// are percent-decoded.
fn parse_url_format(raw: &str, params: &mut HashMap<String, String>) {
	for pair in raw.split('&') {
		let parts: Vec<&str> = pair.split('=').collect();
		if parts.len() != 2 {
			continue;
		}

		params.insert(
			percent_decode_str(parts[0]).decode_utf8_lossy().to_string(),
			percent_decode_str(parts[1]).decode_utf8_lossy().to_string(),
		);
	}
}
