//! Default values for the catalog client, search debounce and scene transform.

use std::time::Duration;

pub const BASE_URL: &str = "https://api.poly.pizza/v1.1";
pub const AUTH_HEADER: &str = "x-auth-token";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("polyscene/", env!("CARGO_PKG_VERSION"));

pub const API_KEY_ENV: &str = "POLY_PIZZA_API_KEY";
pub const BASE_URL_ENV: &str = "POLY_PIZZA_BASE_URL";
pub const TIMEOUT_ENV: &str = "POLY_PIZZA_TIMEOUT_SECS";

pub const DEBOUNCE_MS: u64 = 500;

pub const MIN_SCALE: f32 = 0.05;
pub const MAX_SCALE: f32 = 0.5;
pub const INITIAL_SCALE: f32 = 0.2;
pub const ROTATION_SENSITIVITY: f32 = 1.0;

pub const DEFAULT_ASSET: &str = "minecraft_creeper_head";
pub const DEFAULT_LABEL: &str = "DxnnySZN";
pub const INITIAL_POSITION: [f32; 3] = [-3.0, -1.0, -3.0];
pub const LABEL_POSITION: [f32; 3] = [-2.0, -1.0, -3.0];

pub fn request_timeout() -> Duration { Duration::from_secs(REQUEST_TIMEOUT_SECS) }
pub fn debounce() -> Duration { Duration::from_millis(DEBOUNCE_MS) }
pub fn rotation_sensitivity() -> f32 { ROTATION_SENSITIVITY }
pub fn discard_stale_responses() -> bool { true }
