//! Integration tests for the navigator
//!
//! These tests use wiremock to serve small HAL APIs and walk them end-to-end
//! through real HTTP requests.

mod common;
mod location_tests;
mod navigation_tests;
mod request_tests;
