//! Single test binary entry point.
//!
//! Structure:
//! - unit: single-component tests against the public API
//! - integration: full touch-to-bridge flows through `VirtualPad`

mod helpers;
mod unit;
