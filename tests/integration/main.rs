//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises the security service
//! against recording fakes or the in-memory adapters.

mod security_service_tests;
