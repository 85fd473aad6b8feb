//! End-to-end tests for the ceremony drivers live in `tests/`.
