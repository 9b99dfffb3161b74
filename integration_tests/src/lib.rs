//! Workspace member carrying the end-to-end workflow tests; see `tests/`.
