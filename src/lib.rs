//! Workspace-level integration tests for deccalc live under `tests/`.
