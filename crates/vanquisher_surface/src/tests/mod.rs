//! Backend contract tests
