//! Cross-module scenario tests for the answer pipeline.
