//! # Shapewright CLI Library
//!
//! シェイプスナップショットを SHACL / ShEx に変換するコマンドラインインターフェース

pub mod commands;

pub use commands::*;
