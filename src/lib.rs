//! BarkodX CLI
//!
//! 読取の取込・履歴管理・Excel出力を行うセッションコントローラ

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod input;
pub mod runner;
