//! スキャン入力の解析
//!
//! 1行が1件の読取、または `:` で始まる操作コマンド。
//!
//! - `PAYLOAD` : フォーマット不明の読取
//! - `PAYLOAD<TAB>FORMAT` : フォーマット付きの読取
//! - `@MILLIS<TAB>PAYLOAD[<TAB>FORMAT]` : 時刻指定の読取（記録の再生用）
//! - `:add CODE` など : 操作コマンド

use crate::controller::CaptureMode;
use crate::error::{BarkodxError, Result};
use crate::export::ExportTarget;
use barkodx_common::SearchPlatform;

/// デコーダからの読取1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    pub payload: String,
    pub format: Option<String>,
    /// 指定がなければ現在時刻
    pub at: Option<i64>,
}

/// 操作コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// 手入力
    Add(String),
    /// 一覧を表示
    List,
    /// 履歴を表示
    History,
    /// 一覧から削除
    Remove(String),
    /// 一覧をクリア
    Clear,
    /// 履歴をクリア
    ClearHistory,
    /// 読取モード切替
    Mode(CaptureMode),
    /// 検索URLを表示
    Search(Option<SearchPlatform>),
    /// 統計を表示
    Stats,
    /// Excel出力
    Export(ExportTarget),
    /// 終了
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Decoded(DecodedLine),
    Command(SessionCommand),
    Empty,
}

pub fn parse_line(line: &str) -> Result<InputLine> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty() {
        return Ok(InputLine::Empty);
    }

    if let Some(command) = line.strip_prefix(':') {
        return parse_command(command.trim()).map(InputLine::Command);
    }

    let (at, rest) = match line.strip_prefix('@') {
        Some(timed) => {
            let (millis, rest) = timed
                .split_once('\t')
                .ok_or_else(|| BarkodxError::InvalidInput(format!("時刻の後にタブが必要です: {}", line)))?;
            let millis = millis
                .trim()
                .parse::<i64>()
                .map_err(|_| BarkodxError::InvalidInput(format!("時刻が数値ではありません: {}", millis)))?;
            (Some(millis), rest)
        }
        None => (None, line),
    };

    let mut fields = rest.splitn(2, '\t');
    let payload = fields.next().unwrap_or_default();
    let format = fields
        .next()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    if payload.is_empty() {
        return Err(BarkodxError::InvalidInput("バーコードが空です".into()));
    }

    Ok(InputLine::Decoded(DecodedLine {
        payload: payload.to_string(),
        format,
        at,
    }))
}

fn parse_command(command: &str) -> Result<SessionCommand> {
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let command = match name {
        "add" | "a" => SessionCommand::Add(arg.to_string()),
        "list" | "l" => SessionCommand::List,
        "history" | "h" => SessionCommand::History,
        "remove" | "rm" => {
            if arg.is_empty() {
                return Err(BarkodxError::InvalidInput("削除するIDを指定してください".into()));
            }
            SessionCommand::Remove(arg.to_string())
        }
        "clear" => SessionCommand::Clear,
        "clear-history" => SessionCommand::ClearHistory,
        "mode" => SessionCommand::Mode(arg.parse().map_err(BarkodxError::InvalidInput)?),
        "search" => {
            if arg.is_empty() {
                SessionCommand::Search(None)
            } else {
                SessionCommand::Search(Some(arg.parse().map_err(BarkodxError::InvalidInput)?))
            }
        }
        "stats" => SessionCommand::Stats,
        "export" => {
            if arg.is_empty() {
                SessionCommand::Export(ExportTarget::Session)
            } else {
                SessionCommand::Export(arg.parse().map_err(BarkodxError::InvalidInput)?)
            }
        }
        "quit" | "q" | "exit" => SessionCommand::Quit,
        other => return Err(BarkodxError::UnknownCommand(other.to_string())),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(line: &str) -> DecodedLine {
        match parse_line(line).unwrap() {
            InputLine::Decoded(d) => d,
            other => panic!("読取ではない: {:?}", other),
        }
    }

    #[test]
    fn test_parse_plain_payload() {
        let d = decoded("4901234567894\n");
        assert_eq!(d.payload, "4901234567894");
        assert_eq!(d.format, None);
        assert_eq!(d.at, None);
    }

    #[test]
    fn test_parse_payload_keeps_inner_spaces() {
        // QRコードは空白を含みうる
        assert_eq!(decoded("WIFI:S:my net;;").payload, "WIFI:S:my net;;");
    }

    #[test]
    fn test_parse_payload_with_format() {
        let d = decoded("ABC-123\tCODE_128");
        assert_eq!(d.payload, "ABC-123");
        assert_eq!(d.format.as_deref(), Some("CODE_128"));
    }

    #[test]
    fn test_parse_timed_line() {
        let d = decoded("@5000\t111\tEAN_13");
        assert_eq!(d.at, Some(5000));
        assert_eq!(d.payload, "111");
        assert_eq!(d.format.as_deref(), Some("EAN_13"));

        assert!(parse_line("@abc\t111").is_err());
        assert!(parse_line("@5000").is_err());
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_line("   ").unwrap(), InputLine::Empty);
        assert!(parse_line("\tEAN_13").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line(":add  8690001 ").unwrap(),
            InputLine::Command(SessionCommand::Add("8690001".into()))
        );
        assert_eq!(parse_line(":list").unwrap(), InputLine::Command(SessionCommand::List));
        assert_eq!(
            parse_line(":mode lookup").unwrap(),
            InputLine::Command(SessionCommand::Mode(CaptureMode::Lookup))
        );
        assert_eq!(
            parse_line(":search amazon").unwrap(),
            InputLine::Command(SessionCommand::Search(Some(SearchPlatform::Amazon)))
        );
        assert_eq!(
            parse_line(":export history").unwrap(),
            InputLine::Command(SessionCommand::Export(ExportTarget::History))
        );
        assert_eq!(
            parse_line(":export").unwrap(),
            InputLine::Command(SessionCommand::Export(ExportTarget::Session))
        );
        assert_eq!(parse_line(":q").unwrap(), InputLine::Command(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(matches!(parse_line(":remove"), Err(BarkodxError::InvalidInput(_))));
        assert!(matches!(parse_line(":mode camera"), Err(BarkodxError::InvalidInput(_))));
        assert!(matches!(parse_line(":frobnicate"), Err(BarkodxError::UnknownCommand(_))));
    }
}
