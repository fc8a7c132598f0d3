//! スキャン入力ループ
//!
//! 入力を1行ずつ読み、コントローラで処理してフィードバックを端末に描画する。
//! 受理後の一覧表示は `ADVANCE_VIEW_DELAY_MS` 待ってから行う。

use crate::controller::{CaptureMode, Feedback, SessionController, Toast};
use crate::error::{BarkodxError, Result};
use crate::export::{self, ExportTarget};
use crate::input::{parse_line, InputLine, SessionCommand};
use barkodx_common::types::ADVANCE_VIEW_DELAY_MS;
use barkodx_common::{BlobStore, InventoryStats, ScanEvent, SearchPlatform};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// ループの実行オプション
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Excel出力先
    pub output_dir: PathBuf,
    /// 一覧表示前の待ち時間
    pub advance_delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            advance_delay: Duration::from_millis(ADVANCE_VIEW_DELAY_MS),
        }
    }
}

/// ループ終了時の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub errors: usize,
}

/// 入力が尽きるか `:quit` まで処理する
pub async fn run_scan_loop<R, S, W>(
    controller: &mut SessionController<S>,
    reader: R,
    out: &mut W,
    options: &RunOptions,
) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    S: BlobStore,
    W: Write,
{
    let mut summary = RunSummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        summary.lines += 1;

        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                summary.errors += 1;
                writeln!(out, "✖ {}", e)?;
                continue;
            }
        };

        let feedback = match parsed {
            InputLine::Empty => continue,
            InputLine::Decoded(decoded) => {
                let format = decoded.format.as_deref();
                match decoded.at {
                    Some(at) => controller.on_decoded_event_at(&decoded.payload, format, at),
                    None => controller.on_decoded_event(&decoded.payload, format),
                }
            }
            InputLine::Command(SessionCommand::Quit) => break,
            InputLine::Command(SessionCommand::Add(code)) => match controller.submit_manual(&code) {
                Ok(feedback) => feedback,
                Err(e) => {
                    summary.errors += 1;
                    writeln!(out, "✖ {}", e)?;
                    continue;
                }
            },
            InputLine::Command(command) => {
                if let Err(e) = run_command(controller, command, out, options) {
                    summary.errors += 1;
                    writeln!(out, "✖ {}", e)?;
                }
                continue;
            }
        };

        render_feedback(&feedback, out, &mut summary)?;

        if feedback.advance_view {
            tokio::time::sleep(options.advance_delay).await;
            print_events(out, "一覧", controller.session().iter_newest_first())?;
        }
    }

    Ok(summary)
}

fn render_feedback<W: Write>(feedback: &Feedback, out: &mut W, summary: &mut RunSummary) -> Result<()> {
    let Some(toast) = &feedback.toast else {
        return Ok(());
    };

    match toast {
        Toast::Accepted(_) => summary.accepted += 1,
        Toast::Duplicate(_) => summary.duplicates += 1,
        Toast::Lookup(_) => {}
    }

    let bell = if feedback.beep { "\x07" } else { "" };
    let haptic = if feedback.vibrate { " 〜" } else { "" };
    writeln!(out, "✔ {}{}{}", toast, haptic, bell)?;
    Ok(())
}

fn run_command<S: BlobStore, W: Write>(
    controller: &mut SessionController<S>,
    command: SessionCommand,
    out: &mut W,
    options: &RunOptions,
) -> Result<()> {
    match command {
        SessionCommand::List => {
            print_events(out, "一覧", controller.session().iter_newest_first())?;
        }
        SessionCommand::History => {
            print_events(out, "履歴", controller.history().as_slice().iter())?;
        }
        SessionCommand::Remove(id) => {
            if controller.remove(&id) {
                writeln!(out, "✔ 削除しました: {}", id)?;
            } else {
                writeln!(out, "IDが見つかりません: {}", id)?;
            }
        }
        SessionCommand::Clear => {
            controller.clear_session();
            writeln!(out, "✔ 一覧をクリアしました")?;
        }
        SessionCommand::ClearHistory => {
            controller.clear_history();
            writeln!(out, "✔ 履歴をクリアしました")?;
        }
        SessionCommand::Mode(mode) => {
            controller.set_mode(mode);
            let label = match mode {
                CaptureMode::Inventory => "棚卸し",
                CaptureMode::Lookup => "商品検索",
            };
            writeln!(out, "モード: {}", label)?;
        }
        SessionCommand::Search(platform) => {
            let code = controller
                .lookup_target()
                .ok_or_else(|| BarkodxError::InvalidInput("検索対象のバーコードがありません".into()))?;
            print_search_links(out, code, platform)?;
        }
        SessionCommand::Stats => {
            let stats = InventoryStats::from_events(controller.session().as_slice());
            print_stats(out, &stats)?;
        }
        SessionCommand::Export(target) => {
            let events = match target {
                ExportTarget::Session => controller.session().as_slice(),
                ExportTarget::History => controller.history().as_slice(),
            };
            let path = export::export_events(events, target, &options.output_dir, today())?;
            writeln!(out, "✔ Excel出力: {}", path.display())?;
        }
        SessionCommand::Add(_) | SessionCommand::Quit => {}
    }
    Ok(())
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// 読取一覧を表示（番号は古い順に1から）
pub fn print_events<'a, W, I>(out: &mut W, title: &str, events: I) -> Result<()>
where
    W: Write,
    I: ExactSizeIterator<Item = &'a ScanEvent>,
{
    let total = events.len();
    writeln!(out, "{} ({}件)", title, total)?;
    for (idx, event) in events.enumerate() {
        writeln!(
            out,
            "  {:>3}. {}  [{}]  {}",
            total - idx,
            event.payload,
            event.format,
            event.id
        )?;
    }
    Ok(())
}

pub fn print_search_links<W: Write>(
    out: &mut W,
    code: &str,
    platform: Option<SearchPlatform>,
) -> Result<()> {
    let platforms: Vec<SearchPlatform> = match platform {
        Some(p) => vec![p],
        None => SearchPlatform::ALL.to_vec(),
    };
    for p in platforms {
        writeln!(out, "  {:<12} {}", p, p.search_url(code))?;
    }
    Ok(())
}

pub fn print_stats<W: Write>(out: &mut W, stats: &InventoryStats) -> Result<()> {
    writeln!(out, "統計:")?;
    writeln!(out, "  読取数: {}", stats.total_items)?;
    writeln!(out, "  種類数: {}", stats.unique_items)?;
    writeln!(out, "  読取速度: {}", stats.scan_rate)?;
    Ok(())
}
