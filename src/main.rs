use barkodx_common::{normalize_manual_entry, FileStore, InventoryStats};
use barkodx_rust::{cli, config, controller, error, export, runner};
use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use controller::SessionController;
use error::{BarkodxError, Result};
use export::ExportTarget;
use runner::RunOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "barkodx_rust=debug,barkodx=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => Settings::config_dir()?,
    };
    let settings = Settings::load_from(&data_dir)?;
    let store = FileStore::new(&data_dir);

    match cli.command {
        Commands::Scan { input, batch, no_batch, export_on_exit, output } => {
            println!("📦 barkodx - スキャン\n");

            let mut settings = settings;
            if batch {
                settings.batch_scan = true;
            }
            if no_batch {
                settings.batch_scan = false;
            }

            let mut controller = SessionController::new(settings, store);
            let options = RunOptions {
                output_dir: output.unwrap_or_else(|| PathBuf::from(".")),
                ..Default::default()
            };
            let mut stdout = std::io::stdout();

            let summary = match input {
                Some(path) => {
                    if !path.exists() {
                        return Err(BarkodxError::FileNotFound(path.display().to_string()));
                    }
                    let file = tokio::fs::File::open(&path).await?;
                    runner::run_scan_loop(&mut controller, tokio::io::BufReader::new(file), &mut stdout, &options).await?
                }
                None => {
                    println!("バーコードを1行ずつ入力してください（:quit で終了）");
                    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                    runner::run_scan_loop(&mut controller, stdin, &mut stdout, &options).await?
                }
            };

            println!(
                "\n✔ {}件受理 / 重複{}件 / エラー{}件",
                summary.accepted, summary.duplicates, summary.errors
            );

            if export_on_exit {
                let path = export::export_events(
                    controller.session().as_slice(),
                    ExportTarget::Session,
                    &options.output_dir,
                    runner::today(),
                )?;
                println!("✔ Excel出力: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Manual { code } => {
            let mut controller = SessionController::new(settings, store);
            let feedback = controller.submit_manual(&code)?;
            match feedback.toast {
                Some(toast) => println!("✔ {}", toast),
                None => println!("直前の読取と同じため無視しました"),
            }
            if !controller.settings().history {
                println!("※ 履歴が無効のため保存されません");
            }
        }

        Commands::History { excel, output } => {
            let controller = SessionController::new(settings, store);
            let history = controller.history();

            if excel {
                let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
                let path = export::export_events(
                    history.as_slice(),
                    ExportTarget::History,
                    &output_dir,
                    runner::today(),
                )?;
                println!("✔ Excel出力: {}", path.display());
            } else {
                runner::print_events(&mut std::io::stdout(), "履歴", history.as_slice().iter())?;
            }
        }

        Commands::ClearHistory { yes } => {
            let confirmed = yes
                || dialoguer::Confirm::new()
                    .with_prompt("すべての履歴を削除しますか？この操作は元に戻せません")
                    .default(false)
                    .interact()
                    .map_err(|e| BarkodxError::InvalidInput(e.to_string()))?;

            if confirmed {
                let mut controller = SessionController::new(settings, store);
                controller.clear_history();
                println!("✔ 履歴を削除しました");
            } else {
                println!("キャンセルしました");
            }
        }

        Commands::Lookup { code, platform } => {
            let code = normalize_manual_entry(&code)
                .ok_or_else(|| BarkodxError::InvalidInput("バーコードが空です".into()))?;
            println!("🔍 {}", code);
            runner::print_search_links(&mut std::io::stdout(), &code, platform)?;
        }

        Commands::Stats => {
            let controller = SessionController::new(settings, store);
            let stats = InventoryStats::from_events(controller.history().as_slice());
            runner::print_stats(&mut std::io::stdout(), &stats)?;
        }

        Commands::Config { set, show } => {
            let mut settings = settings;

            if !set.is_empty() {
                for assignment in &set {
                    settings.apply(assignment)?;
                }
                settings.save_to(&data_dir)?;
                println!("✔ 設定を保存しました");
            }

            if show || set.is_empty() {
                println!("設定:");
                println!("  連続スキャン: {}", settings.batch_scan);
                println!("  振動: {}", settings.vibration);
                println!("  サウンド: {}", settings.sound);
                println!("  履歴: {}", settings.history);
                println!("  重複を許可: {}", settings.allow_duplicates);
                println!("  保存先: {}", data_dir.display());
            }
        }
    }

    Ok(())
}
