use barkodx_common::SearchPlatform;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barkodx")]
#[command(about = "バーコード棚卸しスキャナ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定・履歴の保存先（デフォルト: ~/.config/barkodx）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 読取を1行ずつ取り込む（標準入力またはファイル）
    Scan {
        /// 入力ファイル（省略時は標準入力）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 連続スキャン（受理後に一覧を表示しない）
        #[arg(long, conflicts_with = "no_batch")]
        batch: bool,

        /// 受理ごとに一覧を表示
        #[arg(long)]
        no_batch: bool,

        /// 終了時にセッション一覧をExcel出力
        #[arg(long)]
        export_on_exit: bool,

        /// Excel出力先（ファイルまたはディレクトリ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// バーコードを手入力で履歴に追加
    Manual {
        /// バーコード
        #[arg(required = true)]
        code: String,
    },

    /// 履歴を表示/出力
    History {
        /// Excelに出力
        #[arg(long)]
        excel: bool,

        /// 出力先（ファイルまたはディレクトリ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 履歴を削除
    ClearHistory {
        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 商品検索URLを表示
    Lookup {
        /// バーコード
        #[arg(required = true)]
        code: String,

        /// 検索先 (google/amazon/trendyol/hepsiburada)
        #[arg(short, long)]
        platform: Option<SearchPlatform>,
    },

    /// 履歴の統計を表示
    Stats,

    /// 設定を表示/編集
    Config {
        /// 設定を変更（例: history=false）
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
