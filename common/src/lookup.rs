//! 商品検索（ルックアップモード）
//!
//! ルックアップモードでは読取を一覧に追加せず、検索対象として扱う。

use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// 検索先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPlatform {
    Google,
    Amazon,
    Trendyol,
    Hepsiburada,
}

impl SearchPlatform {
    pub const ALL: [SearchPlatform; 4] = [
        SearchPlatform::Google,
        SearchPlatform::Amazon,
        SearchPlatform::Trendyol,
        SearchPlatform::Hepsiburada,
    ];

    fn base_url(&self) -> &'static str {
        match self {
            SearchPlatform::Google => "https://www.google.com/search?q=",
            SearchPlatform::Amazon => "https://www.amazon.com.tr/s?k=",
            SearchPlatform::Trendyol => "https://www.trendyol.com/sr?q=",
            SearchPlatform::Hepsiburada => "https://www.hepsiburada.com/ara?q=",
        }
    }

    /// バーコードの検索URL
    pub fn search_url(&self, barcode: &str) -> String {
        let query: String = form_urlencoded::byte_serialize(barcode.as_bytes()).collect();
        format!("{}{}", self.base_url(), query)
    }
}

impl FromStr for SearchPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" | "g" => Ok(SearchPlatform::Google),
            "amazon" | "a" => Ok(SearchPlatform::Amazon),
            "trendyol" | "t" => Ok(SearchPlatform::Trendyol),
            "hepsiburada" | "h" => Ok(SearchPlatform::Hepsiburada),
            _ => Err(format!(
                "Unknown platform: {}. Use google, amazon, trendyol, or hepsiburada",
                s
            )),
        }
    }
}

impl fmt::Display for SearchPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchPlatform::Google => "google",
            SearchPlatform::Amazon => "amazon",
            SearchPlatform::Trendyol => "trendyol",
            SearchPlatform::Hepsiburada => "hepsiburada",
        };
        f.pad(name)
    }
}
