//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use crate::bundle::{
    Bundle,
    DisplayNameBundle,
    Entry,
};
use crate::locale::BundleId;

/// テスト用の `BundleId` を作成する
pub(crate) fn bundle_id(id: &str) -> BundleId {
    BundleId::parse(id).unwrap()
}

/// テスト用のテキスト Bundle を作成する
///
/// # Arguments
/// * `id` - Bundle ID（例: "CurrencyNames_lag"）
/// * `entries` - キーと値のペア（記述順を保持）
pub(crate) fn text_bundle(id: &str, entries: &[(&str, &str)]) -> DisplayNameBundle {
    let entries =
        entries.iter().map(|(key, value)| Entry::new(*key, (*value).to_string())).collect();
    Bundle::new(bundle_id(id), entries).unwrap()
}
