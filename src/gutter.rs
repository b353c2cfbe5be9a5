//! 行番号ガター
//!
//! テキスト面の横に表示する読み取り専用の行番号列。バッファの行数から
//! 毎回全体を作り直す（差分更新はしない）。

use std::ops::{Deref, DerefMut};

/// ガターの最小桁幅
pub const MIN_GUTTER_DIGITS: usize = 4;

/// 行番号ガター
///
/// 内容は `resync` の間だけ書き込み可能になり、戻る前に再び読み取り専用になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGutter {
    text: String,
    line_count: usize,
    writable: bool,
}

impl Default for LineGutter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineGutter {
    /// 1行分のガターを作成
    pub fn new() -> Self {
        let mut gutter = Self {
            text: String::new(),
            line_count: 0,
            writable: false,
        };
        gutter.resync(1);
        gutter
    }

    /// 行数 `line_count` に合わせて `1..=N` を書き直す
    ///
    /// 行数 0 は 1 として扱う（空バッファも1行を持つ）。
    pub fn resync(&mut self, line_count: usize) {
        let line_count = line_count.max(1);
        let mut writer = self.unlock();
        writer.clear();
        for number in 1..=line_count {
            if number > 1 {
                writer.push('\n');
            }
            writer.push_str(&number.to_string());
        }
        drop(writer);
        self.line_count = line_count;
        log::trace!("gutter resynced to {} lines", line_count);
    }

    /// 一時的に書き込み可能にする。ガードが落ちると読み取り専用に戻る。
    fn unlock(&mut self) -> GutterWriter<'_> {
        self.writable = true;
        GutterWriter { gutter: self }
    }

    /// ガターの全テキスト（`"1\n2\n…\nN"`）
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 行番号ラベル
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// 表示幅（桁数 + 右余白1）
    pub fn width(&self) -> u16 {
        let digits = self.line_count.to_string().len().max(MIN_GUTTER_DIGITS);
        (digits + 1) as u16
    }
}

/// 書き込み可能期間を表すガード
struct GutterWriter<'a> {
    gutter: &'a mut LineGutter,
}

impl Deref for GutterWriter<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.gutter.text
    }
}

impl DerefMut for GutterWriter<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.gutter.text
    }
}

impl Drop for GutterWriter<'_> {
    fn drop(&mut self) {
        self.gutter.writable = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_with_single_line() {
        let gutter = LineGutter::new();
        assert_eq!(gutter.text(), "1");
        assert_eq!(gutter.line_count(), 1);
        assert!(!gutter.is_writable());
    }

    #[test]
    fn resync_regenerates_wholesale() {
        let mut gutter = LineGutter::new();
        gutter.resync(3);
        assert_eq!(gutter.text(), "1\n2\n3");
        gutter.resync(2);
        assert_eq!(gutter.text(), "1\n2");
        assert!(!gutter.is_writable());
    }

    #[test]
    fn zero_lines_is_treated_as_one() {
        let mut gutter = LineGutter::new();
        gutter.resync(0);
        assert_eq!(gutter.text(), "1");
    }

    #[test]
    fn width_grows_with_digits() {
        let mut gutter = LineGutter::new();
        assert_eq!(gutter.width(), 5);
        gutter.resync(12_345);
        assert_eq!(gutter.width(), 6);
    }

    proptest! {
        #[test]
        fn labels_are_one_through_n(n in 1usize..2000) {
            let mut gutter = LineGutter::new();
            gutter.resync(n);
            let labels: Vec<&str> = gutter.labels().collect();
            prop_assert_eq!(labels.len(), n);
            for (idx, label) in labels.iter().enumerate() {
                prop_assert_eq!(*label, (idx + 1).to_string());
            }
        }
    }
}
