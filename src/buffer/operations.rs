//! 編集操作の最小単位とカーソル移動の種類

/// バッファへの原子的な変更
///
/// 位置は文字単位。Undo はこれを逆順に打ち消し、Redo は順に再適用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicEdit {
    Insert { position: usize, text: String },
    Delete { position: usize, text: String },
}

impl AtomicEdit {
    /// 逆操作
    pub fn inverse(&self) -> AtomicEdit {
        match self {
            AtomicEdit::Insert { position, text } => AtomicEdit::Delete {
                position: *position,
                text: text.clone(),
            },
            AtomicEdit::Delete { position, text } => AtomicEdit::Insert {
                position: *position,
                text: text.clone(),
            },
        }
    }

    pub fn position(&self) -> usize {
        match self {
            AtomicEdit::Insert { position, .. } | AtomicEdit::Delete { position, .. } => *position,
        }
    }
}

/// カーソル移動
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
    PageUp(usize),
    PageDown(usize),
}
