//! Keyboard highlight over the rows of an open picker.
//!
//! Rows include group headers and disabled options; the highlight only ever
//! rests on rows marked selectable, and wraps at both ends.  The scroll
//! offset is kept so the highlighted row stays inside the visible window.

/// Highlighted row and scroll offset over a list of rows.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    cursor: Option<usize>,
    offset: usize,
    selectable: Vec<bool>,
    visible: usize,
}

impl Highlight {
    /// A highlight over no rows showing at most `visible` rows at once.
    pub fn new(visible: usize) -> Self {
        Self {
            visible,
            ..Self::default()
        }
    }

    /// Highlighted row, `None` when no row is selectable.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rows shown at once.
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Replace the rows.  The highlight lands on the first selectable row at
    /// or after `prefer`, else the first selectable row.
    pub fn set_rows(&mut self, selectable: Vec<bool>, prefer: Option<usize>) {
        self.selectable = selectable;
        self.offset = 0;
        let start = prefer.unwrap_or(0);
        self.cursor = (start..self.selectable.len())
            .find(|&i| self.selectable[i])
            .or_else(|| self.first());
        self.ensure_visible();
    }

    /// Change the window height.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.ensure_visible();
    }

    /// First row of a `rows`-high window that still shows the highlight.
    ///
    /// Used when fewer rows fit on screen than [`visible`](Self::visible).
    pub fn window_offset(&self, rows: usize) -> usize {
        match self.cursor {
            Some(cursor) if rows > 0 && cursor < self.offset => cursor,
            Some(cursor) if rows > 0 && cursor >= self.offset.saturating_add(rows) => {
                cursor + 1 - rows
            }
            _ => self.offset,
        }
    }

    /// Move to the previous selectable row, wrapping to the last.
    pub fn move_up(&mut self) {
        let Some(cursor) = self.cursor else { return };
        let len = self.selectable.len();
        self.cursor = (1..=len)
            .map(|step| (cursor + len - step) % len)
            .find(|&i| self.selectable[i]);
        self.ensure_visible();
    }

    /// Move to the next selectable row, wrapping to the first.
    pub fn move_down(&mut self) {
        let Some(cursor) = self.cursor else { return };
        let len = self.selectable.len();
        self.cursor = (1..=len)
            .map(|step| (cursor + step) % len)
            .find(|&i| self.selectable[i]);
        self.ensure_visible();
    }

    /// Jump to the first selectable row.
    pub fn home(&mut self) {
        self.cursor = self.first();
        self.ensure_visible();
    }

    /// Jump to the last selectable row.
    pub fn end(&mut self) {
        self.cursor = self.selectable.iter().rposition(|&s| s);
        self.ensure_visible();
    }

    /// Highlight `row` if it is selectable.
    pub fn select(&mut self, row: usize) -> bool {
        if self.selectable.get(row).copied().unwrap_or(false) {
            self.cursor = Some(row);
            self.ensure_visible();
            true
        } else {
            false
        }
    }

    fn first(&self) -> Option<usize> {
        self.selectable.iter().position(|&s| s)
    }

    fn ensure_visible(&mut self) {
        let Some(cursor) = self.cursor else {
            self.offset = 0;
            return;
        };
        if self.visible == 0 {
            return;
        }
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset.saturating_add(self.visible) {
            self.offset = cursor + 1 - self.visible;
        }
        // A header directly above the first visible option stays in view.
        if self.visible > 1
            && self.offset > 0
            && self.offset == cursor
            && !self.selectable[cursor - 1]
        {
            self.offset -= 1;
        }
    }
}
