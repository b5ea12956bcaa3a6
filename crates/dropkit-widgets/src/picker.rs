//! Searchable, groupable, single- or multi-select option picker.
//!
//! The picker is a controlled component: it never changes its own value.
//! Choosing or clearing emits [`Message::Changed`] with the proposed value,
//! and the owner decides whether to accept it by calling
//! [`Picker::set_value`].  Interaction state (open, searching, query) is
//! local and lives in a [`Controller`].

use crate::config::PickerConfig;
use crate::controller::{Controller, Event, InteractionState, Transition};
use crate::error::PickError;
use crate::filter::{filter, is_no_results};
use crate::highlight::Highlight;
use crate::index::{GroupedOptions, OptionIndex};
use crate::key::PickerKeyMap;
use crate::option::SelectOption;
use crate::selection::{self, is_selected, Mode, Next, SelectionValue};
use crate::summary::summarize;
use crate::text::{display_width, fit};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use dropkit_core::command::Command;
use dropkit_core::component::Component;
use dropkit_core::event::{hit_any, pointer_down, InputEvent};
use dropkit_core::input::global_input;
use dropkit_core::listener::Listener;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Messages for the picker.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press routed to the picker while it has focus.
    KeyPress(KeyEvent),
    /// A mouse event routed to the picker.
    Pointer(MouseEvent),
    /// A pointer press seen by the global listener.
    GlobalPointerDown(Position),
    /// Escape seen by the global listener.
    GlobalEscape,
    /// Open the overlay.
    Open,
    /// Close the overlay.
    Close,
    /// Open when closed, close when open.
    Toggle,
    /// Choose the option with this value.
    Select(String),
    /// Clear the value (clearable pickers only).
    Clear,
    /// Emitted: the proposed new value.
    Changed(SelectionValue),
    /// Emitted: the overlay closed.
    Dismissed,
}

/// Visual style of a [`Picker`].
#[derive(Debug, Clone)]
pub struct PickerStyle {
    /// Trigger text when a value is selected.
    pub value: Style,
    /// Trigger text when nothing is selected.
    pub placeholder: Style,
    /// Chevron and clear glyph.
    pub glyph: Style,
    /// Field label.
    pub label: Style,
    /// Error line.
    pub error: Style,
    /// Overlay border.
    pub border: Style,
    /// Search line text.
    pub search: Style,
    /// Group header rows.
    pub group_header: Style,
    /// Plain option rows.
    pub option: Style,
    /// Option under the keyboard highlight.
    pub highlighted: Style,
    /// Options part of the current value.
    pub selected: Style,
    /// Disabled options and a disabled trigger.
    pub disabled: Style,
    /// Option descriptions.
    pub description: Style,
    /// Empty-state row.
    pub empty: Style,
}

impl Default for PickerStyle {
    fn default() -> Self {
        let dim = Style::default().fg(Color::DarkGray);
        Self {
            value: Style::default(),
            placeholder: dim,
            glyph: dim,
            label: Style::default().add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            border: dim,
            search: Style::default(),
            group_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            option: Style::default(),
            highlighted: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Green),
            disabled: dim.add_modifier(Modifier::CROSSED_OUT),
            description: dim,
            empty: dim.add_modifier(Modifier::ITALIC),
        }
    }
}

#[derive(Debug, Clone)]
enum Row {
    Header(String),
    Item(SelectOption),
    Empty,
}

impl Row {
    fn is_selectable(&self) -> bool {
        matches!(self, Row::Item(option) if !option.disabled)
    }
}

fn build_rows(filtered: &GroupedOptions, query: &str) -> Vec<Row> {
    if is_no_results(filtered, query) {
        return vec![Row::Empty];
    }
    let mut rows = Vec::new();
    for (key, options) in filtered.groups() {
        if let Some(header) = key.header() {
            rows.push(Row::Header(header.to_string()));
        }
        rows.extend(options.iter().cloned().map(Row::Item));
    }
    rows
}

/// Screen regions drawn by the last `view`, used for pointer hit tests.
#[derive(Debug, Clone, Copy, Default)]
struct HitAreas {
    /// Label, trigger and error rows, or the whole block when there is one.
    field: Rect,
    trigger: Rect,
    clear: Rect,
    overlay: Rect,
    list: Rect,
    /// First row drawn in `list`.
    list_offset: usize,
    /// Option rows the overlay has room for, capped at `max_visible`.
    list_capacity: usize,
}

/// A dropdown picker over a list of [`SelectOption`]s.
///
/// # Example
///
/// ```rust,ignore
/// use dropkit_widgets::picker::{Picker, Message};
/// use dropkit_widgets::{PickerConfig, SelectOption};
///
/// let mut picker = Picker::new(
///     vec![
///         SelectOption::new("kyiv", "Kyiv").with_group("North"),
///         SelectOption::new("odesa", "Odesa").with_group("South"),
///     ],
///     PickerConfig::single().with_search(true).with_clear(true),
/// );
/// picker.focus();
///
/// // In the owner's update:
/// match msg {
///     Message::Changed(next) => picker.set_value(next)?,
///     other => return picker.update(other).map(AppMsg::Region),
/// }
/// ```
pub struct Picker {
    instance: u64,
    options: OptionIndex,
    grouped: GroupedOptions,
    value: SelectionValue,
    config: PickerConfig,
    controller: Controller,
    highlight: Highlight,
    rows: Vec<Row>,
    focus: bool,
    keys: PickerKeyMap,
    style: PickerStyle,
    block: Option<Block<'static>>,
    hits: Cell<HitAreas>,
}

impl Picker {
    /// Create a closed picker with nothing selected.
    pub fn new(options: Vec<SelectOption>, config: PickerConfig) -> Self {
        let options = OptionIndex::new(options);
        let mut controller = Controller::new(config.searchable);
        controller.set_disabled(config.disabled);
        let mut picker = Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            grouped: options.grouped(),
            options,
            value: SelectionValue::empty(config.mode),
            highlight: Highlight::new(config.max_visible),
            controller,
            config,
            rows: Vec::new(),
            focus: false,
            keys: PickerKeyMap::default(),
            style: PickerStyle::default(),
            block: None,
            hits: Cell::new(HitAreas::default()),
        };
        picker.refresh_rows(true);
        picker
    }

    /// Start from `value`.  A value of the wrong mode is ignored.
    pub fn with_value(mut self, value: SelectionValue) -> Self {
        if let Err(err) = self.set_value(value) {
            tracing::debug!(%err, "ignoring initial picker value");
        }
        self
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: PickerStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the key bindings.
    pub fn with_keys(mut self, keys: PickerKeyMap) -> Self {
        self.keys = keys;
        self
    }

    /// Wrap the trigger (label, trigger line, error) in a block.
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Accept a value from the owner.
    ///
    /// This is the only way the value changes.  Values are not checked
    /// against the option list; a value whose option has gone away still
    /// shows as its raw text.
    pub fn set_value(&mut self, value: SelectionValue) -> Result<(), PickError> {
        if value.mode() != self.config.mode {
            return Err(PickError::ModeMismatch {
                expected: self.config.mode,
                got: value.mode(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// Replace the option list.  The value is left alone.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = OptionIndex::new(options);
        self.grouped = self.options.grouped();
        self.refresh_rows(true);
    }

    /// Enable or disable the picker.  Disabling closes an open overlay.
    pub fn set_disabled(&mut self, disabled: bool) -> Command<Message> {
        self.config.disabled = disabled;
        let transition = self.controller.set_disabled(disabled);
        self.after(transition)
    }

    /// Set or remove the error line.
    pub fn set_error(&mut self, error: Option<String>) {
        self.config.error = error;
    }

    /// Give the picker keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Drop keyboard focus, closing the overlay without a notification.
    pub fn blur(&mut self) {
        self.focus = false;
        if self.controller.handle(Event::CloseRequested).changed() {
            self.refresh_rows(true);
        }
    }

    /// The current (owner-supplied) value.
    pub fn value(&self) -> &SelectionValue {
        &self.value
    }

    /// The option list.
    pub fn options(&self) -> &[SelectOption] {
        self.options.options()
    }

    /// Behaviour and text settings.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Key bindings, e.g. for a help line.
    pub fn keys(&self) -> &PickerKeyMap {
        &self.keys
    }

    /// Interaction state.
    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Current search query; "" while closed.
    pub fn query(&self) -> &str {
        self.controller.query()
    }

    /// The options as currently listed, after the query.
    pub fn filtered(&self) -> GroupedOptions {
        filter(&self.grouped, self.controller.query())
    }

    /// Whether the overlay shows the empty-state row.
    pub fn is_no_results(&self) -> bool {
        matches!(self.rows.as_slice(), [Row::Empty])
    }

    /// Value of the option under the keyboard highlight.
    pub fn highlighted_value(&self) -> Option<&str> {
        match self.highlight.cursor().and_then(|i| self.rows.get(i)) {
            Some(Row::Item(option)) => Some(&option.value),
            _ => None,
        }
    }

    /// Trigger text for the current value.
    pub fn summary(&self) -> String {
        summarize(
            &self.value,
            &self.options,
            &self.config.placeholder,
            &self.config.count_suffix,
        )
    }

    /// Check whether choosing `value` is allowed and compute the result,
    /// without changing anything.
    pub fn propose(&self, value: &str) -> Result<Next, PickError> {
        if self.controller.disabled() {
            return Err(PickError::PickerDisabled);
        }
        let option = self
            .options
            .get(value)
            .ok_or_else(|| PickError::Unknown(value.to_string()))?;
        if option.disabled {
            return Err(PickError::Disabled(value.to_string()));
        }
        Ok(selection::next(&self.value, self.config.mode, value))
    }

    fn choose(&mut self, value: &str) -> Command<Message> {
        let next = match self.propose(value) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(%err, "selection rejected");
                return Command::none();
            }
        };
        tracing::trace!(value = ?next.value, "proposing picker value");
        let changed = Command::message(Message::Changed(next.value));
        let transition = self.controller.handle(Event::Committed(self.config.mode));
        Command::batch([changed, self.after(transition)])
    }

    fn clear(&mut self) -> Command<Message> {
        if !self.config.clearable || self.controller.disabled() || self.value.is_empty() {
            return Command::none();
        }
        tracing::trace!("proposing cleared picker value");
        Command::message(Message::Changed(selection::clear(self.config.mode)))
    }

    fn fire(&mut self, event: Event) -> Command<Message> {
        let transition = self.controller.handle(event);
        self.after(transition)
    }

    /// Bring the rows in line with a transition and report a close.
    fn after(&mut self, transition: Transition) -> Command<Message> {
        if !transition.changed() {
            return Command::none();
        }
        self.refresh_rows(true);
        if transition.closed() {
            Command::message(Message::Dismissed)
        } else {
            Command::none()
        }
    }

    fn refresh_rows(&mut self, prefer_selected: bool) {
        let filtered = filter(&self.grouped, self.controller.query());
        let rows = build_rows(&filtered, self.controller.query());
        let prefer = if prefer_selected {
            rows.iter()
                .position(|row| matches!(row, Row::Item(o) if is_selected(&o.value, &self.value)))
        } else {
            None
        };
        self.highlight
            .set_rows(rows.iter().map(Row::is_selectable).collect(), prefer);
        self.rows = rows;
    }

    fn commit_highlighted(&mut self) -> Command<Message> {
        match self.highlighted_value().map(str::to_string) {
            Some(value) => self.choose(&value),
            None => Command::none(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if key.kind == KeyEventKind::Release {
            return Command::none();
        }
        if self.keys.clear.matches(&key) {
            return self.clear();
        }

        if !self.controller.is_open() {
            if !self.keys.open.matches(&key) {
                return Command::none();
            }
            let event = if key.code == KeyCode::Enter {
                Event::EnterOnTrigger
            } else {
                Event::Activate
            };
            return self.fire(event);
        }

        let searching = self.controller.is_searching();
        if self.keys.close.matches(&key) {
            self.fire(Event::Escape)
        } else if self.keys.leave.matches(&key) {
            self.fire(Event::CloseRequested)
        } else if self.keys.up.matches(&key) {
            self.highlight.move_up();
            Command::none()
        } else if self.keys.down.matches(&key) {
            self.highlight.move_down();
            Command::none()
        } else if self.keys.first.matches(&key) {
            self.highlight.home();
            Command::none()
        } else if self.keys.last.matches(&key) {
            self.highlight.end();
            Command::none()
        } else if self.keys.select.matches(&key)
            && !(searching && matches!(key.code, KeyCode::Char(_)))
        {
            self.commit_highlighted()
        } else if searching && self.keys.erase.matches(&key) {
            if self.controller.pop_query() {
                self.refresh_rows(false);
            }
            Command::none()
        } else if let KeyCode::Char(c) = key.code {
            let plain = !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if plain && self.controller.push_query(c) {
                self.refresh_rows(false);
            }
            Command::none()
        } else {
            Command::none()
        }
    }

    fn handle_pointer(&mut self, mouse: MouseEvent) -> Command<Message> {
        let Some(pos) = pointer_down(&mouse) else {
            return Command::none();
        };
        let hits = self.hits.get();

        if hit_any(&[hits.clear], pos) {
            return self.clear();
        }
        if hit_any(&[hits.trigger], pos) {
            return self.update(Message::Toggle);
        }
        if !self.controller.is_open() {
            return Command::none();
        }
        if hit_any(&[hits.list], pos) {
            let row = hits.list_offset + usize::from(pos.y - hits.list.y);
            if self.highlight.select(row) {
                return self.commit_highlighted();
            }
            return Command::none();
        }
        if hit_any(&[hits.overlay, hits.field], pos) {
            return Command::none();
        }
        self.fire(Event::OutsidePointerDown)
    }

    fn is_inside(&self, pos: Position) -> bool {
        let hits = self.hits.get();
        hit_any(&[hits.field, hits.trigger, hits.overlay], pos)
    }

    /// Shrink the highlight window to the rows the last overlay could show.
    fn sync_window(&mut self) {
        let capacity = self.hits.get().list_capacity;
        if capacity > 0 && capacity != self.highlight.visible() {
            self.highlight.set_visible(capacity);
        }
    }

    fn field_area(&self, area: Rect, inner: Rect, bottom: u16) -> Rect {
        if self.block.is_some() {
            area
        } else {
            Rect {
                height: bottom.saturating_sub(inner.y),
                ..inner
            }
        }
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect, hits: &mut HitAreas) {
        let disabled = self.controller.disabled();
        let show_clear = self.config.clearable && !disabled && !self.value.is_empty();
        let glyph_width: u16 = if show_clear { 4 } else { 2 };
        let text_width = area.width.saturating_sub(glyph_width);

        let icon = match &self.value {
            SelectionValue::Single(v) => self
                .options
                .get(v)
                .and_then(|option| option.icon.as_deref())
                .map(|icon| format!("{icon} "))
                .unwrap_or_default(),
            SelectionValue::Multi(_) => String::new(),
        };
        let style = if disabled {
            self.style.disabled
        } else if self.value.is_empty() {
            self.style.placeholder
        } else {
            self.style.value
        };
        let text = fit(&format!("{icon}{}", self.summary()), text_width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)),
            Rect {
                width: text_width,
                ..area
            },
        );

        let chevron = if self.controller.is_open() { "▾" } else { "▸" };
        let glyphs = if show_clear {
            format!(" ✕ {chevron}")
        } else {
            format!(" {chevron}")
        };
        let glyph_area = Rect {
            x: area.x + text_width,
            width: area.width - text_width,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(glyphs, self.style.glyph)),
            glyph_area,
        );

        hits.trigger = area;
        if show_clear && glyph_area.width >= 2 {
            hits.clear = Rect::new(glyph_area.x + 1, area.y, 1, 1);
        }
    }

    fn render_overlay(&self, frame: &mut Frame, anchor: Rect, hits: &mut HitAreas) {
        let searchable = self.controller.searchable();
        let search_rows = u16::from(searchable);
        let list_rows =
            u16::try_from(self.rows.len().min(self.config.max_visible)).unwrap_or(u16::MAX);
        let wanted = list_rows.saturating_add(search_rows).saturating_add(2);

        let screen = frame.area();
        let top = anchor.bottom();
        let room = screen.bottom().saturating_sub(top);
        let height = wanted.min(room);
        if height < 3 || anchor.width < 6 {
            return;
        }

        let overlay = Rect::new(anchor.x, top, anchor.width, height);
        frame.render_widget(Clear, overlay);
        let block = Block::bordered().border_style(self.style.border);
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);
        hits.overlay = overlay;

        let mut list = inner;
        if searchable && inner.height > 0 {
            let search = Rect { height: 1, ..inner };
            self.render_search(frame, search);
            list.y += 1;
            list.height -= 1;
        }
        hits.list = list;
        hits.list_capacity =
            usize::from(room.saturating_sub(2 + search_rows)).min(self.config.max_visible);

        let offset = self.highlight.window_offset(list.height as usize);
        hits.list_offset = offset;
        let cursor = self.highlight.cursor();
        for (i, row) in self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(list.height as usize)
        {
            let area = Rect {
                y: list.y + (i - offset) as u16,
                height: 1,
                ..list
            };
            let line = self.row_line(row, cursor == Some(i), area.width as usize);
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let query = self.controller.query();
        let width = area.width.saturating_sub(2) as usize;
        let line = if query.is_empty() {
            Line::from(vec![
                Span::styled("⌕ ", self.style.glyph),
                Span::styled(fit(&self.config.search_placeholder, width), self.style.placeholder),
            ])
        } else {
            Line::from(vec![
                Span::styled("⌕ ", self.style.glyph),
                Span::styled(fit(query, width), self.style.search),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);

        if self.focus && self.controller.is_searching() {
            let x = area.x + 2 + display_width(query).min(width) as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
    }

    fn row_line(&self, row: &Row, highlighted: bool, width: usize) -> Line<'static> {
        match row {
            Row::Header(name) => Line::from(Span::styled(fit(name, width), self.style.group_header)),
            Row::Empty => Line::from(Span::styled(
                fit(&self.config.empty_text, width),
                self.style.empty,
            )),
            Row::Item(option) => {
                let selected = is_selected(&option.value, &self.value);
                let style = if option.disabled {
                    self.style.disabled
                } else if highlighted {
                    self.style.highlighted
                } else if selected {
                    self.style.selected
                } else {
                    self.style.option
                };
                let marker = if highlighted { "▸ " } else { "  " };
                let check = if selected { " ✓" } else { "" };
                let mut room = width.saturating_sub(2 + display_width(check));

                let label = match &option.icon {
                    Some(icon) => format!("{icon} {}", option.label),
                    None => option.label.clone(),
                };
                let label = fit(&label, room);
                room = room.saturating_sub(display_width(&label));

                let mut spans = vec![Span::styled(marker, style), Span::styled(label, style)];
                if let Some(description) = &option.description {
                    if room > 3 {
                        spans.push(Span::styled(
                            format!(" · {}", fit(description, room - 3)),
                            self.style.description,
                        ));
                    }
                }
                if selected {
                    spans.push(Span::styled(check, self.style.selected));
                }
                Line::from(spans)
            }
        }
    }
}

impl Component for Picker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        self.sync_window();
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Pointer(mouse) => self.handle_pointer(mouse),
            Message::GlobalPointerDown(pos) if !self.is_inside(pos) => {
                self.fire(Event::OutsidePointerDown)
            }
            Message::GlobalEscape => self.fire(Event::Escape),
            Message::Open => self.fire(Event::Activate),
            Message::Close => self.fire(Event::CloseRequested),
            Message::Toggle => {
                if self.controller.is_open() {
                    self.fire(Event::CloseRequested)
                } else {
                    self.fire(Event::Activate)
                }
            }
            Message::Select(value) => self.choose(&value),
            Message::Clear => self.clear(),
            Message::KeyPress(_)
            | Message::GlobalPointerDown(_)
            | Message::Changed(_)
            | Message::Dismissed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            frame.render_widget(block.clone(), area);
            inner
        } else {
            area
        };

        let mut hits = HitAreas::default();
        let mut y = inner.y;
        let line = |y: u16| Rect::new(inner.x, y, inner.width, 1);

        if let Some(label) = &self.config.label {
            if y < inner.bottom() {
                let text = fit(label, inner.width as usize);
                frame.render_widget(Paragraph::new(Span::styled(text, self.style.label)), line(y));
                y += 1;
            }
        }
        if y >= inner.bottom() || inner.width == 0 {
            hits.field = self.field_area(area, inner, y);
            self.hits.set(hits);
            return;
        }

        let trigger = line(y);
        self.render_trigger(frame, trigger, &mut hits);
        y += 1;

        if let Some(error) = &self.config.error {
            if y < inner.bottom() {
                let text = fit(error, inner.width as usize);
                frame.render_widget(Paragraph::new(Span::styled(text, self.style.error)), line(y));
                y += 1;
            }
        }
        hits.field = self.field_area(area, inner, y);

        if self.controller.is_open() {
            self.render_overlay(frame, trigger, &mut hits);
        }
        self.hits.set(hits);
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if !self.controller.is_open() {
            return vec![];
        }
        vec![global_input(self.instance, |event| match event {
            InputEvent::Key(key) if key.code == KeyCode::Esc && key.kind != KeyEventKind::Release => {
                Some(Message::GlobalEscape)
            }
            InputEvent::Mouse(mouse) => pointer_down(&mouse).map(Message::GlobalPointerDown),
            _ => None,
        })]
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyMap;
    use crossterm::event::{KeyEventState, MouseButton, MouseEventKind};
    use dropkit_core::testing::{buffer_to_string, TestHarness};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn sample() -> Vec<SelectOption> {
        vec![
            SelectOption::new("a", "Alpha"),
            SelectOption::new("b", "Beta").with_group("G"),
        ]
    }

    fn regions() -> Vec<SelectOption> {
        vec![
            SelectOption::new("kyiv", "Kyiv")
                .with_group("North")
                .with_description("Capital"),
            SelectOption::new("chernihiv", "Chernihiv")
                .with_group("North")
                .disabled(true),
            SelectOption::new("odesa", "Odesa")
                .with_group("South")
                .with_description("Black Sea coast"),
            SelectOption::new("kherson", "Kherson").with_group("South"),
        ]
    }

    fn harness(options: Vec<SelectOption>, config: PickerConfig) -> TestHarness<Picker> {
        let mut picker = Picker::new(options, config);
        picker.focus();
        TestHarness::new(picker)
    }

    /// Plays the owner: accepts every proposed value.
    fn accept_changes(h: &mut TestHarness<Picker>) -> Vec<SelectionValue> {
        let changes: Vec<SelectionValue> = h
            .take_outbox()
            .into_iter()
            .filter_map(|msg| match msg {
                Message::Changed(v) => Some(v),
                _ => None,
            })
            .collect();
        if let Some(last) = changes.last() {
            h.component_mut().set_value(last.clone()).unwrap();
        }
        changes
    }

    #[test]
    fn starts_closed_with_placeholder() {
        let h = harness(sample(), PickerConfig::single().with_placeholder("Choose"));
        assert_eq!(h.component().state(), InteractionState::Closed);
        assert_eq!(h.component().summary(), "Choose");
        assert!(h.active_listeners().is_empty());
        assert!(h.render_string(20, 1).starts_with("Choose"));
    }

    #[test]
    fn enter_opens_and_attaches_listener() {
        let mut h = harness(sample(), PickerConfig::single());
        h.send(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(h.component().state(), InteractionState::Open);
        assert_eq!(h.active_listeners().len(), 1);
    }

    #[test]
    fn searchable_opens_into_search() {
        let mut h = harness(sample(), PickerConfig::single().with_search(true));
        h.send(Message::KeyPress(key(KeyCode::Char(' '))));
        assert_eq!(h.component().state(), InteractionState::OpenSearching);
    }

    #[test]
    fn unfocused_picker_ignores_keys() {
        let mut h = TestHarness::new(Picker::new(sample(), PickerConfig::single()));
        h.send(Message::KeyPress(key(KeyCode::Enter)));
        assert!(!h.component().is_open());
    }

    #[test]
    fn single_commit_proposes_and_closes() {
        let mut h = harness(sample(), PickerConfig::single());
        h.send(Message::Open);
        h.send(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(h.component().highlighted_value(), Some("b"));
        h.send(Message::KeyPress(key(KeyCode::Enter)));

        assert_eq!(
            h.outbox(),
            &[
                Message::Changed(SelectionValue::single("b")),
                Message::Dismissed
            ]
        );
        assert_eq!(h.component().state(), InteractionState::Closed);
        assert!(h.active_listeners().is_empty());
        // Controlled: nothing changes until the owner accepts.
        assert_eq!(h.component().value(), &SelectionValue::single(""));

        accept_changes(&mut h);
        assert_eq!(h.component().summary(), "Beta");
    }

    #[test]
    fn multi_toggle_keeps_open() {
        let mut h = harness(sample(), PickerConfig::multi());
        h.component_mut()
            .set_value(SelectionValue::multi(["a"]))
            .unwrap();
        h.send(Message::Open);

        h.send(Message::Select("b".into()));
        assert_eq!(accept_changes(&mut h), vec![SelectionValue::multi(["a", "b"])]);
        assert!(h.component().is_open());

        h.send(Message::Select("a".into()));
        assert_eq!(accept_changes(&mut h), vec![SelectionValue::multi(["b"])]);
        assert!(h.component().is_open());
        assert_eq!(h.component().summary(), "1 selected");
    }

    #[test]
    fn disabled_option_is_never_proposed() {
        let mut h = harness(regions(), PickerConfig::single());
        h.send(Message::Open);
        h.send(Message::Select("chernihiv".into()));
        assert!(h.outbox().is_empty());
        assert!(h.component().is_open());
        assert_eq!(
            h.component().propose("chernihiv"),
            Err(PickError::Disabled("chernihiv".into()))
        );
        assert_eq!(
            h.component().propose("lviv"),
            Err(PickError::Unknown("lviv".into()))
        );
    }

    #[test]
    fn highlight_skips_disabled_and_headers() {
        let mut h = harness(regions(), PickerConfig::single());
        h.send(Message::Open);
        assert_eq!(h.component().highlighted_value(), Some("kyiv"));
        h.send(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(h.component().highlighted_value(), Some("odesa"));
        h.send(Message::KeyPress(key(KeyCode::Up)));
        assert_eq!(h.component().highlighted_value(), Some("kyiv"));
    }

    #[test]
    fn opening_highlights_current_value() {
        let mut h = harness(regions(), PickerConfig::single());
        h.component_mut()
            .set_value(SelectionValue::single("kherson"))
            .unwrap();
        h.send(Message::Open);
        assert_eq!(h.component().highlighted_value(), Some("kherson"));
    }

    #[test]
    fn typing_filters_and_escape_resets() {
        let mut h = harness(regions(), PickerConfig::single().with_search(true));
        h.send(Message::Open);
        for c in "COAST".chars() {
            h.send(Message::KeyPress(key(KeyCode::Char(c))));
        }
        assert_eq!(h.component().query(), "COAST");
        let values: Vec<String> = h
            .component()
            .filtered()
            .options()
            .map(|o| o.value.clone())
            .collect();
        assert_eq!(values, vec!["odesa"]);
        assert_eq!(h.component().highlighted_value(), Some("odesa"));

        h.send(Message::KeyPress(key(KeyCode::Esc)));
        assert_eq!(h.component().state(), InteractionState::Closed);
        assert_eq!(h.component().query(), "");
        assert_eq!(h.outbox(), &[Message::Dismissed]);

        h.send(Message::Open);
        assert_eq!(h.component().query(), "");
        assert_eq!(h.component().filtered().options().count(), 4);
    }

    #[test]
    fn space_types_into_search_instead_of_selecting() {
        let mut h = harness(regions(), PickerConfig::single().with_search(true));
        h.send(Message::Open);
        h.send(Message::KeyPress(key(KeyCode::Char('k'))));
        h.send(Message::KeyPress(key(KeyCode::Char(' '))));
        assert_eq!(h.component().query(), "k ");
        assert!(h.outbox().is_empty());
        h.send(Message::KeyPress(key(KeyCode::Backspace)));
        assert_eq!(h.component().query(), "k");
    }

    #[test]
    fn no_results_state() {
        let mut h = harness(sample(), PickerConfig::single().with_search(true));
        h.send(Message::Open);
        for c in "zzz".chars() {
            h.send(Message::KeyPress(key(KeyCode::Char(c))));
        }
        assert!(h.component().is_no_results());
        assert_eq!(h.component().highlighted_value(), None);

        h.send(Message::KeyPress(key(KeyCode::Enter)));
        assert!(h.outbox().is_empty());

        let screen = h.render_string(24, 6);
        assert!(screen.contains("No results"), "{screen}");
    }

    #[test]
    fn global_escape_and_outside_click_close() {
        for msg in [
            Message::GlobalEscape,
            Message::GlobalPointerDown(Position::new(30, 10)),
        ] {
            let mut h = harness(sample(), PickerConfig::single().with_search(true));
            h.send(Message::Open);
            h.send(Message::KeyPress(key(KeyCode::Char('a'))));
            let _ = h.render(40, 12);
            h.send(msg.clone());
            assert_eq!(h.component().state(), InteractionState::Closed, "{msg:?}");
            assert_eq!(h.component().query(), "", "{msg:?}");
            assert!(h.active_listeners().is_empty(), "{msg:?}");
        }
    }

    #[test]
    fn global_pointer_inside_is_ignored() {
        let mut h = harness(sample(), PickerConfig::single());
        h.send(Message::Open);
        let _ = h.render(30, 10);
        // Trigger row and an overlay row.
        h.send(Message::GlobalPointerDown(Position::new(2, 0)));
        h.send(Message::GlobalPointerDown(Position::new(2, 2)));
        assert!(h.component().is_open());
    }

    #[test]
    fn label_and_block_count_as_inside() {
        let mut h = harness(sample(), PickerConfig::single().with_label("Region"));
        h.send(Message::Open);
        let _ = h.render_in(30, 10, Rect::new(0, 0, 30, 2));
        h.send(Message::GlobalPointerDown(Position::new(1, 0)));
        h.send(Message::Pointer(click(1, 0)));
        assert!(h.component().is_open());

        let picker = Picker::new(sample(), PickerConfig::single()).with_block(Block::bordered());
        let mut h = TestHarness::new(picker);
        h.send(Message::Open);
        let _ = h.render_in(30, 10, Rect::new(0, 0, 30, 3));
        h.send(Message::GlobalPointerDown(Position::new(0, 0)));
        assert!(h.component().is_open());
        h.send(Message::GlobalPointerDown(Position::new(29, 9)));
        assert!(!h.component().is_open());
    }

    fn numbered(count: usize) -> Vec<SelectOption> {
        (0..count)
            .map(|i| SelectOption::new(format!("v{i}"), format!("Item{i}")))
            .collect()
    }

    #[test]
    fn clipped_overlay_keeps_highlight_on_screen() {
        let mut h = harness(numbered(8), PickerConfig::single());
        h.send(Message::Open);
        for _ in 0..5 {
            h.send(Message::KeyPress(key(KeyCode::Down)));
        }
        // Room for three option rows below the trigger.
        let screen = h.render_string(20, 6);
        assert!(screen.contains("▸ Item5"), "{screen}");
        assert!(!screen.contains("Item0"), "{screen}");

        h.send(Message::KeyPress(key(KeyCode::Down)));
        let screen = h.render_string(20, 6);
        assert!(screen.contains("▸ Item6"), "{screen}");
        assert!(screen.contains("Item4"), "{screen}");

        // First drawn row is Item4.
        h.send(Message::Pointer(click(4, 2)));
        assert_eq!(accept_changes(&mut h), vec![SelectionValue::single("v4")]);
    }

    #[test]
    fn enter_commits_the_row_on_screen() {
        let mut h = harness(numbered(8), PickerConfig::single());
        h.send(Message::Open);
        let _ = h.render(20, 6);
        h.send(Message::KeyPress(key(KeyCode::End)));
        let screen = h.render_string(20, 6);
        assert!(screen.contains("▸ Item7"), "{screen}");
        h.send(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(accept_changes(&mut h), vec![SelectionValue::single("v7")]);
    }

    #[test]
    fn unbounded_max_visible_renders() {
        let config = PickerConfig {
            max_visible: usize::MAX,
            ..PickerConfig::single()
        };
        let mut h = harness(numbered(usize::from(u16::MAX)), config);
        h.send(Message::Open);
        let screen = h.render_string(20, 8);
        // Seven rows below the trigger: two borders and five options.
        assert!(screen.contains("▸ Item0"), "{screen}");
        assert!(screen.contains("Item4"), "{screen}");
        assert!(!screen.contains("Item5"), "{screen}");
    }

    #[test]
    fn blur_closes_silently() {
        let mut h = harness(sample(), PickerConfig::single().with_search(true));
        h.send(Message::Open);
        h.send(Message::KeyPress(key(KeyCode::Char('b'))));
        h.component_mut().blur();
        assert!(!h.component().is_open());
        assert!(!h.component().focused());
        assert_eq!(h.component().query(), "");
        assert!(h.outbox().is_empty());
        assert!(h.active_listeners().is_empty());
    }

    #[test]
    fn clicking_trigger_toggles() {
        let mut h = harness(sample(), PickerConfig::single());
        let _ = h.render(30, 10);
        h.send(Message::Pointer(click(1, 0)));
        assert!(h.component().is_open());
        let _ = h.render(30, 10);
        h.send(Message::Pointer(click(1, 0)));
        assert!(!h.component().is_open());
        assert_eq!(h.outbox(), &[Message::Dismissed]);
    }

    #[test]
    fn clicking_an_option_selects_it() {
        let mut h = harness(sample(), PickerConfig::single());
        h.send(Message::Open);
        let _ = h.render(30, 10);
        // Overlay: border at row 1, "Alpha" row 2, header "G" row 3, "Beta" row 4.
        h.send(Message::Pointer(click(4, 3)));
        assert!(h.outbox().is_empty());
        h.send(Message::Pointer(click(4, 4)));
        assert_eq!(accept_changes(&mut h), vec![SelectionValue::single("b")]);
        assert!(!h.component().is_open());
    }

    #[test]
    fn clear_glyph_clears_without_opening() {
        let mut h = harness(sample(), PickerConfig::single().with_clear(true));
        h.component_mut()
            .set_value(SelectionValue::single("a"))
            .unwrap();
        let buf = h.render(20, 6);
        let screen = buffer_to_string(&buf);
        assert!(screen.starts_with("Alpha"), "{screen}");
        assert!(screen.lines().next().unwrap().contains('✕'), "{screen}");

        // Trigger is 20 wide: text 16, then " ✕ ▸" with the glyph at column 17.
        h.send(Message::Pointer(click(17, 0)));
        assert!(!h.component().is_open());
        assert_eq!(accept_changes(&mut h), vec![SelectionValue::single("")]);
        assert_eq!(h.component().summary(), "Select...");
    }

    #[test]
    fn delete_key_clears_multi() {
        let mut h = harness(sample(), PickerConfig::multi().with_clear(true));
        h.component_mut()
            .set_value(SelectionValue::multi(["a", "b"]))
            .unwrap();
        h.send(Message::KeyPress(key(KeyCode::Delete)));
        assert_eq!(accept_changes(&mut h), vec![selection::clear(Mode::Multi)]);
        // Nothing left to clear.
        h.send(Message::KeyPress(key(KeyCode::Delete)));
        assert!(h.outbox().is_empty());
    }

    #[test]
    fn clear_requires_clearable() {
        let mut h = harness(sample(), PickerConfig::single());
        h.component_mut()
            .set_value(SelectionValue::single("a"))
            .unwrap();
        h.send(Message::Clear);
        assert!(h.outbox().is_empty());
    }

    #[test]
    fn disabled_picker_refuses_everything() {
        let mut h = harness(sample(), PickerConfig::single().with_disabled(true));
        h.send(Message::Open);
        h.send(Message::KeyPress(key(KeyCode::Enter)));
        assert!(!h.component().is_open());
        h.send(Message::Select("a".into()));
        assert!(h.outbox().is_empty());
        assert_eq!(h.component().propose("a"), Err(PickError::PickerDisabled));
    }

    #[test]
    fn disabling_while_open_dismisses() {
        let mut h = harness(sample(), PickerConfig::single());
        h.send(Message::Open);
        let cmd = h.component_mut().set_disabled(true);
        assert_eq!(cmd.into_messages(), vec![Message::Dismissed]);
        assert!(!h.component().is_open());
    }

    #[test]
    fn set_value_rejects_wrong_mode() {
        let mut picker = Picker::new(sample(), PickerConfig::single());
        let err = picker.set_value(SelectionValue::multi(["a"])).unwrap_err();
        assert_eq!(
            err,
            PickError::ModeMismatch {
                expected: Mode::Single,
                got: Mode::Multi
            }
        );
        assert_eq!(picker.value(), &SelectionValue::single(""));
    }

    #[test]
    fn removed_option_still_summarizes_by_value() {
        let mut picker =
            Picker::new(sample(), PickerConfig::single()).with_value(SelectionValue::single("a"));
        picker.set_options(vec![SelectOption::new("b", "Beta")]);
        assert_eq!(picker.summary(), "a");
    }

    #[test]
    fn tab_leaves_and_closes() {
        let mut h = harness(sample(), PickerConfig::single());
        h.send(Message::Open);
        h.send(Message::KeyPress(key(KeyCode::Tab)));
        assert!(!h.component().is_open());
        assert_eq!(h.outbox(), &[Message::Dismissed]);
    }

    #[test]
    fn pickers_listen_independently() {
        let mut a = harness(sample(), PickerConfig::single());
        let mut b = harness(sample(), PickerConfig::single());
        a.send(Message::Open);
        b.send(Message::Open);
        assert_ne!(a.active_listeners(), b.active_listeners());
        a.send(Message::GlobalEscape);
        assert!(!a.component().is_open());
        assert!(b.component().is_open());
    }

    #[test]
    fn renders_groups_descriptions_and_checks() {
        let mut h = harness(
            regions(),
            PickerConfig::multi()
                .with_search(true)
                .with_label("Regions"),
        );
        h.component_mut()
            .set_value(SelectionValue::multi(["odesa"]))
            .unwrap();
        h.send(Message::Open);
        let buf = h.render_in(40, 12, Rect::new(0, 0, 40, 2));
        let screen = buffer_to_string(&buf);

        assert!(screen.contains("Regions"), "{screen}");
        assert!(screen.contains("1 selected"), "{screen}");
        assert!(screen.contains("Search..."), "{screen}");
        assert!(screen.contains("North"), "{screen}");
        assert!(screen.contains("Kyiv · Capital"), "{screen}");
        assert!(screen.contains("Odesa · Black Sea coast ✓"), "{screen}");
        assert!(screen.contains("Chernihiv"), "{screen}");
    }

    #[test]
    fn renders_error_line() {
        let h = harness(sample(), PickerConfig::single().with_error("Pick a region"));
        let buf = h.render_in(30, 3, Rect::new(0, 0, 30, 2));
        let screen = buffer_to_string(&buf);
        assert!(screen.lines().nth(1).unwrap().starts_with("Pick a region"));
    }

    #[test]
    fn help_comes_from_keymap() {
        let picker = Picker::new(sample(), PickerConfig::single());
        let help: Vec<String> = picker.keys().short_help().iter().map(|b| b.help()).collect();
        assert!(help.contains(&"esc close".to_string()));
    }
}
