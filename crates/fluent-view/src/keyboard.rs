//! Keyboard-avoiding scroll container.
//!
//! [`KeyboardScroll`] tracks a scroll view's geometry and the text inputs it
//! contains. Keyboard show/hide events come in, scroll adjustments come out;
//! the host applies them with whatever animation the event asked for.
//!
//! All input frames and caret rects are in scroll content coordinates.

use fluent_geom::{EdgeInsets, Point, Rect, Size};
use tracing::{debug, trace};

/// Padding added below the lowest child when sizing content automatically.
pub const CONTENT_PADDING: f32 = 20.0;
/// Minimum gap kept above the active input when scrolling to it.
pub const MIN_SCROLL_OFFSET_PADDING: f32 = 20.0;
/// Used when a keyboard event reports no duration.
pub const DEFAULT_ANIMATION_DURATION: f32 = 0.25;
/// Used when a keyboard event reports no curve.
pub const DEFAULT_ANIMATION_CURVE: u32 = 7;

pub type InputId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    TextField { enabled: bool },
    TextView { editable: bool },
    /// A container or any non-text view.
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnKey {
    #[default]
    Default,
    Next,
    Done,
    Go,
    Search,
    Send,
}

/// A view inside the scroll content.
#[derive(Clone, Debug, PartialEq)]
pub struct InputNode {
    pub id: InputId,
    pub frame: Rect,
    pub kind: InputKind,
    pub hidden: bool,
    pub interactive: bool,
    pub focused: bool,
    /// Caret rect while editing, if the input reports one.
    pub caret: Option<Rect>,
    pub return_key: ReturnKey,
    pub children: Vec<InputNode>,
}

impl InputNode {
    pub fn new(id: InputId, frame: Rect, kind: InputKind) -> Self {
        Self {
            id,
            frame,
            kind,
            hidden: false,
            interactive: true,
            focused: false,
            caret: None,
            return_key: ReturnKey::Default,
            children: Vec::new(),
        }
    }

    pub fn text_field(id: InputId, frame: Rect) -> Self {
        Self::new(id, frame, InputKind::TextField { enabled: true })
    }

    pub fn text_view(id: InputId, frame: Rect) -> Self {
        Self::new(id, frame, InputKind::TextView { editable: true })
    }

    pub fn container(id: InputId, frame: Rect, children: Vec<InputNode>) -> Self {
        Self {
            children,
            ..Self::new(id, frame, InputKind::Other)
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn caret(mut self, caret: Rect) -> Self {
        self.caret = Some(caret);
        self
    }

    fn is_text_input(&self) -> bool {
        !matches!(self.kind, InputKind::Other)
    }

    fn accepts_focus(&self) -> bool {
        match self.kind {
            InputKind::TextField { enabled } => enabled,
            InputKind::TextView { editable } => editable,
            InputKind::Other => false,
        }
    }
}

/// A keyboard frame change, already converted to the scroll view's
/// coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardEvent {
    pub frame: Rect,
    /// Seconds. Zero means the platform default.
    pub duration: f32,
    /// Platform animation curve. Zero means the platform default.
    pub curve: u32,
}

impl KeyboardEvent {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }
}

/// New scroll view state for the host to animate to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAdjustment {
    pub content_inset: EdgeInsets,
    pub scroll_indicator_insets: EdgeInsets,
    pub content_offset: Point,
    pub content_size: Size,
    pub paging_enabled: bool,
    pub duration: f32,
    pub curve: u32,
}

/// Result of pressing return in a text field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReturnAction {
    /// Focus moved on to the next input.
    FocusMoved {
        id: InputId,
        adjustment: Option<ScrollAdjustment>,
    },
    /// No next input; the field gave up focus.
    Resigned(Option<InputId>),
}

#[derive(Clone, Copy, Debug, Default)]
struct KeyboardState {
    prior_inset: EdgeInsets,
    prior_indicator_insets: EdgeInsets,
    prior_content_size: Size,
    prior_paging_enabled: bool,
    keyboard_visible: bool,
    keyboard_rect: Rect,
    ignoring_notifications: bool,
    animation_in_progress: bool,
}

/// Scroll view that keeps the focused input above the keyboard.
#[derive(Clone, Debug)]
pub struct KeyboardScroll {
    frame: Rect,
    content_offset: Point,
    content_size: Size,
    content_inset: EdgeInsets,
    scroll_indicator_insets: EdgeInsets,
    paging_enabled: bool,
    auto_size_content: bool,
    inputs: Vec<InputNode>,
    state: KeyboardState,
}

impl KeyboardScroll {
    /// A scroll view that sizes its content from its children when the
    /// content size is zero.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            content_offset: Point::ZERO,
            content_size: Size::ZERO,
            content_inset: EdgeInsets::ZERO,
            scroll_indicator_insets: EdgeInsets::ZERO,
            paging_enabled: false,
            auto_size_content: true,
            inputs: Vec::new(),
            state: KeyboardState::default(),
        }
    }

    /// Keep the content size as given, even when it is zero.
    pub fn with_fixed_content(mut self) -> Self {
        self.auto_size_content = false;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<InputNode>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_content_inset(mut self, inset: EdgeInsets) -> Self {
        self.content_inset = inset;
        self.scroll_indicator_insets = inset;
        self
    }

    pub fn with_paging(mut self, enabled: bool) -> Self {
        self.paging_enabled = enabled;
        self
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Visible region in content coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.content_offset.x,
            self.content_offset.y,
            self.frame.w,
            self.frame.h,
        )
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn set_content_offset(&mut self, offset: Point) {
        self.content_offset = offset;
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn content_inset(&self) -> EdgeInsets {
        self.content_inset
    }

    pub fn scroll_indicator_insets(&self) -> EdgeInsets {
        self.scroll_indicator_insets
    }

    pub fn paging_enabled(&self) -> bool {
        self.paging_enabled
    }

    pub fn keyboard_visible(&self) -> bool {
        self.state.keyboard_visible
    }

    pub fn animation_in_progress(&self) -> bool {
        self.state.animation_in_progress
    }

    pub fn inputs(&self) -> &[InputNode] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut Vec<InputNode> {
        &mut self.inputs
    }

    pub fn input(&self, id: InputId) -> Option<&InputNode> {
        find_node(&self.inputs, id)
    }

    pub fn focused_input(&self) -> Option<&InputNode> {
        find_focused(&self.inputs)
    }

    /// Give focus to `id`, taking it from every other input.
    pub fn focus(&mut self, id: InputId) -> bool {
        if find_node(&self.inputs, id).is_none() {
            return false;
        }
        for_each_node_mut(&mut self.inputs, &mut |node| node.focused = node.id == id);
        true
    }

    pub fn keyboard_will_show(&mut self, event: &KeyboardEvent) -> Option<ScrollAdjustment> {
        let keyboard = event.frame;
        if keyboard.is_empty() || !keyboard.intersects(&self.bounds()) {
            return None;
        }
        let focused = self.focused_input()?;
        let (focused_id, focused_y) = (focused.id, focused.frame.y);

        if self.state.ignoring_notifications && focused_y + CONTENT_PADDING < keyboard.y {
            trace!(focused_id, "keyboard change ignored while focus moves");
            return None;
        }

        self.state.keyboard_rect = keyboard;
        if !self.state.keyboard_visible {
            self.state.prior_inset = self.content_inset;
            self.state.prior_indicator_insets = self.scroll_indicator_insets;
            self.state.prior_paging_enabled = self.paging_enabled;
            self.state.prior_content_size = self.content_size;
        }
        self.state.keyboard_visible = true;
        self.paging_enabled = false;

        if self.auto_size_content {
            if self.content_size == Size::ZERO {
                self.content_size = self.calculated_content_size();
            }
        }

        let duration = if event.duration == 0.0 {
            DEFAULT_ANIMATION_DURATION
        } else {
            event.duration
        };
        let curve = if event.curve == 0 {
            DEFAULT_ANIMATION_CURVE
        } else {
            event.curve
        };
        self.state.animation_in_progress = true;

        self.content_inset = self.inset_for_keyboard();
        self.scroll_indicator_insets = self.content_inset;
        let viewable = self.viewable_height();
        if let Some(y) = self.ideal_offset_for(focused_id, viewable) {
            self.content_offset.y = y;
        }

        debug!(
            focused_id,
            inset_bottom = self.content_inset.bottom,
            offset_y = self.content_offset.y,
            "keyboard shown"
        );
        Some(self.adjustment(duration, curve))
    }

    pub fn keyboard_will_hide(&mut self, event: &KeyboardEvent) -> Option<ScrollAdjustment> {
        if event.frame.is_empty() && !self.state.animation_in_progress {
            return None;
        }
        if self.state.ignoring_notifications || !self.state.keyboard_visible {
            return None;
        }

        self.state.keyboard_rect = Rect::ZERO;
        self.state.keyboard_visible = false;

        if self.auto_size_content {
            self.content_size = self.state.prior_content_size;
        }
        self.content_inset = self.state.prior_inset;
        self.scroll_indicator_insets = self.state.prior_indicator_insets;
        self.paging_enabled = self.state.prior_paging_enabled;

        debug!("keyboard hidden");
        Some(self.adjustment(event.duration, event.curve))
    }

    /// The host finished animating a show adjustment.
    pub fn animation_finished(&mut self) {
        self.state.animation_in_progress = false;
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        if self.state.keyboard_visible {
            self.content_inset = self.inset_for_keyboard();
        }
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        if self.state.keyboard_visible {
            self.state.prior_content_size = size;
            self.content_inset = self.inset_for_keyboard();
        }
    }

    /// Move focus to the next input below (or to the right on the same row
    /// as) the focused one, preferring the top-most, then left-most.
    pub fn focus_next(&mut self) -> Option<InputId> {
        let prior = self.focused_input()?;
        let (prior_id, prior_frame) = (prior.id, prior.frame);

        let mut best: Option<(InputId, f32)> = None;
        find_next_input(&self.inputs, prior_id, prior_frame, false, &mut best);
        let (next, _) = best?;

        self.state.ignoring_notifications = true;
        self.focus(next);
        debug!(from = prior_id, to = next, "focus moved");
        Some(next)
    }

    /// Return key in a text field: advance focus, or give it up at the end.
    pub fn text_field_should_return(&mut self) -> ReturnAction {
        match self.focus_next() {
            Some(id) => ReturnAction::FocusMoved {
                id,
                adjustment: self.scroll_to_active_input(),
            },
            None => ReturnAction::Resigned(self.resign_focus()),
        }
    }

    /// Scroll so the focused input sits in the middle of the visible area.
    ///
    /// Only while the keyboard is up.
    pub fn scroll_to_active_input(&mut self) -> Option<ScrollAdjustment> {
        let adjustment = self.scroll_to_focused();
        self.state.ignoring_notifications = false;
        adjustment
    }

    /// A touch ended on the scroll view; drop focus.
    pub fn touches_ended(&mut self) -> Option<InputId> {
        self.resign_focus()
    }

    /// Text fields with the default return key get a "next" key.
    pub fn prepare_inputs(&mut self) {
        for_each_node_mut(&mut self.inputs, &mut |node| {
            if matches!(node.kind, InputKind::TextField { .. })
                && node.return_key == ReturnKey::Default
            {
                node.return_key = ReturnKey::Next;
            }
        });
    }

    /// Union of the top-level children's frames plus bottom padding.
    pub fn calculated_content_size(&self) -> Size {
        let rect = self
            .inputs
            .iter()
            .fold(Rect::ZERO, |acc, node| acc.union(&node.frame));
        Size::new(rect.w, rect.h + CONTENT_PADDING)
    }

    /// Vertical offset that centers input `id` (or its caret) in a visible
    /// area `view_height` tall, clamped to the scrollable range.
    pub fn ideal_offset_for(&self, id: InputId, view_height: f32) -> Option<f32> {
        let node = self.input(id)?;
        let target = node.caret.unwrap_or(node.frame);

        let padding = ((view_height - target.h) / 2.0).max(MIN_SCROLL_OFFSET_PADDING);
        let top = self.content_inset.top;
        let offset = (target.y - padding - top)
            .min(self.content_size.h - view_height - top)
            .max(-top);
        Some(offset)
    }

    /// Current insets with the bottom grown to clear the keyboard.
    pub fn inset_for_keyboard(&self) -> EdgeInsets {
        let keyboard = self.state.keyboard_rect;
        let overhang = (keyboard.max_y() - self.bounds().max_y()).max(0.0);
        EdgeInsets {
            bottom: keyboard.h - overhang,
            ..self.content_inset
        }
    }

    fn scroll_to_focused(&mut self) -> Option<ScrollAdjustment> {
        if !self.state.keyboard_visible {
            return None;
        }
        let id = self.focused_input()?.id;
        self.state.ignoring_notifications = true;
        let y = self.ideal_offset_for(id, self.viewable_height())?;
        self.content_offset.y = y;
        Some(self.adjustment(DEFAULT_ANIMATION_DURATION, DEFAULT_ANIMATION_CURVE))
    }

    fn resign_focus(&mut self) -> Option<InputId> {
        let id = self.focused_input()?.id;
        for_each_node_mut(&mut self.inputs, &mut |node| node.focused = false);
        Some(id)
    }

    fn viewable_height(&self) -> f32 {
        self.frame.h - self.content_inset.top - self.content_inset.bottom
    }

    fn adjustment(&self, duration: f32, curve: u32) -> ScrollAdjustment {
        ScrollAdjustment {
            content_inset: self.content_inset,
            scroll_indicator_insets: self.scroll_indicator_insets,
            content_offset: self.content_offset,
            content_size: self.content_size,
            paging_enabled: self.paging_enabled,
            duration,
            curve,
        }
    }
}

fn find_node(nodes: &[InputNode], id: InputId) -> Option<&InputNode> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_node(&node.children, id)
        }
    })
}

fn find_focused(nodes: &[InputNode]) -> Option<&InputNode> {
    nodes.iter().find_map(|node| {
        if node.focused {
            Some(node)
        } else {
            find_focused(&node.children)
        }
    })
}

fn for_each_node_mut(nodes: &mut [InputNode], f: &mut impl FnMut(&mut InputNode)) {
    for node in nodes {
        f(node);
        for_each_node_mut(&mut node.children, f);
    }
}

/// Top-most first, then left-most.
fn next_input_heuristic(frame: Rect) -> f32 {
    -frame.y * 1000.0 - frame.x
}

fn find_next_input(
    nodes: &[InputNode],
    prior_id: InputId,
    prior: Rect,
    ancestor_blocked: bool,
    best: &mut Option<(InputId, f32)>,
) {
    for node in nodes {
        let blocked = ancestor_blocked || node.hidden || !node.interactive;
        if !blocked && node.accepts_focus() {
            let frame = node.frame;
            let same_row = (frame.min_y() - prior.min_y()).abs() < f32::EPSILON;
            let after = (same_row && frame.min_x() > prior.min_x()) || frame.min_y() > prior.min_y();
            let heuristic = next_input_heuristic(frame);
            if node.id != prior_id
                && after
                && best.is_none_or(|(_, current)| heuristic > current)
            {
                *best = Some((node.id, heuristic));
            }
        } else if !node.is_text_input() {
            find_next_input(&node.children, prior_id, prior, blocked, best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> KeyboardScroll {
        KeyboardScroll::new(Rect::new(0.0, 0.0, 320.0, 480.0)).with_inputs(vec![
            InputNode::text_field(1, Rect::new(20.0, 40.0, 280.0, 30.0)),
            InputNode::text_field(2, Rect::new(20.0, 100.0, 130.0, 30.0)),
            InputNode::text_field(3, Rect::new(170.0, 100.0, 130.0, 30.0)),
            InputNode::container(
                10,
                Rect::new(0.0, 300.0, 320.0, 400.0),
                vec![
                    InputNode::text_view(4, Rect::new(20.0, 600.0, 280.0, 60.0)),
                    InputNode::text_field(5, Rect::new(20.0, 360.0, 280.0, 30.0)).hidden(true),
                ],
            ),
        ])
    }

    fn keyboard() -> KeyboardEvent {
        KeyboardEvent::new(Rect::new(0.0, 264.0, 320.0, 216.0))
    }

    #[test]
    fn show_without_focus_is_ignored() {
        let mut scroll = form();
        assert_eq!(scroll.keyboard_will_show(&keyboard()), None);
        assert!(!scroll.keyboard_visible());
    }

    #[test]
    fn show_ignores_empty_or_offscreen_keyboards() {
        let mut scroll = form();
        scroll.focus(1);
        assert_eq!(scroll.keyboard_will_show(&KeyboardEvent::default()), None);
        let offscreen = KeyboardEvent::new(Rect::new(0.0, 480.0, 320.0, 216.0));
        assert_eq!(scroll.keyboard_will_show(&offscreen), None);
    }

    #[test]
    fn show_then_hide_restores_priors() {
        let mut scroll = form().with_paging(true);
        scroll.focus(4);
        let shown = scroll.keyboard_will_show(&keyboard()).unwrap();
        assert_eq!(shown.content_inset.bottom, 216.0);
        assert_eq!(shown.scroll_indicator_insets, shown.content_inset);
        assert!(!shown.paging_enabled);
        assert_eq!(shown.duration, DEFAULT_ANIMATION_DURATION);
        assert_eq!(shown.curve, DEFAULT_ANIMATION_CURVE);
        // union of child frames: 0..700 tall, plus padding
        assert_eq!(shown.content_size, Size::new(320.0, 720.0));
        assert!(scroll.animation_in_progress());

        // visible 264: padding (264 - 60) / 2 = 102, 600 - 102 = 498,
        // clamped to 720 - 264 = 456
        assert_eq!(shown.content_offset.y, 456.0);

        scroll.animation_finished();
        let hidden = scroll
            .keyboard_will_hide(&KeyboardEvent::new(Rect::new(0.0, 480.0, 320.0, 216.0)))
            .unwrap();
        assert_eq!(hidden.content_inset, EdgeInsets::ZERO);
        assert_eq!(hidden.content_size, Size::ZERO);
        assert!(hidden.paging_enabled);
        assert!(!scroll.keyboard_visible());
    }

    #[test]
    fn repeated_show_keeps_first_content_size() {
        let mut scroll = form();
        scroll.focus(1);
        let first = scroll.keyboard_will_show(&keyboard()).unwrap();
        assert_eq!(first.content_size, Size::new(320.0, 720.0));
        scroll.focus(4);
        let second = scroll.keyboard_will_show(&keyboard()).unwrap();
        assert_eq!(second.content_size, first.content_size);

        scroll.animation_finished();
        let hidden = scroll
            .keyboard_will_hide(&KeyboardEvent::new(Rect::new(0.0, 480.0, 320.0, 216.0)))
            .unwrap();
        assert_eq!(hidden.content_size, Size::ZERO);
        assert_eq!(hidden.content_inset, EdgeInsets::ZERO);
    }

    #[test]
    fn hide_without_show_is_ignored() {
        let mut scroll = form();
        assert_eq!(scroll.keyboard_will_hide(&keyboard()), None);
    }

    #[test]
    fn keyboard_partly_below_view_insets_only_overlap() {
        let mut scroll = form();
        scroll.focus(1);
        let event = KeyboardEvent::new(Rect::new(0.0, 400.0, 320.0, 216.0));
        let shown = scroll.keyboard_will_show(&event).unwrap();
        assert_eq!(shown.content_inset.bottom, 80.0);
    }

    #[test]
    fn focus_next_walks_rows_then_columns() {
        let mut scroll = form();
        scroll.focus(1);
        assert_eq!(scroll.focus_next(), Some(2));
        assert_eq!(scroll.focus_next(), Some(3));
        // 5 is hidden, 4 sits inside the container
        assert_eq!(scroll.focus_next(), Some(4));
        assert_eq!(scroll.focus_next(), None);
        assert_eq!(scroll.focused_input().map(|n| n.id), Some(4));
    }

    #[test]
    fn return_on_last_field_resigns() {
        let mut scroll = form();
        scroll.focus(3);
        assert!(matches!(
            scroll.text_field_should_return(),
            ReturnAction::FocusMoved { id: 4, adjustment: None }
        ));
        assert_eq!(scroll.text_field_should_return(), ReturnAction::Resigned(Some(4)));
        assert!(scroll.focused_input().is_none());
    }

    #[test]
    fn ignored_while_focus_moves_unless_covered() {
        let mut scroll = form();
        scroll.focus(1);
        scroll.keyboard_will_show(&keyboard()).unwrap();
        scroll.focus_next();
        // input 2 at y=100 is well above the keyboard top
        assert_eq!(scroll.keyboard_will_show(&keyboard()), None);
        let adjusted = scroll.scroll_to_active_input().unwrap();
        assert_eq!(adjusted.content_inset.bottom, 216.0);
        assert!(scroll.keyboard_will_show(&keyboard()).is_some());
    }

    #[test]
    fn caret_takes_priority_over_frame() {
        let mut scroll = form();
        scroll.set_content_size(Size::new(320.0, 2000.0));
        scroll.inputs_mut()[0].caret = Some(Rect::new(30.0, 500.0, 2.0, 20.0));
        // padding (200 - 20) / 2 = 90
        assert_eq!(scroll.ideal_offset_for(1, 200.0), Some(410.0));
        // padding (200 - 30) / 2 = 85
        assert_eq!(scroll.ideal_offset_for(2, 200.0), Some(15.0));
        // would scroll above the content top
        assert_eq!(scroll.ideal_offset_for(2, 400.0), Some(0.0));
        assert_eq!(scroll.ideal_offset_for(99, 200.0), None);
    }

    #[test]
    fn prepare_inputs_sets_next_key_on_text_fields() {
        let mut scroll = form();
        scroll.inputs_mut()[1].return_key = ReturnKey::Done;
        scroll.prepare_inputs();
        assert_eq!(scroll.input(1).map(|n| n.return_key), Some(ReturnKey::Next));
        assert_eq!(scroll.input(2).map(|n| n.return_key), Some(ReturnKey::Done));
        assert_eq!(scroll.input(4).map(|n| n.return_key), Some(ReturnKey::Default));
    }

    #[test]
    fn content_size_changes_reapply_insets() {
        let mut scroll = form();
        scroll.focus(1);
        scroll.keyboard_will_show(&keyboard()).unwrap();
        scroll.set_frame(Rect::new(0.0, 0.0, 320.0, 400.0));
        // keyboard now hangs 80 below the view
        assert_eq!(scroll.content_inset().bottom, 136.0);
        scroll.set_content_size(Size::new(320.0, 900.0));
        assert_eq!(scroll.content_size(), Size::new(320.0, 900.0));
        assert_eq!(scroll.touches_ended(), Some(1));
    }
}
