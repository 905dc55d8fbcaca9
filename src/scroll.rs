//! Auto-follow for scrollable panes.
//!
//! A pane sticks to its bottom while the user is reading the newest output.
//! Scrolling away releases it; scrolling back near the bottom (or starting a
//! new run) pins it again. Units are whatever the caller measures content in;
//! the terminal UI uses wrapped text rows.

/// Distance from the bottom under which the view counts as "at bottom".
pub const DEFAULT_BOTTOM_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollFollower {
    threshold: u32,
    scroll_top: u32,
    scroll_height: u32,
    client_height: u32,
    follow: bool,
}

impl ScrollFollower {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            scroll_top: 0,
            scroll_height: 0,
            client_height: 0,
            follow: true,
        }
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn scroll_height(&self) -> u32 {
        self.scroll_height
    }

    pub fn client_height(&self) -> u32 {
        self.client_height
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    fn max_scroll_top(&self) -> u32 {
        self.scroll_height.saturating_sub(self.client_height)
    }

    /// `scrollHeight - scrollTop - clientHeight < threshold`
    pub fn is_at_bottom(&self) -> bool {
        let distance = self
            .scroll_height
            .saturating_sub(self.scroll_top)
            .saturating_sub(self.client_height);
        distance < self.threshold
    }

    /// The user moved the view. Recomputes the follow flag.
    pub fn on_user_scroll(&mut self, scroll_top: u32) {
        self.scroll_top = scroll_top.min(self.max_scroll_top());
        self.follow = self.is_at_bottom();
    }

    /// Relative user scroll (negative moves up).
    pub fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.scroll_top) + delta).clamp(0, i64::from(u32::MAX));
        self.on_user_scroll(target as u32);
    }

    /// Content grew or shrank. Snaps to the bottom only while following.
    pub fn on_content_change(&mut self, scroll_height: u32) {
        self.scroll_height = scroll_height;
        self.settle();
    }

    /// The visible area was resized.
    pub fn set_viewport(&mut self, client_height: u32) {
        self.client_height = client_height;
        self.settle();
    }

    /// A new run always starts pinned to the bottom.
    pub fn reset_for_new_run(&mut self) {
        self.follow = true;
        self.settle();
    }

    fn settle(&mut self) {
        if self.follow {
            self.scroll_top = self.max_scroll_top();
        } else {
            self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        }
    }
}

impl Default for ScrollFollower {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_THRESHOLD)
    }
}
