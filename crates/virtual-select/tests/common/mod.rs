//! Shared fixtures for the widget integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use tracing_subscriber::EnvFilter;
use virtual_select::prelude::*;
use virtual_select::render::RecordingSurface;

static TRACING: Once = Once::new();

/// Route widget logs to the test output. Filter with `RUST_LOG`, e.g.
/// `RUST_LOG=virtual_select=trace`.
pub fn setup() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A host that records everything the widget tells it.
pub struct TestHost {
    pub anchor: Rect,
    pub viewport_height: f32,
    pub style: StyleSnapshot,
    pub header: Option<HeaderView>,
    pub header_updates: usize,
    pub popup: Option<PopupLayout>,
    pub surface: RecordingSurface,
}

impl TestHost {
    /// A 200 x 24 anchor near the top of an 800 px viewport.
    pub fn new() -> Self {
        Self {
            anchor: Rect::new(0.0, 40.0, 200.0, 24.0),
            viewport_height: 800.0,
            style: StyleSnapshot::new(),
            header: None,
            header_updates: 0,
            popup: None,
            surface: RecordingSurface::default(),
        }
    }

    /// Move the anchor to `top` within the viewport.
    pub fn with_anchor_top(mut self, top: f32) -> Self {
        self.anchor = Rect::new(0.0, top, self.anchor.width(), self.anchor.height());
        self
    }

    pub fn with_style(mut self, style: StyleSnapshot) -> Self {
        self.style = style;
        self
    }

    pub fn header_text(&self) -> &str {
        self.header.as_ref().map_or("", |h| h.text.as_str())
    }
}

impl SelectHost for TestHost {
    fn anchor_rect(&self) -> Rect {
        self.anchor
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn style(&self) -> StyleSnapshot {
        self.style.clone()
    }

    fn update_header(&mut self, header: &HeaderView) {
        self.header = Some(header.clone());
        self.header_updates += 1;
    }

    fn set_popup(&mut self, layout: Option<&PopupLayout>) {
        self.popup = layout.copied();
    }

    fn surface(&mut self) -> &mut dyn DrawingSurface {
        &mut self.surface
    }
}

/// `count` items named `Item 0`, `Item 1`, ...
pub fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Item {i}")).collect()
}

/// A widget over `count` numbered items showing `visible` rows.
pub fn widget(count: usize, visible: usize) -> VirtualSelect<String, TestHost> {
    setup();
    VirtualSelect::new(TestHost::new())
        .with_items(numbered(count))
        .with_visible_items(visible)
}

/// Counts `change` notifications and remembers the last index.
#[derive(Clone, Default)]
pub struct ChangeLog {
    pub count: Arc<AtomicUsize>,
    pub last: Arc<AtomicI32>,
}

impl ChangeLog {
    pub fn attach(select: &VirtualSelect<String, TestHost>) -> Self {
        let log = Self {
            count: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(AtomicI32::new(-1)),
        };
        let sink = log.clone();
        select.change.connect(move |&index| {
            sink.count.fetch_add(1, Ordering::SeqCst);
            sink.last.store(index, Ordering::SeqCst);
        });
        log
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> i32 {
        self.last.load(Ordering::SeqCst)
    }
}
