/// Snapshot of a content view's scroll position, supplied by the host.
///
/// The engine only ever asks one question of it: can the content still
/// scroll toward its start? While it can, pull-down gestures belong to the
/// content; once it cannot, they belong to the refresh layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollMetrics {
    /// A positioned list (item index plus pixel offset of the first visible
    /// item).
    List {
        item_count: usize,
        first_visible_item: usize,
        /// Top edge of the first visible item, in the list's coordinates.
        first_item_offset: f32,
        /// The list's own start padding.
        start_padding: f32,
    },
    /// Any other scrollable; the host answers directly.
    Custom { can_scroll_up: bool },
}

impl ScrollMetrics {
    /// Content resting at its very start.
    pub const AT_START: ScrollMetrics = ScrollMetrics::Custom {
        can_scroll_up: false,
    };

    /// Whether the content can still scroll toward its start.
    pub fn can_scroll_up(&self) -> bool {
        match *self {
            ScrollMetrics::List {
                item_count,
                first_visible_item,
                first_item_offset,
                start_padding,
            } => item_count > 0 && (first_visible_item > 0 || first_item_offset < start_padding),
            ScrollMetrics::Custom { can_scroll_up } => can_scroll_up,
        }
    }
}
