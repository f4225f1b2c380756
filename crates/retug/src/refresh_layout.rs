use crate::auto_scroll::AutoScroll;
use crate::constants::{
    DEFAULT_AUTO_REFRESH_DELAY_MILLIS, SCROLL_TO_REFRESH_SPEC, SCROLL_TO_TOP_SPEC,
    SHOW_COMPLETE_DELAY_MILLIS,
};
use crate::header::{RefreshContent, RefreshHeader};
use crate::spinner::{RefreshState, Spinner};
use retug_animation::AnimationSpec;
use retug_core::{RuntimeHandle, TimerRegistration};
use retug_foundation::gesture_constants::DRAG_RATE;
use retug_foundation::{PointerTracker, TouchEvent, TouchPhase};
use retug_ui_layout::{Constraints, EdgeInsets, Size};
use std::cell::RefCell;
use std::rc::Rc;

/// The pull-to-refresh controller.
///
/// A cloneable handle over shared state, like the other stateful handles in
/// this workspace: clones observe and drive the same gesture session. The
/// host wires it up with a header ([`set_header`](Self::set_header)), a
/// content view ([`add_child`](Self::add_child)) and a refresh listener,
/// then routes its touch events through
/// [`dispatch_touch_event`](Self::dispatch_touch_event) and calls
/// [`measure`](Self::measure)/[`layout`](Self::layout) from its layout pass.
///
/// All callbacks into host code (header hooks, the listener, view
/// placement, forwarded touch events) fire with no internal borrows held,
/// so hosts may re-enter the controller from any of them.
#[derive(Clone)]
pub struct RefreshLayout {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    runtime: RuntimeHandle,
    spinner: Spinner,
    tracker: PointerTracker,
    auto_scroll: AutoScroll,
    header: Option<Rc<dyn RefreshHeader>>,
    children: Vec<Rc<dyn RefreshContent>>,
    target: Option<Rc<dyn RefreshContent>>,
    refresh_listener: Option<Rc<dyn Fn()>>,
    enabled: bool,
    is_auto_refresh: bool,
    has_sent_cancel: bool,
    last_move_event: Option<TouchEvent>,
    settle_timer: Option<TimerRegistration>,
    auto_refresh_timer: Option<TimerRegistration>,
    padding: EdgeInsets,
    layout_size: Size,
    header_size: Size,
}

/// Host callbacks collected under a borrow and run after it is released.
#[derive(Default)]
struct Effects {
    cancel: Option<(Rc<dyn RefreshContent>, TouchEvent)>,
    hooks: Vec<(Rc<dyn RefreshHeader>, RefreshState)>,
    listener: Option<Rc<dyn Fn()>>,
    target_frame: Option<(Rc<dyn RefreshContent>, [f32; 4])>,
    header_frame: Option<(Rc<dyn RefreshHeader>, [f32; 4])>,
    position: Option<PositionUpdate>,
}

struct PositionUpdate {
    header: Rc<dyn RefreshHeader>,
    current_offset: f32,
    last_offset: f32,
    trigger_distance: f32,
    is_touch_active: bool,
    state: RefreshState,
}

impl Effects {
    fn run(self) {
        if let Some((target, cancel)) = self.cancel {
            target.dispatch_touch(&cancel);
        }
        for (header, state) in self.hooks {
            match state {
                RefreshState::Reset => header.on_reset(),
                RefreshState::Pull => header.on_pull(),
                RefreshState::Loading => header.on_refreshing(),
                RefreshState::Complete => header.on_complete(),
            }
        }
        if let Some(listener) = self.listener {
            listener();
        }
        if let Some((target, [left, top, right, bottom])) = self.target_frame {
            target.place(left, top, right, bottom);
        }
        if let Some((header, [left, top, right, bottom])) = self.header_frame {
            header.place(left, top, right, bottom);
        }
        if let Some(update) = self.position {
            update.header.on_position_change(
                update.current_offset,
                update.last_offset,
                update.trigger_distance,
                update.is_touch_active,
                update.state,
            );
        }
    }
}

impl RefreshLayout {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                runtime,
                spinner: Spinner::new(),
                tracker: PointerTracker::new(),
                auto_scroll: AutoScroll::new(),
                header: None,
                children: Vec::new(),
                target: None,
                refresh_listener: None,
                enabled: true,
                is_auto_refresh: false,
                has_sent_cancel: false,
                last_move_event: None,
                settle_timer: None,
                auto_refresh_timer: None,
                padding: EdgeInsets::default(),
                layout_size: Size::ZERO,
                header_size: Size::ZERO,
            })),
        }
    }

    /// Replaces the header indicator. A no-op when handed the instance
    /// already installed; otherwise the drag thresholds re-latch from the
    /// new header's height on the next measure pass.
    pub fn set_header(&self, header: Rc<dyn RefreshHeader>) {
        let mut inner = self.inner.borrow_mut();
        if let Some(existing) = &inner.header {
            if Rc::as_ptr(existing) as *const () == Rc::as_ptr(&header) as *const () {
                return;
            }
        }
        inner.header = Some(header);
        inner.spinner.mark_header_unmeasured();
    }

    /// Adds a content child. The first child added becomes the refresh
    /// target.
    pub fn add_child(&self, child: Rc<dyn RefreshContent>) {
        self.inner.borrow_mut().children.push(child);
    }

    /// Replaces the refresh-start callback, invoked exactly once per
    /// loading entry.
    pub fn set_refresh_listener(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().refresh_listener = Some(Rc::new(listener));
    }

    pub fn set_padding(&self, padding: EdgeInsets) {
        self.inner.borrow_mut().padding = padding;
    }

    /// Disables or re-enables gesture interception. While disabled every
    /// touch event passes straight through to the content view.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }

    /// Overrides the tension bound (defaults to three times the trigger
    /// distance).
    pub fn set_max_drag_distance(&self, max_drag_distance: f32) {
        self.inner
            .borrow_mut()
            .spinner
            .set_max_drag_distance(max_drag_distance);
    }

    pub fn state(&self) -> RefreshState {
        self.inner.borrow().spinner.state()
    }

    pub fn offset(&self) -> f32 {
        self.inner.borrow().spinner.offset()
    }

    pub fn trigger_distance(&self) -> f32 {
        self.inner.borrow().spinner.total_drag_distance()
    }

    /// Reports that the host's refresh work is done.
    ///
    /// Enters the complete state, then either snaps straight back to reset
    /// (already at rest), schedules the retract settle after the visible
    /// completion delay, or, when a finger is still down, defers the settle
    /// to the release path. Calling this again before the settle has run,
    /// or when no refresh is in flight, is a no-op.
    pub fn refresh_complete(&self) {
        let (effects, schedule_settle) = {
            let mut inner = self.inner.borrow_mut();
            match inner.spinner.state() {
                RefreshState::Reset | RefreshState::Complete => return,
                RefreshState::Pull | RefreshState::Loading => {}
            }
            let mut effects = Effects::default();
            Self::change_state(&mut inner, RefreshState::Complete, &mut effects);
            let mut schedule_settle = false;
            if inner.spinner.is_at_rest() {
                Self::change_state(&mut inner, RefreshState::Reset, &mut effects);
            } else if !inner.tracker.is_touch_active() {
                schedule_settle = true;
            }
            (effects, schedule_settle)
        };
        effects.run();
        if schedule_settle {
            let mut inner = self.inner.borrow_mut();
            let weak = Rc::downgrade(&self.inner);
            let registration = TimerRegistration::schedule(
                &inner.runtime,
                SHOW_COMPLETE_DELAY_MILLIS,
                move || {
                    if let Some(this) = weak.upgrade() {
                        Self::start_scroll(&this, 0.0, SCROLL_TO_TOP_SPEC);
                    }
                },
            );
            inner.settle_timer = Some(registration);
        }
    }

    /// Starts a refresh programmatically after the default delay. Valid
    /// only from the reset state; otherwise silently ignored.
    pub fn auto_refresh(&self) {
        self.auto_refresh_after(DEFAULT_AUTO_REFRESH_DELAY_MILLIS);
    }

    /// [`auto_refresh`](Self::auto_refresh) with an explicit delay, for
    /// hosts whose view tree needs a different amount of time to settle
    /// after creation.
    pub fn auto_refresh_after(&self, delay_millis: u64) {
        let mut inner = self.inner.borrow_mut();
        if inner.spinner.state() != RefreshState::Reset {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let registration = TimerRegistration::schedule(&inner.runtime, delay_millis, move || {
            if let Some(this) = weak.upgrade() {
                Self::begin_auto_refresh(&this);
            }
        });
        inner.auto_refresh_timer = Some(registration);
    }

    /// Routes one touch event through the gesture logic.
    ///
    /// Returns true when the refresh layer claimed the event. Down events
    /// are always claimed (after forwarding to the content view) so the
    /// engine keeps receiving the rest of the gesture; intercepted moves
    /// are consumed and not forwarded; everything else passes through.
    pub fn dispatch_touch_event(&self, event: &TouchEvent) -> bool {
        let (enabled, target) = {
            let mut inner = self.inner.borrow_mut();
            Self::ensure_target(&mut inner);
            (inner.enabled, inner.target.clone())
        };
        let Some(target) = target else {
            return false;
        };
        if !enabled {
            return target.dispatch_touch(event);
        }

        match event.phase {
            TouchPhase::Down => Self::on_touch_down(&self.inner, event, target),
            TouchPhase::Move => Self::on_touch_move(&self.inner, event, target),
            TouchPhase::Up | TouchPhase::Cancel => Self::on_touch_end(&self.inner, event, target),
            TouchPhase::PointerDown => {
                let mut inner = self.inner.borrow_mut();
                inner.tracker.on_pointer_down(event);
                inner.last_move_event = Some(event.clone());
                drop(inner);
                target.dispatch_touch(event)
            }
            TouchPhase::PointerUp => {
                self.inner.borrow_mut().tracker.on_pointer_up(event);
                target.dispatch_touch(event)
            }
        }
    }

    /// Measures the controller and its children.
    ///
    /// The content view fills the parent minus padding with tight
    /// constraints; the header measures to its natural size, and the drag
    /// thresholds latch from that height exactly once per
    /// [`set_header`](Self::set_header).
    pub fn measure(&self, constraints: Constraints) -> Size {
        let (size, target, content_constraints, header) = {
            let mut inner = self.inner.borrow_mut();
            Self::ensure_target(&mut inner);
            let (width, height) =
                constraints.constrain(constraints.max_width, constraints.max_height);
            let size = Size::new(width, height);
            inner.layout_size = size;
            let padding = inner.padding;
            let content_constraints = Constraints::tight(
                (size.width - padding.horizontal_sum()).max(0.0),
                (size.height - padding.vertical_sum()).max(0.0),
            );
            (
                size,
                inner.target.clone(),
                content_constraints,
                inner.header.clone(),
            )
        };
        let Some(target) = target else {
            return size;
        };
        target.measure(content_constraints);
        if let Some(header) = header {
            let header_size = header.measure(Constraints::loose(size.width, size.height));
            let mut inner = self.inner.borrow_mut();
            inner.header_size = header_size;
            inner.spinner.on_header_measured(header_size.height);
        }
        size
    }

    /// Places the content at the current offset and the header directly
    /// above it, horizontally centered.
    pub fn layout(&self) {
        let effects = {
            let inner = self.inner.borrow();
            let mut effects = Effects::default();
            Self::collect_placement(&inner, &mut effects);
            effects
        };
        effects.run();
    }

    fn ensure_target(inner: &mut Inner) {
        if inner.target.is_none() {
            inner.target = inner.children.first().cloned();
        }
    }

    fn change_state(inner: &mut Inner, state: RefreshState, effects: &mut Effects) {
        log::debug!("refresh state -> {state:?}");
        inner.spinner.set_state(state);
        if let Some(header) = inner.header.clone() {
            effects.hooks.push((header, state));
        }
    }

    fn on_touch_down(
        this: &Rc<RefCell<Inner>>,
        event: &TouchEvent,
        target: Rc<dyn RefreshContent>,
    ) -> bool {
        {
            let mut inner = this.borrow_mut();
            inner.tracker.on_down(event);
            inner.is_auto_refresh = false;
            inner.has_sent_cancel = false;
            inner.last_move_event = None;
            inner.spinner.rebaseline();
            inner.auto_scroll.stop();
            // A fresh gesture owns the session: pending deferred work from
            // the previous one must not fire into it.
            inner.settle_timer = None;
            inner.auto_refresh_timer = None;
        }
        target.dispatch_touch(event);
        // Claim the down so the rest of the gesture arrives here.
        true
    }

    fn on_touch_move(
        this: &Rc<RefCell<Inner>>,
        event: &TouchEvent,
        target: Rc<dyn RefreshContent>,
    ) -> bool {
        let can_scroll_up = target.scroll_metrics().can_scroll_up();
        let intercept_delta = {
            let mut inner = this.borrow_mut();
            match inner.tracker.on_move(event) {
                // Invalid pointer: passthrough for this event only.
                None => None,
                Some(sample) => {
                    inner.last_move_event = Some(event.clone());
                    let offset_delta = sample.delta.y * DRAG_RATE;
                    if inner.tracker.is_dragging() {
                        let move_down = offset_delta > 0.0;
                        let move_up = !move_down;
                        let displaced = inner.spinner.offset() > 0.0;
                        if (move_down && !can_scroll_up) || (move_up && displaced) {
                            Some(offset_delta)
                        } else {
                            None
                        }
                    } else {
                        None
                    }
                }
            }
        };
        match intercept_delta {
            Some(delta) => {
                Self::move_spinner(this, delta);
                event.consume();
                true
            }
            None => target.dispatch_touch(event),
        }
    }

    fn on_touch_end(
        this: &Rc<RefCell<Inner>>,
        event: &TouchEvent,
        target: Rc<dyn RefreshContent>,
    ) -> bool {
        let settle = {
            let mut inner = this.borrow_mut();
            inner.tracker.on_up_or_cancel();
            inner.spinner.offset() > 0.0
        };
        if settle {
            Self::finish_spinner(this);
        }
        target.dispatch_touch(event)
    }

    /// Routes one raw delta through the spinner and runs the resulting
    /// side effects: the one-shot synthesized cancel, header hooks, the
    /// refresh listener, view placement and the position callback.
    fn move_spinner(this: &Rc<RefCell<Inner>>, raw_delta: f32) {
        if raw_delta == 0.0 {
            return;
        }
        let effects = {
            let mut inner = this.borrow_mut();
            let mut effects = Effects::default();

            // The first time a touch session displaces the header, the
            // content view gets a synthesized cancel so its own gesture
            // recognition lets go of the stream. At most once per session.
            if !inner.has_sent_cancel
                && inner.tracker.is_touch_active()
                && inner.spinner.offset() > 0.0
            {
                if let (Some(target), Some(last_move)) =
                    (inner.target.clone(), inner.last_move_event.as_ref())
                {
                    effects.cancel = Some((target, last_move.to_cancel()));
                    inner.has_sent_cancel = true;
                }
            }

            let is_touch_active = inner.tracker.is_touch_active();
            let update = inner.spinner.apply(raw_delta, is_touch_active);

            if let Some(entered) = update.transition {
                log::debug!("refresh state -> {entered:?}");
                if entered == RefreshState::Loading {
                    // The loading snap ends any settle mid-flight; the
                    // natural-completion hook must not fire for it.
                    inner.auto_scroll.stop();
                    effects.listener = inner.refresh_listener.clone();
                }
                if let Some(header) = inner.header.clone() {
                    effects.hooks.push((header, entered));
                }
            }

            if update.applied_delta != 0.0 {
                Self::collect_placement(&inner, &mut effects);
            }

            if let Some(header) = inner.header.clone() {
                effects.position = Some(PositionUpdate {
                    header,
                    current_offset: inner.spinner.offset(),
                    last_offset: inner.spinner.last_offset(),
                    trigger_distance: inner.spinner.total_drag_distance(),
                    is_touch_active,
                    state: inner.spinner.state(),
                });
            }
            effects
        };
        effects.run();
    }

    fn collect_placement(inner: &Inner, effects: &mut Effects) {
        let size = inner.layout_size;
        if size == Size::ZERO {
            return;
        }
        let offset = inner.spinner.offset();
        let padding = inner.padding;
        if let Some(target) = inner.target.clone() {
            let left = padding.left;
            let top = padding.top + offset;
            let width = size.width - padding.horizontal_sum();
            let height = size.height - padding.vertical_sum();
            effects.target_frame = Some((target, [left, top, left + width, top + height]));
        } else {
            return;
        }
        if let Some(header) = inner.header.clone() {
            let header_width = inner.header_size.width;
            let left = size.width / 2.0 - header_width / 2.0;
            let top = offset - inner.spinner.header_height();
            effects.header_frame = Some((header, [left, top, left + header_width, offset]));
        }
    }

    fn finish_spinner(this: &Rc<RefCell<Inner>>) {
        let settle = {
            let inner = this.borrow();
            if inner.spinner.state() == RefreshState::Loading {
                if inner.spinner.offset() > inner.spinner.total_drag_distance() {
                    // Keep the header visible at its loading height.
                    Some((inner.spinner.total_drag_distance(), SCROLL_TO_REFRESH_SPEC))
                } else {
                    None
                }
            } else {
                Some((0.0, SCROLL_TO_TOP_SPEC))
            }
        };
        if let Some((to, spec)) = settle {
            Self::start_scroll(this, to, spec);
        }
    }

    fn begin_auto_refresh(this: &Rc<RefCell<Inner>>) {
        let (effects, trigger_distance) = {
            let mut inner = this.borrow_mut();
            inner.is_auto_refresh = true;
            let mut effects = Effects::default();
            Self::change_state(&mut inner, RefreshState::Pull, &mut effects);
            (effects, inner.spinner.total_drag_distance())
        };
        effects.run();
        Self::start_scroll(this, trigger_distance, SCROLL_TO_REFRESH_SPEC);
    }

    fn start_scroll(this: &Rc<RefCell<Inner>>, to: f32, spec: AnimationSpec) {
        let mut inner = this.borrow_mut();
        let from = inner.spinner.offset();
        if inner.auto_scroll.start(from, to, spec) {
            Self::schedule_frame(&mut inner, this);
        }
    }

    fn schedule_frame(inner: &mut Inner, this: &Rc<RefCell<Inner>>) {
        let weak = Rc::downgrade(this);
        let registration = inner
            .runtime
            .frame_clock()
            .with_frame_nanos(move |frame_time_nanos| {
                if let Some(this) = weak.upgrade() {
                    Self::on_frame(&this, frame_time_nanos);
                }
            });
        inner.auto_scroll.set_registration(registration);
    }

    fn on_frame(this: &Rc<RefCell<Inner>>, frame_time_nanos: u64) {
        let step = {
            let mut inner = this.borrow_mut();
            inner.auto_scroll.clear_registration();
            inner.auto_scroll.sample(frame_time_nanos)
        };
        let Some(step) = step else {
            return;
        };

        Self::move_spinner(this, step.delta);

        let finished_naturally = {
            let mut inner = this.borrow_mut();
            if !inner.auto_scroll.is_running() {
                // The loading transition force-stopped the scroll mid-step.
                false
            } else if step.finished {
                inner.auto_scroll.finish();
                true
            } else {
                Self::schedule_frame(&mut inner, this);
                false
            }
        };
        if finished_naturally {
            Self::on_scroll_finished(this);
        }
    }

    /// Natural-completion hook for settle animations. Force stops never
    /// reach here. Only the auto-refresh pull-out has follow-up work: it
    /// commits the refresh the same way a release would have.
    fn on_scroll_finished(this: &Rc<RefCell<Inner>>) {
        let effects = {
            let mut inner = this.borrow_mut();
            if !inner.is_auto_refresh {
                return;
            }
            inner.is_auto_refresh = false;
            let mut effects = Effects::default();
            Self::change_state(&mut inner, RefreshState::Loading, &mut effects);
            effects.listener = inner.refresh_listener.clone();
            effects
        };
        effects.run();
        Self::finish_spinner(this);
    }
}
