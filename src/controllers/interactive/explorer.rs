use crate::controllers::interactive::config::ExplorerConfig;
use crate::controllers::interactive::data::screen_mapping::ScreenMapping;
use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::controllers::interactive::errors::view::ViewError;
use crate::controllers::interactive::events::load::{LoadCompletion, LoadState, LoadTicket};
use crate::controllers::interactive::gesture::{GestureController, GestureEvent};
use crate::controllers::interactive::ports::image_loader::ImageLoader;
use crate::controllers::interactive::ports::view_presenter::ViewPresenterPort;
use crate::controllers::interactive::scheduler::{
    CompletionOutcome, ImageRequestScheduler, SchedulerAction, SchedulerState,
};
use crate::controllers::interactive::view_engine::ViewTransformEngine;
use crate::core::data::point::Point;
use crate::params::{FractalParams, ParamChange, ParamError, ParameterStore};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

/// Owns the whole interactive view and runs it from a single thread.
///
/// The host loop forwards input, calls [`Explorer::pump`] and then sleeps
/// until [`Explorer::next_wakeup`] or until a loader wakes it. Nothing here
/// blocks except [`Explorer::wait`], which only headless hosts use.
pub struct Explorer {
    config: ExplorerConfig,
    store: ParameterStore,
    changes: Receiver<ParamChange>,
    engine: ViewTransformEngine,
    scheduler: ImageRequestScheduler,
    gestures: GestureController,
    loader: Arc<dyn ImageLoader>,
    presenter: Arc<dyn ViewPresenterPort>,
    completion_sender: Sender<LoadCompletion>,
    completion_receiver: Receiver<LoadCompletion>,
    received: Vec<LoadCompletion>,
    load_state: LoadState,
    redraw_pending: bool,
}

impl Explorer {
    /// The first load is scheduled one debounce period after `now`, so an
    /// initial resize collapses into it.
    pub fn new(
        config: ExplorerConfig,
        mut store: ParameterStore,
        loader: Arc<dyn ImageLoader>,
        presenter: Arc<dyn ViewPresenterPort>,
        now: Instant,
    ) -> Self {
        let changes = store.subscribe();
        let (completion_sender, completion_receiver) = mpsc::channel();
        let mut scheduler = ImageRequestScheduler::new(config.debounce);
        scheduler.notify_change(now);

        Self {
            gestures: GestureController::new(&config),
            config,
            store,
            changes,
            engine: ViewTransformEngine::new(),
            scheduler,
            loader,
            presenter,
            completion_sender,
            completion_receiver,
            received: Vec::new(),
            load_state: LoadState::Idle,
            redraw_pending: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub fn params(&self) -> &FractalParams {
        self.store.params()
    }

    /// Copy of the current parameters for callers that edit while reading.
    #[must_use]
    pub fn snapshot(&self) -> FractalParams {
        self.store.snapshot()
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.store.query()
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    #[must_use]
    pub fn engine(&self) -> &ViewTransformEngine {
        &self.engine
    }

    /// True once nothing is pending, loading or waiting to be applied.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.scheduler.state() == SchedulerState::Idle && self.received.is_empty()
    }

    #[must_use]
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Edits parameters through the store. Invalid edits change nothing.
    pub fn edit<R>(
        &mut self,
        now: Instant,
        apply: impl FnOnce(&mut FractalParams) -> Result<R, ParamError>,
    ) -> Result<R, ParamError> {
        let result = self.store.edit(apply);
        self.sync(now);
        result
    }

    pub fn load_query(&mut self, now: Instant, query: &str) -> Result<(), ParamError> {
        let result = self.store.load_query(query);
        self.sync(now);
        result
    }

    pub fn reset_view(&mut self, now: Instant) {
        self.store.reset_view();
        self.sync(now);
    }

    pub fn resize(&mut self, now: Instant, width: u32, height: u32) -> Result<(), ViewError> {
        let result = self.engine.resize(&mut self.store, width, height);
        self.redraw_pending = true;
        self.sync(now);
        result
    }

    pub fn set_screen_mapping(&mut self, mapping: ScreenMapping) {
        self.engine.set_screen_mapping(mapping);
    }

    pub fn handle_gesture(&mut self, now: Instant, event: GestureEvent) -> Result<bool, ViewError> {
        let was_dragging = self.engine.is_dragging();
        let result = self
            .gestures
            .handle(event, &mut self.engine, &mut self.store);

        if was_dragging || self.engine.is_dragging() {
            self.redraw_pending = true;
        }

        self.sync(now);
        result
    }

    pub fn screen_to_fractal(&self, screen: Point) -> Result<Point, ViewError> {
        self.engine.screen_to_fractal(self.store.params(), screen)
    }

    pub fn fractal_to_screen(&self, fractal: Point) -> Result<Point, ViewError> {
        self.engine.fractal_to_screen(self.store.params(), fractal)
    }

    /// The frame that would be presented right now.
    pub fn frame(&mut self) -> Option<ViewFrame> {
        self.engine.redraw(self.store.params())
    }

    /// Applies finished loads and fires the debounce timer if due.
    pub fn pump(&mut self, now: Instant) {
        self.sync(now);

        let mut completions = std::mem::take(&mut self.received);
        completions.extend(self.completion_receiver.try_iter());
        for completion in completions {
            self.apply_completion(completion);
        }

        match self
            .scheduler
            .poll(now, &self.config.generator_url, self.store.params())
        {
            SchedulerAction::Dispatch {
                ticket,
                url,
                request,
                superseded,
            } => {
                self.cancel(superseded);
                self.loader
                    .load(ticket, url, request, self.completion_sender.clone());
                self.set_load_state(LoadState::Loading);
            }
            SchedulerAction::Skipped { superseded } => {
                self.cancel(superseded);
                // The displayed image already matches, so a pending spinner or
                // an earlier failure no longer applies.
                if self.load_state != LoadState::Idle {
                    self.set_load_state(LoadState::Idle);
                }
            }
            SchedulerAction::NothingToDo => {}
        }

        self.flush_redraw();
    }

    /// Blocks until a load finishes or `until` passes. For hosts without an
    /// event loop of their own; with no deadline and no load in flight this
    /// never returns.
    pub fn wait(&mut self, until: Option<Instant>) {
        let received = match until {
            Some(deadline) => self
                .completion_receiver
                .recv_timeout(deadline.saturating_duration_since(Instant::now()))
                .ok(),
            None => self.completion_receiver.recv().ok(),
        };

        self.received.extend(received);
    }

    fn sync(&mut self, now: Instant) {
        if self.changes.try_iter().count() > 0 {
            self.scheduler.notify_change(now);
            self.redraw_pending = true;
        }

        self.flush_redraw();
    }

    fn apply_completion(&mut self, completion: LoadCompletion) {
        match self.scheduler.complete(completion) {
            CompletionOutcome::Commit(image) => {
                self.engine.adopt_image(image);
                self.redraw_pending = true;
                self.set_load_state(LoadState::Idle);
            }
            CompletionOutcome::Failed(e) => {
                self.set_load_state(LoadState::Error(e.to_string()));
            }
            CompletionOutcome::Stale => {}
        }
    }

    fn cancel(&self, superseded: Option<LoadTicket>) {
        if let Some(ticket) = superseded {
            log::debug!("cancelling superseded load #{ticket}");
            self.loader.cancel(ticket);
        }
    }

    fn set_load_state(&mut self, state: LoadState) {
        if self.load_state != state {
            self.presenter.on_load_state_changed(&state);
            self.load_state = state;
        }
    }

    fn flush_redraw(&mut self) {
        if !std::mem::take(&mut self.redraw_pending) {
            return;
        }

        if let Some(frame) = self.engine.redraw(self.store.params()) {
            self.presenter.on_redraw_needed(&frame);
        }
    }
}
