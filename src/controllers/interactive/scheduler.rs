use crate::controllers::interactive::errors::load::LoadError;
use crate::controllers::interactive::events::load::{LoadCompletion, LoadTicket};
use crate::core::data::loaded_image::LoadedImage;
use crate::core::data::render_request::RenderRequest;
use crate::params::FractalParams;
use std::time::{Duration, Instant};
use url::Url;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    PendingDebounce,
    Loading,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerAction {
    /// Start loading `url`. `superseded` is a load whose result is now stale.
    Dispatch {
        ticket: LoadTicket,
        url: Url,
        request: RenderRequest,
        superseded: Option<LoadTicket>,
    },
    /// The settled parameters match the image already on screen.
    Skipped { superseded: Option<LoadTicket> },
    NothingToDo,
}

#[derive(Debug)]
pub enum CompletionOutcome {
    Commit(LoadedImage),
    Failed(LoadError),
    Stale,
}

/// Debounces parameter changes into image loads and decides which load
/// results may be applied.
///
/// Purely a state machine: time only enters through the `now` arguments, and
/// the caller performs the loads it is told to dispatch.
#[derive(Debug)]
pub struct ImageRequestScheduler {
    debounce: Duration,
    deadline: Option<Instant>,
    last_ticket: LoadTicket,
    in_flight: Option<(LoadTicket, Url)>,
    committed_url: Option<Url>,
}

impl ImageRequestScheduler {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
            last_ticket: 0,
            in_flight: None,
            committed_url: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        if self.deadline.is_some() {
            SchedulerState::PendingDebounce
        } else if self.in_flight.is_some() {
            SchedulerState::Loading
        } else {
            SchedulerState::Idle
        }
    }

    /// Restarts the single debounce timer.
    pub fn notify_change(&mut self, now: Instant) {
        if self.deadline.is_some() {
            log::debug!("debounce timer restarted");
        }

        self.deadline = Some(now + self.debounce);
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn last_ticket(&self) -> LoadTicket {
        self.last_ticket
    }

    #[must_use]
    pub fn in_flight_ticket(&self) -> Option<LoadTicket> {
        self.in_flight.as_ref().map(|(ticket, _)| *ticket)
    }

    #[must_use]
    pub fn committed_url(&self) -> Option<&Url> {
        self.committed_url.as_ref()
    }

    /// Fires the debounce timer if it is due.
    ///
    /// The request is snapshotted from `params` at this moment, so edits made
    /// while the load runs never leak into it.
    pub fn poll(&mut self, now: Instant, base_url: &Url, params: &FractalParams) -> SchedulerAction {
        match self.deadline {
            Some(deadline) if now >= deadline => self.deadline = None,
            _ => return SchedulerAction::NothingToDo,
        }

        let superseded = self.in_flight.take().map(|(ticket, _)| ticket);

        let request = match params.render_request() {
            Ok(request) => request,
            Err(e) => {
                log::warn!("cannot build render request: {e}");
                return SchedulerAction::Skipped { superseded };
            }
        };

        let url = request.to_url(base_url);

        if self.committed_url.as_ref() == Some(&url) {
            log::debug!("skipping load, {url} is already displayed");
            return SchedulerAction::Skipped { superseded };
        }

        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.in_flight = Some((ticket, url.clone()));

        log::info!("dispatching load #{ticket}: {url}");

        SchedulerAction::Dispatch {
            ticket,
            url,
            request,
            superseded,
        }
    }

    /// Accepts a finished load only if it is the live one.
    pub fn complete(&mut self, completion: LoadCompletion) -> CompletionOutcome {
        let Some((ticket, url)) = self.in_flight.take_if(|(t, _)| *t == completion.ticket) else {
            log::debug!("dropping stale completion #{}", completion.ticket);
            return CompletionOutcome::Stale;
        };

        match completion.result {
            Ok(image) => {
                log::info!("committing load #{ticket}");
                self.committed_url = Some(url);
                CompletionOutcome::Commit(image)
            }
            Err(e) => {
                log::warn!("load #{ticket} failed: {e}");
                CompletionOutcome::Failed(e)
            }
        }
    }
}
