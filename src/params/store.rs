use crate::core::data::fractal_kind::FractalKind;
use crate::core::data::point::Point;
use crate::core::data::rectangle::{Rectangle, RectangleError};
use crate::core::data::render_request::{RenderOptions, RenderRequest};
use crate::params::parameter::{Param, ParamError, ParamField};
use std::sync::mpsc::{self, Receiver, Sender};
use url::form_urlencoded;

pub const DEFAULT_CENTER_X: f64 = -0.5;
pub const DEFAULT_CENTER_Y: f64 = 0.0;
pub const DEFAULT_SIZE: f64 = 3.0;
pub const DEFAULT_ASPECT_RATIO: f64 = 1.5;
pub const DEFAULT_MAX_ITERATIONS: u32 = 256;
pub const DEFAULT_PIXEL_WIDTH: u32 = 900;

/// Relative tolerance under which an aspect ratio is treated as unchanged.
const ASPECT_RATIO_EPSILON: f64 = 1e-12;

/// One coalesced notification per edit that changed at least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamChange {
    pub changed: Vec<&'static str>,
}

/// Every user-editable value, as an explicit list of typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalParams {
    pub center_x: Param<f64>,
    pub center_y: Param<f64>,
    pub size: Param<f64>,
    pub aspect_ratio: Param<f64>,
    pub max_iterations: Param<u32>,
    pub pixel_width: Param<u32>,
    pub fractal_kind: Param<FractalKind>,
    pub extra: Param<String>,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            center_x: Param::new("x", DEFAULT_CENTER_X),
            center_y: Param::new("y", DEFAULT_CENTER_Y),
            size: Param::positive("size", DEFAULT_SIZE),
            aspect_ratio: Param::positive("aspect", DEFAULT_ASPECT_RATIO),
            max_iterations: Param::positive("maxiter", DEFAULT_MAX_ITERATIONS),
            pixel_width: Param::positive("width", DEFAULT_PIXEL_WIDTH),
            fractal_kind: Param::new("type", FractalKind::default()),
            extra: Param::new("extra", String::new()),
        }
    }
}

impl FractalParams {
    #[must_use]
    pub fn fields(&self) -> [&dyn ParamField; 8] {
        [
            &self.center_x,
            &self.center_y,
            &self.size,
            &self.aspect_ratio,
            &self.max_iterations,
            &self.pixel_width,
            &self.fractal_kind,
            &self.extra,
        ]
    }

    pub fn fields_mut(&mut self) -> [&mut dyn ParamField; 8] {
        [
            &mut self.center_x,
            &mut self.center_y,
            &mut self.size,
            &mut self.aspect_ratio,
            &mut self.max_iterations,
            &mut self.pixel_width,
            &mut self.fractal_kind,
            &mut self.extra,
        ]
    }

    pub fn window(&self) -> Result<Rectangle, RectangleError> {
        Rectangle::new(
            Point::new(self.center_x.get(), self.center_y.get()),
            self.size.get(),
            self.aspect_ratio.get(),
        )
    }

    /// Writes a window back. The aspect ratio is only touched when it
    /// actually differs, so navigation never pins an auto-tracked ratio.
    pub fn set_window(&mut self, window: &Rectangle) -> Result<(), ParamError> {
        self.center_x.set(window.center().x)?;
        self.center_y.set(window.center().y)?;
        self.size.set(window.size())?;

        let current = self.aspect_ratio.get();
        if (window.aspect_ratio() - current).abs() > ASPECT_RATIO_EPSILON * current {
            self.aspect_ratio.set(window.aspect_ratio())?;
        }

        Ok(())
    }

    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pixel_width: self.pixel_width.get(),
            max_iterations: self.max_iterations.get(),
            fractal_kind: self.fractal_kind.get(),
            extra: self.extra.get(),
        }
    }

    pub fn render_request(&self) -> Result<RenderRequest, RectangleError> {
        Ok(RenderRequest::new(&self.window()?, &self.render_options()))
    }

    /// Serializes explicitly-set, non-default values as a query string.
    #[must_use]
    pub fn query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for field in self.fields() {
            if field.is_explicit() && !field.is_default() {
                serializer.append_pair(field.name(), &field.encode());
            }
        }

        serializer.finish()
    }

    /// Applies every known key of `query`. Unknown keys are skipped.
    pub fn apply_query(&mut self, query: &str) -> Result<(), ParamError> {
        let query = query.trim_start_matches('?');

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let field = self
                .fields_mut()
                .into_iter()
                .find(|field| field.name() == key);

            match field {
                Some(field) => field.decode(&value)?,
                None => log::warn!("ignoring unknown query parameter '{key}'"),
            }
        }

        Ok(())
    }

    fn changed_fields(&self, before: &Self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .zip(before.fields())
            .filter(|(after, before)| {
                after.encode() != before.encode() || after.is_explicit() != before.is_explicit()
            })
            .map(|(after, _)| after.name())
            .collect()
    }
}

/// Holds the live parameters and tells subscribers when they change.
///
/// All edits go through [`ParameterStore::edit`], which applies them to a
/// copy first: a failing edit leaves the store untouched and sends nothing.
#[derive(Debug, Default)]
pub struct ParameterStore {
    params: FractalParams,
    subscribers: Vec<Sender<ParamChange>>,
}

impl ParameterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a bookmarked query string.
    pub fn from_query(query: &str) -> Result<Self, ParamError> {
        let mut params = FractalParams::default();
        params.apply_query(query)?;

        Ok(Self {
            params,
            subscribers: Vec::new(),
        })
    }

    #[must_use]
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// Owned copy of the current values. Later edits do not reach it.
    #[must_use]
    pub fn snapshot(&self) -> FractalParams {
        self.params.clone()
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.params.query()
    }

    pub fn window(&self) -> Result<Rectangle, RectangleError> {
        self.params.window()
    }

    pub fn subscribe(&mut self) -> Receiver<ParamChange> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    pub fn edit<R>(
        &mut self,
        apply: impl FnOnce(&mut FractalParams) -> Result<R, ParamError>,
    ) -> Result<R, ParamError> {
        let mut next = self.snapshot();
        let result = apply(&mut next)?;

        let changed = next.changed_fields(&self.params);
        self.params = next;

        if !changed.is_empty() {
            self.notify(ParamChange { changed });
        }

        Ok(result)
    }

    pub fn set_window(&mut self, window: &Rectangle) -> Result<(), ParamError> {
        self.edit(|params| params.set_window(window))
    }

    /// Replaces every value with the contents of `query`.
    pub fn load_query(&mut self, query: &str) -> Result<(), ParamError> {
        self.edit(|params| {
            for field in params.fields_mut() {
                field.reset();
            }
            params.apply_query(query)
        })
    }

    /// Returns center and size to their defaults.
    pub fn reset_view(&mut self) {
        let _ = self.edit(|params| {
            params.center_x.reset();
            params.center_y.reset();
            params.size.reset();
            Ok(())
        });
    }

    fn notify(&mut self, change: ParamChange) {
        log::debug!("parameters changed: {:?}", change.changed);

        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}
