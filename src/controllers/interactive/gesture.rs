use crate::controllers::interactive::config::ExplorerConfig;
use crate::controllers::interactive::errors::view::ViewError;
use crate::controllers::interactive::view_engine::ViewTransformEngine;
use crate::core::data::point::Point;
use crate::params::ParameterStore;

/// Raw pointer input, in screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEvent {
    /// One wheel step. Only the sign of `delta_y` matters.
    Wheel { position: Point, delta_y: f64 },
    DoubleClick { position: Point },
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    PointerCancel,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureController {
    wheel_zoom_factor: f64,
    double_click_zoom_factor: f64,
}

impl GestureController {
    #[must_use]
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            wheel_zoom_factor: config.wheel_zoom_factor,
            double_click_zoom_factor: config.double_click_zoom_factor,
        }
    }

    /// Returns whether the live window changed.
    pub fn handle(
        &self,
        event: GestureEvent,
        engine: &mut ViewTransformEngine,
        store: &mut ParameterStore,
    ) -> Result<bool, ViewError> {
        match event {
            GestureEvent::Wheel { position, delta_y } => {
                if delta_y == 0.0 || !delta_y.is_finite() {
                    return Ok(false);
                }

                let factor = if delta_y > 0.0 {
                    self.wheel_zoom_factor
                } else {
                    1.0 / self.wheel_zoom_factor
                };

                engine.zoom_at(store, position, factor)?;
                Ok(true)
            }
            GestureEvent::DoubleClick { position } => {
                engine.zoom_at(store, position, self.double_click_zoom_factor)?;
                Ok(true)
            }
            GestureEvent::PointerDown { position } => {
                engine.begin_drag(position);
                Ok(false)
            }
            GestureEvent::PointerMove { position } => {
                engine.update_drag(store.params(), position)?;
                Ok(false)
            }
            GestureEvent::PointerUp { position } => engine.end_drag(store, position),
            GestureEvent::PointerCancel => {
                engine.cancel_drag();
                Ok(false)
            }
        }
    }
}
