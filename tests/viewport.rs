use fractal_viewport::core::data::colour::Colour;
use fractal_viewport::core::data::loaded_image::LoadedImage;
use fractal_viewport::core::data::pixel_buffer::PixelBuffer;
use fractal_viewport::core::data::pixel_size::PixelSize;
use fractal_viewport::core::data::point::Point;
use fractal_viewport::core::data::render_request::RenderRequest;
use fractal_viewport::{
    Explorer, ExplorerConfig, GestureEvent, ImageLoader, LoadCompletion, LoadError, LoadState,
    LoadTicket, ParameterStore, ViewFrame, ViewPresenterPort, paint_view,
};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use url::Url;

const FILL: Colour = Colour::new(40, 180, 90);

/// Completes every load immediately. The first `failures` loads fail.
#[derive(Default)]
struct ScriptedGenerator {
    failures: usize,
    urls: Mutex<Vec<Url>>,
}

impl ImageLoader for ScriptedGenerator {
    fn load(
        &self,
        ticket: LoadTicket,
        url: Url,
        request: RenderRequest,
        completions: Sender<LoadCompletion>,
    ) {
        let mut urls = self.urls.lock().unwrap();
        urls.push(url.clone());

        let result = if urls.len() <= self.failures {
            Err(LoadError::Status {
                url: url.to_string(),
                status: 503,
            })
        } else {
            let size = PixelSize::new(request.pixel_width(), request.pixel_height()).unwrap();
            Ok(LoadedImage::new(PixelBuffer::filled(size, FILL), request, url))
        };

        completions.send(LoadCompletion { ticket, result }).unwrap();
    }
}

#[derive(Default)]
struct Screen {
    frames: Mutex<Vec<ViewFrame>>,
    states: Mutex<Vec<LoadState>>,
}

impl ViewPresenterPort for Screen {
    fn on_redraw_needed(&self, frame: &ViewFrame) {
        self.frames.lock().unwrap().push(frame.clone());
    }

    fn on_load_state_changed(&self, state: &LoadState) {
        self.states.lock().unwrap().push(state.clone());
    }
}

fn ms(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}

fn explorer(
    query: &str,
    failures: usize,
) -> (Explorer, Arc<ScriptedGenerator>, Arc<Screen>, Instant) {
    let generator = Arc::new(ScriptedGenerator {
        failures,
        ..ScriptedGenerator::default()
    });
    let screen = Arc::new(Screen::default());
    let start = Instant::now();

    let mut explorer = Explorer::new(
        ExplorerConfig::new(Url::parse("http://generator.test/fractal").unwrap()),
        ParameterStore::from_query(query).unwrap(),
        Arc::clone(&generator) as Arc<dyn ImageLoader>,
        Arc::clone(&screen) as Arc<dyn ViewPresenterPort>,
        start,
    );
    explorer.resize(start, 300, 200).unwrap();

    (explorer, generator, screen, start)
}

#[test]
fn test_bookmarked_view_is_requested_and_painted() {
    let (mut explorer, generator, screen, start) =
        explorer("x=0.25&y=-0.1&size=0.5&maxiter=500", 0);

    explorer.pump(ms(start, 50));
    assert!(generator.urls.lock().unwrap().is_empty());

    explorer.pump(ms(start, 150));
    explorer.pump(ms(start, 151));

    let urls = generator.urls.lock().unwrap();
    assert_eq!(urls.len(), 1);
    let pairs: Vec<(String, String)> = urls[0]
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("maxiter".to_string(), "500".to_string())));
    assert!(pairs.contains(&("width".to_string(), "300".to_string())));
    assert!(pairs.contains(&("height".to_string(), "200".to_string())));

    assert!(explorer.is_settled());
    assert_eq!(explorer.load_state(), &LoadState::Idle);

    let frame = screen.frames.lock().unwrap().last().cloned().unwrap();
    let canvas = paint_view(&frame).unwrap();
    assert_eq!(canvas.pixel(150, 100), Some(FILL));

    let query = explorer.query();
    assert!(query.contains("maxiter=500"));
    assert!(query.contains("x=0.25"));
    assert!(!query.contains("aspect"));
}

#[test]
fn test_drag_moves_picture_at_once_and_requests_on_release() {
    let (mut explorer, generator, screen, start) = explorer("", 0);
    explorer.pump(ms(start, 150));
    explorer.pump(ms(start, 151));
    let frames_before = screen.frames.lock().unwrap().len();

    explorer
        .handle_gesture(
            ms(start, 200),
            GestureEvent::PointerDown {
                position: Point::new(150.0, 100.0),
            },
        )
        .unwrap();
    explorer
        .handle_gesture(
            ms(start, 210),
            GestureEvent::PointerMove {
                position: Point::new(180.0, 100.0),
            },
        )
        .unwrap();

    assert!(screen.frames.lock().unwrap().len() > frames_before);
    assert!((explorer.params().center_x.get() + 0.5).abs() < 1e-12);

    let changed = explorer
        .handle_gesture(
            ms(start, 220),
            GestureEvent::PointerUp {
                position: Point::new(180.0, 100.0),
            },
        )
        .unwrap();

    assert!(changed);
    assert!((explorer.params().center_x.get() + 0.8).abs() < 1e-9);
    assert!(explorer.params().center_y.get().abs() < 1e-9);

    explorer.pump(ms(start, 330));

    let urls = generator.urls.lock().unwrap();
    assert_eq!(urls.len(), 2);
    let left: f64 = urls[1]
        .query_pairs()
        .find(|(k, _)| k == "left")
        .map(|(_, v)| v.parse().unwrap())
        .unwrap();
    assert!((left + 2.3).abs() < 1e-9);
}

#[test]
fn test_failed_load_is_reported_until_next_success() {
    let (mut explorer, _generator, screen, start) = explorer("", 1);

    explorer.pump(ms(start, 150));
    explorer.pump(ms(start, 151));

    assert!(matches!(explorer.load_state(), LoadState::Error(message) if message.contains("503")));
    assert!(explorer.frame().is_none());

    explorer
        .edit(ms(start, 200), |params| params.max_iterations.set(1000))
        .unwrap();
    explorer.pump(ms(start, 310));
    explorer.pump(ms(start, 311));

    assert_eq!(explorer.load_state(), &LoadState::Idle);
    assert!(explorer.frame().is_some());

    let states = screen.states.lock().unwrap();
    assert_eq!(states.first(), Some(&LoadState::Loading));
    assert_eq!(states.last(), Some(&LoadState::Idle));
}
