//! Image loader backed by blocking HTTP requests on worker threads.

use crate::controllers::interactive::errors::load::LoadError;
use crate::controllers::interactive::events::load::{LoadCompletion, LoadTicket};
use crate::controllers::interactive::ports::image_loader::ImageLoader;
use crate::core::cancellation::CancelToken;
use crate::core::data::loaded_image::LoadedImage;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_size::PixelSize;
use crate::core::data::render_request::RenderRequest;
use reqwest::blocking::Client;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Called after a completion has been sent, to wake the host loop.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Loads generator images with one short-lived thread per request.
///
/// Only the most recently issued ticket is live; older workers notice at
/// their next check and stop without decoding.
pub struct HttpImageLoader {
    client: Client,
    live_ticket: Arc<AtomicU64>,
    waker: Option<Waker>,
}

impl HttpImageLoader {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            live_ticket: Arc::new(AtomicU64::new(0)),
            waker: None,
        })
    }

    #[must_use]
    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(
        &self,
        ticket: LoadTicket,
        url: Url,
        request: RenderRequest,
        completions: Sender<LoadCompletion>,
    ) {
        self.live_ticket.store(ticket, Ordering::Release);

        let client = self.client.clone();
        let live_ticket = Arc::clone(&self.live_ticket);
        let waker = self.waker.clone();
        let url_text = url.to_string();
        let fallback = completions.clone();

        let spawned = thread::Builder::new()
            .name(format!("image-load-{ticket}"))
            .spawn(move || {
                let cancel = || live_ticket.load(Ordering::Acquire) != ticket;
                let result = fetch_image(&client, url, request, &cancel);

                deliver(&completions, waker.as_ref(), LoadCompletion { ticket, result });
            });

        if let Err(e) = spawned {
            report_spawn_failure(&fallback, self.waker.as_ref(), ticket, url_text, &e);
        }
    }

    fn cancel(&self, ticket: LoadTicket) {
        let _ = self
            .live_ticket
            .compare_exchange(ticket, 0, Ordering::AcqRel, Ordering::Acquire);
    }
}

fn deliver(completions: &Sender<LoadCompletion>, waker: Option<&Waker>, completion: LoadCompletion) {
    if completions.send(completion).is_ok() {
        if let Some(waker) = waker {
            waker();
        }
    }
}

/// A load whose worker never started still completes, as a request error.
fn report_spawn_failure(
    completions: &Sender<LoadCompletion>,
    waker: Option<&Waker>,
    ticket: LoadTicket,
    url: String,
    error: &io::Error,
) {
    log::warn!("could not start load #{ticket}: {error}");

    deliver(
        completions,
        waker,
        LoadCompletion {
            ticket,
            result: Err(LoadError::Request {
                url,
                message: format!("could not start worker thread: {error}"),
            }),
        },
    );
}

fn fetch_image<C: CancelToken>(
    client: &Client,
    url: Url,
    request: RenderRequest,
    cancel: &C,
) -> Result<LoadedImage, LoadError> {
    if cancel.is_cancelled() {
        return Err(LoadError::Cancelled {
            url: url.to_string(),
        });
    }

    let response = client
        .get(url.clone())
        .send()
        .map_err(|e| LoadError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().map_err(|e| LoadError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    decode_image(&bytes, request, url, cancel)
}

/// Decodes an encoded image into an RGB buffer tagged with its request.
pub fn decode_image<C: CancelToken>(
    bytes: &[u8],
    request: RenderRequest,
    url: Url,
    cancel: &C,
) -> Result<LoadedImage, LoadError> {
    if cancel.is_cancelled() {
        return Err(LoadError::Cancelled {
            url: url.to_string(),
        });
    }

    let decode_error = |message: String| LoadError::Decode {
        url: url.to_string(),
        message,
    };

    let rgb = image::load_from_memory(bytes)
        .map_err(|e| decode_error(e.to_string()))?
        .to_rgb8();

    let size = PixelSize::new(rgb.width(), rgb.height()).map_err(|e| decode_error(e.to_string()))?;
    let pixels =
        PixelBuffer::from_data(size, rgb.into_raw()).map_err(|e| decode_error(e.to_string()))?;

    if (size.width(), size.height()) != (request.pixel_width(), request.pixel_height()) {
        log::debug!(
            "generator returned {}x{} for a {}x{} request",
            size.width(),
            size.height(),
            request.pixel_width(),
            request.pixel_height()
        );
    }

    Ok(LoadedImage::new(pixels, request, url))
}
