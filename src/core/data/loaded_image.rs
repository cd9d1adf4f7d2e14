use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::RenderRequest;
use url::Url;

/// A decoded generator response together with the request that produced it.
///
/// The image's real dimensions are authoritative for the fractal-image
/// mapping, even if the generator ignored the requested size.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pixels: PixelBuffer,
    request: RenderRequest,
    url: Url,
}

impl LoadedImage {
    #[must_use]
    pub fn new(pixels: PixelBuffer, request: RenderRequest, url: Url) -> Self {
        Self {
            pixels,
            request,
            url,
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    #[must_use]
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}
