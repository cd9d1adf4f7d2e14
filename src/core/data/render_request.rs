use crate::core::data::fractal_kind::FractalKind;
use crate::core::data::point::Point;
use crate::core::data::rectangle::Rectangle;
use url::Url;

/// Render options that accompany a fractal-space window into a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub pixel_width: u32,
    pub max_iterations: u32,
    pub fractal_kind: FractalKind,
    /// Opaque query text appended verbatim to the generator URL.
    pub extra: String,
}

/// Immutable snapshot of everything the generator needs for one image.
///
/// Built once when a load is dispatched; later edits to the live parameters
/// never reach an existing request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    pixel_width: u32,
    pixel_height: u32,
    max_iterations: u32,
    fractal_kind: FractalKind,
    extra: String,
}

impl RenderRequest {
    #[must_use]
    pub fn new(window: &Rectangle, options: &RenderOptions) -> Self {
        let pixel_width = options.pixel_width.max(1);
        let pixel_height = (f64::from(pixel_width) / window.aspect_ratio())
            .round()
            .max(1.0) as u32;

        Self {
            left: window.left(),
            right: window.right(),
            top: window.top(),
            bottom: window.bottom(),
            pixel_width,
            pixel_height,
            max_iterations: options.max_iterations,
            fractal_kind: options.fractal_kind,
            extra: options.extra.clone(),
        }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn fractal_kind(&self) -> FractalKind {
        self.fractal_kind
    }

    #[must_use]
    pub fn extra(&self) -> &str {
        &self.extra
    }

    #[must_use]
    pub fn fractal_width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn fractal_height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Builds the generator URL for this request on top of `base`.
    ///
    /// Any query already present on `base` is kept; `extra` goes last,
    /// untouched.
    #[must_use]
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();

        url.query_pairs_mut()
            .append_pair("left", &self.left.to_string())
            .append_pair("right", &self.right.to_string())
            .append_pair("top", &self.top.to_string())
            .append_pair("bottom", &self.bottom.to_string())
            .append_pair("width", &self.pixel_width.to_string())
            .append_pair("height", &self.pixel_height.to_string())
            .append_pair("maxiter", &self.max_iterations.to_string())
            .append_pair("type", self.fractal_kind.query_value());

        let extra = self.extra.trim_start_matches(['?', '&']);
        if !extra.is_empty() {
            let query = format!("{}&{}", url.query().unwrap_or_default(), extra);
            url.set_query(Some(&query));
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pixel_width: u32) -> RenderOptions {
        RenderOptions {
            pixel_width,
            max_iterations: 100,
            fractal_kind: FractalKind::Mandelbrot,
            extra: String::new(),
        }
    }

    fn base_url() -> Url {
        Url::parse("http://generator.local/render").unwrap()
    }

    #[test]
    fn test_derives_bounds_and_pixel_height_from_window() {
        let window = Rectangle::new(Point::new(-0.5, 0.0), 3.0, 1.5).unwrap();
        let request = RenderRequest::new(&window, &options(900));

        assert_eq!(request.left(), -2.0);
        assert_eq!(request.right(), 1.0);
        assert_eq!(request.top(), -1.0);
        assert_eq!(request.bottom(), 1.0);
        assert_eq!(request.pixel_width(), 900);
        assert_eq!(request.pixel_height(), 600);
        assert_eq!(request.fractal_width(), 3.0);
        assert_eq!(request.fractal_height(), 2.0);
        assert_eq!(request.center(), Point::new(-0.5, 0.0));
    }

    #[test]
    fn test_pixel_height_is_rounded_and_never_zero() {
        let tall = Rectangle::new(Point::new(0.0, 0.0), 1.0, 0.7).unwrap();
        let wide = Rectangle::new(Point::new(0.0, 0.0), 1.0, 5000.0).unwrap();

        assert_eq!(RenderRequest::new(&tall, &options(100)).pixel_height(), 143);
        assert_eq!(RenderRequest::new(&wide, &options(100)).pixel_height(), 1);
    }

    #[test]
    fn test_request_is_a_snapshot_of_its_inputs() {
        let window = Rectangle::new(Point::new(0.0, 0.0), 2.0, 1.0).unwrap();
        let mut opts = options(10);
        let request = RenderRequest::new(&window, &opts);

        opts.max_iterations = 5000;
        opts.extra.push_str("palette=fire");

        assert_eq!(request.max_iterations(), 100);
        assert_eq!(request.extra(), "");
    }

    #[test]
    fn test_url_contains_every_generator_parameter() {
        let window = Rectangle::new(Point::new(-0.5, 0.0), 3.0, 1.5).unwrap();
        let request = RenderRequest::new(&window, &options(900));

        let url = request.to_url(&base_url());

        assert_eq!(
            url.as_str(),
            "http://generator.local/render?left=-2&right=1&top=-1&bottom=1&width=900&height=600&maxiter=100&type=mandelbrot"
        );
    }

    #[test]
    fn test_url_appends_extra_verbatim() {
        let window = Rectangle::new(Point::new(0.0, 0.0), 2.0, 2.0).unwrap();
        let mut opts = options(4);
        opts.fractal_kind = FractalKind::Julia;
        opts.extra = "&cr=-0.8&ci=0.156".to_string();

        let url = RenderRequest::new(&window, &opts).to_url(&base_url());

        assert_eq!(
            url.query(),
            Some("left=-1&right=1&top=-0.5&bottom=0.5&width=4&height=2&maxiter=100&type=julia&cr=-0.8&ci=0.156")
        );
    }

    #[test]
    fn test_url_keeps_existing_base_query() {
        let window = Rectangle::new(Point::new(0.0, 0.0), 2.0, 1.0).unwrap();
        let base = Url::parse("http://generator.local/render?key=abc").unwrap();

        let url = RenderRequest::new(&window, &options(2)).to_url(&base);

        assert!(url.query().unwrap().starts_with("key=abc&left=-1"));
    }

    #[test]
    fn test_identical_requests_build_identical_urls() {
        let window = Rectangle::new(Point::new(0.25, -0.1), 0.5, 1.5).unwrap();

        let a = RenderRequest::new(&window, &options(300)).to_url(&base_url());
        let b = RenderRequest::new(&window, &options(300)).to_url(&base_url());

        assert_eq!(a, b);
    }
}
