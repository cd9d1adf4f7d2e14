use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fractal_viewport::core::data::point::Point;
use fractal_viewport::core::transform::AffineTransform;

fn bench_transforms(c: &mut Criterion) {
    let fit = AffineTransform::translate(12.0, 0.0)
        .multiply(&AffineTransform::scale(300.0, 300.0))
        .multiply(&AffineTransform::translate(2.0, 1.0));
    let gesture = AffineTransform::scale_about(Point::new(-0.5, 0.0), 0.5);

    c.bench_function("compose_view", |b| {
        b.iter(|| black_box(&fit).multiply(black_box(&gesture)))
    });

    c.bench_function("invert_view", |b| {
        let composed = fit.multiply(&gesture);
        b.iter(|| black_box(&composed).inverse())
    });

    c.bench_function("map_points", |b| {
        let composed = fit.multiply(&gesture);
        b.iter(|| {
            let mut acc = Point::default();
            for i in 0..1024 {
                let p = composed.transform_point(f64::from(i), f64::from(i) * 0.5);
                acc.x += p.x;
                acc.y += p.y;
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
