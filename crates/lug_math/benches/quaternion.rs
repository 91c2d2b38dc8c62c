use criterion::{Criterion, criterion_group, criterion_main};
use lug_math::{Quaternion, UnitVector3, Vector3, rotate_point};
use std::hint::black_box;

pub fn bench_hamilton_product(c: &mut Criterion) {
    let q0 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let q1 = Quaternion::new(5.0, 6.0, 7.0, 8.0);
    c.bench_function("hamilton_product", |b| {
        b.iter(|| black_box(&q0) * black_box(&q1))
    });
}

pub fn bench_slerp(c: &mut Criterion) {
    let q0 = Quaternion::from_axis_angle(&UnitVector3::unit_x(), 0.3);
    let q1 = Quaternion::from_axis_angle(&UnitVector3::unit_y(), 1.2);
    c.bench_function("slerp", |b| {
        b.iter(|| black_box(&q0).slerp(black_box(&q1), black_box(0.4)))
    });
}

pub fn bench_rotate_point(c: &mut Criterion) {
    let point = Vector3::new(1.0, 2.0, 3.0);
    let axis = UnitVector3::normalized_from(Vector3::new(1.0, 1.0, 0.0));
    c.bench_function("rotate_point", |b| {
        b.iter(|| rotate_point(black_box(&point), black_box(0.9), black_box(&axis)))
    });
}

criterion_group!(
    benches,
    bench_hamilton_product,
    bench_slerp,
    bench_rotate_point
);
criterion_main!(benches);
