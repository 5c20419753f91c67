use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pf_core::Image;
use pf_morph::{median_blur_u8, open_rect_u8};

fn noisy_u8(width: usize, height: usize) -> Image<u8> {
    let mut state = 0x2545_f491_u32;
    let data = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    Image::from_vec(width, height, data).expect("valid image")
}

fn bench_rank_filters(c: &mut Criterion) {
    let img = noisy_u8(480, 480);
    let view = img.as_view();

    c.bench_function("median_blur_u8_480x480_k9", |b| {
        b.iter(|| {
            let out = median_blur_u8(black_box(&view), 9).expect("odd kernel");
            black_box(out.data()[0]);
        });
    });

    c.bench_function("open_rect_u8_480x480_k3", |b| {
        b.iter(|| {
            let out = open_rect_u8(black_box(&view), 3).expect("valid kernel");
            black_box(out.data()[0]);
        });
    });
}

criterion_group!(benches, bench_rank_filters);
criterion_main!(benches);
