//! Batch validation throughput.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use feedgate::{HmacKeyInput, Validator};
use feedgate_testkit::{interleave, multi_author_feeds, FeedFixture};

const BATCH: usize = 1_000;

fn bench_validate(c: &mut Criterion) {
    let validator = Validator::new().expect("worker pool");

    let mut fixture = FeedFixture::with_seed([0x61; 32]);
    fixture.append_posts(BATCH);
    let single_feed = fixture.messages().to_vec();

    let feeds = multi_author_feeds(8, BATCH / 8);
    let multi_feed = interleave(&feeds);

    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Elements(BATCH as u64));

    group.bench_function("single_feed_batch", |b| {
        b.iter(|| {
            validator
                .validate_batch(&HmacKeyInput::None, &single_feed, None)
                .unwrap()
        })
    });

    group.bench_function("multi_author_batch", |b| {
        b.iter(|| {
            validator
                .validate_multi_author_batch(&HmacKeyInput::None, &multi_feed)
                .unwrap()
        })
    });

    group.bench_function("verify_signatures", |b| {
        b.iter(|| {
            validator
                .verify_signatures(&HmacKeyInput::None, &single_feed)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
