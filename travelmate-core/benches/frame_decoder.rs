use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use travelmate_core::stream::FrameDecoder;

fn synth_stream(frames: usize) -> Vec<u8> {
    let mut stream = Vec::new();
    for i in 0..frames {
        stream.extend_from_slice(
            format!(
                "data: {{\"type\":\"reasoning\",\"data\":{{\"agent\":\"Agent{i}\",\"action\":\"lookup attractions in 東京\",\"reason\":\"step {i} of the plan\"}}}}\n\n"
            )
            .as_bytes(),
        );
    }
    stream.extend_from_slice(
        b"data: {\"type\":\"complete\",\"data\":{\"final_response\":\"done\"}}\n\n",
    );
    stream
}

fn bench_frame_decoding(c: &mut Criterion) {
    let stream = synth_stream(1000);
    let mut group = c.benchmark_group("frame_decoding");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("single_chunk", |b| {
        b.iter(|| {
            let mut decoder = FrameDecoder::new();
            black_box(decoder.push_chunk(black_box(&stream)).len())
        })
    });

    for chunk_size in [64usize, 1024].iter() {
        group.bench_with_input(
            BenchmarkId::new("chunked", chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new();
                    let mut frames = 0;
                    for chunk in stream.chunks(chunk_size) {
                        frames += decoder.push_chunk(chunk).len();
                    }
                    black_box(frames)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_frame_decoding);
criterion_main!(benches);
