use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use retroterm_core::Terminal;

struct Corpus<'a> {
    id: &'a str,
    bytes: &'a [u8],
}

fn corpora() -> Vec<Corpus<'static>> {
    const PLAIN_TEXT: &[u8] = b"the quick brown fox jumps over the lazy dog 0123456789\r\n";

    const DENSE_SGR: &[u8] = b"\x1b[31mRED\x1b[0m \x1b[1;32mGREEN\x1b[0m \x1b[4;33mYELLOW\x1b[0m\r\n\
\x1b[38;5;12mIDX\x1b[0m \x1b[7minv\x1b[27m \x1b[97;100mbright\x1b[0m\r\n";

    const CURSOR_HEAVY: &[u8] = b"\x1b[H\x1b[2J\x1b[5;10Hfield\x1b[3A\x1b[4Dx\x1b[B\x1b[K\r\n";

    const UTF8_TEXT: &[u8] =
        "héllo wörld, 日本語テキスト 🎉 line drawing soon\r\n".as_bytes();

    const LINE_DRAWING: &[u8] = b"\x1b(0lqqqqk\r\nx    x\r\nmqqqqj\x1b(B\r\n";

    vec![
        Corpus { id: "plain_text", bytes: PLAIN_TEXT },
        Corpus { id: "dense_sgr", bytes: DENSE_SGR },
        Corpus { id: "cursor_heavy", bytes: CURSOR_HEAVY },
        Corpus { id: "utf8_text", bytes: UTF8_TEXT },
        Corpus { id: "line_drawing", bytes: LINE_DRAWING },
    ]
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal_process");
    for corpus in corpora() {
        // Repeat each corpus to a stable working-set size.
        let mut stream = Vec::with_capacity(64 * 1024);
        while stream.len() < 64 * 1024 {
            stream.extend_from_slice(corpus.bytes);
        }
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_function(corpus.id, |b| {
            b.iter(|| {
                let mut term = Terminal::new(24, 80);
                term.process(black_box(&stream));
                black_box(term.screen().cursor_row())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
