use criterion::{black_box, criterion_group, criterion_main, Criterion};
use search_server::{process_queries, DocumentStatus, ExecutionPolicy, SearchServer};

const DICTIONARY_SIZE: usize = 2_000;
const DOCUMENT_COUNT: i32 = 10_000;
const WORDS_PER_DOCUMENT: usize = 70;

/// Small xorshift so the corpus is the same on every run
struct Words {
    state: u64,
}

impl Words {
    fn next_index(&mut self) -> usize {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        (self.state % DICTIONARY_SIZE as u64) as usize
    }

    fn text(&mut self, dictionary: &[String], len: usize, minus_every: usize) -> String {
        (0..len)
            .map(|i| {
                let word = &dictionary[self.next_index()];
                if minus_every > 0 && i % minus_every == 0 {
                    format!("-{word}")
                } else {
                    word.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn build_server() -> (SearchServer, Vec<String>) {
    let dictionary: Vec<String> = (0..DICTIONARY_SIZE).map(|i| format!("w{i:04}")).collect();
    let mut words = Words { state: 0x2545_f491_4f6c_dd1d };
    let mut server = SearchServer::new("w0000 w0001 w0002").expect("stop words");
    for id in 0..DOCUMENT_COUNT {
        let text = words.text(&dictionary, WORDS_PER_DOCUMENT, 0);
        server
            .add_document(id, &text, DocumentStatus::Actual, &[id % 7, 3, 5])
            .expect("add document");
    }
    let queries = (0..100).map(|_| words.text(&dictionary, 70, 10)).collect();
    (server, queries)
}

fn search_benchmark(c: &mut Criterion) {
    let (server, queries) = build_server();

    c.bench_function("find_top_documents_sequential", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(
                    server
                        .find_top_documents_with(ExecutionPolicy::Sequential, query, |_, status, _| {
                            status == DocumentStatus::Actual
                        })
                        .expect("query"),
                );
            }
        });
    });

    c.bench_function("find_top_documents_parallel", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(
                    server
                        .find_top_documents_with(ExecutionPolicy::Parallel, query, |_, status, _| {
                            status == DocumentStatus::Actual
                        })
                        .expect("query"),
                );
            }
        });
    });

    c.bench_function("process_queries", |b| {
        b.iter(|| black_box(process_queries(&server, &queries).expect("queries")));
    });

    c.bench_function("match_document_parallel", |b| {
        b.iter(|| {
            for (id, query) in (0..).zip(&queries) {
                black_box(
                    server
                        .match_document_with(ExecutionPolicy::Parallel, query, id)
                        .expect("match"),
                );
            }
        });
    });
}

fn remove_benchmark(c: &mut Criterion) {
    let (server, _) = build_server();

    for (name, policy) in [
        ("remove_document_sequential", ExecutionPolicy::Sequential),
        ("remove_document_parallel", ExecutionPolicy::Parallel),
    ] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || server.clone(),
                |mut server| {
                    for id in (0..DOCUMENT_COUNT).step_by(100) {
                        server.remove_document_with(policy, id);
                    }
                    server
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
}

criterion_group!(benches, search_benchmark, remove_benchmark);
criterion_main!(benches);
