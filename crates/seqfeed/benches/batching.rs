#![allow(missing_docs)]

use std::{
    io::Cursor,
    sync::{Arc, LazyLock},
};

use divan::{Bencher, black_box, counter::ItemsCount};
use rand::{Rng, SeedableRng, rngs::StdRng};
use seqfeed::{
    batching::{BatchIterator, BatchIteratorOptions, ShuffleBuffer},
    embedding::{EmbeddingOptions, read_word2vec_embedding},
    vocab::{VocabTable, VocabTables},
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const VOCAB_SIZE: usize = 5_000;
const LINES: usize = 20_000;

struct Corpus {
    tables: VocabTables<u32>,
    source: Vec<u8>,
    target: Vec<u8>,
}

fn random_lines(
    rng: &mut StdRng,
    prefix: &str,
) -> Vec<u8> {
    let mut text = String::new();
    for _ in 0..LINES {
        let len = rng.random_range(1..60);
        let words: Vec<String> = (0..len)
            .map(|_| format!("{prefix}{}", rng.random_range(0..VOCAB_SIZE + 100)))
            .collect();
        text.push_str(&words.join(" "));
        text.push('\n');
    }
    text.into_bytes()
}

static CORPUS: LazyLock<Corpus> = LazyLock::new(|| {
    let mut rng = StdRng::seed_from_u64(42);
    let source = VocabTable::from_tokens((0..VOCAB_SIZE).map(|i| format!("s{i}")), None).unwrap();
    let target = VocabTable::from_tokens((0..VOCAB_SIZE).map(|i| format!("t{i}")), None).unwrap();
    Corpus {
        tables: VocabTables::new(Arc::new(source), Arc::new(target)),
        source: random_lines(&mut rng, "s"),
        target: random_lines(&mut rng, "t"),
    }
});

static VECTORS: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut text = format!("{VOCAB_SIZE} 30\n");
    for i in 0..VOCAB_SIZE {
        text.push_str(&format!("s{i}"));
        for j in 0..30 {
            text.push_str(&format!(" {:.4}", ((i * 31 + j) % 97) as f32 / 97.0));
        }
        text.push('\n');
    }
    text.into_bytes()
});

#[divan::bench(args = [1, 4])]
fn batch_iterator(
    bencher: Bencher,
    num_threads: usize,
) {
    let corpus = &*CORPUS;
    let options = BatchIteratorOptions::new(128)
        .with_buffer_size(Some(4096))
        .with_random_seed(Some(7))
        .with_num_threads(num_threads);

    bencher.counter(ItemsCount::new(LINES)).bench(|| {
        let batches = BatchIterator::from_readers(
            Cursor::new(corpus.source.clone()),
            Cursor::new(corpus.target.clone()),
            corpus.tables.clone(),
            &options,
        )
        .unwrap();
        for batch in batches {
            black_box(batch.unwrap());
        }
    });
}

#[divan::bench(args = [1, 1024, 65536])]
fn shuffle_buffer(
    bencher: Bencher,
    capacity: usize,
) {
    bencher.counter(ItemsCount::new(LINES)).bench(|| {
        let shuffled = ShuffleBuffer::new(0..LINES, capacity, Some(3));
        for x in shuffled {
            black_box(x);
        }
    });
}

#[divan::bench]
fn load_embedding(bencher: Bencher) {
    let vectors = &*VECTORS;
    let options = EmbeddingOptions::default().with_init_seed(Some(1));

    bencher.counter(ItemsCount::new(VOCAB_SIZE)).bench(|| {
        black_box(read_word2vec_embedding(Cursor::new(vectors.as_slice()), VOCAB_SIZE, &options).unwrap())
    });
}
