use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wordtree::{BoundedWord, CasePolicy, Dictionary, Speller, WordTree};

/// A deterministic list of pseudo-words, in scrambled order.
fn word_list(count: usize) -> Vec<String> {
    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..count)
        .map(|_| {
            // xorshift
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let len = 3 + (state % 8) as usize;
            (0..len)
                .map(|i| LETTERS[((state >> (i * 5)) % 26) as usize] as char)
                .collect()
        })
        .collect()
}

fn load(c: &mut Criterion) {
    let text = word_list(50_000).join("\n");

    c.bench_function("load_50k", |b| {
        b.iter(|| Dictionary::from_text(black_box(&text), CasePolicy::KeepFirst))
    });
}

fn insert_sorted(c: &mut Criterion) {
    let mut words = word_list(50_000);
    words.sort();
    let words: Vec<BoundedWord> = words
        .iter()
        .map(|w| BoundedWord::try_from(w.as_str()).unwrap())
        .collect();

    c.bench_function("insert_sorted_50k", |b| {
        b.iter(|| words.iter().cloned().collect::<WordTree>())
    });
}

fn search(c: &mut Criterion) {
    let words = word_list(50_000);
    let dict = Dictionary::from_text(&words.join("\n"), CasePolicy::KeepFirst);

    c.bench_function("spellcheck_hit", |b| {
        b.iter(|| dict.spellcheck(black_box(&words[12_345])))
    });
    c.bench_function("suggest_miss", |b| {
        b.iter(|| dict.suggestions(black_box("qqqqzzzz"), 3))
    });
}

criterion_group!(benches, load, insert_sorted, search);
criterion_main!(benches);
