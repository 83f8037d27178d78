use std::path::Path;

use wordtree::{CasePolicy, Dictionary, Lookup, Speller};

fn load() -> Dictionary {
    let path = Path::new("tests/words.txt");
    Dictionary::load(path, CasePolicy::KeepFirst).unwrap()
}

#[test]
fn load_word_list() {
    let dict = load();
    assert_eq!(35, dict.words_read());
    assert_eq!(34, dict.tree().len());
    assert_eq!(&[7], dict.skipped_lines());
    assert_eq!(Ok(()), dict.tree().check_invariants());

    let n = dict.tree().len() as f64;
    assert!((dict.tree().height() as f64) <= 1.45 * (n + 2.0).log2());
}

#[test]
fn match_words_ignoring_case() {
    let dict = load();

    assert!(dict.spellcheck("Alberta"));
    assert!(dict.spellcheck("alberta"));
    assert!(dict.spellcheck("ANGLE"));
    assert!(dict.spellcheck("cherry")); // rest of the line is ignored
    assert!(dict.spellcheck("Zucchini"));

    assert!(!dict.spellcheck("agnle"));
    assert!(!dict.spellcheck("anglisism"));
    assert!(!dict.spellcheck("apear"));
    assert!(!dict.spellcheck("fruit"));

    // First casing seen wins.
    match dict.lookup("GRAPE") {
        Lookup::Found(node) => assert_eq!("grape", node.word()),
        other => panic!("grape not found: {:?}", other),
    }
}

#[test]
fn suggest_at_the_ends() {
    let dict = load();

    let suggs = match dict.lookup("zzz") {
        Lookup::Missing(Some(suggs)) => suggs,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!("zucchini", suggs.closest.word());
    assert_eq!(None, suggs.successor);
    assert_eq!(Some("yam"), suggs.predecessor.map(|n| n.word()));

    let suggs = match dict.lookup("aaa") {
        Lookup::Missing(Some(suggs)) => suggs,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!("Alberta", suggs.closest.word());
    assert_eq!(Some("angle"), suggs.successor.map(|n| n.word()));
    assert_eq!(None, suggs.predecessor);
}

#[test]
fn suggest_sorted_neighbours() {
    let dict = load();
    let sorted: Vec<String> = dict.tree().iter().map(str::to_lowercase).collect();

    for query in ["apear", "bananas", "cheery", "lemmon", "peech", "walnuts"] {
        let pos = sorted.partition_point(|w| w.as_str() < query);
        let speller: &dyn Speller = &dict;
        let suggs = speller.suggestions(query, 3);
        assert!(!suggs.is_empty());

        // A failed search ends next to where the word would go.
        let closest = suggs[0].to_lowercase();
        let neighbours = [pos.checked_sub(1), Some(pos)]
            .into_iter()
            .flatten()
            .filter_map(|i| sorted.get(i))
            .collect::<Vec<_>>();
        assert!(neighbours.contains(&&closest), "{} -> {}", query, closest);
    }
}

#[test]
fn add_words() {
    let mut dict = load();
    assert!(!dict.spellcheck("durian"));
    assert!(dict.add_word("Durian"));
    assert!(dict.spellcheck("durian"));
    assert!(!dict.add_word("jack fruit"));
    assert_eq!(35, dict.tree().len());
    assert_eq!(Ok(()), dict.tree().check_invariants());
}
