use clipper_core::{word_count, QualityGate};

#[test]
fn counts_words_including_apostrophes() {
    assert_eq!(word_count("It’s a scraper's test"), 4);
    assert_eq!(word_count(""), 0);
    assert_eq!(word_count("—  …  !!"), 0);
}

#[test]
fn counts_across_lines_and_punctuation() {
    assert_eq!(word_count("one two,\nthree. four"), 4);
}

#[test]
fn gate_accepts_exactly_at_the_floor() {
    let gate = QualityGate::new(120);
    let at_floor = (0..120).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    let below = (0..119).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    assert!(gate.accept(&at_floor));
    assert!(!gate.accept(&below));
}

#[test]
fn gate_rejects_empty_content() {
    let gate = QualityGate::new(120);
    assert!(!gate.accept(""));
}
