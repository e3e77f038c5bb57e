use cipherforge::api::TextAnalysis;
use cipherforge::scorer::{Candidate, CandidateFailure};
use cipherforge::search::SearchReport;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

const PREVIEW_CHARS: usize = 60;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}

pub fn print_candidates(report: &SearchReport) {
    println!(
        "\nEvaluated {} keys in {:.2?} ({} failed{})",
        report.evaluated,
        report.elapsed,
        report.failures.len(),
        if report.stopped_early {
            ", stopped early"
        } else {
            ""
        }
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Plaintext"),
    ]);

    for (rank, c) in report.ranked.iter().enumerate() {
        let key_cell = Cell::new(c.key.to_string());
        table.add_row(vec![
            Cell::new(rank + 1),
            if rank == 0 {
                key_cell.fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                key_cell
            },
            Cell::new(format!("{:.2}", c.score)).fg(Color::Cyan),
            Cell::new(preview(&c.plaintext)),
        ]);
    }
    align_right(&mut table, 0..=0);
    align_right(&mut table, 2..=2);
    println!("{}", table);
}

pub fn print_features(candidates: &[Candidate]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Words").fg(Color::Green),
        Cell::new("Common").fg(Color::Green),
        Cell::new("AvgLen"),
        Cell::new("IC"),
        Cell::new("Chi²").fg(Color::Red),
        Cell::new("H"),
        Cell::new("H|prev"),
        Cell::new("D(p‖q)").fg(Color::Red),
        Cell::new("H₂"),
    ]);

    for c in candidates {
        let f = &c.features;
        table.add_row(vec![
            Cell::new(c.key.to_string()).add_attribute(Attribute::Bold),
            Cell::new(f.dictionary_match_count).fg(Color::Green),
            Cell::new(f.common_word_score).fg(Color::Green),
            Cell::new(format!("{:.2}", f.average_word_length)),
            Cell::new(format!("{:.4}", f.index_of_coincidence)),
            Cell::new(format!("{:.1}", f.chi_squared)).fg(Color::Red),
            Cell::new(format!("{:.3}", f.shannon_entropy)),
            Cell::new(format!("{:.3}", f.conditional_entropy)),
            Cell::new(format!("{:.3}", f.relative_entropy)).fg(Color::Red),
            Cell::new(format!("{:.3}", f.bigram_entropy)),
        ]);
    }
    align_right(&mut table, 1..=9);
    println!("{}", table);
}

pub fn print_failures(failures: &[CandidateFailure]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Ordinal").add_attribute(Attribute::Bold),
        Cell::new("Key"),
        Cell::new("Reason").fg(Color::Red),
    ]);
    for f in failures {
        table.add_row(vec![
            Cell::new(f.ordinal),
            Cell::new(f.key.to_string()),
            Cell::new(&f.reason).fg(Color::Red),
        ]);
    }
    println!("\nSkipped keys:\n{}", table);
}

pub fn print_analysis(a: &TextAnalysis) {
    println!("\n=== TEXT ANALYSIS ({} letters) ===", a.letter_count);

    let mut summary = new_table();
    let e = &a.entropy;
    let rows: Vec<(&str, String)> = vec![
        ("Index of coincidence", format!("{:.4}", a.index_of_coincidence)),
        ("Chi-squared vs profile", format!("{:.2}", a.chi_squared)),
        ("L1 distance to profile", format!("{:.4}", a.profile_distance)),
        ("Shannon entropy", format!("{:.4}", e.shannon)),
        (
            "Normalized entropy",
            e.normalized
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "n/a".to_string()),
        ),
        ("Conditional entropy", format!("{:.4}", e.conditional)),
        ("Joint entropy (halves)", format!("{:.4}", e.joint)),
        ("Mutual information", format!("{:.4}", e.mutual_information)),
        ("Relative entropy", format!("{:.4}", e.relative_to_profile)),
        ("Cross entropy", format!("{:.4}", e.cross_to_profile)),
        ("Entropy rate", format!("{:.6}", e.entropy_rate)),
    ];
    for (name, value) in rows {
        summary.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }
    for (n, h) in &e.ngram_entropies {
        summary.add_row(vec![
            Cell::new(format!("{}-gram entropy", n)).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.4}", h)),
        ]);
    }
    align_right(&mut summary, 1..=1);
    println!("{}", summary);

    let mut freq = new_table();
    freq.add_row(vec![
        Cell::new("Letter").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Observed").fg(Color::Cyan),
        Cell::new("Expected"),
        Cell::new("Deviation").fg(Color::Red),
        Cell::new("Maps to").fg(Color::Green),
    ]);
    for (d, (_, guess)) in a.frequencies.iter().zip(a.substitutions.iter()) {
        freq.add_row(vec![
            Cell::new(d.letter).add_attribute(Attribute::Bold),
            Cell::new(d.count),
            Cell::new(format!("{:.4}", d.frequency)).fg(Color::Cyan),
            Cell::new(format!("{:.4}", d.expected)),
            Cell::new(format!("{:.4}", d.deviation)).fg(Color::Red),
            Cell::new(guess).fg(Color::Green),
        ]);
    }
    align_right(&mut freq, 1..=4);
    println!("\nLetter frequencies:\n{}", freq);

    let mut grams = new_table();
    grams.add_row(vec![
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Trigram").add_attribute(Attribute::Bold),
        Cell::new("Count"),
    ]);
    let rows = a.bigrams.len().max(a.trigrams.len());
    for i in 0..rows {
        let (b, bc) = a
            .bigrams
            .get(i)
            .map(|g| (g.sequence.clone(), g.count.to_string()))
            .unwrap_or_default();
        let (t, tc) = a
            .trigrams
            .get(i)
            .map(|g| (g.sequence.clone(), g.count.to_string()))
            .unwrap_or_default();
        grams.add_row(vec![Cell::new(b), Cell::new(bc), Cell::new(t), Cell::new(tc)]);
    }
    println!("\nMost frequent n-grams:\n{}", grams);

    let mut kasiski = new_table();
    kasiski.add_row(vec![
        Cell::new("Key length").add_attribute(Attribute::Bold),
        Cell::new("Recurrence").fg(Color::Cyan),
    ]);
    for len in a.kasiski.ranked_key_lengths() {
        let freq = a.kasiski.factor_frequencies.get(&len).copied().unwrap_or(0);
        kasiski.add_row(vec![Cell::new(len), Cell::new(freq).fg(Color::Cyan)]);
    }
    println!(
        "\nKasiski examination ({} repeated patterns):\n{}",
        a.repeated_patterns.len(),
        kasiski
    );

    let mut langs = new_table();
    langs.add_row(vec![
        Cell::new("Language").add_attribute(Attribute::Bold),
        Cell::new("Word score").fg(Color::Cyan),
    ]);
    for (name, score) in &a.languages {
        langs.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.4}", score)).fg(Color::Cyan),
        ]);
    }
    align_right(&mut langs, 1..=1);
    println!(
        "\nLanguage detection ({:.1}% dictionary words, {} valid):\n{}",
        a.language_confidence,
        a.valid_words.len(),
        langs
    );

    let mut periodic = new_table();
    periodic.add_row(vec![
        Cell::new("Period").add_attribute(Attribute::Bold),
        Cell::new("Mean column IC").fg(Color::Cyan),
    ]);
    for (p, ic) in &a.periodic_ic {
        periodic.add_row(vec![Cell::new(p), Cell::new(format!("{:.4}", ic))]);
    }
    println!("\nPeriodic index of coincidence:\n{}", periodic);
}
