//! Benchmarks for assembly, lookup and validation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tome_corpus::{
    Category, CategoryId, Difficulty, Entry, EntryId, LanguageId, LanguageMeta, PartModule,
    QuizQuestion, Section, assemble, validate,
};

fn meta() -> LanguageMeta {
    LanguageMeta {
        id: LanguageId::new("javascript"),
        label: "JavaScript".to_owned(),
        icon: String::new(),
        color: String::new(),
        official_url: String::new(),
        tagline: String::new(),
        playground_url: String::new(),
        execution_api_id: String::new(),
    }
}

fn entry(id: String) -> Entry {
    Entry {
        title: id.clone(),
        id: EntryId::new(id),
        difficulty: Difficulty::Intermediate,
        tags: vec!["generated".to_owned(), "bench".to_owned()],
        cheat_sheet_summary: "Generated entry.".to_owned(),
        sections: vec![Section {
            heading: "Example".to_owned(),
            content: "Generated section.".to_owned(),
            code: "const a = 1;\nconst b = 2;\nconsole.log(a + b);\n".to_owned(),
            output: "3".to_owned(),
            tip: None,
            warning: None,
            note: None,
            analogy: None,
            diagram: None,
            code_highlight_lines: Some(vec![1, 3]),
        }],
        quiz: Some(vec![QuizQuestion {
            question: "What is printed?".to_owned(),
            options: vec!["3".to_owned(), "12".to_owned()],
            correct_index: 0,
            explanation: "Numbers add.".to_owned(),
        }]),
        challenge: None,
    }
}

/// Synthetic parts: `parts` files, each with `categories` categories of
/// `entries` entries.
fn create_parts(parts: usize, categories: usize, entries: usize) -> Vec<PartModule> {
    (0..parts)
        .map(|p| {
            let categories = (0..categories)
                .map(|c| Category {
                    id: CategoryId::new(format!("p{p}-c{c}")),
                    label: format!("Category {c}"),
                    icon: String::new(),
                    entries: (0..entries)
                        .map(|e| entry(format!("p{p}-c{c}-e{e}")))
                        .collect(),
                })
                .collect();
            PartModule::new(format!("part{p}"), categories)
        })
        .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for (parts, categories, entries) in [(4, 5, 10), (10, 10, 20)] {
        let input = create_parts(parts, categories, entries);
        group.bench_with_input(
            BenchmarkId::new("parts", format!("p{parts}_c{categories}_e{entries}")),
            &input,
            |b, input| b.iter(|| assemble(meta(), input.clone())),
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let assembly = assemble(meta(), create_parts(10, 10, 20));

    let mut group = c.benchmark_group("lookup");

    group.bench_function("entry_hit", |b| b.iter(|| assembly.entry("p9-c9-e19")));
    group.bench_function("entry_miss", |b| b.iter(|| assembly.entry("missing")));
    group.bench_function("next", |b| b.iter(|| assembly.next("p4-c9-e19")));

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let assembly = assemble(meta(), create_parts(10, 10, 20));

    c.bench_function("validate", |b| b.iter(|| validate(&assembly)));
}

criterion_group!(benches, bench_assemble, bench_lookup, bench_validate);
criterion_main!(benches);
