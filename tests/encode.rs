//! Run encoding: merging, splitting at the length cap, gaps, and the
//! whole-table properties on real and randomized data.

mod common;

use std::collections::BTreeSet;

use cprun::{
    tables::{
        CategoryMapper, GrammarRule, MAX_RUN_LENGTH, Run, RunTable, build_table, code_run_array,
        encode_runs, verify_table,
    },
    ucd::{CodePoint, Database, GeneralCategory, MAX_CODE_POINT},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn runs_of(rule: GrammarRule, lo: CodePoint, hi: CodePoint) -> Vec<Run> {
    encode_runs(|cp| (lo..=hi).contains(&cp).then_some(rule))
        .unwrap()
        .runs
}

fn triples(runs: &[Run]) -> Vec<(CodePoint, u32, GrammarRule)> {
    runs.iter().map(|r| (r.code_point(), r.length(), r.rule())).collect()
}

fn assert_table_properties(runs: &[Run]) {
    for r in runs {
        assert!(r.length() >= 1 && r.length() <= MAX_RUN_LENGTH, "{r:?}");
        assert!(r.code_point() + r.length() - 1 <= MAX_CODE_POINT, "{r:?}");
    }
    for w in runs.windows(2) {
        assert!(w[0].end() <= w[1].code_point(), "{:?} overlaps {:?}", w[0], w[1]);
    }
}

#[test]
fn uppercase_latin_is_one_run() {
    let mapper = CategoryMapper::new(common::sample_db()).unwrap();
    let runs = code_run_array(&mapper).unwrap().runs;
    assert!(triples(&runs).contains(&(0x41, 26, GrammarRule::IdentifierStart)));
}

#[test]
fn dollar_lands_in_identifier_start_run() {
    let mapper = CategoryMapper::new(common::sample_db()).unwrap();
    let table = RunTable::new(code_run_array(&mapper).unwrap().runs).unwrap();
    assert_eq!(table.lookup(0x24), Some(GrammarRule::IdentifierStart));
    assert!(table.is_identifier_start(0x24));
}

#[test]
fn long_run_splits_at_cap() {
    let runs = runs_of(GrammarRule::IdentifierPart, 0x1000, 0x1000 + 599);
    assert_eq!(
        triples(&runs),
        vec![
            (0x1000, 511, GrammarRule::IdentifierPart),
            (0x1000 + 511, 89, GrammarRule::IdentifierPart),
        ]
    );
}

#[test]
fn long_database_block_splits_at_cap() {
    let db = common::block(0x1000..=0x1000 + 599, GeneralCategory::UppercaseLetter);
    let mapper = CategoryMapper::new(db).unwrap();
    let runs = code_run_array(&mapper).unwrap().runs;
    let block: Vec<_> = triples(&runs)
        .into_iter()
        .filter(|t| (0x1000..0x1000 + 600).contains(&t.0))
        .collect();
    assert_eq!(
        block,
        vec![
            (0x1000, 511, GrammarRule::IdentifierStart),
            (0x1000 + 511, 89, GrammarRule::IdentifierStart),
        ]
    );
}

#[test]
fn cap_boundary() {
    // Exactly 511 fits in one record.
    let runs = runs_of(GrammarRule::Whitespace, 0x100, 0x100 + 510);
    assert_eq!(triples(&runs), vec![(0x100, 511, GrammarRule::Whitespace)]);

    // 512 does not.
    let runs = runs_of(GrammarRule::Whitespace, 0x100, 0x100 + 511);
    assert_eq!(
        triples(&runs),
        vec![(0x100, 511, GrammarRule::Whitespace), (0x100 + 511, 1, GrammarRule::Whitespace)]
    );

    let runs = runs_of(GrammarRule::Whitespace, 0x100, 0x100 + 1021);
    assert_eq!(triples(&runs).iter().map(|t| t.1).collect::<Vec<_>>(), vec![511, 511]);
}

#[test]
fn rule_change_closes_run() {
    let runs = encode_runs(|cp| match cp {
        0x10..=0x13 => Some(GrammarRule::IdentifierStart),
        0x14..=0x15 => Some(GrammarRule::IdentifierPart),
        0x17 => Some(GrammarRule::IdentifierPart),
        _ => None,
    })
    .unwrap()
    .runs;
    assert_eq!(
        triples(&runs),
        vec![
            (0x10, 4, GrammarRule::IdentifierStart),
            (0x14, 2, GrammarRule::IdentifierPart),
            (0x17, 1, GrammarRule::IdentifierPart),
        ]
    );
}

#[test]
fn empty_and_full_edges() {
    assert!(encode_runs(|_| None).unwrap().runs.is_empty());

    let runs = runs_of(GrammarRule::IdentifierStart, 0, 0);
    assert_eq!(triples(&runs), vec![(0, 1, GrammarRule::IdentifierStart)]);

    // A run still open at the last code point is closed.
    let runs = runs_of(GrammarRule::IdentifierStart, MAX_CODE_POINT - 2, MAX_CODE_POINT);
    assert_eq!(triples(&runs), vec![(MAX_CODE_POINT - 2, 3, GrammarRule::IdentifierStart)]);

    let summary = encode_runs(|_| Some(GrammarRule::IdentifierPart)).unwrap();
    assert_eq!(summary.longest_run, MAX_RUN_LENGTH);
    assert_table_properties(&summary.runs);
    let covered: u64 = summary.runs.iter().map(|r| r.length() as u64).sum();
    assert_eq!(covered, MAX_CODE_POINT as u64 + 1);
}

#[test]
fn sample_table_matches_expected_records() {
    let (_, summary) = build_table(common::sample_db(), true).unwrap();
    let t = triples(&summary.runs);
    use GrammarRule::*;
    assert_eq!(
        &t[..9],
        &[
            (0x09, 5, Whitespace),
            (0x20, 1, Whitespace),
            (0x24, 1, IdentifierStart),
            (0x30, 10, IdentifierPart),
            (0x41, 26, IdentifierStart),
            (0x5F, 1, IdentifierStart),
            (0x61, 26, IdentifierStart),
            (0xA0, 1, Whitespace),
            (0x200C, 2, IdentifierPart),
        ]
    );
    // CJK Extension A: 6592 code points = 12 * 511 + 460.
    let cjk: Vec<_> = t.iter().filter(|r| (0x3400..0x4DC0).contains(&r.0)).collect();
    assert_eq!(cjk.len(), 13);
    assert!(cjk[..12].iter().all(|r| r.1 == 511));
    assert_eq!(cjk[12].1, 460);
    assert_eq!(t.last(), Some(&(0xFEFF, 1, Whitespace)));
    assert_eq!(t.len(), 9 + 13 + 1);
}

const CATEGORIES: &[GeneralCategory] = &[
    GeneralCategory::UppercaseLetter,
    GeneralCategory::LowercaseLetter,
    GeneralCategory::OtherLetter,
    GeneralCategory::DecimalNumber,
    GeneralCategory::NonspacingMark,
    GeneralCategory::SpaceSeparator,
    GeneralCategory::MathSymbol,
    GeneralCategory::Control,
];

fn random_db(rng: &mut StdRng) -> Database {
    let mut db = Database::new();
    let mut cp: CodePoint = 0;
    while cp <= MAX_CODE_POINT {
        // Long blocks of one category mixed with short noisy stretches and gaps.
        let len = if rng.random_bool(0.1) {
            rng.random_range(300..2000)
        } else {
            rng.random_range(1..8)
        };
        let hi = cp.saturating_add(len - 1).min(MAX_CODE_POINT);
        if !rng.random_bool(0.3) {
            let cat = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
            for c in cp..=hi {
                db.insert(c, common::rec("RANDOM", cat));
            }
        }
        // Skip far ahead now and then so most of the space stays unassigned.
        cp = hi + 1 + if rng.random_bool(0.05) { rng.random_range(0..50_000) } else { 0 };
    }
    db
}

#[test]
fn randomized_tables_hold_invariants() {
    for seed in [1u64, 7, 42] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mapper = CategoryMapper::new(random_db(&mut rng)).unwrap();
        let runs = code_run_array(&mapper).unwrap().runs;

        assert_table_properties(&runs);
        verify_table(&runs, |cp| mapper.classify(cp)).unwrap();

        let table = RunTable::new(runs).unwrap();
        let expanded: BTreeSet<(CodePoint, GrammarRule)> = table.expand().collect();
        let classified: BTreeSet<(CodePoint, GrammarRule)> = (0..=MAX_CODE_POINT)
            .filter_map(|cp| mapper.classify(cp).map(|r| (cp, r)))
            .collect();
        assert_eq!(expanded, classified, "seed {seed}");
    }
}
