//! Category mapping and the per-code-point override patch.

mod common;

use cprun::{
    CprunError,
    tables::{
        CategoryMapper, CategoryTable, GrammarRule, OVERRIDES, apply_overrides, check_overrides,
        mapper::{OVERRIDE_NAME, Override},
    },
    ucd::GeneralCategory,
};

#[test]
fn static_override_table_is_consistent() {
    check_overrides(&CategoryTable::default(), OVERRIDES).unwrap();
}

#[test]
fn inconsistent_override_is_fatal() {
    let bad = [Override {
        code_point: 0x0024,
        category: GeneralCategory::CurrencySymbol,
        produces: GrammarRule::IdentifierStart,
    }];
    match check_overrides(&CategoryTable::default(), &bad) {
        Err(CprunError::InconsistentOverride {
            code_point,
            expected,
            actual,
            ..
        }) => {
            assert_eq!(code_point, 0x24);
            assert_eq!(expected, GrammarRule::IdentifierStart);
            assert_eq!(actual, None);
        }
        other => panic!("expected InconsistentOverride, got {other:?}"),
    }

    let wrong_rule = [Override {
        code_point: 0x200C,
        category: GeneralCategory::SpacingMark,
        produces: GrammarRule::Whitespace,
    }];
    assert!(check_overrides(&CategoryTable::default(), &wrong_rule).is_err());
}

#[test]
fn overrides_are_idempotent() {
    let table = CategoryTable::default();
    let once = apply_overrides(common::sample_db(), &table).unwrap();
    let twice = apply_overrides(once.clone(), &table).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn overrides_reach_their_rules() {
    let mapper = CategoryMapper::new(common::sample_db()).unwrap();
    for cp in [0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20, 0xA0, 0xFEFF] {
        assert_eq!(mapper.classify(cp), Some(GrammarRule::Whitespace), "U+{cp:04X}");
    }
    assert_eq!(mapper.classify(0x24), Some(GrammarRule::IdentifierStart));
    assert_eq!(mapper.classify(0x5F), Some(GrammarRule::IdentifierStart));
    assert_eq!(mapper.classify(0x200C), Some(GrammarRule::IdentifierPart));
    assert_eq!(mapper.classify(0x200D), Some(GrammarRule::IdentifierPart));
    // Names survive; only the category changes.
    assert_eq!(mapper.database().get(0x24).unwrap().name, "DOLLAR SIGN");
}

#[test]
fn classification_without_rule() {
    let mapper = CategoryMapper::new(common::sample_db()).unwrap();
    // Not in the database at all.
    assert_eq!(mapper.classify(0x5B), None);
    assert_eq!(mapper.classify(0x10FFFF), None);

    let mut db = common::sample_db();
    db.insert(0x2B, common::rec("PLUS SIGN", GeneralCategory::MathSymbol));
    let mapper = CategoryMapper::new(db).unwrap();
    assert_eq!(mapper.classify(0x2B), None);
    assert_eq!(mapper.classify(0x30), Some(GrammarRule::IdentifierPart));
}

#[test]
fn missing_override_entries_are_inserted() {
    let mapper = CategoryMapper::new(Default::default()).unwrap();
    assert_eq!(mapper.database().len(), OVERRIDES.len());
    let bom = mapper.database().get(0xFEFF).unwrap();
    assert_eq!(bom.name, OVERRIDE_NAME);
    assert_eq!(mapper.classify(0xFEFF), Some(GrammarRule::Whitespace));
}
