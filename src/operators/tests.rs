use super::operators::{OperatorKind, OperatorTable};

#[test]
fn test_builtins_seeded() {
    let table = OperatorTable::new();

    let plus = table.lookup_infix('+');
    assert_eq!(plus.kind, OperatorKind::InfixLeftAssociative);
    assert_eq!(plus.precedence, 20);
    assert!(plus.is_built_in);

    assert_eq!(table.precedence('<'), 10);
    assert_eq!(table.precedence('-'), 20);
    assert_eq!(table.precedence('*'), 40);
    assert_eq!(table.precedence('/'), 40);
    assert_eq!(table.precedence('='), 2);

    let pow = table.lookup_infix('^');
    assert_eq!(pow.kind, OperatorKind::InfixRightAssociative);
    assert_eq!(pow.precedence, 50);
}

#[test]
fn test_unknown_symbol_is_sentinel() {
    let table = OperatorTable::new();

    assert!(table.lookup_infix('|').is_none());
    assert!(table.lookup_prefix('|').is_none());
    assert!(table.lookup_prefix('-').is_none());
    assert!(!table.is_infix_op('|'));
    assert!(!table.is_prefix_op('!'));
    assert_eq!(table.precedence('|'), 0);
}

#[test]
fn test_register_new_operator() {
    let mut table = OperatorTable::new();

    assert!(table.register_operator('|', OperatorKind::InfixLeftAssociative, 15));
    let info = table.lookup_infix('|');
    assert_eq!(info.kind, OperatorKind::InfixLeftAssociative);
    assert_eq!(info.precedence, 15);
    assert!(!info.is_built_in);
    assert!(table.is_infix_op('|'));

    assert!(table.register_operator('!', OperatorKind::PreFix, 100));
    assert!(table.is_prefix_op('!'));
    assert!(!table.is_infix_op('!'));
}

#[test]
fn test_user_operator_last_wins() {
    let mut table = OperatorTable::new();

    assert!(table.register_operator('|', OperatorKind::InfixLeftAssociative, 15));
    assert!(table.register_operator('|', OperatorKind::InfixRightAssociative, 7));

    let info = table.lookup_infix('|');
    assert_eq!(info.kind, OperatorKind::InfixRightAssociative);
    assert_eq!(info.precedence, 7);
}

#[test]
fn test_builtin_cannot_be_replaced() {
    let mut table = OperatorTable::new();

    assert!(!table.register_operator('+', OperatorKind::InfixRightAssociative, 99));
    let plus = table.lookup_infix('+');
    assert_eq!(plus.kind, OperatorKind::InfixLeftAssociative);
    assert_eq!(plus.precedence, 20);

    assert!(!table.register_operator('=', OperatorKind::InfixLeftAssociative, 5));
    assert_eq!(table.precedence('='), 2);
}

#[test]
fn test_builtin_symbol_as_prefix() {
    let mut table = OperatorTable::new();

    assert!(table.register_operator('-', OperatorKind::PreFix, 100));
    assert!(table.is_prefix_op('-'));
    assert_eq!(table.lookup_infix('-').precedence, 20);
}

#[test]
fn test_register_none_kind_rejected() {
    let mut table = OperatorTable::new();
    assert!(!table.register_operator('|', OperatorKind::None, 10));
    assert!(!table.is_infix_op('|'));
}

#[test]
fn test_next_binding_power() {
    let mut table = OperatorTable::new();
    table.register_operator('!', OperatorKind::PreFix, 60);

    assert_eq!(OperatorTable::next_binding_power(&table.lookup_infix('+')), 21);
    assert_eq!(OperatorTable::next_binding_power(&table.lookup_infix('^')), 50);
    assert_eq!(OperatorTable::next_binding_power(&table.lookup_prefix('!')), 60);
}
