use std::collections::HashMap;

/// Fixity and associativity of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorKind {
    /// Sentinel returned by lookups for symbols that are not operators.
    #[default]
    None,
    InfixLeftAssociative,
    InfixRightAssociative,
    PreFix,
}

impl OperatorKind {
    pub fn is_infix(&self) -> bool {
        matches!(
            self,
            OperatorKind::InfixLeftAssociative | OperatorKind::InfixRightAssociative
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatorInfo {
    pub symbol: char,
    pub kind: OperatorKind,
    pub precedence: i32,
    pub is_built_in: bool,
}

impl OperatorInfo {
    fn built_in(symbol: char, kind: OperatorKind, precedence: i32) -> Self {
        OperatorInfo {
            symbol,
            kind,
            precedence,
            is_built_in: true,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == OperatorKind::None
    }
}

pub const ASSIGNMENT_PRECEDENCE: i32 = 2;
pub const DEFAULT_BINARY_PRECEDENCE: i32 = 30;
pub const DEFAULT_UNARY_PRECEDENCE: i32 = 100;
pub const MAX_PRECEDENCE: i32 = 100;

/// Infix and prefix operators known to a session.
///
/// Built in entries are seeded by [`OperatorTable::new`] and can never be
/// replaced. User entries may be registered and replaced at any time and the
/// change is seen by the next lookup.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    infix: HashMap<char, OperatorInfo>,
    prefix: HashMap<char, OperatorInfo>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorTable {
    pub fn new() -> Self {
        let mut infix = HashMap::new();

        for info in [
            OperatorInfo::built_in('=', OperatorKind::InfixRightAssociative, ASSIGNMENT_PRECEDENCE),
            OperatorInfo::built_in('<', OperatorKind::InfixLeftAssociative, 10),
            OperatorInfo::built_in('+', OperatorKind::InfixLeftAssociative, 20),
            OperatorInfo::built_in('-', OperatorKind::InfixLeftAssociative, 20),
            OperatorInfo::built_in('*', OperatorKind::InfixLeftAssociative, 40),
            OperatorInfo::built_in('/', OperatorKind::InfixLeftAssociative, 40),
            OperatorInfo::built_in('^', OperatorKind::InfixRightAssociative, 50),
        ] {
            infix.insert(info.symbol, info);
        }

        OperatorTable {
            infix,
            prefix: HashMap::new(),
        }
    }

    /// Adds or replaces a user defined operator.
    ///
    /// Returns `false`, leaving the table untouched, if `symbol` is already a
    /// built in operator of the same fixity or `kind` is `OperatorKind::None`.
    pub fn register_operator(&mut self, symbol: char, kind: OperatorKind, precedence: i32) -> bool {
        let table = match kind {
            OperatorKind::None => return false,
            OperatorKind::PreFix => &mut self.prefix,
            OperatorKind::InfixLeftAssociative | OperatorKind::InfixRightAssociative => {
                &mut self.infix
            }
        };

        if table.get(&symbol).is_some_and(|info| info.is_built_in) {
            return false;
        }

        table.insert(
            symbol,
            OperatorInfo {
                symbol,
                kind,
                precedence,
                is_built_in: false,
            },
        );
        true
    }

    pub fn lookup_infix(&self, symbol: char) -> OperatorInfo {
        self.infix.get(&symbol).copied().unwrap_or_default()
    }

    pub fn lookup_prefix(&self, symbol: char) -> OperatorInfo {
        self.prefix.get(&symbol).copied().unwrap_or_default()
    }

    pub fn is_infix_op(&self, symbol: char) -> bool {
        self.infix.contains_key(&symbol)
    }

    pub fn is_prefix_op(&self, symbol: char) -> bool {
        self.prefix.contains_key(&symbol)
    }

    /// Infix precedence of `symbol`, `0` if it is not an infix operator.
    pub fn precedence(&self, symbol: char) -> i32 {
        self.infix.get(&symbol).map_or(0, |info| info.precedence)
    }

    /// Minimum precedence for the operand on the right of `op`.
    ///
    /// Left associative operators only let strictly tighter operators into
    /// their right operand; right associative and prefix operators also
    /// accept operators of their own precedence.
    pub fn next_binding_power(op: &OperatorInfo) -> i32 {
        match op.kind {
            OperatorKind::InfixLeftAssociative => op.precedence + 1,
            _ => op.precedence,
        }
    }
}
