use crate::rule::Rule;

mod cmpbasic;
pub use self::cmpbasic::{CmpBasic, check_comparison, is_unsigned};

const CMP_BASIC: CmpBasic = CmpBasic;

/// Every built-in rule, in registration order
#[inline]
pub fn all() -> Vec<&'static dyn Rule> {
    vec![&CMP_BASIC]
}
