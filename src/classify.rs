//! Numeric predicates and the classification result.
//!
//! Every predicate takes the classification subject as an `i64`. Callers
//! holding a [`Number`] pass [`Number::subject`]; nothing here knows about
//! decimals or HTTP.

use serde::Serialize;

use crate::number::Number;

/// A tag in [`Classification::properties`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Armstrong,
    Even,
    Odd,
}

/// The response body of a successful classification.
#[derive(Debug, PartialEq, Serialize)]
pub struct Classification {
    pub number: Number,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u32,
    pub fun_fact: String,
}

impl Classification {
    /// Runs every predicate on `number`'s subject. The fun fact is resolved
    /// by the caller because it may involve I/O.
    pub fn new(number: Number, fun_fact: String) -> Self {
        let n = number.subject();
        Self {
            number,
            is_prime: is_prime(n),
            is_perfect: is_perfect(n),
            properties: properties(n),
            digit_sum: digit_sum(n),
            fun_fact,
        }
    }
}

/// Trial division up to and including ⌊√n⌋.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u64;
    (2..=n.isqrt()).all(|d| n % d != 0)
}

/// True iff `n` equals the sum of its divisors in `[1, n)`.
pub fn is_perfect(n: i64) -> bool {
    if n <= 0 {
        return false;
    }
    let n = n as u64;
    let mut sum: u128 = 0;
    for d in 1..=n.isqrt() {
        if n % d != 0 {
            continue;
        }
        let pair = n / d;
        if d != n {
            sum += u128::from(d);
        }
        if pair != d && pair != n {
            sum += u128::from(pair);
        }
    }
    sum == u128::from(n)
}

/// True iff `|n|` equals the sum of its digits each raised to the digit count.
pub fn is_armstrong(n: i64) -> bool {
    let digits = digits(n);
    let k = digits.len() as u32;
    let total: u128 = digits.iter().map(|&d| u128::from(d).pow(k)).sum();
    total == u128::from(n.unsigned_abs())
}

/// Sum of the decimal digits of `|n|`.
pub fn digit_sum(n: i64) -> u32 {
    digits(n).iter().map(|&d| u32::from(d)).sum()
}

/// `["armstrong"]` when it applies, then exactly one parity tag.
pub fn properties(n: i64) -> Vec<Property> {
    let mut props = Vec::with_capacity(2);
    if is_armstrong(n) {
        props.push(Property::Armstrong);
    }
    props.push(if n % 2 == 0 { Property::Even } else { Property::Odd });
    props
}

/// The locally generated fun fact.
///
/// ```
/// use numclass::classify::fun_fact;
///
/// assert_eq!(fun_fact(153, true), "153 is an Armstrong number because 1^3 + 5^3 + 3^3 = 153");
/// assert_eq!(fun_fact(10, false), "10 is not an Armstrong number.");
/// ```
pub fn fun_fact(n: i64, armstrong: bool) -> String {
    if !armstrong {
        return format!("{n} is not an Armstrong number.");
    }
    let digits = digits(n);
    let k = digits.len();
    let powers = digits
        .iter()
        .map(|d| format!("{d}^{k}"))
        .collect::<Vec<_>>()
        .join(" + ");
    format!("{n} is an Armstrong number because {powers} = {n}")
}

/// Decimal digits of `|n|`, most significant first.
fn digits(n: i64) -> Vec<u8> {
    n.unsigned_abs()
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    #[case(97)]
    #[case(7919)]
    #[case(2_147_483_647)]
    fn primes(#[case] n: i64) {
        assert!(is_prime(n));
    }

    #[rstest]
    #[case(i64::MIN)]
    #[case(-7)]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    #[case(9)]
    #[case(153)]
    #[case(7917)]
    fn non_primes(#[case] n: i64) {
        assert!(!is_prime(n));
    }

    #[test]
    fn primality_matches_divisor_search() {
        for n in 2..2_000_i64 {
            let has_divisor = (2..n).take_while(|d| d * d <= n).any(|d| n % d == 0);
            assert_eq!(is_prime(n), !has_divisor, "n = {n}");
        }
    }

    #[rstest]
    #[case(6, true)]
    #[case(28, true)]
    #[case(496, true)]
    #[case(8128, true)]
    #[case(33_550_336, true)]
    #[case(1, false)]
    #[case(7, false)]
    #[case(12, false)]
    #[case(0, false)]
    #[case(-6, false)]
    fn perfection(#[case] n: i64, #[case] expected: bool) {
        assert_eq!(is_perfect(n), expected);
    }

    #[test]
    fn perfection_matches_linear_scan() {
        for n in 1..3_000_i64 {
            let sum: i64 = (1..n).filter(|i| n % i == 0).sum();
            assert_eq!(is_perfect(n), sum == n, "n = {n}");
        }
    }

    #[rstest]
    #[case(0, true)]
    #[case(9, true)]
    #[case(153, true)]
    #[case(370, true)]
    #[case(9474, true)]
    #[case(-153, true)]
    #[case(10, false)]
    #[case(100, false)]
    #[case(9475, false)]
    #[case(i64::MAX, false)]
    #[case(i64::MIN, false)]
    fn armstrong(#[case] n: i64, #[case] expected: bool) {
        assert_eq!(is_armstrong(n), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(123, 6)]
    #[case(-123, 6)]
    #[case(153, 9)]
    #[case(i64::MIN, 89)]
    fn digit_sums(#[case] n: i64, #[case] expected: u32) {
        assert_eq!(digit_sum(n), expected);
    }

    #[rstest]
    #[case(153, vec![Property::Armstrong, Property::Odd])]
    #[case(8, vec![Property::Armstrong, Property::Even])]
    #[case(10, vec![Property::Even])]
    #[case(11, vec![Property::Odd])]
    #[case(-3, vec![Property::Armstrong, Property::Odd])]
    fn property_tags_are_ordered(#[case] n: i64, #[case] expected: Vec<Property>) {
        assert_eq!(properties(n), expected);
    }

    #[test]
    fn armstrong_fact_lists_every_digit() {
        assert_eq!(
            fun_fact(9474, true),
            "9474 is an Armstrong number because 9^4 + 4^4 + 7^4 + 4^4 = 9474"
        );
    }

    #[test]
    fn classification_of_153() {
        let c = Classification::new(Number::Integer(153), "fact".into());
        assert!(!c.is_prime);
        assert!(!c.is_perfect);
        assert_eq!(c.properties, vec![Property::Armstrong, Property::Odd]);
        assert_eq!(c.digit_sum, 9);

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "number": 153,
                "is_prime": false,
                "is_perfect": false,
                "properties": ["armstrong", "odd"],
                "digit_sum": 9,
                "fun_fact": "fact",
            })
        );
    }

    #[test]
    fn classification_uses_integer_part_of_decimals() {
        let c = Classification::new(Number::Decimal(7.9), String::new());
        assert_eq!(c.number, Number::Decimal(7.9));
        assert!(c.is_prime);
        assert_eq!(c.digit_sum, 7);
        assert_eq!(c.properties, vec![Property::Armstrong, Property::Odd]);
    }
}
