//! Property-based tests for the built-in operations and the history store.

use proptest::prelude::*;
use rust_decimal::Decimal;

use deccalc_core::history::{HistoryRecord, HistoryStore};
use deccalc_core::registry::{OperationRegistry, OperationSource};

fn execute(name: &str, a: Decimal, b: Decimal) -> Decimal {
    let registry = OperationRegistry::discover();
    registry
        .lookup(name)
        .unwrap()
        .execute(a, b)
        .unwrap()
}

/// Decimals with up to 4 fractional digits and a mantissa well inside range.
fn decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000, 0u32..=4).prop_map(|(m, s)| Decimal::new(m, s))
}

fn record() -> impl Strategy<Value = HistoryRecord> {
    (
        prop::sample::select(vec!["add", "subtract", "multiply", "square", "mean", "median"]),
        decimal(),
        decimal(),
        decimal(),
    )
        .prop_map(|(op, a, b, r)| HistoryRecord::new(op, a, b, r))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Addition is exact: subtracting an operand recovers the other.
    #[test]
    fn add_is_exact(a in decimal(), b in decimal()) {
        let sum = execute("add", a, b);
        prop_assert_eq!(sum, a + b);
        prop_assert_eq!(execute("subtract", sum, b), a);
    }

    /// Mean and median agree for two operands.
    #[test]
    fn mean_equals_median(a in decimal(), b in decimal()) {
        let mean = execute("mean", a, b);
        prop_assert_eq!(mean, execute("median", a, b));
        prop_assert_eq!(mean * Decimal::TWO, a + b);
    }

    /// Square depends only on the first operand.
    #[test]
    fn square_ignores_second(a in decimal(), b1 in decimal(), b2 in decimal()) {
        prop_assert_eq!(execute("square", a, b1), execute("square", a, b2));
    }

    /// Deleting index i removes exactly that record and shifts the rest.
    #[test]
    fn delete_compacts(records in prop::collection::vec(record(), 1..12), pick in any::<prop::sample::Index>()) {
        let mut store = HistoryStore::new();
        for r in &records {
            store.append(r.clone());
        }
        let i = pick.index(records.len());
        store.delete(i).unwrap();

        let mut expected = records.clone();
        expected.remove(i);
        prop_assert_eq!(store.all(), expected.as_slice());
    }

    /// Save, clear, load reproduces the exact sequence.
    #[test]
    fn save_load_round_trip(records in prop::collection::vec(record(), 0..12)) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let mut store = HistoryStore::new();
        for r in &records {
            store.append(r.clone());
        }
        store.save(&path).unwrap();
        store.clear();
        store.load(&path).unwrap();
        prop_assert_eq!(store.all(), records.as_slice());
    }
}
