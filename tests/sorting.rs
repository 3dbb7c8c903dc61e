// Array sorting integration suite.
//
// Invariants exercised:
// - Output is non-decreasing under the comparator.
// - Output is a permutation of the input (same multiset).
// - Merge sort alone keeps equal elements in input order.
use chained_ds::sorting::is_sorted_by;
use chained_ds::{merge_sort, quick_sort, selection_sort, SortAlgorithm};
use std::cmp::Ordering;
use std::thread;

#[derive(Clone, Debug, PartialEq)]
struct Product {
    sku: String,
    price_cents: u32,
    stock: u32,
}

fn catalog() -> Vec<Product> {
    [
        ("P-100", 1999, 4),
        ("P-101", 499, 12),
        ("P-102", 1999, 0),
        ("P-103", 25, 7),
        ("P-104", 499, 3),
        ("P-105", 8800, 12),
    ]
    .into_iter()
    .map(|(sku, price_cents, stock)| Product {
        sku: sku.to_string(),
        price_cents,
        stock,
    })
    .collect()
}

fn by_price(a: &Product, b: &Product) -> Ordering {
    a.price_cents.cmp(&b.price_cents)
}

fn sorted_skus(v: &[Product]) -> Vec<&str> {
    let mut skus: Vec<&str> = v.iter().map(|p| p.sku.as_str()).collect();
    skus.sort_unstable();
    skus
}

// Test: every algorithm orders records by a field comparator.
// Verifies: ordering and permutation on a struct without `Ord`.
#[test]
fn records_sort_by_field() {
    let original = catalog();
    for algo in SortAlgorithm::ALL {
        let mut v = original.clone();
        algo.sort(&mut v, by_price);
        assert!(is_sorted_by(&v, by_price), "{algo}: {v:?}");
        assert_eq!(sorted_skus(&v), sorted_skus(&original), "{algo}");
    }
}

// Test: merge sort stability on records.
// Verifies: equal prices keep catalog order.
#[test]
fn merge_sort_keeps_catalog_order_for_equal_prices() {
    let mut v = catalog();
    merge_sort(&mut v, by_price);
    let skus: Vec<&str> = v.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["P-103", "P-101", "P-104", "P-100", "P-102", "P-105"]);
}

// Test: comparator direction is the caller's choice.
#[test]
fn descending_by_stock() {
    let by_stock_desc = |a: &Product, b: &Product| b.stock.cmp(&a.stock);
    let mut a = catalog();
    let mut b = catalog();
    let mut c = catalog();
    selection_sort(&mut a, by_stock_desc);
    merge_sort(&mut b, by_stock_desc);
    quick_sort(&mut c, by_stock_desc);
    for v in [&a, &b, &c] {
        let stocks: Vec<u32> = v.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![12, 12, 7, 4, 3, 0]);
    }
}

// Test: adversarial inputs for the last-element pivot.
// Verifies: sorted, reversed and constant inputs still sort correctly.
#[test]
fn quick_sort_worst_case_inputs() {
    let n = 2_000;
    let mut ascending: Vec<u32> = (0..n).collect();
    let mut descending: Vec<u32> = (0..n).rev().collect();
    let mut constant = vec![7u32; n as usize];
    quick_sort(&mut ascending, u32::cmp);
    quick_sort(&mut descending, u32::cmp);
    quick_sort(&mut constant, u32::cmp);
    assert_eq!(ascending, (0..n).collect::<Vec<_>>());
    assert_eq!(descending, (0..n).collect::<Vec<_>>());
    assert!(constant.iter().all(|&x| x == 7));
}

// Test: the selection sort example.
#[test]
fn selection_sort_example() {
    let mut v = [5, 3, 1, 4, 2];
    selection_sort(&mut v, |a: &i32, b: &i32| a.cmp(b));
    assert_eq!(v, [1, 2, 3, 4, 5]);
}

// Test: quick sort on sorted and reversed input inside a 64 KiB stack.
// Assumes: every partition is maximally unbalanced for these inputs.
// Verifies: recursion depth does not grow with n.
#[test]
fn quick_sort_sorted_input_fits_small_stack() {
    let n = 10_000u32;
    let worker = thread::Builder::new()
        .stack_size(64 * 1024)
        .spawn(move || {
            let mut ascending: Vec<u32> = (0..n).collect();
            let mut descending: Vec<u32> = (0..n).rev().collect();
            quick_sort(&mut ascending, u32::cmp);
            quick_sort(&mut descending, u32::cmp);
            (ascending, descending)
        })
        .unwrap();
    let (ascending, descending) = worker.join().unwrap();
    let expected: Vec<u32> = (0..n).collect();
    assert_eq!(ascending, expected);
    assert_eq!(descending, expected);
}

// A key type with no Clone impl.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Ticket(u32);

// Test: the in-place sorts accept non-Clone elements.
// Verifies: selection and quick sort order by the comparator without copying.
#[test]
fn in_place_sorts_take_non_clone_elements() {
    let mut a: Vec<Ticket> = [3, 1, 2, 1].into_iter().map(Ticket).collect();
    let mut b: Vec<Ticket> = [9, 4, 7].into_iter().map(Ticket).collect();
    selection_sort(&mut a, Ticket::cmp);
    quick_sort(&mut b, Ticket::cmp);
    assert_eq!(a, [1, 1, 2, 3].map(Ticket));
    assert_eq!(b, [4, 7, 9].map(Ticket));
}
