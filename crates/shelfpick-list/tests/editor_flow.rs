//! End-to-end editing flows through the public API: picking products into a
//! placeholder row, reordering with expansion flags, and editing discounts.

use rust_decimal::Decimal;
use shelfpick_core::{Discount, DiscountField, DiscountType, ProductEntry, VariantEntry};
use shelfpick_list::{
    DragGesture, HoverBounds, ListOp, ListStore, PageOutcome, PickerSession, ProductList,
};

fn product(id: &str, variants: &[(&str, &str)]) -> ProductEntry {
    ProductEntry {
        id: id.to_string(),
        title: format!("Product {id}"),
        image: None,
        variants: variants
            .iter()
            .map(|(vid, price)| VariantEntry {
                id: (*vid).to_string(),
                title: (*vid).to_uppercase(),
                price: (*price).to_string(),
                discount_override: None,
            })
            .collect(),
        discount: Discount::default(),
    }
}

fn ids(list: &ProductList) -> Vec<&str> {
    list.entries().iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn picker_commit_replaces_placeholder_row() {
    let mut store = ListStore::default();

    let (mut session, first) = PickerSession::open(0);
    let outcome = session.apply_page(
        &first,
        vec![
            product("P1", &[("a", "10.00"), ("b", "12.00")]),
            product("P2", &[("c", "8.00")]),
        ],
    );
    assert_eq!(outcome, PageOutcome::Appended { added: 2 });
    session.toggle_result(0);
    session.toggle_result(1);

    assert!(store.apply(ListOp::from(session.commit())));
    let snap = store.snapshot();
    assert_eq!(ids(&snap), vec!["P1", "P2"]);
    assert_eq!(snap.entries()[0].variants.len(), 2);
}

#[test]
fn expansion_flag_follows_dragged_row() {
    let mut store = ListStore::new(ProductList::new());
    store.apply_all([
        ListOp::InsertPlaceholder,
        ListOp::InsertPlaceholder,
        ListOp::InsertPlaceholder,
    ]);
    store.apply(ListOp::ReplaceAt {
        position: 0,
        products: vec![product("P0", &[("x", "1.00")])],
    });
    store.apply(ListOp::ReplaceAt {
        position: 1,
        products: vec![product("P1", &[("y", "1.00"), ("z", "2.00")])],
    });
    store.apply(ListOp::ReplaceAt {
        position: 2,
        products: vec![product("P2", &[("w", "1.00")])],
    });
    store.apply(ListOp::ToggleExpanded { position: 1 });

    // Drag P0 down over the last row, past its midpoint.
    let bounds = HoverBounds {
        top: 80.0,
        bottom: 120.0,
    };
    let mut drag = DragGesture::start(0);
    let op = drag.hover(2, 110.0, bounds).unwrap();
    assert!(store.apply(op));

    let snap = store.snapshot();
    assert_eq!(ids(&snap), vec!["P1", "P2", "P0"]);
    assert!(snap.is_expanded(0));
    assert_eq!(snap.expansion().keys().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn discount_edits_flow_to_prices() {
    let mut list = ProductList::with_placeholder();
    list.replace_at(0, vec![product("P", &[("a", "20.00"), ("b", "40.00")])]);

    list.apply(ListOp::UpdateDiscount {
        position: 0,
        change: DiscountField::Kind(Some(DiscountType::Percentage)),
    });
    list.apply(ListOp::UpdateDiscount {
        position: 0,
        change: DiscountField::Value(Some(Decimal::new(25, 0))),
    });
    list.apply(ListOp::UpdateVariantDiscount {
        product: 0,
        variant: 1,
        change: DiscountField::Kind(Some(DiscountType::Flat)),
    });

    let entry = &list.entries()[0];
    assert_eq!(entry.discounted_price(0), Some(Decimal::new(1500, 2)));
    // Override seeded from the product discount, then switched to flat 25.
    assert_eq!(entry.discounted_price(1), Some(Decimal::new(1500, 2)));

    list.apply(ListOp::ClearVariantDiscount {
        product: 0,
        variant: 1,
    });
    assert_eq!(list.entries()[0].discounted_price(1), Some(Decimal::new(3000, 2)));
}

#[test]
fn last_variant_cannot_be_removed() {
    let mut list = ProductList::with_placeholder();
    list.replace_at(0, vec![product("P", &[("a", "1.00"), ("b", "1.00")])]);
    assert!(list.apply(ListOp::RemoveVariant {
        product: 0,
        variant: 0
    }));
    assert!(!list.apply(ListOp::RemoveVariant {
        product: 0,
        variant: 0
    }));
    assert_eq!(list.entries()[0].variants[0].id, "b");
}
